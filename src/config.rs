// ============================================================================
// Structure : Config
// ============================================================================
// Paramètres de l'application. Pas de fichier de config, pas de flags CLI :
// tout est fixé par Config::default(). Seul RUST_LOG agit sur les logs.
// ============================================================================

use std::path::PathBuf;

/// URL de base de l'API REST Binance (v3)
pub const BINANCE_API_URL: &str = "https://api.binance.com/api/v3";

/// Devise de cotation (stablecoin indexé sur l'USD)
pub const QUOTE_ASSET: &str = "USDT";

/// Configuration de l'application
#[derive(Debug, Clone)]
pub struct Config {
    /// URL de base de l'API (sans slash final)
    pub api_base_url: String,

    /// Devise de cotation ajoutée au symbole pour former la paire
    pub quote_asset: String,

    /// User-Agent envoyé avec chaque requête
    pub user_agent: String,

    /// Répertoire des fichiers de logs
    pub log_dir: PathBuf,
}

impl Config {
    /// Remplace l'URL de base de l'API (utile pour pointer vers un mock)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: BINANCE_API_URL.to_string(),
            quote_asset: QUOTE_ASSET.to_string(),
            user_agent: format!("cryptosim/{}", env!("CARGO_PKG_VERSION")),
            log_dir: default_log_dir(),
        }
    }
}

/// Répertoire des logs :
/// - Linux/WSL : ~/.local/share/cryptosim/logs
/// - macOS : ~/Library/Application Support/cryptosim/logs
/// - Windows : C:\Users\<user>\AppData\Local\cryptosim\logs
///
/// Si le répertoire de données n'est pas connu, on retombe sur ./logs
fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("cryptosim").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "https://api.binance.com/api/v3");
        assert_eq!(config.quote_asset, "USDT");
        assert!(config.log_dir.ends_with("logs"));
    }

    #[test]
    fn test_with_api_base_url_strips_trailing_slash() {
        let config = Config::default().with_api_base_url("http://127.0.0.1:8080/api/v3/");
        assert_eq!(config.api_base_url, "http://127.0.0.1:8080/api/v3");
    }
}
