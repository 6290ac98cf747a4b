// ============================================================================
// CryptoSim - Replay de l'historique de prix Binance
// ============================================================================
// Programme console interactif :
// 1. Demande un symbole (ex: BTC) et affiche son prix courant
// 2. Demande un nombre de jours et rejoue les chandelles de chaque jour
//
// CONCEPTS RUST CLÉS :
// 1. Runtime current_thread : tout s'exécute sur le thread principal
// 2. Async dans sync : block_on() pour la session (appels API async)
// 3. Logs vers fichier : stdout est réservé à la console utilisateur
// ============================================================================

use std::io;

use anyhow::{Context, Result};
use tracing::{error, info};

use cryptosim::api::BinanceClient;
use cryptosim::app::App;
use cryptosim::config::Config;

// ============================================================================
// Logging
// ============================================================================
// CONCEPT : Logs dans un fichier, jamais sur stdout
// - La sortie console fait partie du contrat du programme
// - Rotation quotidienne automatique des logs
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// CONCEPT RUST : Tracing subscriber
/// - Registry : point central des logs
/// - Layer : transforme et route les logs
/// - EnvFilter : filtre par niveau (RUST_LOG env var)
/// - RollingFileAppender : rotation automatique
///
/// # Utilisation
/// ```bash
/// # Voir les logs en temps réel
/// tail -f ~/.local/share/cryptosim/logs/cryptosim.log
///
/// # Contrôler le niveau de log
/// RUST_LOG=cryptosim=trace cargo run
/// ```
fn init_logging(config: &Config) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = &config.log_dir;

    // Crée le répertoire s'il n'existe pas
    std::fs::create_dir_all(log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "cryptosim.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender) // Écrit dans le fichier
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .with(
            // Par défaut : debug pour cryptosim, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cryptosim=debug,info".into()),
        )
        .try_init()
        .context("Échec de l'initialisation du subscriber tracing")?;

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let config = Config::default();

    // Si les logs ne peuvent pas être initialisés, on continue sans
    init_logging(&config).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!(base_url = %config.api_base_url, quote = %config.quote_asset, "CryptoSim starting up");

    let client = BinanceClient::with_config(config)?;

    // CONCEPT : runtime mono-thread
    // - Les jours sont fetchés un par un, aucune tâche en parallèle
    // - block_on() bloque le thread principal jusqu'à la fin de la session
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Échec de la création du runtime tokio")?;

    let stdin = io::stdin();
    let mut app = App::new(client, stdin.lock(), io::stdout());
    let result = runtime.block_on(app.run());

    match &result {
        Ok(_) => info!("Session ended normally"),
        Err(e) => error!(error = ?e, "Session ended with error"),
    }

    result
}
