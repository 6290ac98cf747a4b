// ============================================================================
// API Client : Binance
// ============================================================================
// Récupère le prix courant et les chandelles historiques depuis l'API REST
// publique de Binance (pas d'authentification nécessaire)
//
// Endpoints utilisés :
// - GET /ticker/price?symbol=BTCUSDT
// - GET /klines?symbol=BTCUSDT&interval=1d&startTime=...&endTime=...
// ============================================================================

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use tracing::{debug, error, info, instrument};

use crate::api::MarketSource;
use crate::config::Config;
use crate::models::{Bar, DayWindow, Interval, PriceQuote, Symbol};

// ============================================================================
// Structures pour parser la réponse JSON de Binance
// ============================================================================
// Binance renvoie les prix et volumes sous forme de strings décimales
// ("43250.12000000"), on les convertit en f64 pendant la désérialisation
// ============================================================================

/// Réponse de /ticker/price
///
/// Exemple : {"symbol":"BTCUSDT","price":"43250.12000000"}
#[derive(Debug, Deserialize)]
struct TickerPriceResponse {
    #[serde(deserialize_with = "deserialize_decimal")]
    price: f64,
}

/// Une ligne de /klines : tableau JSON de 12 éléments
///
/// CONCEPT RUST : tuple struct + serde
/// - Serde désérialise un tableau JSON dans un tuple struct, champ par champ
/// - L'ordre des champs est celui de l'API Binance
#[derive(Debug, Deserialize)]
struct KlineRow(
    i64, // open time
    #[serde(deserialize_with = "deserialize_decimal")] f64, // open
    #[serde(deserialize_with = "deserialize_decimal")] f64, // high
    #[serde(deserialize_with = "deserialize_decimal")] f64, // low
    #[serde(deserialize_with = "deserialize_decimal")] f64, // close
    #[serde(deserialize_with = "deserialize_decimal")] f64, // volume
    i64, // close time
    #[serde(deserialize_with = "deserialize_decimal")] f64, // quote asset volume
    u64, // number of trades
    #[serde(deserialize_with = "deserialize_decimal")] f64, // taker buy base volume
    #[serde(deserialize_with = "deserialize_decimal")] f64, // taker buy quote volume
    #[serde(deserialize_with = "deserialize_raw_text")] String, // ignore
);

impl From<KlineRow> for Bar {
    fn from(row: KlineRow) -> Self {
        Bar {
            open_time: row.0,
            open: row.1,
            high: row.2,
            low: row.3,
            close: row.4,
            volume: row.5,
            close_time: row.6,
            quote_asset_volume: row.7,
            number_of_trades: row.8,
            taker_buy_base_volume: row.9,
            taker_buy_quote_volume: row.10,
            ignore: row.11,
        }
    }
}

/// Nombre décimal : string ("0.01634790") ou nombre JSON
#[derive(Deserialize)]
#[serde(untagged)]
enum Decimal {
    Text(String),
    Number(f64),
}

fn deserialize_decimal<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Decimal::deserialize(deserializer)? {
        Decimal::Text(text) => text.trim().parse::<f64>().map_err(serde::de::Error::custom),
        Decimal::Number(value) => Ok(value),
    }
}

/// Garde la valeur brute en texte, quel que soit son type JSON
fn deserialize_raw_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    })
}

// ============================================================================
// Client Binance
// ============================================================================

/// Client HTTP pour l'API de marché Binance
///
/// CONCEPT RUST : réutilisation du client reqwest
/// - reqwest::Client garde un pool de connexions en interne
/// - On le crée une seule fois, chaque requête construit la sienne
pub struct BinanceClient {
    client: reqwest::Client,
    config: Config,
}

impl BinanceClient {
    /// Crée un client avec la configuration par défaut (api.binance.com)
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Crée un client avec une configuration spécifique
    pub fn with_config(config: Config) -> Result<Self> {
        debug!(base_url = %config.api_base_url, "Creating HTTP client");
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Échec de la création du client HTTP")?;

        Ok(Self { client, config })
    }

    /// URL de /ticker/price pour un symbole
    fn ticker_price_url(&self, symbol: &Symbol) -> String {
        format!(
            "{}/ticker/price?symbol={}",
            self.config.api_base_url,
            symbol.pair(&self.config.quote_asset)
        )
    }

    /// URL de /klines pour un symbole, un intervalle et une fenêtre
    fn klines_url(&self, symbol: &Symbol, interval: Interval, window: DayWindow) -> String {
        format!(
            "{}/klines?symbol={}&interval={}&startTime={}&endTime={}",
            self.config.api_base_url,
            symbol.pair(&self.config.quote_asset),
            interval.to_binance_string(),
            window.start_ms,
            window.end_ms
        )
    }

    /// Envoie un GET et retourne le corps de la réponse
    ///
    /// Toute réponse non-2xx est une erreur (Binance renvoie alors un objet
    /// {"code":..,"msg":..} qu'on garde dans le message d'erreur)
    async fn get_body(&self, url: &str) -> Result<String> {
        debug!(url = %url, "Sending HTTP request to Binance");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Échec de la requête HTTP vers Binance")?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        let body = response
            .text()
            .await
            .context("Échec de la lecture de la réponse Binance")?;

        if !status.is_success() {
            error!(status = %status, body = %body, "Binance returned error status");
            anyhow::bail!("Binance a retourné une erreur : HTTP {} ({})", status, body);
        }

        Ok(body)
    }
}

#[async_trait]
impl MarketSource for BinanceClient {
    #[instrument(skip(self, symbol), fields(symbol = %symbol))]
    async fn current_price(&self, symbol: &Symbol) -> Result<PriceQuote> {
        let url = self.ticker_price_url(symbol);
        let body = self.get_body(&url).await?;
        let quote = parse_ticker_price(&body)?;

        info!(price = quote.price, "Fetched current price");
        Ok(quote)
    }

    #[instrument(skip(self, symbol, window), fields(symbol = %symbol, start = window.start_ms, end = window.end_ms))]
    async fn bars(&self, symbol: &Symbol, interval: Interval, window: DayWindow) -> Result<Vec<Bar>> {
        let url = self.klines_url(symbol, interval, window);
        let body = self.get_body(&url).await?;
        let bars = parse_klines(&body)?;

        info!(bars = bars.len(), "Fetched historical bars");
        Ok(bars)
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse la réponse JSON de /ticker/price
pub fn parse_ticker_price(body: &str) -> Result<PriceQuote> {
    let response: TickerPriceResponse =
        serde_json::from_str(body).context("Échec du parsing JSON du prix Binance")?;

    Ok(PriceQuote::new(response.price))
}

/// Parse la réponse JSON de /klines (tableau de tableaux de 12 éléments)
pub fn parse_klines(body: &str) -> Result<Vec<Bar>> {
    let rows: Vec<KlineRow> =
        serde_json::from_str(body).context("Échec du parsing JSON des chandelles Binance")?;

    Ok(rows.into_iter().map(Bar::from).collect())
}

// ============================================================================
// Tests unitaires
// ============================================================================
