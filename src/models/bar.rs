// ============================================================================
// Structure : Bar (chandelle Binance)
// ============================================================================
// Représente une chandelle japonaise (candlestick) telle que renvoyée par
// l'endpoint /klines de Binance, avec toutes ses statistiques
//
// CONCEPTS RUST :
// 1. i64 : timestamps en millisecondes epoch (comme l'API)
// 2. f64 : floating point 64 bits pour les prix et volumes
// 3. u64 : unsigned 64 bits pour le nombre de trades (toujours positif)
// ============================================================================

use chrono::{DateTime, Duration, Utc};

/// Intervalle de temps entre les chandelles
///
/// CONCEPT : deux granularités seulement
/// - D1 : une chandelle par jour (mode résumé)
/// - H1 : une chandelle par heure, jusqu'à 24 par jour (mode détaillé)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    /// 1 heure
    H1,
    /// 1 jour (daily)
    D1,
}

impl Interval {
    /// Convertit l'intervalle en string pour l'API Binance
    ///
    /// CONCEPT RUST : &'static str
    /// - Retourne une string littérale (dans le binaire)
    /// - Pas d'allocation, très efficace
    pub fn to_binance_string(&self) -> &'static str {
        match self {
            Interval::H1 => "1h",
            Interval::D1 => "1d",
        }
    }
}

/// Fenêtre d'une journée, en millisecondes epoch
///
/// La fenêtre se termine N jours avant "maintenant" et dure exactement 24h.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl DayWindow {
    /// Calcule la fenêtre qui se termine `days_ago` jours avant `now`
    ///
    /// La fin est tronquée à la seconde (puis convertie en millisecondes),
    /// le début est exactement un jour plus tôt.
    ///
    /// CONCEPT RUST : injection du "now"
    /// - L'appelant passe Utc::now(), les tests passent une date fixe
    pub fn ending_days_ago(now: DateTime<Utc>, days_ago: u32) -> Self {
        let end = now - Duration::days(i64::from(days_ago));
        let end_ms = end.timestamp() * 1000;
        let start_ms = end_ms - Duration::days(1).num_milliseconds();

        Self { start_ms, end_ms }
    }
}

/// Une chandelle Binance avec toutes ses statistiques
///
/// Snapshot immuable d'un intervalle de temps. L'ordre dans une réponse
/// de l'API est chronologique.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Heure d'ouverture (ms epoch)
    pub open_time: i64,

    /// Prix d'ouverture (Open)
    pub open: f64,

    /// Prix le plus haut (High)
    pub high: f64,

    /// Prix le plus bas (Low)
    pub low: f64,

    /// Prix de clôture (Close)
    pub close: f64,

    /// Volume échangé (en actif de base)
    pub volume: f64,

    /// Heure de clôture (ms epoch)
    pub close_time: i64,

    /// Volume échangé en devise de cotation
    pub quote_asset_volume: f64,

    /// Nombre de trades sur l'intervalle
    pub number_of_trades: u64,

    /// Volume acheté par les takers (actif de base)
    pub taker_buy_base_volume: f64,

    /// Volume acheté par les takers (devise de cotation)
    pub taker_buy_quote_volume: f64,

    /// Champ inutilisé renvoyé par Binance, conservé tel quel
    pub ignore: String,
}

// ============================================================================
// Tests unitaires
// ============================================================================
