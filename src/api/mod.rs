// ============================================================================
// Module : api
// ============================================================================
// Ce module contient le client API pour récupérer les données de marché
// (prix courant et chandelles historiques) depuis Binance
// ============================================================================

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Bar, DayWindow, Interval, PriceQuote, Symbol};

pub mod binance; // Client API REST Binance

// Re-export du client principal
pub use binance::BinanceClient;

/// Source de données de marché
///
/// CONCEPT RUST : trait + async_trait
/// - La session interactive ne connaît que ce trait
/// - BinanceClient l'implémente pour de vrai, les tests utilisent un mock
/// - #[async_trait] permet d'écrire des `async fn` dans un trait
#[async_trait]
pub trait MarketSource: Send + Sync {
    /// Récupère le prix courant de la paire `<SYMBOLE><QUOTE>`
    async fn current_price(&self, symbol: &Symbol) -> Result<PriceQuote>;

    /// Récupère les chandelles d'une fenêtre d'une journée
    async fn bars(&self, symbol: &Symbol, interval: Interval, window: DayWindow) -> Result<Vec<Bar>>;
}
