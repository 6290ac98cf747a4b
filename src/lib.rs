// ============================================================================
// CryptoSim - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;    // Client API Binance
pub mod app;    // Session interactive
pub mod config; // Configuration (URL de l'API, devise de cotation, logs)
pub mod models; // Structures de données
pub mod ui;     // Affichage console
