// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod ticker; // Symbole saisi + prix courant (fichier ticker.rs)
pub mod bar;    // Chandelles Binance, intervalles, fenêtres (fichier bar.rs)

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use cryptosim::models::bar::Bar;
// On peut faire : use cryptosim::models::Bar;
pub use ticker::{PriceQuote, Symbol};
pub use bar::{Bar, DayWindow, Interval};
