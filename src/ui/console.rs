// ============================================================================
// Textes console
// ============================================================================
// Prompts, séparateurs et messages d'erreur affichés à l'utilisateur.
// Ces textes font partie du contrat observable du programme.
// ============================================================================

use crate::models::{PriceQuote, Symbol};

/// Séparateur affiché avant chaque nouvelle saisie de symbole
pub const SESSION_SEPARATOR: &str = "=============================================================";

/// Séparateur affiché avant chaque jour (résumé) ou chaque chandelle (détaillé)
pub const DAY_SEPARATOR: &str = "-------------------------------------------------------------";

pub const SYMBOL_PROMPT: &str = "Enter a coin symbol : ";
pub const DAY_COUNT_PROMPT: &str = "Enter the number of days to simulate: ";
pub const DETAILED_PROMPT: &str = "Do you want the indicators data? (yes/no): ";
pub const INVALID_DAY_COUNT: &str = "Invalid input. Please enter a number.";

/// Affiche un prix ou un volume : toujours au moins une décimale
///
/// CONCEPT RUST : {:?} sur f64
/// - Display donne "69990", Debug donne "69990.0"
/// - Les valeurs extrêmes passent en notation exponentielle ("1e-7")
pub fn format_decimal(value: f64) -> String {
    format!("{:?}", value)
}

/// "Current price of btc: $43250.12"
pub fn current_price_line(symbol: &Symbol, quote: &PriceQuote) -> String {
    format!("Current price of {}: ${}", symbol, format_decimal(quote.price))
}

/// "Day 3: "
pub fn day_header(day: u32) -> String {
    format!("Day {}: ", day)
}

pub fn price_error(symbol: &Symbol) -> String {
    format!("Error fetching price for {}", symbol)
}

pub fn history_error(symbol: &Symbol) -> String {
    format!(
        "Error fetching historical data for {}. Please ensure the coin symbol is correct.",
        symbol
    )
}
