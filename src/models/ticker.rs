// ============================================================================
// Structures : Symbol et PriceQuote
// ============================================================================
// Représente un symbole crypto (ex: "BTC") et son prix courant
//
// CONCEPTS RUST :
// 1. Newtype : Symbol encapsule le texte saisi par l'utilisateur
//    - Le texte original est gardé pour l'affichage
//    - La paire tradée (ex: "BTCUSDT") est calculée à la demande
//
// 2. String vs &str :
//    - String : owned string (possède la mémoire, heap allocated)
//    - &str : borrowed string slice (référence, ne possède pas)
//    - On utilise String ici car le Symbol possède ses données
// ============================================================================

use std::fmt;

/// Symbole d'un actif tel que saisi par l'utilisateur (ex: "btc", "ETH")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Texte saisi, sans les espaces autour
    raw: String,
}

impl Symbol {
    /// Crée un symbole à partir de la saisie utilisateur
    ///
    /// Retourne None si la saisie est vide (après trim)
    pub fn parse(input: &str) -> Option<Self> {
        let raw = input.trim();
        if raw.is_empty() {
            return None;
        }

        Some(Self {
            raw: raw.to_string(),
        })
    }

    /// Le symbole tel que saisi (utilisé dans tous les messages console)
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Construit la paire tradée : symbole en majuscules + devise de cotation
    ///
    /// # Exemple
    /// `Symbol::parse("btc")?.pair("USDT")` -> `"BTCUSDT"`
    pub fn pair(&self, quote_asset: &str) -> String {
        format!("{}{}", self.raw.to_uppercase(), quote_asset)
    }
}

/// CONCEPT RUST : trait Display
/// - Permet d'utiliser {} dans format!/println!
/// - Affiche le symbole exactement comme saisi
impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Prix courant d'un symbole, valable uniquement au moment du fetch
///
/// Aucun timestamp n'est conservé : la valeur est affichée puis oubliée.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    pub price: f64,
}

impl PriceQuote {
    pub fn new(price: f64) -> Self {
        Self { price }
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
