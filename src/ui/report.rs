// ============================================================================
// Rendu : chandelles historiques
// ============================================================================
// Formatte une chandelle Binance pour la console, en deux variantes :
// - Résumé : une ligne, paires "Label: valeur" séparées par des tabulations
// - Détaillé : un bloc multi-lignes précédé d'un séparateur
//
// Les fonctions retournent des String (pas d'I/O ici), la session se
// charge de les écrire sur la sortie.
// ============================================================================

use std::fmt::Display;

use chrono::TimeZone;

use crate::models::Bar;
use crate::ui::console::{format_decimal, DAY_SEPARATOR};

/// Format de date du mode résumé (ex: 09-03-2024)
pub const SUMMARY_DATE_FORMAT: &str = "%d-%m-%Y";

/// Format de date du mode détaillé (ex: 09-03-2024 14:00:00)
pub const DETAILED_DATE_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Labels des champs, dans l'ordre d'affichage
pub const FIELD_LABELS: [&str; 13] = [
    "Date",
    "Open time",
    "Open price",
    "High price",
    "Low price",
    "Close price",
    "Volume",
    "Close time",
    "Quote asset volume",
    "Number of trades",
    "Taker buy base asset volume",
    "Taker buy quote asset volume",
    "Ignore",
];

/// Convertit un timestamp (ms epoch) en date dans le fuseau `tz`
///
/// CONCEPT RUST : générique sur TimeZone
/// - En production on passe chrono::Local (heure locale de la machine)
/// - Dans les tests on passe Utc pour avoir un résultat déterministe
///
/// Si le timestamp n'est pas représentable, on affiche la valeur brute.
pub fn format_date<Tz>(timestamp_ms: i64, tz: &Tz, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match tz.timestamp_millis_opt(timestamp_ms).earliest() {
        Some(datetime) => datetime.format(pattern).to_string(),
        None => timestamp_ms.to_string(),
    }
}

/// Valeurs de tous les champs de la chandelle, dans l'ordre de FIELD_LABELS
fn field_values(bar: &Bar, date: String) -> [String; 13] {
    [
        date,
        bar.open_time.to_string(),
        format_decimal(bar.open),
        format_decimal(bar.high),
        format_decimal(bar.low),
        format_decimal(bar.close),
        format_decimal(bar.volume),
        bar.close_time.to_string(),
        format_decimal(bar.quote_asset_volume),
        bar.number_of_trades.to_string(),
        format_decimal(bar.taker_buy_base_volume),
        format_decimal(bar.taker_buy_quote_volume),
        bar.ignore.clone(),
    ]
}

/// Ligne du mode résumé : "Date: 09-03-2024\tOpen time: ...\t...Ignore: 0\t"
///
/// Chaque paire est suivie d'une tabulation, y compris la dernière.
pub fn summary_line<Tz>(bar: &Bar, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let date = format_date(bar.open_time, tz, SUMMARY_DATE_FORMAT);

    FIELD_LABELS
        .iter()
        .zip(field_values(bar, date))
        .map(|(label, value)| format!("{}: {}\t", label, value))
        .collect()
}

/// Bloc du mode détaillé : séparateur puis un champ par ligne
///
/// Chaque ligne (séparateur compris) se termine par '\n'.
pub fn detailed_block<Tz>(bar: &Bar, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let date = format_date(bar.open_time, tz, DETAILED_DATE_FORMAT);

    let mut block = format!("{}\n", DAY_SEPARATOR);
    for (label, value) in FIELD_LABELS.iter().zip(field_values(bar, date)) {
        block.push_str(&format!("{}: {}\n", label, value));
    }
    block
}

// ============================================================================
// Tests unitaires
// ============================================================================
