// ============================================================================
// Structure : App
// ============================================================================
// Session interactive : demande un symbole, affiche son prix courant, puis
// rejoue les chandelles des N derniers jours, jour par jour.
//
// CONCEPTS RUST :
// 1. Génériques : App ne dépend que de traits (MarketSource, BufRead, Write)
//    - En production : BinanceClient + stdin + stdout
//    - Dans les tests : mock + Cursor + Vec<u8>
// 2. Option pour la fin d'entrée : None = stdin fermé, la session s'arrête
// 3. Les erreurs de fetch sont affichées puis oubliées, seules les erreurs
//    d'I/O console remontent à main()
// ============================================================================

use std::fmt::Display;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::{Local, TimeZone, Utc};
use tracing::{debug, info, instrument, warn};

use crate::api::MarketSource;
use crate::models::{DayWindow, Interval, Symbol};
use crate::ui::console::{
    current_price_line, day_header, history_error, price_error, DAY_COUNT_PROMPT, DAY_SEPARATOR,
    DETAILED_PROMPT, INVALID_DAY_COUNT, SESSION_SEPARATOR, SYMBOL_PROMPT,
};
use crate::ui::{detailed_block, summary_line};

// ============================================================================
// Enum : Mode
// ============================================================================

/// Mode d'affichage des chandelles historiques
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Une chandelle journalière par jour, sur une ligne
    Summary,

    /// Jusqu'à 24 chandelles horaires par jour, un bloc par chandelle
    Detailed,
}

impl Mode {
    /// Interprète la réponse à "Do you want the indicators data?"
    ///
    /// "yes" ou "y" (casse et espaces ignorés) -> Detailed, le reste -> Summary
    pub fn from_answer(answer: &str) -> Self {
        match answer.trim().to_lowercase().as_str() {
            "yes" | "y" => Mode::Detailed,
            _ => Mode::Summary,
        }
    }

    /// Intervalle des chandelles demandées à l'API
    pub fn interval(&self) -> Interval {
        match self {
            Mode::Summary => Interval::D1,
            Mode::Detailed => Interval::H1,
        }
    }
}

// ============================================================================
// Structure : App
// ============================================================================

/// Session interactive
///
/// CONCEPT RUST : paramètre de type par défaut
/// - `Tz = Local` : les dates sont affichées en heure locale par défaut
/// - Les tests utilisent `Utc` pour un affichage déterministe
pub struct App<S, R, W, Tz = Local>
where
    Tz: TimeZone,
{
    /// Source des données de marché
    source: S,

    /// Entrée console (lignes saisies par l'utilisateur)
    input: R,

    /// Sortie console
    output: W,

    /// Fuseau horaire d'affichage des dates
    timezone: Tz,
}

impl<S, R, W> App<S, R, W, Local>
where
    S: MarketSource,
    R: BufRead,
    W: Write,
{
    /// Crée une session qui affiche les dates en heure locale
    pub fn new(source: S, input: R, output: W) -> Self {
        Self::with_timezone(source, input, output, Local)
    }
}

impl<S, R, W, Tz> App<S, R, W, Tz>
where
    S: MarketSource,
    R: BufRead,
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    /// Crée une session avec un fuseau horaire d'affichage spécifique
    pub fn with_timezone(source: S, input: R, output: W, timezone: Tz) -> Self {
        Self {
            source,
            input,
            output,
            timezone,
        }
    }

    /// Boucle principale de la session
    ///
    /// Tourne indéfiniment. Retourne Ok(()) uniquement quand l'entrée est
    /// fermée (EOF), et Err si la console ne peut plus être lue/écrite.
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting interactive session");

        loop {
            writeln!(self.output, "{}", SESSION_SEPARATOR)?;
            let Some(line) = self.prompt(SYMBOL_PROMPT)? else {
                break;
            };

            let Some(symbol) = Symbol::parse(&line) else {
                info!("Empty symbol, prompting again");
                continue;
            };

            let quote = match self.source.current_price(&symbol).await {
                Ok(quote) => quote,
                Err(e) => {
                    warn!(symbol = %symbol, error = ?e, "Failed to fetch current price");
                    writeln!(self.output, "{}", price_error(&symbol))?;
                    continue;
                }
            };
            writeln!(self.output, "{}", current_price_line(&symbol, &quote))?;

            let Some(days) = self.read_day_count()? else {
                break;
            };

            let Some(answer) = self.prompt(DETAILED_PROMPT)? else {
                break;
            };
            let mode = Mode::from_answer(&answer);

            self.replay(&symbol, days, mode).await?;
        }

        info!("Input closed, ending session");
        Ok(())
    }

    /// Rejoue les chandelles des jours 1..=days, strictement dans l'ordre
    ///
    /// Une erreur de fetch pour un jour affiche un message et passe au jour
    /// suivant (pas de retry, pas d'abandon).
    #[instrument(skip(self, symbol), fields(symbol = %symbol))]
    pub async fn replay(&mut self, symbol: &Symbol, days: u32, mode: Mode) -> Result<()> {
        for day in 1..=days {
            if mode == Mode::Summary {
                writeln!(self.output, "{}", DAY_SEPARATOR)?;
                writeln!(self.output, "{}", day_header(day))?;
            }

            let window = DayWindow::ending_days_ago(Utc::now(), day);
            debug!(day, start = window.start_ms, end = window.end_ms, "Fetching day");

            match self.source.bars(symbol, mode.interval(), window).await {
                Ok(bars) => {
                    for bar in &bars {
                        match mode {
                            Mode::Summary => {
                                writeln!(self.output, "{}", summary_line(bar, &self.timezone))?
                            }
                            Mode::Detailed => {
                                write!(self.output, "{}", detailed_block(bar, &self.timezone))?
                            }
                        }
                    }
                }
                Err(e) => {
                    warn!(day, error = ?e, "Failed to fetch historical bars");
                    writeln!(self.output, "{}", history_error(symbol))?;
                }
            }
        }

        self.output.flush().context("Échec de l'écriture sur la console")?;
        Ok(())
    }

    /// Demande un nombre de jours jusqu'à obtenir un entier valide
    ///
    /// Retourne None si l'entrée est fermée.
    fn read_day_count(&mut self) -> Result<Option<u32>> {
        loop {
            let Some(line) = self.prompt(DAY_COUNT_PROMPT)? else {
                return Ok(None);
            };

            // u32 : un nombre négatif est refusé comme une saisie non numérique
            match line.trim().parse::<u32>() {
                Ok(days) => return Ok(Some(days)),
                Err(e) => {
                    debug!(input = %line.trim(), error = %e, "Invalid day count");
                    writeln!(self.output, "{}", INVALID_DAY_COUNT)?;
                }
            }
        }
    }

    /// Affiche un prompt (sans retour à la ligne) et lit une ligne
    ///
    /// Retourne None en fin d'entrée (EOF).
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush().context("Échec de l'écriture sur la console")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Échec de la lecture de l'entrée console")?;

        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use anyhow::anyhow;
    use async_trait::async_trait;
    use mockall::mock;

    use crate::models::{Bar, PriceQuote};
    use crate::ui::report::FIELD_LABELS;

    mock! {
        Source {}

        #[async_trait]
        impl MarketSource for Source {
            async fn current_price(&self, symbol: &Symbol) -> Result<PriceQuote>;
            async fn bars(&self, symbol: &Symbol, interval: Interval, window: DayWindow) -> Result<Vec<Bar>>;
        }
    }

    fn bar(open_time: i64) -> Bar {
        Bar {
            open_time,
            open: 100.5,
            high: 110.25,
            low: 95.0,
            close: 105.75,
            volume: 1234.5,
            close_time: open_time + 3_599_999,
            quote_asset_volume: 130000.5,
            number_of_trades: 42,
            taker_buy_base_volume: 600.25,
            taker_buy_quote_volume: 63000.75,
            ignore: "0".to_string(),
        }
    }

    fn source_with_price(price: f64) -> MockSource {
        let mut source = MockSource::new();
        source
            .expect_current_price()
            .returning(move |_| Ok(PriceQuote::new(price)));
        source
    }

    /// Exécute une session complète sur `input` et retourne la sortie console
    async fn run_session(source: MockSource, input: &str) -> String {
        let mut output = Vec::new();
        {
            let mut app = App::with_timezone(source, Cursor::new(input.as_bytes()), &mut output, Utc);
            app.run().await.unwrap();
        }
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_mode_from_answer() {
        assert_eq!(Mode::from_answer("yes"), Mode::Detailed);
        assert_eq!(Mode::from_answer("Y"), Mode::Detailed);
        assert_eq!(Mode::from_answer(" YES "), Mode::Detailed);
        assert_eq!(Mode::from_answer("no"), Mode::Summary);
        assert_eq!(Mode::from_answer(""), Mode::Summary);
        assert_eq!(Mode::from_answer("yeah"), Mode::Summary);
    }

    #[test]
    fn test_mode_interval() {
        assert_eq!(Mode::Summary.interval(), Interval::D1);
        assert_eq!(Mode::Detailed.interval(), Interval::H1);
    }

    #[tokio::test]
    async fn test_session_ends_on_eof() {
        let output = run_session(MockSource::new(), "").await;
        assert_eq!(output, format!("{}\n{}", SESSION_SEPARATOR, SYMBOL_PROMPT));
    }

    #[tokio::test]
    async fn test_displays_current_price() {
        let output = run_session(source_with_price(43250.5), "btc\n0\nno\n").await;
        assert!(output.contains("Current price of btc: $43250.5\n"));
    }

    #[tokio::test]
    async fn test_zero_price_is_not_an_error() {
        let output = run_session(source_with_price(0.0), "dead\n0\nno\n").await;
        assert!(output.contains("Current price of dead: $0.0\n"));
        assert!(output.contains(DAY_COUNT_PROMPT));
        assert!(!output.contains("Error fetching price"));
    }

    #[tokio::test]
    async fn test_zero_days_produces_no_day_output() {
        // Pas d'expectation sur bars() : tout appel ferait paniquer le mock
        let output = run_session(source_with_price(1.0), "eth\n0\nyes\n").await;
        assert!(!output.contains(DAY_SEPARATOR));
        assert!(!output.contains("Day "));
    }

    #[tokio::test]
    async fn test_price_error_prompts_again() {
        let mut source = MockSource::new();
        source
            .expect_current_price()
            .times(1)
            .returning(|_| Err(anyhow!("HTTP 400")));

        let output = run_session(source, "nope\n").await;
        assert!(output.contains("Error fetching price for nope\n"));
        assert!(!output.contains(DAY_COUNT_PROMPT));
        assert_eq!(output.matches(SYMBOL_PROMPT).count(), 2);
    }

    #[tokio::test]
    async fn test_empty_symbol_skips_fetch() {
        let output = run_session(MockSource::new(), "\n   \n").await;
        assert_eq!(output.matches(SYMBOL_PROMPT).count(), 3);
    }

    #[tokio::test]
    async fn test_negative_day_count_is_rejected() {
        // Pas d'expectation sur bars() : "-3" ne doit déclencher aucun fetch
        let output = run_session(source_with_price(2.5), "sol\n-3\n0\nno\n").await;
        assert_eq!(output.matches(INVALID_DAY_COUNT).count(), 1);
        assert_eq!(output.matches(DAY_COUNT_PROMPT).count(), 2);
        assert!(output.contains(DETAILED_PROMPT));
    }

    #[tokio::test]
    async fn test_invalid_day_count_prompts_again() {
        let mut source = source_with_price(2.5);
        source
            .expect_bars()
            .times(2)
            .returning(|_, _, _| Ok(Vec::new()));

        let output = run_session(source, "sol\nabc\n-1\n2\nno\n").await;
        assert_eq!(output.matches(INVALID_DAY_COUNT).count(), 2);
        assert_eq!(output.matches(DAY_COUNT_PROMPT).count(), 3);
        assert!(output.contains("Day 1: \n"));
        assert!(output.contains("Day 2: \n"));
    }

    #[tokio::test]
    async fn test_summary_mode_prints_one_line_per_bar() {
        let mut source = source_with_price(105.75);
        source
            .expect_bars()
            .withf(|symbol, interval, window| {
                symbol.as_str() == "btc"
                    && *interval == Interval::D1
                    && window.end_ms - window.start_ms == 86_400_000
            })
            .times(1)
            .returning(|_, _, _| Ok(vec![bar(1709942400000)]));

        let output = run_session(source, "btc\n1\nno\n").await;

        let expected = "Date: 09-03-2024\t\
                        Open time: 1709942400000\t\
                        Open price: 100.5\t\
                        High price: 110.25\t\
                        Low price: 95.0\t\
                        Close price: 105.75\t\
                        Volume: 1234.5\t\
                        Close time: 1709945999999\t\
                        Quote asset volume: 130000.5\t\
                        Number of trades: 42\t\
                        Taker buy base asset volume: 600.25\t\
                        Taker buy quote asset volume: 63000.75\t\
                        Ignore: 0\t\n";
        assert!(output.contains(&format!("{}\nDay 1: \n{}", DAY_SEPARATOR, expected)));
    }

    #[tokio::test]
    async fn test_detailed_mode_prints_block_per_hourly_bar() {
        let mut source = source_with_price(105.75);
        source
            .expect_bars()
            .withf(|_, interval, _| *interval == Interval::H1)
            .times(1)
            .returning(|_, _, _| {
                Ok((0..24).map(|hour| bar(1709942400000 + hour * 3_600_000)).collect())
            });

        let output = run_session(source, "btc\n1\nyes\n").await;

        // Pas d'en-tête "Day N" en mode détaillé
        assert!(!output.contains("Day 1"));
        assert_eq!(output.matches(DAY_SEPARATOR).count(), 24);
        assert!(output.contains("Date: 09-03-2024 00:00:00\n"));
        assert!(output.contains("Date: 09-03-2024 23:00:00\n"));

        let blocks: Vec<&str> = output.split(DAY_SEPARATOR).skip(1).collect();
        assert_eq!(blocks.len(), 24);
        for block in blocks {
            for label in FIELD_LABELS {
                assert!(block.contains(&format!("\n{}: ", label)), "missing {}", label);
            }
        }
    }

    #[tokio::test]
    async fn test_bar_error_continues_with_next_day() {
        let mut source = source_with_price(3.0);
        let mut calls = 0;
        source.expect_bars().times(2).returning(move |_, _, _| {
            calls += 1;
            if calls == 1 {
                Err(anyhow!("connection refused"))
            } else {
                Ok(vec![bar(1709942400000)])
            }
        });

        let output = run_session(source, "ada\n2\nno\n").await;

        let error = "Error fetching historical data for ada. Please ensure the coin symbol is correct.";
        assert_eq!(output.matches(error).count(), 1);
        assert!(output.contains(&format!("Day 1: \n{}\n", error)));
        assert!(output.contains("Day 2: \nDate: 09-03-2024\t"));
    }

    #[tokio::test]
    async fn test_session_loops_after_replay() {
        let output = run_session(source_with_price(1.5), "btc\n0\nno\neth\n0\nno\n").await;
        assert!(output.contains("Current price of btc: $1.5"));
        assert!(output.contains("Current price of eth: $1.5"));
        assert_eq!(output.matches(SESSION_SEPARATOR).count(), 3);
    }
}
