//! glossa-ops: the computations over validated translation events.
//!
//! - `EventQueue`: binary min-heap yielding events by ascending timestamp
//! - `moving_average`: per-minute trailing moving average of a chosen field
//! - `clients_report` / `language_pairs_report`: single-pass grouping counts
//! - `run_analysis`: mode dispatch producing rows ready for a `RecordSink`

use glossa_core::{AnalysisConfig, AnalysisMode, Result, TranslationEvent};
use tracing::instrument;

pub mod heap;
pub mod report;
pub mod window;

pub use heap::EventQueue;
pub use report::{clients_report, language_pairs_report, ClientCount, LanguagePairCount};
pub use window::{ceil_to_minute, moving_average, moving_average_over, MinuteAverage, MinuteAverages};

/// Runs the computation selected by `config.mode` over `events` and renders
/// every result record as a flat JSON mapping, ready for direct rendering
/// by a sink.
#[instrument(name = "run_analysis", skip_all, fields(mode = ?config.mode, events = events.len()))]
pub fn run_analysis(
    config: &AnalysisConfig,
    events: Vec<TranslationEvent>,
) -> Result<Vec<serde_json::Value>> {
    match config.mode {
        AnalysisMode::MovingAverage => {
            let series =
                moving_average_over(events, config.window_size_minutes, config.target_field)?;
            series
                .map(|row| serde_json::to_value(row).map_err(Into::into))
                .collect()
        }
        AnalysisMode::ClientsReport => to_rows(&clients_report(&events)),
        AnalysisMode::LanguagesReport => to_rows(&language_pairs_report(&events)),
    }
}

fn to_rows<T: serde::Serialize>(records: &[T]) -> Result<Vec<serde_json::Value>> {
    records
        .iter()
        .map(|record| serde_json::to_value(record).map_err(Into::into))
        .collect()
}

pub mod prelude {
    pub use super::{
        clients_report, language_pairs_report, moving_average, moving_average_over, run_analysis,
        EventQueue, MinuteAverage,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use glossa_core::TargetField;

    fn event(ts: &str, client: &str, duration: u64) -> TranslationEvent {
        TranslationEvent {
            timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S%.f")
                .unwrap()
                .and_utc(),
            translation_id: "t1".into(),
            source_language: "en".into(),
            target_language: "fr".into(),
            client_name: client.into(),
            event_name: "translation_delivered".into(),
            nr_words: 10,
            duration,
        }
    }

    #[test]
    fn moving_average_mode_renders_date_and_average() {
        let config = AnalysisConfig::default();
        let rows = run_analysis(
            &config,
            vec![
                event("2018-12-26 18:11:08.509654", "airliberty", 20),
                event("2018-12-26 18:11:45.509654", "airliberty", 40),
            ],
        )
        .unwrap();
        assert_eq!(rows[0]["date"], "2018-12-26 18:12:00");
        assert_eq!(rows[0]["average"], 30.0);
    }

    #[test]
    fn clients_mode_renders_counts() {
        let config = AnalysisConfig {
            mode: AnalysisMode::ClientsReport,
            ..AnalysisConfig::default()
        };
        let rows = run_analysis(
            &config,
            vec![
                event("2018-12-26 18:11:08.509654", "easyjet", 20),
                event("2018-12-26 18:12:08.509654", "easyjet", 20),
            ],
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["client_name"], "easyjet");
        assert_eq!(rows[0]["translation_count"], 2);
    }

    #[test]
    fn languages_mode_renders_pairs() {
        let config = AnalysisConfig {
            mode: AnalysisMode::LanguagesReport,
            ..AnalysisConfig::default()
        };
        let rows = run_analysis(
            &config,
            vec![event("2018-12-26 18:11:08.509654", "easyjet", 20)],
        )
        .unwrap();
        assert_eq!(rows[0]["source_language"], "en");
        assert_eq!(rows[0]["target_language"], "fr");
        assert_eq!(rows[0]["translation_count"], 1);
    }

    #[test]
    fn window_and_target_flow_through_the_config() {
        let config = AnalysisConfig {
            window_size_minutes: 1,
            target_field: TargetField::NrWords,
            ..AnalysisConfig::default()
        };
        let rows = run_analysis(
            &config,
            vec![event("2018-12-26 18:11:08.509654", "easyjet", 20)],
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["average"], 10.0);
    }
}
