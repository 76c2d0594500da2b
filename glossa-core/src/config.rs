use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::event::TranslationEvent;

/// Trailing window width used when none is configured.
pub const DEFAULT_WINDOW_SIZE_MINUTES: u32 = 10;

/// Numeric event attribute averaged by the moving-average engine. Nothing
/// downstream depends on which one is selected beyond the value summed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetField {
    #[default]
    Duration,
    NrWords,
}

impl TargetField {
    /// The selected attribute's value on `event`.
    pub fn value(&self, event: &TranslationEvent) -> u64 {
        match self {
            TargetField::Duration => event.duration,
            TargetField::NrWords => event.nr_words,
        }
    }
}

impl FromStr for TargetField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s {
            "duration" => Ok(TargetField::Duration),
            "nr_words" => Ok(TargetField::NrWords),
            other => Err(format!(
                "unknown target field `{other}`, expected `duration` or `nr_words`"
            )),
        }
    }
}

/// Which computation to run; modes are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    MovingAverage,
    ClientsReport,
    LanguagesReport,
}

/// Parameters consumed by the computations in glossa-ops. The window size
/// and target field only matter to `AnalysisMode::MovingAverage`.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub mode: AnalysisMode,
    pub window_size_minutes: u32,
    pub target_field: TargetField,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            mode: AnalysisMode::MovingAverage,
            window_size_minutes: DEFAULT_WINDOW_SIZE_MINUTES,
            target_field: TargetField::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.window_size_minutes == 0 {
            anyhow::bail!("window size must be a positive number of minutes");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_a_ten_minute_duration_window() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.window_size_minutes, 10);
        assert_eq!(cfg.target_field, TargetField::Duration);
        assert_eq!(cfg.mode, AnalysisMode::MovingAverage);
        cfg.validate().unwrap();
    }

    #[test]
    fn zero_window_is_rejected() {
        let cfg = AnalysisConfig {
            window_size_minutes: 0,
            ..AnalysisConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn target_field_parses_both_variants() {
        assert_eq!("duration".parse::<TargetField>().unwrap(), TargetField::Duration);
        assert_eq!("nr_words".parse::<TargetField>().unwrap(), TargetField::NrWords);
        assert!("words".parse::<TargetField>().is_err());
    }
}
