use crate::err::{ConsensusError, Result};

/// Quality flag values kept by the filter step. `.` is the missing-value sentinel.
pub const PASSING_FILTERS: [&str; 2] = ["PASS", "."];

pub const DEFAULT_TREATMENT: &str = "GE2722";
pub const DEFAULT_CONTROL: &str = "N2";
pub const DEFAULT_EXCLUDED_METHOD: &str = "seekSV";

pub const CHROM_COLUMN: &str = "#CHROM";
pub const POS_COLUMN: &str = "POS";
pub const FILTER_COLUMN: &str = "FILTER";

/// Largest accepted position, far beyond any chromosome length.
pub const MAX_POSITION: i64 = 1 << 40;

/// What the background subtraction does with treatment rows found in the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubtractionMode {
    /// Report matched rows but hand the treatment call set on unchanged.
    #[default]
    Flag,
    /// Drop matched rows from the treatment call set.
    Remove,
}

/// Which treatment rows are tested against the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanStride {
    /// Every `tolerance`-th row by row index within a chromosome.
    #[default]
    Tolerance,
    EveryRow,
}

impl ScanStride {
    pub fn step(&self, tolerance: u32) -> usize {
        match self {
            ScanStride::Tolerance => tolerance as usize,
            ScanStride::EveryRow => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SubtractOptions {
    pub mode: SubtractionMode,
    pub stride: ScanStride,
}

/// The two sides of a per-method comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Treatment,
    Control,
}

/// Key columns of a call row. Every other column is carried through untouched.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
pub struct CallKey {
    #[serde(rename = "#CHROM")]
    pub chrom: String,
    #[serde(rename = "POS")]
    pub pos: String,
    #[serde(rename = "FILTER")]
    pub filter: String,
}

/// Run-wide settings, gathered from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: std::path::PathBuf,
    pub output: std::path::PathBuf,
    pub distance: u32,
    pub agreement: usize,
    pub treatment_label: String,
    pub control_label: String,
    pub excluded_methods: Vec<String>,
    pub subtract: SubtractOptions,
    pub keep_filtered: Option<std::path::PathBuf>,
}

impl Config {
    pub fn new(distance: u32, agreement: usize) -> Self {
        Self {
            input: std::path::PathBuf::from("./Data"),
            output: std::path::PathBuf::from("final_consensus.csv"),
            distance,
            agreement,
            treatment_label: DEFAULT_TREATMENT.to_string(),
            control_label: DEFAULT_CONTROL.to_string(),
            excluded_methods: vec![DEFAULT_EXCLUDED_METHOD.to_string()],
            subtract: SubtractOptions::default(),
            keep_filtered: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_tolerance(self.distance)?;
        check_agreement(self.agreement)?;
        if self.treatment_label == self.control_label {
            return Err(ConsensusError::invalid_parameter(
                "treatment",
                "treatment and control labels must differ",
            ));
        }
        Ok(())
    }

    /// Resolve a file-name condition label to one side of the comparison.
    pub fn condition(&self, label: &str) -> Option<Condition> {
        if label == self.treatment_label {
            Some(Condition::Treatment)
        } else if label == self.control_label {
            Some(Condition::Control)
        } else {
            None
        }
    }
}

pub fn check_tolerance(tolerance: u32) -> Result<()> {
    if tolerance == 0 {
        return Err(ConsensusError::invalid_parameter(
            "distance",
            "must be a positive integer",
        ));
    }
    Ok(())
}

pub fn check_agreement(agreement: usize) -> Result<()> {
    if agreement == 0 {
        return Err(ConsensusError::invalid_parameter(
            "agreement",
            "must be a positive integer",
        ));
    }
    Ok(())
}

/// `|a - b| <= tolerance`, written as the window test used throughout.
pub fn within(centre: i64, position: i64, tolerance: u32) -> bool {
    centre.abs_diff(position) <= tolerance as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_is_symmetric() {
        for (a, b) in [(100, 105), (105, 100), (0, 10), (-3, 4), (500, 100)] {
            assert_eq!(within(a, b, 5), within(b, a, 5));
            assert_eq!(within(a, b, 10), within(b, a, 10));
        }
    }

    #[test]
    fn test_within_at_integer_extremes() {
        assert!(within(i64::MAX, i64::MAX - 3, 5));
        assert!(!within(i64::MAX, i64::MIN, 5));
        assert!(within(i64::MIN, i64::MIN + 5, 5));
    }

    #[test]
    fn test_within_bounds_are_inclusive() {
        assert!(within(100, 110, 10));
        assert!(within(100, 90, 10));
        assert!(!within(100, 111, 10));
        assert!(!within(100, 89, 10));
    }

    #[test]
    fn test_config_rejects_zero_parameters() {
        assert!(Config::new(0, 2).validate().is_err());
        assert!(Config::new(10, 0).validate().is_err());
        assert!(Config::new(10, 2).validate().is_ok());
    }

    #[test]
    fn test_config_rejects_identical_labels() {
        let mut config = Config::new(10, 2);
        config.control_label = config.treatment_label.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_condition_lookup() {
        let config = Config::new(10, 2);
        assert_eq!(config.condition("GE2722"), Some(Condition::Treatment));
        assert_eq!(config.condition("N2"), Some(Condition::Control));
        assert_eq!(config.condition("WT"), None);
    }

    #[test]
    fn test_scan_stride_step() {
        assert_eq!(ScanStride::Tolerance.step(7), 7);
        assert_eq!(ScanStride::EveryRow.step(7), 1);
    }
}
