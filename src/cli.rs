use rusty_varconsensus::commons::{self, Config, ScanStride, SubtractOptions, SubtractionMode};

#[derive(clap::Parser, std::fmt::Debug)]
#[command(
    name = "varconsensus",
    version,
    about = "Find variant calls reproduced by several detection methods after removing calls shared with a control"
)]
pub struct Command {
    /// Directory of <condition>_<method>.csv call files
    #[clap(short = 'i', long = "input", default_value = "./Data")]
    input: std::path::PathBuf,

    /// Output consensus table
    #[clap(short = 'o', long = "output", default_value = "final_consensus.csv")]
    output: std::path::PathBuf,

    /// Maximum distance between positions considered the same call
    #[clap(short = 'd', long = "distance", value_parser = clap::value_parser!(u32).range(1..))]
    distance: u32,

    /// Minimum number of methods that must agree on a position
    #[clap(short = 'a', long = "agreement", value_parser = clap::value_parser!(u64).range(1..))]
    agreement: u64,

    /// Number of threads
    #[clap(short = 'c', long = "cores", default_value = "1")]
    cores: usize,

    /// Condition label of the treatment files
    #[clap(long = "treatment", default_value = commons::DEFAULT_TREATMENT)]
    treatment: String,

    /// Condition label of the control files
    #[clap(long = "control", default_value = commons::DEFAULT_CONTROL)]
    control: String,

    /// Method to leave out entirely. May be repeated.
    #[clap(long = "exclude-method", default_values_t = [commons::DEFAULT_EXCLUDED_METHOD.to_string()])]
    exclude_method: Vec<String>,

    /// Drop treatment calls found in the control instead of only reporting them
    #[clap(long = "remove-background")]
    remove_background: bool,

    /// Test every treatment call against the control, not every <distance>-th one
    #[clap(long = "scan-every-row")]
    scan_every_row: bool,

    /// Directory to write the background-subtracted call set of each method to
    #[clap(long = "keep-filtered")]
    keep_filtered: Option<std::path::PathBuf>,
}

impl Command {
    pub fn parse() -> Self {
        <Self as clap::Parser>::parse()
    }

    pub fn cores(&self) -> usize {
        self.cores
    }

    pub fn subtract_options(&self) -> SubtractOptions {
        SubtractOptions {
            mode: if self.remove_background {
                SubtractionMode::Remove
            } else {
                SubtractionMode::Flag
            },
            stride: if self.scan_every_row {
                ScanStride::EveryRow
            } else {
                ScanStride::Tolerance
            },
        }
    }

    pub fn config(&self) -> Config {
        Config {
            input: self.input.clone(),
            output: self.output.clone(),
            distance: self.distance,
            agreement: self.agreement as usize,
            treatment_label: self.treatment.clone(),
            control_label: self.control.clone(),
            excluded_methods: self.exclude_method.clone(),
            subtract: self.subtract_options(),
            keep_filtered: self.keep_filtered.clone(),
        }
    }
}
