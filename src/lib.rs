use indexmap::IndexMap;
use log::info;

pub mod err;
use err::Result;

pub mod commons;
use commons::{Config, SubtractOptions};

pub mod call_set;
use call_set::MethodCallSets;

pub mod loader;
use loader::load_directory;

pub mod filter;
use filter::filter_files;

pub mod pairing;
use pairing::{pair_by_method, TreatmentControlPair};

pub mod subtract;
use subtract::subtract_background;

pub mod consensus;
use consensus::{aggregate, ConsensusTable};

pub mod writer;
use writer::{save_call_set, save_consensus};

/// Subtract each method's control from its treatment, keyed by method in input order.
pub fn subtract_all(
    pairs: &IndexMap<String, TreatmentControlPair>,
    distance: u32,
    options: &SubtractOptions,
) -> Result<MethodCallSets> {
    let mut filtered = MethodCallSets::with_capacity(pairs.len());
    for (method, pair) in pairs {
        let subtraction = subtract_background(&pair.treatment, &pair.control, distance, options)?;
        info!(
            "{}: {} of {} treatment calls also found in control",
            method,
            subtraction.flagged.len(),
            pair.treatment.len()
        );
        filtered.insert(method.clone(), subtraction.call_set);
    }
    Ok(filtered)
}

/// Load, filter, pair, subtract and cross-reference the call files in `config.input`,
/// then write the consensus table to `config.output`.
pub fn run(config: &Config) -> Result<ConsensusTable> {
    config.validate()?;

    let files = load_directory(&config.input)?;
    info!("{} call files found in {}", files.len(), config.input.display());
    let files = filter_files(files, &config.excluded_methods);

    let pairs = pair_by_method(files, config);
    let filtered = subtract_all(&pairs, config.distance, &config.subtract)?;

    if let Some(dir) = &config.keep_filtered {
        std::fs::create_dir_all(dir)?;
        for (method, calls) in &filtered {
            save_call_set(calls, &dir.join(format!("{}.filtered.csv", method)))?;
        }
    }

    let table = aggregate(&filtered, config.distance, config.agreement)?;
    info!(
        "{} consensus rows across {} methods ({})",
        table.len(),
        table.methods.len(),
        table.methods.join(", ")
    );

    save_consensus(&table, &config.output)?;
    info!("Consensus written to {}", config.output.display());
    Ok(table)
}
