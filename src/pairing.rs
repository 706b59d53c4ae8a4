use indexmap::IndexMap;
use log::warn;

use crate::call_set::CallSet;
use crate::commons::{Condition, Config};
use crate::loader::CallFile;

#[derive(Debug, Clone)]
pub struct TreatmentControlPair {
    pub treatment: CallSet,
    pub control: CallSet,
}

#[derive(Default)]
struct PartialPair {
    treatment: Option<CallSet>,
    control: Option<CallSet>,
}

/// Group call files by method into treatment/control pairs, sorted by method name.
///
/// Methods missing either side are skipped with a warning.
pub fn pair_by_method(files: Vec<CallFile>, config: &Config) -> IndexMap<String, TreatmentControlPair> {
    let mut partial: IndexMap<String, PartialPair> = IndexMap::new();
    for file in files {
        let condition = match config.condition(&file.condition) {
            Some(condition) => condition,
            None => {
                warn!(
                    "Ignoring {}: condition {} is neither {} nor {}",
                    file.path.display(),
                    file.condition,
                    config.treatment_label,
                    config.control_label
                );
                continue;
            }
        };
        let entry = partial.entry(file.method.clone()).or_default();
        let slot = match condition {
            Condition::Treatment => &mut entry.treatment,
            Condition::Control => &mut entry.control,
        };
        if slot.is_some() {
            warn!(
                "Ignoring {}: method {} already has a {} call set",
                file.path.display(),
                file.method,
                file.condition
            );
            continue;
        }
        *slot = Some(file.calls);
    }

    let mut pairs: IndexMap<String, TreatmentControlPair> = partial
        .into_iter()
        .filter_map(|(method, pair)| match (pair.treatment, pair.control) {
            (Some(treatment), Some(control)) => Some((method, TreatmentControlPair { treatment, control })),
            _ => {
                warn!("No matching condition found for {}", method);
                None
            }
        })
        .collect();
    pairs.sort_keys();
    pairs
}
