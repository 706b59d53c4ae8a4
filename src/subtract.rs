use log::debug;

use crate::call_set::{CallRecord, CallSet};
use crate::commons::{check_tolerance, within, SubtractOptions, SubtractionMode};
use crate::err::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtraction {
    pub call_set: CallSet,
    /// Treatment row indices that matched a control call.
    pub flagged: Vec<usize>,
}

/// Compare a treatment call set against its matched control.
///
/// For each chromosome of the treatment, the sampled treatment rows (see
/// [`crate::commons::ScanStride`]) are tested against the control rows of the
/// same chromosome; the first control call within `tolerance` flags the row.
/// Whether flagged rows are dropped is decided by [`SubtractionMode`].
pub fn subtract_background(
    treatment: &CallSet,
    control: &CallSet,
    tolerance: u32,
    options: &SubtractOptions,
) -> Result<Subtraction> {
    check_tolerance(tolerance)?;
    let step = options.stride.step(tolerance);

    let mut flagged = Vec::new();
    for chrom in treatment.chromosomes() {
        let control_chrom: Vec<&CallRecord> = control.on_chromosome(chrom).map(|(_, r)| r).collect();
        if control_chrom.is_empty() {
            continue;
        }
        for (index, record) in treatment.on_chromosome(chrom).step_by(step) {
            if control_chrom
                .iter()
                .any(|c| within(record.position, c.position, tolerance))
            {
                flagged.push(index);
            }
        }
    }
    debug!(
        "{} of {} treatment calls found in control",
        flagged.len(),
        treatment.len()
    );

    let call_set = match options.mode {
        SubtractionMode::Flag => treatment.clone(),
        SubtractionMode::Remove => treatment.without(&flagged),
    };
    Ok(Subtraction { call_set, flagged })
}
