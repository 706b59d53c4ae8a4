use indexmap::IndexSet;
use rayon::prelude::*;

use crate::call_set::{CallRecord, MethodCallSets};
use crate::commons::{check_agreement, check_tolerance};
use crate::err::Result;

/// One leader call that enough methods agreed on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConsensusRow {
    pub chromosome: String,
    /// Matched positions per method, in the table's method order. `None` when the
    /// method had no call in the window.
    pub matches: Vec<Option<Vec<i64>>>,
    pub average: i64,
}

impl ConsensusRow {
    /// Number of methods with at least one call in the window.
    pub fn agreeing_methods(&self) -> usize {
        self.matches.iter().filter(|m| m.is_some()).count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsensusTable {
    pub methods: Vec<String>,
    pub rows: Vec<ConsensusRow>,
}

impl ConsensusTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Cross-reference calls between methods.
///
/// Every call of every method is taken in turn as the leader and looked up in all
/// methods (its own included) within `tolerance` on the same chromosome. Leaders
/// seen by at least `agreement` methods become rows; identical rows are collapsed
/// and the table is sorted by chromosome.
pub fn aggregate(methods: &MethodCallSets, tolerance: u32, agreement: usize) -> Result<ConsensusTable> {
    check_tolerance(tolerance)?;
    check_agreement(agreement)?;

    let leaders: Vec<&CallRecord> = methods.values().flat_map(|set| set.records()).collect();

    let rows: Vec<ConsensusRow> = leaders
        .par_iter()
        .filter_map(|leader| evaluate_leader(methods, leader, tolerance, agreement))
        .collect();

    let mut rows = dedup_rows(rows);
    rows.sort_by(|a, b| a.chromosome.cmp(&b.chromosome));

    Ok(ConsensusTable {
        methods: methods.keys().cloned().collect(),
        rows,
    })
}

fn evaluate_leader(
    methods: &MethodCallSets,
    leader: &CallRecord,
    tolerance: u32,
    agreement: usize,
) -> Option<ConsensusRow> {
    let mut sum: i128 = 0;
    let mut count: i128 = 0;
    let matches: Vec<Option<Vec<i64>>> = methods
        .values()
        .map(|set| {
            let found = set.positions_within(&leader.chromosome, leader.position, tolerance);
            if found.is_empty() {
                None
            } else {
                sum += found.iter().map(|&p| p as i128).sum::<i128>();
                count += 1;
                Some(found)
            }
        })
        .collect();

    if (count as usize) < agreement {
        return None;
    }
    Some(ConsensusRow {
        chromosome: leader.chromosome.clone(),
        matches,
        // Truncating division, count is at least 1 here. Saturates when several
        // matches per method push the mean past the i64 range.
        average: (sum / count).clamp(i64::MIN as i128, i64::MAX as i128) as i64,
    })
}

/// Drop exact duplicate rows, keeping the first occurrence of each.
pub fn dedup_rows(rows: Vec<ConsensusRow>) -> Vec<ConsensusRow> {
    rows.into_iter().collect::<IndexSet<_>>().into_iter().collect()
}
