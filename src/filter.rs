use log::{debug, info};

use crate::call_set::{CallRecord, CallSet};
use crate::commons::PASSING_FILTERS;
use crate::loader::CallFile;

pub fn passes_filter(record: &CallRecord) -> bool {
    PASSING_FILTERS.contains(&record.filter.as_str())
}

pub fn filter_call_set(calls: &CallSet) -> CallSet {
    calls.retain(passes_filter)
}

/// Drop files of excluded methods and keep only passing calls in the rest.
pub fn filter_files(files: Vec<CallFile>, excluded_methods: &[String]) -> Vec<CallFile> {
    files
        .into_iter()
        .filter(|file| {
            let excluded = excluded_methods.contains(&file.method);
            if excluded {
                info!("Ignoring {} (method {} is excluded)", file.path.display(), file.method);
            }
            !excluded
        })
        .map(|mut file| {
            file.calls = filter_call_set(&file.calls);
            if !file.calls.is_empty() {
                let positions: Vec<String> = file
                    .calls
                    .records()
                    .iter()
                    .map(|r| format!("{}:{}", r.chromosome, r.position))
                    .collect();
                debug!("{}: {}", file.path.display(), positions.join(", "));
            }
            file
        })
        .collect()
}
