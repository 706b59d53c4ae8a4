use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;

use crate::call_set::{CallRecord, CallSet};
use crate::commons::{CallKey, CHROM_COLUMN, FILTER_COLUMN, MAX_POSITION, POS_COLUMN};
use crate::err::{ConsensusError, Result};

/// A call file, with method and condition taken from its name.
#[derive(Debug, Clone)]
pub struct CallFile {
    pub path: PathBuf,
    pub method: String,
    pub condition: String,
    pub calls: CallSet,
}

static FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<condition>[^_]+)_(?P<method>.+)\.csv$").expect("file name pattern is valid")
});

/// Split `<condition>_<method>.csv` into its condition and method.
pub fn parse_file_name(file_name: &str) -> Option<(String, String)> {
    let caps = FILE_NAME.captures(file_name)?;
    Some((caps["condition"].to_string(), caps["method"].to_string()))
}

/// Read every `.csv` call file in `directory`, in file name order.
pub fn load_directory(directory: &Path) -> Result<Vec<CallFile>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(directory)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    paths.sort();

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        let (condition, method) = match parse_file_name(&file_name) {
            Some(parsed) => parsed,
            None => {
                warn!("Skipping {}: expected <condition>_<method>.csv", path.display());
                continue;
            }
        };
        let calls = read_call_set(&path)?;
        debug!(
            "Loaded {} calls from {} (method {}, condition {})",
            calls.len(),
            path.display(),
            method,
            condition
        );
        files.push(CallFile {
            path,
            method,
            condition,
            calls,
        });
    }
    Ok(files)
}

pub fn read_call_set(path: &Path) -> Result<CallSet> {
    let file = std::fs::File::open(path)?;
    read_call_set_from(file, &path.display().to_string())
}

/// Read a call table from any reader. `source` names it in error messages.
pub fn read_call_set_from<R: std::io::Read>(reader: R, source: &str) -> Result<CallSet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in [CHROM_COLUMN, POS_COLUMN, FILTER_COLUMN] {
        if !headers.iter().any(|h| h == column) {
            return Err(ConsensusError::InvalidFileFormat {
                path: source.to_string(),
                reason: format!("missing column '{}'", column),
            });
        }
    }

    let mut records = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let key: CallKey = record.deserialize(Some(&headers))?;
        let position = parse_position(&key.pos).ok_or_else(|| ConsensusError::InvalidFileFormat {
            path: source.to_string(),
            reason: format!("row {}: '{}' is not a valid position", line + 1, key.pos),
        })?;
        records.push(CallRecord {
            chromosome: key.chrom,
            position,
            filter: key.filter,
            fields: record.iter().map(str::to_string).collect(),
        });
    }

    Ok(CallSet::new(headers.iter().map(str::to_string).collect(), records))
}

/// Integer positions in `0..=MAX_POSITION`, also accepting float-formatted ones
/// such as `105.0`.
fn parse_position(value: &str) -> Option<i64> {
    let value = value.trim();
    let position = match value.parse::<i64>() {
        Ok(position) => position,
        Err(_) => {
            let float = value.parse::<f64>().ok()?;
            if !float.is_finite() || float < 0.0 || float > MAX_POSITION as f64 {
                return None;
            }
            float as i64
        }
    };
    (0..=MAX_POSITION).contains(&position).then_some(position)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "#CHROM,POS,ID,REF,ALT,QUAL,FILTER\n\
                         chr1,100,.,A,T,50,PASS\n\
                         chr2,2000.0,.,G,C,12,LowQual\n";

    #[test]
    fn test_parse_file_name() {
        assert_eq!(
            parse_file_name("N2_delly.csv"),
            Some(("N2".to_string(), "delly".to_string()))
        );
        assert_eq!(
            parse_file_name("GE2722_manta_sv.csv"),
            Some(("GE2722".to_string(), "manta_sv".to_string()))
        );
        assert_eq!(parse_file_name("delly.csv"), None);
        assert_eq!(parse_file_name("N2_delly.tsv"), None);
    }

    #[test]
    fn test_read_call_set_keeps_all_fields() {
        let set = read_call_set_from(TABLE.as_bytes(), "test").unwrap();
        assert_eq!(set.header().len(), 7);
        assert_eq!(set.len(), 2);
        let first = &set.records()[0];
        assert_eq!(first.chromosome, "chr1");
        assert_eq!(first.position, 100);
        assert_eq!(first.filter, "PASS");
        assert_eq!(first.fields[3], "A");
        assert_eq!(set.records()[1].position, 2000);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let err = read_call_set_from("#CHROM,POS\nchr1,5\n".as_bytes(), "bad.csv").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("bad.csv"));
        assert!(msg.contains("FILTER"));
    }

    #[test]
    fn test_bad_position_is_reported() {
        let err = read_call_set_from("#CHROM,POS,FILTER\nchr1,abc,PASS\n".as_bytes(), "bad.csv")
            .unwrap_err();
        assert!(format!("{err}").contains("abc"));
    }

    #[test]
    fn test_out_of_range_position_is_rejected() {
        for pos in ["1e30", "-5", "inf", "NaN", "9223372036854775807", "-1.0"] {
            let table = format!("#CHROM,POS,FILTER\nchr1,{},PASS\n", pos);
            let err = read_call_set_from(table.as_bytes(), "huge.csv").unwrap_err();
            assert!(format!("{err}").contains("not a valid position"), "{pos}");
        }
        let table = format!("#CHROM,POS,FILTER\nchr1,{},PASS\n", MAX_POSITION);
        let set = read_call_set_from(table.as_bytes(), "edge.csv").unwrap();
        assert_eq!(set.records()[0].position, MAX_POSITION);
    }

    #[test]
    fn test_load_directory_skips_unrecognised_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("N2_delly.csv"), TABLE).unwrap();
        std::fs::write(dir.path().join("notes.csv"), TABLE).unwrap();
        std::fs::write(dir.path().join("N2_delly.txt"), TABLE).unwrap();

        let files = load_directory(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].method, "delly");
        assert_eq!(files[0].condition, "N2");
        assert_eq!(files[0].calls.len(), 2);
    }
}
