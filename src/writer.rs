use std::path::Path;

use crate::call_set::CallSet;
use crate::consensus::ConsensusTable;
use crate::err::Result;

/// Cell value for a method with no call in the window.
pub const NO_MATCH: &str = "-1";

/// Render matched positions as a tuple: `(100,)`, `(100, 105)`.
pub fn format_matches(matches: Option<&[i64]>) -> String {
    match matches {
        None => NO_MATCH.to_string(),
        Some([single]) => format!("({},)", single),
        Some(positions) => {
            let inner: Vec<String> = positions.iter().map(|p| p.to_string()).collect();
            format!("({})", inner.join(", "))
        }
    }
}

pub fn write_consensus<W: std::io::Write>(table: &ConsensusTable, writer: W) -> Result<()> {
    let mut wr = csv::Writer::from_writer(writer);

    let mut header = vec!["CHROM".to_string()];
    header.extend(table.methods.iter().cloned());
    header.push("AVERAGE".to_string());
    wr.write_record(&header)?;

    for row in &table.rows {
        let mut record = Vec::with_capacity(row.matches.len() + 2);
        record.push(row.chromosome.clone());
        record.extend(row.matches.iter().map(|m| format_matches(m.as_deref())));
        record.push(row.average.to_string());
        wr.write_record(&record)?;
    }
    wr.flush()?;
    Ok(())
}

pub fn save_consensus(table: &ConsensusTable, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(output)?;
    write_consensus(table, std::io::BufWriter::new(file))
}

/// Write a call set back out with its original header and fields.
pub fn save_call_set(calls: &CallSet, output: &Path) -> Result<()> {
    let mut wr = csv::Writer::from_path(output)?;
    wr.write_record(calls.header())?;
    for record in calls.records() {
        wr.write_record(&record.fields)?;
    }
    wr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::ConsensusRow;

    #[test]
    fn test_format_matches() {
        assert_eq!(format_matches(None), "-1");
        assert_eq!(format_matches(Some(&[100][..])), "(100,)");
        assert_eq!(format_matches(Some(&[100, 105][..])), "(100, 105)");
    }

    #[test]
    fn test_write_consensus() {
        let table = ConsensusTable {
            methods: vec!["delly".to_string(), "manta".to_string()],
            rows: vec![ConsensusRow {
                chromosome: "chr1".to_string(),
                matches: vec![Some(vec![100]), Some(vec![104, 106])],
                average: 155,
            }],
        };
        let mut out = Vec::new();
        write_consensus(&table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "CHROM,delly,manta,AVERAGE\nchr1,\"(100,)\",\"(104, 106)\",155\n");
    }

    #[test]
    fn test_empty_table_writes_header_only() {
        let mut out = Vec::new();
        write_consensus(&ConsensusTable::default(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "CHROM,AVERAGE\n");
    }
}
