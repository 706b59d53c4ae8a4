use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};

use crate::commons::within;

/// Call sets keyed by method name. Insertion order is the output column order.
pub type MethodCallSets = IndexMap<String, CallSet>;

/// A single variant call. `fields` holds the full source row in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallRecord {
    pub chromosome: String,
    pub position: i64,
    pub filter: String,
    pub fields: Vec<String>,
}

impl CallRecord {
    pub fn new(chromosome: &str, position: i64) -> Self {
        Self {
            chromosome: chromosome.to_string(),
            position,
            filter: "PASS".to_string(),
            fields: Vec::new(),
        }
    }

    pub fn with_filter(mut self, filter: &str) -> Self {
        self.filter = filter.to_string();
        self
    }
}

/// Ordered collection of calls from one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallSet {
    header: Vec<String>,
    records: Vec<CallRecord>,
}

impl CallSet {
    pub fn new(header: Vec<String>, records: Vec<CallRecord>) -> Self {
        Self { header, records }
    }

    /// Build a header-less call set from `(chromosome, position)` pairs.
    pub fn from_positions(calls: &[(&str, i64)]) -> Self {
        Self {
            header: Vec::new(),
            records: calls
                .iter()
                .map(|(chrom, pos)| CallRecord::new(chrom, *pos))
                .collect(),
        }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn records(&self) -> &[CallRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct chromosome labels, first-seen order.
    pub fn chromosomes(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|r| r.chromosome.as_str())
            .collect::<IndexSet<&str>>()
            .into_iter()
            .collect()
    }

    /// Records on `chromosome` with their row index in this call set.
    pub fn on_chromosome<'a>(
        &'a self,
        chromosome: &'a str,
    ) -> impl Iterator<Item = (usize, &'a CallRecord)> + 'a {
        self.records
            .iter()
            .enumerate()
            .filter(move |(_, r)| r.chromosome == chromosome)
    }

    /// Positions on `chromosome` inside `[centre - tolerance, centre + tolerance]`.
    pub fn positions_within(&self, chromosome: &str, centre: i64, tolerance: u32) -> Vec<i64> {
        self.on_chromosome(chromosome)
            .map(|(_, r)| r.position)
            .filter(|pos| within(centre, *pos, tolerance))
            .collect()
    }

    pub fn retain(&self, keep: impl Fn(&CallRecord) -> bool) -> Self {
        Self {
            header: self.header.clone(),
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }

    /// Copy of this call set without the rows at `indices`.
    pub fn without(&self, indices: &[usize]) -> Self {
        let drop: HashSet<usize> = indices.iter().copied().collect();
        Self {
            header: self.header.clone(),
            records: self
                .records
                .iter()
                .enumerate()
                .filter(|(i, _)| !drop.contains(i))
                .map(|(_, r)| r.clone())
                .collect(),
        }
    }
}
