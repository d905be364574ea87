use crate::record::{DecodedRecord, ResultSet};
use std::collections::HashSet;

/// What happened to a record pushed into the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Kept,
    Undecoded,
    Duplicate,
}

/// Folds decoded records into a [`ResultSet`].
///
/// The first record for a canonical path wins. Every failed decode lands in
/// the undecoded list, including records that are later dropped as
/// duplicates.
#[derive(Debug, Default)]
pub struct DeduplicatingAccumulator {
    seen: HashSet<String>,
    result: ResultSet,
    duplicates: usize,
}

impl DeduplicatingAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: DecodedRecord) -> Admission {
        if !record.decode_succeeded {
            self.result.undecoded.push(record.canonical_path.clone());
        }

        if !self.seen.insert(record.canonical_path.clone()) {
            self.duplicates += 1;
            return Admission::Duplicate;
        }

        if record.decode_succeeded {
            self.result.records.push(record);
            Admission::Kept
        } else {
            Admission::Undecoded
        }
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn finish(self) -> ResultSet {
        self.result
    }
}

impl Extend<DecodedRecord> for DeduplicatingAccumulator {
    fn extend<I: IntoIterator<Item = DecodedRecord>>(&mut self, iter: I) {
        for record in iter {
            self.push(record);
        }
    }
}
