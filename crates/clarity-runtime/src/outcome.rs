//! Result of pushing a record through a processor or chain

use clarity_core::Record;

/// What happened to a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The record survives, possibly with a cohort assigned
    Accepted(Record),
    /// The record was removed from the import
    Discarded,
}

impl RecordOutcome {
    pub fn is_discarded(&self) -> bool {
        matches!(self, RecordOutcome::Discarded)
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, RecordOutcome::Accepted(_))
    }

    /// Borrow the surviving record
    pub fn record(&self) -> Option<&Record> {
        match self {
            RecordOutcome::Accepted(record) => Some(record),
            RecordOutcome::Discarded => None,
        }
    }

    /// Take the surviving record
    pub fn into_record(self) -> Option<Record> {
        match self {
            RecordOutcome::Accepted(record) => Some(record),
            RecordOutcome::Discarded => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clarity_core::types::record::from_pairs;

    #[test]
    fn test_outcome_accessors() {
        let accepted = RecordOutcome::Accepted(from_pairs([("DEPT", "ER")]));
        assert!(accepted.is_accepted());
        assert_eq!(
            accepted.record().and_then(|r| r.get("DEPT")).map(String::as_str),
            Some("ER")
        );

        let discarded = RecordOutcome::Discarded;
        assert!(discarded.is_discarded());
        assert!(discarded.into_record().is_none());
    }
}
