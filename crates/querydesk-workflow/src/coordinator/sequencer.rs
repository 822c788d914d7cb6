//! Request tickets and stale-response detection.

use std::collections::HashMap;
use std::fmt;

use querydesk_common::Operation;
use serde::{Deserialize, Serialize};

use crate::session::Lineage;

/// Requests that compete for the same piece of session state.
///
/// Generate and regenerate share `Query`: whichever was issued last wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Dataset,
    Schema,
    Query,
    Execution,
    Answer,
}

impl Slot {
    pub fn for_operation(operation: Operation) -> Self {
        match operation {
            Operation::Upload => Slot::Dataset,
            Operation::FetchSchema => Slot::Schema,
            Operation::Generate | Operation::Regenerate => Slot::Query,
            Operation::Execute => Slot::Execution,
            Operation::FormatAnswer => Slot::Answer,
        }
    }
}

/// Issue order of a request; later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub(crate) u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The upstream revision a request of this kind depends on.
///
/// Uploads depend on nothing; the rest must still see the dataset,
/// query, or result they were built from when they commit.
pub(crate) fn basis_for(operation: Operation, lineage: Lineage) -> u64 {
    match operation {
        Operation::Upload => 0,
        Operation::FetchSchema | Operation::Generate | Operation::Regenerate => lineage.dataset,
        Operation::Execute => lineage.query,
        Operation::FormatAnswer => lineage.result,
    }
}

#[derive(Debug, Default)]
pub(crate) struct Sequencer {
    issued: u64,
    latest: HashMap<Slot, Ticket>,
    outstanding: HashMap<Slot, Ticket>,
}

impl Sequencer {
    pub(crate) fn issue(&mut self, slot: Slot) -> Ticket {
        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.latest.insert(slot, ticket);
        self.outstanding.insert(slot, ticket);
        ticket
    }

    pub(crate) fn is_latest(&self, slot: Slot, ticket: Ticket) -> bool {
        self.latest.get(&slot) == Some(&ticket)
    }

    /// Mark `ticket` as answered if it is the one still outstanding.
    pub(crate) fn settle(&mut self, slot: Slot, ticket: Ticket) {
        if self.outstanding.get(&slot) == Some(&ticket) {
            self.outstanding.remove(&slot);
        }
    }

    pub(crate) fn is_pending(&self, slot: Slot) -> bool {
        self.outstanding.contains_key(&slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tickets_increase() {
        let mut seq = Sequencer::default();
        let a = seq.issue(Slot::Query);
        let b = seq.issue(Slot::Execution);
        assert!(b > a);
    }

    #[test]
    fn newer_ticket_supersedes_older_in_same_slot() {
        let mut seq = Sequencer::default();
        let first = seq.issue(Slot::Query);
        let second = seq.issue(Slot::Query);
        assert!(!seq.is_latest(Slot::Query, first));
        assert!(seq.is_latest(Slot::Query, second));
    }

    #[test]
    fn slots_are_independent() {
        let mut seq = Sequencer::default();
        let query = seq.issue(Slot::Query);
        seq.issue(Slot::Execution);
        assert!(seq.is_latest(Slot::Query, query));
    }

    #[test]
    fn settling_a_stale_ticket_keeps_slot_pending() {
        let mut seq = Sequencer::default();
        let first = seq.issue(Slot::Answer);
        let second = seq.issue(Slot::Answer);

        seq.settle(Slot::Answer, first);
        assert!(seq.is_pending(Slot::Answer));

        seq.settle(Slot::Answer, second);
        assert!(!seq.is_pending(Slot::Answer));
    }

    #[test]
    fn generate_and_regenerate_share_a_slot() {
        assert_eq!(
            Slot::for_operation(Operation::Generate),
            Slot::for_operation(Operation::Regenerate)
        );
    }

    #[test]
    fn basis_tracks_the_right_revision() {
        let lineage = Lineage {
            dataset: 1,
            query: 2,
            result: 3,
        };
        assert_eq!(basis_for(Operation::Upload, lineage), 0);
        assert_eq!(basis_for(Operation::Regenerate, lineage), 1);
        assert_eq!(basis_for(Operation::Execute, lineage), 2);
        assert_eq!(basis_for(Operation::FormatAnswer, lineage), 3);
    }
}
