//! Hook consulted for every ball the sweep removes. Scoring plugs in here;
//! nothing reacts to a rejection yet.

use log::debug;

use crate::components::ball::Ball;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected,
}

pub trait RemovalValidator {
    fn validate(&mut self, ball: &Ball) -> Verdict;
}

/// Accepts every removal.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl RemovalValidator for AcceptAll {
    fn validate(&mut self, ball: &Ball) -> Verdict {
        debug!("removal of ball {:?} (type {}) accepted", ball.id, ball.type_index());
        Verdict::Accepted
    }
}

/// Running count of verdicts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerdictTally {
    pub accepted: u32,
    pub rejected: u32,
}

impl VerdictTally {
    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Accepted => self.accepted += 1,
            Verdict::Rejected => self.rejected += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.accepted + self.rejected
    }
}
