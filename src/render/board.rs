use crate::model::{DisplayRecord, SearchError};
use tracing::{info, warn};

/// Handle for one submitted search, ordered by submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

/// What the user currently sees: one result set and a loading flag.
#[derive(Debug, Default)]
pub struct ResultBoard {
    records: Vec<DisplayRecord>,
    issued: u64,
    applied: u64,
    finished: u64,
}

impl ResultBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[DisplayRecord] {
        &self.records
    }

    /// True until the newest issued search has finished.
    pub fn in_progress(&self) -> bool {
        self.finished < self.issued
    }

    pub fn begin(&mut self) -> SearchTicket {
        self.issued += 1;
        SearchTicket(self.issued)
    }

    /// Records the outcome of a search. A result replaces the board only if
    /// no later search has been applied already. On failure the board keeps
    /// its records and the generic notice is returned for the user, unless a
    /// later search is already shown.
    pub fn finish(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<Vec<DisplayRecord>, SearchError>,
    ) -> Option<&'static str> {
        self.finished = self.finished.max(ticket.0);

        match outcome {
            Ok(records) if ticket.0 > self.applied => {
                info!("Showing {} offers from search #{}", records.len(), ticket.0);
                self.applied = ticket.0;
                self.records = records;
                None
            }
            Ok(_) => {
                info!(
                    "Dropping stale result of search #{} (already showing #{})",
                    ticket.0, self.applied
                );
                None
            }
            Err(e) if ticket.0 < self.applied => {
                info!(
                    "Dropping stale failure of search #{} (already showing #{}): {}",
                    ticket.0, self.applied, e
                );
                None
            }
            Err(e) => {
                warn!("Search #{} failed: {}", ticket.0, e);
                Some(SearchError::USER_MESSAGE)
            }
        }
    }
}
