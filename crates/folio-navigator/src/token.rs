//! Per-level request tokens.
//!
//! Every fetch is issued with a [`FetchTicket`]. Issuing a new ticket for a
//! level, or invalidating the level, makes older tickets for that level
//! stale; responses carrying a stale ticket are dropped.

use folio_api::Id;

/// Navigation level a fetch populates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    /// Subject list.
    Subjects,
    /// Main titles of the selected subject.
    MainTitles,
    /// Sub titles of the selected main title.
    SubTitles,
    /// Page components of the selected sub title.
    Components,
}

impl Level {
    const COUNT: usize = 4;

    fn index(self) -> usize {
        match self {
            Self::Subjects => 0,
            Self::MainTitles => 1,
            Self::SubTitles => 2,
            Self::Components => 3,
        }
    }

    /// Levels below this one.
    #[must_use]
    pub fn descendants(self) -> &'static [Level] {
        match self {
            Self::Subjects => &[Self::MainTitles, Self::SubTitles, Self::Components],
            Self::MainTitles => &[Self::SubTitles, Self::Components],
            Self::SubTitles => &[Self::Components],
            Self::Components => &[],
        }
    }
}

/// Handle for one in-flight fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    /// Level being fetched.
    pub level: Level,
    /// Token issued for this fetch.
    pub token: u64,
    /// Parent whose children are fetched (0 for the subject list).
    pub parent_id: Id,
}

/// Monotonic token counters, one per level.
#[derive(Clone, Debug, Default)]
pub struct RequestTokens {
    latest: [u64; Level::COUNT],
}

impl RequestTokens {
    /// Issue a ticket, superseding earlier ones for the same level.
    pub fn issue(&mut self, level: Level, parent_id: Id) -> FetchTicket {
        let slot = &mut self.latest[level.index()];
        *slot += 1;
        FetchTicket {
            level,
            token: *slot,
            parent_id,
        }
    }

    /// Make every outstanding ticket for `level` stale.
    pub fn invalidate(&mut self, level: Level) {
        self.latest[level.index()] += 1;
    }

    /// Whether `ticket` is the latest issued for its level.
    #[must_use]
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.latest[ticket.level.index()] == ticket.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes() {
        let mut tokens = RequestTokens::default();
        let first = tokens.issue(Level::MainTitles, 1);
        let second = tokens.issue(Level::MainTitles, 2);

        assert!(!tokens.is_current(&first));
        assert!(tokens.is_current(&second));
    }

    #[test]
    fn test_levels_are_independent() {
        let mut tokens = RequestTokens::default();
        let main = tokens.issue(Level::MainTitles, 1);
        let _sub = tokens.issue(Level::SubTitles, 10);

        assert!(tokens.is_current(&main));
    }

    #[test]
    fn test_invalidate() {
        let mut tokens = RequestTokens::default();
        let ticket = tokens.issue(Level::Components, 100);
        tokens.invalidate(Level::Components);
        assert!(!tokens.is_current(&ticket));
    }
}
