use core::fmt;
use core::num::NonZeroU64;

/// Identifies one submitted run.
///
/// Tickets are handed out in increasing order by a single controller, so a
/// completion carrying anything other than the current ticket is stale.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunTicket(NonZeroU64);

impl RunTicket {
    pub fn first() -> Self {
        Self(NonZeroU64::MIN)
    }

    /// The ticket issued after this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Debug for RunTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RunTicket({})", self.0)
    }
}

impl fmt::Display for RunTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run#{}", self.0)
    }
}
