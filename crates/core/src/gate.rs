//! Password gate for the wholesale page.
//!
//! This is a courtesy gate, not access control: the secret is plain
//! configuration, compared in plain text, and anyone who can read the
//! deployment can read it. Anything that needs protecting must be checked
//! server-side against real credentials instead.
//!
//! The gate has two states. A session starts [`GateState::Locked`] unless it
//! already carries the access flag (`loam_access = "true"`). Entering the
//! secret unlocks it for the rest of the session; a wrong entry keeps it locked
//! and may be retried any number of times; cancelling does nothing.

/// Session key holding the access flag.
pub const ACCESS_FLAG_KEY: &str = "loam_access";

/// The only flag value that means unlocked.
pub const ACCESS_FLAG_VALUE: &str = "true";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Locked,
    Unlocked,
}

impl GateState {
    /// Interpret the stored flag. Absent or anything but `"true"` is locked.
    #[must_use]
    pub fn from_flag(flag: Option<&str>) -> Self {
        if flag == Some(ACCESS_FLAG_VALUE) {
            Self::Unlocked
        } else {
            Self::Locked
        }
    }
}

/// What happened on a prompt submission.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateAttempt {
    /// Input matched (or the session was already unlocked). Persist the flag
    /// and continue to the destination.
    Unlocked,
    /// Input did not match. Show an error; the visitor may retry.
    Mismatch,
    /// The prompt was dismissed. Stay put without a message.
    Cancelled,
}

impl GateAttempt {
    /// Short label for structured logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unlocked => "unlocked",
            Self::Mismatch => "mismatch",
            Self::Cancelled => "cancelled",
        }
    }
}

/// The gate for one session.
#[derive(Debug, Clone, Copy)]
pub struct AccessGate<'a> {
    secret: &'a str,
    state: GateState,
}

impl<'a> AccessGate<'a> {
    /// Open the gate for a session whose stored flag is `flag`.
    #[must_use]
    pub fn new(secret: &'a str, flag: Option<&str>) -> Self {
        Self {
            secret,
            state: GateState::from_flag(flag),
        }
    }

    #[must_use]
    pub const fn state(&self) -> GateState {
        self.state
    }

    #[must_use]
    pub const fn is_unlocked(&self) -> bool {
        matches!(self.state, GateState::Unlocked)
    }

    /// Handle a prompt result. `None` means the prompt was cancelled.
    ///
    /// Input is trimmed before comparison. An already unlocked gate stays
    /// unlocked whatever is entered.
    pub fn submit(&mut self, input: Option<&str>) -> GateAttempt {
        if self.is_unlocked() {
            return GateAttempt::Unlocked;
        }
        let Some(input) = input else {
            return GateAttempt::Cancelled;
        };

        if input.trim() == self.secret.trim() {
            self.state = GateState::Unlocked;
            GateAttempt::Unlocked
        } else {
            GateAttempt::Mismatch
        }
    }

    /// Flag value to persist for the current state, if any.
    #[must_use]
    pub const fn flag(&self) -> Option<&'static str> {
        match self.state {
            GateState::Unlocked => Some(ACCESS_FLAG_VALUE),
            GateState::Locked => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_follows_flag() {
        assert_eq!(GateState::from_flag(None), GateState::Locked);
        assert_eq!(GateState::from_flag(Some("false")), GateState::Locked);
        assert_eq!(GateState::from_flag(Some("TRUE")), GateState::Locked);
        assert_eq!(GateState::from_flag(Some("true")), GateState::Unlocked);
    }

    #[test]
    fn test_correct_trimmed_secret_unlocks() {
        let mut gate = AccessGate::new("fieldday", None);
        assert_eq!(gate.submit(Some("  fieldday\n")), GateAttempt::Unlocked);
        assert!(gate.is_unlocked());
        assert_eq!(gate.flag(), Some("true"));
    }

    #[test]
    fn test_mismatch_then_retry_succeeds() {
        let mut gate = AccessGate::new("fieldday", None);
        assert_eq!(gate.submit(Some("fieldDay")), GateAttempt::Mismatch);
        assert_eq!(gate.submit(Some("")), GateAttempt::Mismatch);
        assert_eq!(gate.state(), GateState::Locked);
        assert_eq!(gate.flag(), None);
        assert_eq!(gate.submit(Some("fieldday")), GateAttempt::Unlocked);
    }

    #[test]
    fn test_cancel_stays_locked() {
        let mut gate = AccessGate::new("fieldday", None);
        assert_eq!(gate.submit(None), GateAttempt::Cancelled);
        assert_eq!(gate.state(), GateState::Locked);
    }

    #[test]
    fn test_unlocked_session_does_not_reprompt() {
        let mut gate = AccessGate::new("fieldday", Some(ACCESS_FLAG_VALUE));
        assert!(gate.is_unlocked());
        assert_eq!(gate.submit(None), GateAttempt::Unlocked);
        assert_eq!(gate.submit(Some("wrong")), GateAttempt::Unlocked);
    }
}
