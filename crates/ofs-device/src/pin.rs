/// Required PIN length, in characters.
///
/// Submissions of any other length are rejected as badly formatted and do
/// not count as attempts.
pub const PIN_LENGTH: usize = 4;

/// Number of consecutive wrong submissions after which the device locks
/// out.
pub const MAX_PIN_FAILURES: u8 = 3;

/// The outcome of a PIN submission.
///
/// Each outcome maps to the four-digit code the device writes on the
/// wire as a plain-text response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinOutcome {
    /// The submitted PIN matched. The device is unlocked and reports
    /// itself available.
    Accepted,
    /// The submitted PIN was well formed but wrong. The caller may
    /// submit again.
    Retry,
    /// The submitted PIN did not have the required length. The failure
    /// counter is untouched.
    BadFormat,
    /// The device is locked out after repeated failures. Every further
    /// submission returns this outcome until an external reset.
    LockedOut,
}

impl PinOutcome {
    /// Returns the wire code of this outcome.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Accepted => "0100",
            Self::Retry => "2400",
            Self::BadFormat => "2800",
            Self::LockedOut => "1300",
        }
    }
}

impl core::fmt::Display for PinOutcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.code())
    }
}
