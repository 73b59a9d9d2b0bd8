use log::debug;

use crate::pin::{MAX_PIN_FAILURES, PIN_LENGTH, PinOutcome};

/// Whether the device currently reports itself operational.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// The device accepts invoice operations.
    Available,
    /// The device refuses invoice operations until unlocked.
    Unavailable,
}

impl Availability {
    /// Returns the numeric code the availability probe reports for this
    /// state: `200` when available, `404` otherwise.
    #[must_use]
    pub const fn attention_code(self) -> u16 {
        match self {
            Self::Available => 200,
            Self::Unavailable => 404,
        }
    }
}

impl core::fmt::Display for Availability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Available => "Available",
            Self::Unavailable => "Unavailable",
        }
        .fmt(f)
    }
}

/// The mutable state of a fiscal device.
///
/// A [`FiscalDevice`] owns the expected PIN, the consecutive failure
/// counter, and the availability flag. It is created once at process
/// start and mutated only through [`submit_pin`], [`force_lock`], and
/// [`force_unlock`].
///
/// The expected PIN is fixed for the lifetime of the device; there is no
/// change-PIN operation.
///
/// [`submit_pin`]: FiscalDevice::submit_pin
/// [`force_lock`]: FiscalDevice::force_lock
/// [`force_unlock`]: FiscalDevice::force_unlock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiscalDevice {
    // Credential that unlocks the device.
    expected_pin: String,
    // Consecutive wrong submissions since the last success or reset.
    pin_failures: u8,
    // Availability reported to the probe endpoint.
    availability: Availability,
}

impl FiscalDevice {
    /// Creates a [`FiscalDevice`] expecting the given PIN.
    ///
    /// The device starts unavailable with a clean failure counter.
    #[must_use]
    pub fn new(expected_pin: impl Into<String>) -> Self {
        Self {
            expected_pin: expected_pin.into(),
            pin_failures: 0,
            availability: Availability::Unavailable,
        }
    }

    /// Starts the device in the available state.
    #[must_use]
    pub fn available(mut self) -> Self {
        self.availability = Availability::Available;
        self
    }

    /// Submits a candidate PIN and applies the resulting transition.
    ///
    /// A locked out device absorbs every submission, even a correct one,
    /// without changing state. A submission whose length differs from
    /// [`PIN_LENGTH`] does not count as an attempt. A matching PIN
    /// unlocks the device and clears the failure counter; a wrong one
    /// increments it, locking the device out on failure number
    /// [`MAX_PIN_FAILURES`].
    pub fn submit_pin(&mut self, candidate: &str) -> PinOutcome {
        if self.is_locked_out() {
            debug!("PIN submission on a locked out device");
            return PinOutcome::LockedOut;
        }

        let length = candidate.chars().count();
        if length != PIN_LENGTH {
            debug!("PIN submission with wrong length {length}");
            return PinOutcome::BadFormat;
        }

        if candidate == self.expected_pin {
            self.pin_failures = 0;
            self.availability = Availability::Available;
            debug!("PIN accepted, device available");
            return PinOutcome::Accepted;
        }

        self.pin_failures += 1;
        self.availability = Availability::Unavailable;
        if self.pin_failures >= MAX_PIN_FAILURES {
            debug!("PIN rejected, device locked out");
            PinOutcome::LockedOut
        } else {
            debug!("PIN rejected, attempt {}", self.pin_failures);
            PinOutcome::Retry
        }
    }

    /// Forces the device into the unavailable state and clears the
    /// failure counter.
    ///
    /// Clearing the counter also clears an existing lockout, so a locked
    /// out device becomes retryable again even though it still reports
    /// itself unavailable. This mirrors the behavior of the real lock
    /// hook, quirk included.
    pub fn force_lock(&mut self) {
        self.availability = Availability::Unavailable;
        self.pin_failures = 0;
        debug!("device force-locked");
    }

    /// Forces the device into the available state.
    ///
    /// The failure counter and a pending lockout are left untouched.
    pub fn force_unlock(&mut self) {
        self.availability = Availability::Available;
        debug!("device force-unlocked");
    }

    /// Returns the current availability.
    #[must_use]
    pub const fn availability(&self) -> Availability {
        self.availability
    }

    /// Returns `true` when the device reports itself operational.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self.availability, Availability::Available)
    }

    /// Returns `true` once the failure counter has reached the lockout
    /// threshold.
    #[must_use]
    pub const fn is_locked_out(&self) -> bool {
        self.pin_failures >= MAX_PIN_FAILURES
    }

    /// Returns the consecutive failure count.
    #[must_use]
    pub const fn pin_failures(&self) -> u8 {
        self.pin_failures
    }

    /// Returns the numeric code the availability probe reports.
    #[must_use]
    pub const fn attention_code(&self) -> u16 {
        self.availability.attention_code()
    }
}
