use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

/// Bearer token accepted by the protected routes when no custom key is
/// configured.
///
/// The value is the fixed key baked into the real integration fixtures.
pub const DEFAULT_API_KEY: &str = "api_key_0123456789abcdef0123456789abcdef";

// Default PIN unlocking the device.
const DEFAULT_PIN: &str = "4321";

// Default server port.
const DEFAULT_PORT: u16 = 8200;

// Default HTTP address.
//
// The entire local network is considered, so the Ipv4 unspecified address
// is used.
const DEFAULT_HTTP_ADDRESS: Ipv4Addr = Ipv4Addr::UNSPECIFIED;

/// Authentication policy for the `/mock` test hooks.
///
/// The two route sets of the real fixtures disagree on whether the hooks
/// require the bearer key, so the policy is selectable instead of baked
/// in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MockHookPolicy {
    /// The hooks are reachable without credentials.
    #[default]
    Open,
    /// The hooks require the same bearer key as the protected routes.
    Bearer,
}

/// A simulated invoice fault.
///
/// When configured, every invoice issuance request answers with this
/// fault embedded in an HTTP 200 error body, the way the real device
/// reports conditions such as an empty paper tray.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceFault {
    // Human readable fault message.
    message: String,
    // Device status code, usually negative.
    status_code: i32,
}

impl InvoiceFault {
    /// Returns the fault message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the fault status code.
    #[must_use]
    pub const fn status_code(&self) -> i32 {
        self.status_code
    }
}

impl FromStr for InvoiceFault {
    type Err = Error;

    /// Parses a `message:code` pair, split at the last colon.
    ///
    /// i.e. `Out of paper:-10`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (message, code) = s.rsplit_once(':').ok_or_else(|| {
            Error::new(
                ErrorKind::Config,
                format!("invoice fault `{s}` is not in `message:code` form"),
            )
        })?;

        let status_code = code.trim().parse::<i32>().map_err(|_| {
            Error::new(
                ErrorKind::Config,
                format!("invoice fault code `{code}` is not an integer"),
            )
        })?;

        Ok(Self {
            message: message.to_owned(),
            status_code,
        })
    }
}

/// The mock server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // HTTP address.
    host: Ipv4Addr,
    // Server port.
    port: u16,
    // Initial device availability.
    available: bool,
    // PIN unlocking the device.
    pin: String,
    // Bearer key protecting the API routes.
    api_key: String,
    // Authentication policy for the mock hooks.
    hook_policy: MockHookPolicy,
    // Simulated invoice fault.
    invoice_fault: Option<InvoiceFault>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerConfig {
    /// Creates a [`ServerConfig`] with the default values: all
    /// interfaces, port `8200`, device unavailable, PIN `4321`, the
    /// fixed bearer key, open mock hooks, no invoice fault.
    #[must_use]
    pub fn new() -> Self {
        Self {
            host: DEFAULT_HTTP_ADDRESS,
            port: DEFAULT_PORT,
            available: false,
            pin: DEFAULT_PIN.to_owned(),
            api_key: DEFAULT_API_KEY.to_owned(),
            hook_policy: MockHookPolicy::default(),
            invoice_fault: None,
        }
    }

    /// Sets the server `IPv4` address.
    #[must_use]
    pub const fn host(mut self, host: Ipv4Addr) -> Self {
        self.host = host;
        self
    }

    /// Sets the server port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the initial device availability.
    #[must_use]
    pub const fn available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Sets the PIN unlocking the device.
    #[must_use]
    pub fn pin(mut self, pin: impl Into<String>) -> Self {
        self.pin = pin.into();
        self
    }

    /// Sets a custom bearer key for the protected routes.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Sets the authentication policy for the `/mock` hooks.
    #[must_use]
    pub const fn hook_policy(mut self, hook_policy: MockHookPolicy) -> Self {
        self.hook_policy = hook_policy;
        self
    }

    /// Injects a simulated invoice fault.
    #[must_use]
    pub fn invoice_fault(mut self, invoice_fault: InvoiceFault) -> Self {
        self.invoice_fault = Some(invoice_fault);
        self
    }

    /// Returns the server `IPv4` address.
    #[must_use]
    pub const fn host_address(&self) -> Ipv4Addr {
        self.host
    }

    /// Returns the server port.
    #[must_use]
    pub const fn server_port(&self) -> u16 {
        self.port
    }

    /// Returns whether the device starts available.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.available
    }

    /// Returns the configured PIN.
    #[must_use]
    pub fn device_pin(&self) -> &str {
        &self.pin
    }

    /// Returns the configured bearer key.
    #[must_use]
    pub fn bearer_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the mock hook authentication policy.
    #[must_use]
    pub const fn mock_hook_policy(&self) -> MockHookPolicy {
        self.hook_policy
    }

    pub(crate) const fn fault(&self) -> Option<&InvoiceFault> {
        self.invoice_fault.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::{DEFAULT_API_KEY, InvoiceFault, MockHookPolicy, ServerConfig};

    #[test]
    fn default_configuration() {
        let config = ServerConfig::new();

        assert_eq!(config.host_address(), Ipv4Addr::UNSPECIFIED);
        assert_eq!(config.server_port(), 8200);
        assert!(!config.is_available());
        assert_eq!(config.device_pin(), "4321");
        assert_eq!(config.bearer_key(), DEFAULT_API_KEY);
        assert_eq!(config.mock_hook_policy(), MockHookPolicy::Open);
        assert!(config.fault().is_none());
    }

    #[test]
    fn builder_overrides() {
        let config = ServerConfig::new()
            .host(Ipv4Addr::LOCALHOST)
            .port(3566)
            .available(true)
            .pin("0000")
            .api_key("my_custom_key_123")
            .hook_policy(MockHookPolicy::Bearer);

        assert_eq!(config.host_address(), Ipv4Addr::LOCALHOST);
        assert_eq!(config.server_port(), 3566);
        assert!(config.is_available());
        assert_eq!(config.device_pin(), "0000");
        assert_eq!(config.bearer_key(), "my_custom_key_123");
        assert_eq!(config.mock_hook_policy(), MockHookPolicy::Bearer);
    }

    #[test]
    fn invoice_fault_parsing() {
        let fault: InvoiceFault = "Out of paper:-10".parse().unwrap();

        assert_eq!(fault.message(), "Out of paper");
        assert_eq!(fault.status_code(), -10);
    }

    #[test]
    fn invoice_fault_splits_at_the_last_colon() {
        let fault: InvoiceFault = "error: printer offline:-2".parse().unwrap();

        assert_eq!(fault.message(), "error: printer offline");
        assert_eq!(fault.status_code(), -2);
    }

    #[test]
    fn invoice_fault_rejects_bad_specifications() {
        assert!("no separator".parse::<InvoiceFault>().is_err());
        assert!("message:not-a-code".parse::<InvoiceFault>().is_err());
    }
}
