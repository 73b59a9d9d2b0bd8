use std::sync::Arc;

use ofs_device::device::FiscalDevice;

use tokio::sync::Mutex;

use crate::config::{InvoiceFault, MockHookPolicy, ServerConfig};

/// The state shared by all endpoint handlers.
///
/// The device lives behind a single mutex so that every PIN submission
/// and every lock hook runs its whole read-modify-write section
/// atomically: two concurrent wrong submissions are both counted and the
/// third deterministically locks the device out, whatever the
/// interleaving.
///
/// Cloning is cheap; all clones observe the same device.
#[derive(Debug, Clone)]
pub struct AppState {
    // The single process-wide device instance.
    device: Arc<Mutex<FiscalDevice>>,
    // Bearer key protecting the API routes.
    api_key: Arc<str>,
    // Authentication policy for the mock hooks.
    hook_policy: MockHookPolicy,
    // Simulated invoice fault.
    invoice_fault: Option<Arc<InvoiceFault>>,
}

impl AppState {
    /// Creates the [`AppState`] described by the given configuration.
    #[must_use]
    pub fn new(config: &ServerConfig) -> Self {
        let mut device = FiscalDevice::new(config.device_pin());
        if config.is_available() {
            device = device.available();
        }

        Self {
            device: Arc::new(Mutex::new(device)),
            api_key: Arc::from(config.bearer_key()),
            hook_policy: config.mock_hook_policy(),
            invoice_fault: config.fault().map(|fault| Arc::new(fault.clone())),
        }
    }

    pub(crate) fn device(&self) -> &Mutex<FiscalDevice> {
        &self.device
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) const fn hook_policy(&self) -> MockHookPolicy {
        self.hook_policy
    }

    pub(crate) fn invoice_fault(&self) -> Option<&InvoiceFault> {
        self.invoice_fault.as_deref()
    }
}
