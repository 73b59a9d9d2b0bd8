/// Invoice issuance payloads: request shapes, receipt options, and the
/// fabricated invoice response.
pub mod invoice;
/// The fabricated record returned by invoice retrieval.
pub mod record;
/// Invoice search payloads and the fixed result sample.
pub mod search;
/// The fixed device status payload.
pub mod status;

// Business identity baked into every fiscal payload.
pub(crate) const BUSINESS_NAME: &str = "Sigma-com doo Zenica";
pub(crate) const BUSINESS_ADDRESS: &str = "Ulica 7. Muslimanske brigade 77";
pub(crate) const DISTRICT: &str = "Zenica";
pub(crate) const TIN: &str = "4402692070009";

// Device identity.
pub(crate) const DEVICE_SERIAL: &str = "01-0001-WPYB002248200772";
pub(crate) const REQUESTED_BY: &str = "RX4F7Y5L";
