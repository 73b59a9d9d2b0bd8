use serde::Serialize;

use super::DEVICE_SERIAL;

/// A single tax rate entry.
#[derive(Debug, Clone, Serialize)]
pub struct TaxRate {
    /// Rate label, i.e. `E`.
    pub label: &'static str,
    /// Rate percentage.
    pub rate: i32,
}

/// A tax category grouping one or more rates.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCategory {
    /// Category kind discriminator.
    pub category_type: i32,
    /// Category display name.
    pub name: &'static str,
    /// Ordering index within the group.
    pub order_id: i32,
    /// Rates belonging to this category.
    pub tax_rates: Vec<TaxRate>,
}

/// A versioned group of tax categories.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRateGroup {
    /// Group identifier.
    pub group_id: &'static str,
    /// Categories belonging to this group.
    pub tax_categories: Vec<TaxCategory>,
    /// Start of validity, empty when open ended.
    pub valid_from: &'static str,
}

/// The device status payload.
///
/// Everything in it is fixed; the device always reports the same serial
/// number, tax tables, and versions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// Every tax rate group the device has ever known.
    pub all_tax_rates: Vec<TaxRateGroup>,
    /// Tax rate groups currently in force.
    pub current_tax_rates: Vec<TaxRateGroup>,
    /// Device serial number.
    pub device_serial_number: &'static str,
    /// General status codes, kept for backward compatibility.
    pub gsc: Vec<&'static str>,
    /// Hardware revision.
    pub hardware_version: &'static str,
    /// Number of the last issued invoice.
    pub last_invoice_number: &'static str,
    /// Device make.
    pub make: &'static str,
    /// Device model.
    pub model: &'static str,
    /// Manufacturer specific status codes.
    pub mssc: Vec<&'static str>,
    /// Protocol revision.
    pub protocol_version: &'static str,
    /// Device clock reading.
    pub sdc_date_time: &'static str,
    /// Software revision.
    pub software_version: &'static str,
    /// Receipt languages the device can render.
    pub supported_languages: Vec<&'static str>,
}

// Category names are the Cyrillic variants the real device sends.
fn tax_category_no_vat() -> TaxCategory {
    TaxCategory {
        category_type: 0,
        name: "Без ПДВ",
        order_id: 4,
        tax_rates: vec![TaxRate {
            label: "G",
            rate: 0,
        }],
    }
}

fn tax_category_outside_vat() -> TaxCategory {
    TaxCategory {
        category_type: 0,
        name: "Nije u PDV",
        order_id: 1,
        tax_rates: vec![TaxRate {
            label: "A",
            rate: 0,
        }],
    }
}

fn tax_category_reduced() -> TaxCategory {
    TaxCategory {
        category_type: 6,
        name: "Г-A-Ђ-Љ П-ПДВ",
        order_id: 3,
        tax_rates: vec![TaxRate {
            label: "E",
            rate: 10,
        }],
    }
}

fn tax_category_standard() -> TaxCategory {
    TaxCategory {
        category_type: 6,
        name: "D-PDV",
        order_id: 3,
        tax_rates: vec![TaxRate {
            label: "D",
            rate: 20,
        }],
    }
}

/// Builds the fixed status payload.
#[must_use]
pub fn status_response() -> StatusResponse {
    StatusResponse {
        all_tax_rates: vec![
            TaxRateGroup {
                group_id: "1",
                tax_categories: vec![tax_category_no_vat()],
                valid_from: "2021-11-01T02:00:00.000+01:00",
            },
            TaxRateGroup {
                group_id: "6",
                tax_categories: vec![
                    tax_category_outside_vat(),
                    tax_category_reduced(),
                    tax_category_standard(),
                ],
                valid_from: "",
            },
        ],
        current_tax_rates: vec![TaxRateGroup {
            group_id: "6",
            tax_categories: vec![tax_category_no_vat(), tax_category_reduced()],
            valid_from: "2024-05-01T02:00:00.000+01:00",
        }],
        device_serial_number: DEVICE_SERIAL,
        gsc: vec!["9999", "0210"],
        hardware_version: "1.0",
        last_invoice_number: "RX4F7Y5L-RX4F7Y5L-132",
        make: "OFS",
        model: "OFS P5 EFU LPFR",
        mssc: Vec::new(),
        protocol_version: "2.0",
        sdc_date_time: "2024-09-15T23:03:24.390+01:00",
        software_version: "2.0",
        supported_languages: vec!["bs-BA", "bs-Cyrl-BA", "sr-BA", "en-US"],
    }
}

#[cfg(test)]
mod tests {
    use super::status_response;

    #[test]
    fn compatibility_fields() {
        let status = status_response();

        // The GSC list is a legacy field clients still read.
        assert!(!status.gsc.is_empty());
        assert_eq!(status.protocol_version, "2.0");
        assert!(!status.device_serial_number.is_empty());
    }

    #[test]
    fn wire_names_are_camel_case() {
        let value = serde_json::to_value(status_response()).unwrap();

        assert!(value.get("deviceSerialNumber").is_some());
        assert!(value.get("allTaxRates").is_some());
        assert!(value.get("supportedLanguages").is_some());
    }

    #[test]
    fn current_rates_are_a_subset_of_groups() {
        let status = status_response();

        assert_eq!(status.all_tax_rates.len(), 2);
        assert_eq!(status.current_tax_rates.len(), 1);
        assert_eq!(status.current_tax_rates[0].group_id, "6");
    }
}
