use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use chrono::Local;

use rand::Rng;

use serde::{Deserialize, Serialize};

use tracing::{debug, warn};

use crate::config::InvoiceFault;

use super::{BUSINESS_ADDRESS, BUSINESS_NAME, DEVICE_SERIAL, REQUESTED_BY, TIN};

// Prefix of every fabricated invoice number.
const INVOICE_NUMBER_PREFIX: &str = "AX4F7Y5L-BX4F7Y5L-";

// Canned base64 blobs returned when a rendered receipt image is
// requested. Truncated PDF and a one-pixel PNG, enough for clients to
// exercise their decoding paths.
const CANNED_PDF_BASE64: &str =
    "JVBERi0xLjcKJcOkw7zDtsOfCjIgMCBvYmoKPDwvTGVuZ3RoIDMgMCBSL0ZpbHRlci9GbGF0ZURlY29kZT4+CnN0cmVhbQp4nL1T";
const CANNED_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// Envelope around an invoice issuance request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceData {
    /// The wrapped request.
    pub invoice_request: InvoiceRequest,
}

/// An invoice issuance request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    /// Number of the referent fiscal document, required for copies and
    /// refunds.
    #[serde(default)]
    pub referent_document_number: Option<String>,
    /// Issue time of the referent fiscal document.
    #[serde(rename = "referentDocumentDT", default)]
    pub referent_document_dt: Option<String>,
    /// Invoice kind, i.e. `Normal` or `Copy`.
    pub invoice_type: String,
    /// Transaction kind, i.e. `Sale` or `Refund`.
    pub transaction_type: String,
    /// Payment lines.
    #[serde(default)]
    pub payment: Vec<PaymentLine>,
    /// Invoice line items.
    #[serde(default)]
    pub items: Vec<ItemLine>,
    /// Operator issuing the invoice.
    pub cashier: String,
    /// Buyer identification, prefixed with `VP:` for gross sale.
    #[serde(default)]
    pub buyer_id: Option<String>,
    /// Whether the device should print the receipt.
    #[serde(default)]
    pub print: Option<bool>,
    /// Whether the device should render a receipt image.
    #[serde(default)]
    pub render_receipt_image: Option<bool>,
    /// Receipt layout, i.e. `Invoice` or `Slip`.
    #[serde(default)]
    pub receipt_layout: Option<String>,
    /// Rendered image format, i.e. `Pdf` or `Png`.
    #[serde(default)]
    pub receipt_image_format: Option<String>,
    /// Slip width in characters.
    #[serde(default)]
    pub receipt_slip_width: Option<u32>,
    /// Normal font size on the slip.
    #[serde(default)]
    pub receipt_slip_font_size_normal: Option<u32>,
    /// Large font size on the slip.
    #[serde(default)]
    pub receipt_slip_font_size_large: Option<u32>,
    /// Base64 encoded header image.
    #[serde(default)]
    pub receipt_header_image: Option<String>,
    /// Base64 encoded footer image.
    #[serde(default)]
    pub receipt_footer_image: Option<String>,
    /// Extra header text lines.
    #[serde(default)]
    pub receipt_header_text_lines: Option<Vec<String>>,
    /// Extra footer text lines.
    #[serde(default)]
    pub receipt_footer_text_lines: Option<Vec<String>>,
}

/// A payment line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLine {
    /// Paid amount.
    pub amount: f64,
    /// Payment kind, i.e. `Cash`.
    pub payment_type: String,
}

/// An invoice line item.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemLine {
    /// Article name.
    pub name: String,
    /// Article barcode identifier; mandatory for issuance.
    #[serde(default)]
    pub gtin: Option<String>,
    /// Tax labels, the first one is written on the journal.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Line total.
    pub total_amount: f64,
    /// Unit price.
    pub unit_price: f64,
    /// Quantity.
    pub quantity: f64,
    /// Discount percentage.
    #[serde(default)]
    pub discount: Option<f64>,
    /// Discount amount.
    #[serde(default)]
    pub discount_amount: Option<f64>,
}

/// A fiscal error reported inside an HTTP 200 body.
///
/// The real device reports business failures this way, so the mock keeps
/// the transport status and the semantic status deliberately apart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Optional technical details.
    pub details: Option<String>,
    /// Human readable message.
    pub message: String,
    /// Device status code.
    pub status_code: i32,
}

impl ErrorBody {
    /// Builds the error body for an item without a GTIN code.
    #[must_use]
    pub fn missing_gtin(item_name: &str) -> Self {
        Self {
            details: None,
            message: format!("gtin za artikal {item_name} nije popunjen"),
            status_code: -1,
        }
    }
}

impl From<&InvoiceFault> for ErrorBody {
    fn from(fault: &InvoiceFault) -> Self {
        Self {
            details: None,
            message: fault.message().to_owned(),
            status_code: fault.status_code(),
        }
    }
}

/// A tax line of an issued invoice.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxItem {
    /// Tax amount.
    pub amount: f64,
    /// Category display name.
    pub category_name: &'static str,
    /// Category kind discriminator.
    pub category_type: i32,
    /// Rate label.
    pub label: &'static str,
    /// Rate percentage.
    pub rate: i32,
}

/// The fabricated response to an invoice issuance request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    /// Business street address.
    pub address: &'static str,
    /// Business name.
    pub business_name: &'static str,
    /// Fiscal district.
    pub district: &'static str,
    /// Opaque device-internal blob.
    pub encrypted_internal_data: &'static str,
    /// Per-location invoice counter.
    pub invoice_counter: String,
    /// Counter extension suffix.
    pub invoice_counter_extension: &'static str,
    /// Rendered receipt as HTML, never produced by the mock.
    pub invoice_image_html: Option<String>,
    /// Rendered receipt as base64 PDF.
    pub invoice_image_pdf_base64: Option<String>,
    /// Rendered receipt as base64 PNG.
    pub invoice_image_png_base64: Option<String>,
    /// Full invoice number.
    pub invoice_number: String,
    /// Textual journal of the receipt.
    pub journal: String,
    /// Issuing location name.
    pub location_name: &'static str,
    /// Outcome message.
    pub messages: &'static str,
    /// Manufacturer registration code.
    pub mrc: &'static str,
    /// Requesting terminal.
    pub requested_by: &'static str,
    /// Device clock at issuance.
    pub sdc_date_time: String,
    /// Fabricated signature.
    pub signature: &'static str,
    /// Signing terminal.
    pub signed_by: &'static str,
    /// Tax table revision in force.
    pub tax_group_revision: i32,
    /// Tax lines.
    pub tax_items: Vec<TaxItem>,
    /// Business tax identification number.
    pub tin: &'static str,
    /// Invoice total, computed from the submitted items.
    pub total_amount: f64,
    /// Lifetime invoice counter.
    pub total_counter: i32,
    /// Counter for this transaction type.
    pub transaction_type_counter: i32,
    /// Fabricated verification QR code.
    #[serde(rename = "verificationQRCode")]
    pub verification_qr_code: &'static str,
    /// Fabricated verification URL.
    pub verification_url: &'static str,
}

/// Receipt rendering options of an issuance request, resolved once per
/// request.
///
/// The wire format spreads these over a pile of nullable fields; this
/// struct is the one place where their combined effect is decided.
#[derive(Debug, Default, PartialEq)]
pub struct ReceiptOptions {
    /// Whether the device prints the receipt. Rendering only happens
    /// when printing is explicitly disabled.
    pub print: Option<bool>,
    /// Whether an image of the receipt is rendered into the response.
    pub render_image: Option<bool>,
    /// Rendered layout; `Invoice` selects the PDF path.
    pub layout: Option<String>,
    /// Rendered format; `Pdf` or `Png`.
    pub image_format: Option<String>,
    /// Slip width in characters, informational only.
    pub slip_width: Option<u32>,
    /// Normal slip font size, informational only.
    pub font_size_normal: Option<u32>,
    /// Large slip font size, informational only.
    pub font_size_large: Option<u32>,
    /// Header image, validated as base64.
    pub header_image: Option<String>,
    /// Footer image, validated as base64.
    pub footer_image: Option<String>,
    /// Header text lines, logged.
    pub header_text_lines: Vec<String>,
    /// Footer text lines, logged.
    pub footer_text_lines: Vec<String>,
}

impl ReceiptOptions {
    /// Extracts the rendering options from a request.
    #[must_use]
    pub fn resolve(request: &InvoiceRequest) -> Self {
        Self {
            print: request.print,
            render_image: request.render_receipt_image,
            layout: request.receipt_layout.clone(),
            image_format: request.receipt_image_format.clone(),
            slip_width: request.receipt_slip_width,
            font_size_normal: request.receipt_slip_font_size_normal,
            font_size_large: request.receipt_slip_font_size_large,
            header_image: request.receipt_header_image.clone(),
            footer_image: request.receipt_footer_image.clone(),
            header_text_lines: request.receipt_header_text_lines.clone().unwrap_or_default(),
            footer_text_lines: request.receipt_footer_text_lines.clone().unwrap_or_default(),
        }
    }

    /// Logs the resolved options and validates the embedded images.
    pub fn inspect(&self) {
        if let Some(print) = self.print {
            debug!("print: {print}");
        }
        if let Some(render_image) = self.render_image {
            debug!("renderReceiptImage: {render_image}");
        }
        if let Some(layout) = &self.layout {
            debug!("receiptLayout: {layout}");
        }
        if let Some(image_format) = &self.image_format {
            debug!("receiptImageFormat: {image_format}");
        }
        if let Some(slip_width) = self.slip_width {
            debug!("receiptSlipWidth: {slip_width}");
        }

        for (side, image) in [("header", &self.header_image), ("footer", &self.footer_image)] {
            if let Some(image) = image {
                match BASE64.decode(image) {
                    Ok(bytes) => debug!("receipt {side} image: {} bytes", bytes.len()),
                    Err(_) => warn!("receipt {side} image is not a base64 encoded string"),
                }
            }
        }

        for line in &self.header_text_lines {
            debug!("receipt header line: {line}");
        }
        for line in &self.footer_text_lines {
            debug!("receipt footer line: {line}");
        }
    }

    /// Returns the canned `(pdf, png)` blobs selected by these options.
    ///
    /// An image is only rendered when printing is explicitly disabled,
    /// rendering is explicitly requested, and both layout and format are
    /// given.
    #[must_use]
    pub fn rendered_images(&self) -> (Option<String>, Option<String>) {
        let renders = self.print == Some(false)
            && self.render_image == Some(true)
            && self.layout.is_some()
            && self.image_format.is_some();
        if !renders {
            return (None, None);
        }

        match (self.image_format.as_deref(), self.layout.as_deref()) {
            (Some("Pdf"), Some("Invoice")) => (Some(CANNED_PDF_BASE64.to_owned()), None),
            (Some("Png"), _) => (None, Some(CANNED_PNG_BASE64.to_owned())),
            _ => (None, None),
        }
    }
}

/// Returns the first item missing its GTIN code, if any.
#[must_use]
pub fn find_item_without_gtin(request: &InvoiceRequest) -> Option<&ItemLine> {
    request
        .items
        .iter()
        .find(|item| item.gtin.as_deref().is_none_or(|gtin| gtin.trim().is_empty()))
}

// One journal line per submitted item, in the fixed column format of the
// real journal.
fn items_block(items: &[ItemLine]) -> String {
    let mut block = String::new();
    for item in items {
        let discount = item.discount.unwrap_or(0.0);
        let discount_amount = item.discount_amount.unwrap_or(0.0);
        let label = item.labels.first().map_or("", String::as_str);
        let gtin = item.gtin.as_deref().unwrap_or("");
        block.push_str(&format!(
            "{} quantity: {:.2} unitPrice: {:.2} discount: {:.2} discountAmount: {:.2}  totalAmount: {:.2} label: {} gtin: {}\r\n",
            item.name, item.quantity, item.unit_price, discount, discount_amount,
            item.total_amount, label, gtin,
        ));
    }
    block
}

fn build_journal(title: &str, items: &[ItemLine], total: f64, invoice_number: &str) -> String {
    let mut journal = String::new();
    journal.push_str(&format!("=========== {title} ===========\r\n"));
    journal.push_str(&format!("             {TIN}            \r\n"));
    journal.push_str(&format!("       {BUSINESS_NAME}      \r\n"));
    journal.push_str("      7. Muslimanske Brigade 77      \r\n");
    journal.push_str("              Zenica              \r\n");
    journal.push_str("Kasir:                        Radnik 1\r\n");
    journal.push_str("ESIR BROJ:                      13/2.0\r\n");
    journal.push_str("----------- PROMET PRODAJA -----------\r\n");
    journal.push_str("Аrtikli                               \r\n");
    journal.push_str("======================================\r\n");
    journal.push_str("Naziv  Cijena        Kol.         Ukupno\r\n ");
    journal.push_str(&items_block(items));
    journal.push_str("--------------------------------------\r\n");
    journal.push_str(&format!("Ukupan iznos:                   {total:.2}\r\n"));
    journal.push_str(&format!("Gotovina:                     {total:.2}\r\n"));
    journal.push_str("======================================\r\n");
    journal.push_str("Oznaka    Naziv    Stopa    Porez\r\n");
    journal.push_str("F          ECAL      11%          9,91\r\n");
    journal.push_str("--------------------------------------\r\n");
    journal.push_str("Ukupan iznos poreza:              9,91\r\n");
    journal.push_str("======================================\r\n");
    journal.push_str("PFR brijeme:      12.03.2024. 07:47:09\r\n");
    journal.push_str(&format!("OFS br. rač:      {invoice_number}\r\n"));
    journal.push_str("Brojač računa:               100/138ZE\r\n");
    journal.push_str("======================================\r\n");
    journal.push_str(&format!("======== KRAJ {title}=======\r\n"));
    journal
}

/// Builds the fabricated response to an issuance request.
///
/// The total is the sum of the submitted line totals; the invoice number
/// is a random three digit suffix on a fixed prefix; everything else is
/// canned business data.
#[must_use]
pub fn build_invoice_response(
    request: &InvoiceRequest,
    options: &ReceiptOptions,
) -> InvoiceResponse {
    let total: f64 = request.items.iter().map(|item| item.total_amount).sum();

    let suffix = format!("{:03}", rand::thread_rng().gen_range(1..=999));
    let invoice_number = format!("{INVOICE_NUMBER_PREFIX}{suffix}");

    let title = if request.invoice_type == "Normal" {
        "FISKALNI RAČUN"
    } else {
        "KOPIJA FISKALNOG RAČUNA"
    };

    let (pdf, png) = options.rendered_images();

    InvoiceResponse {
        address: BUSINESS_ADDRESS,
        business_name: BUSINESS_NAME,
        district: "ZEDO",
        encrypted_internal_data: "Vvwq4nVn/wIQFAKE",
        invoice_counter: format!("100/{suffix}ZE"),
        invoice_counter_extension: "ZE",
        invoice_image_html: None,
        invoice_image_pdf_base64: pdf,
        invoice_image_png_base64: png,
        journal: build_journal(title, &request.items, total, &invoice_number),
        invoice_number,
        location_name: "Sigma-com doo Zenica poslovnica Sarajevo",
        messages: "Uspješno",
        mrc: DEVICE_SERIAL,
        requested_by: REQUESTED_BY,
        sdc_date_time: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        signature: "Mw+IB0vgnaMjYrwA7m7zhtRseRIZFAKE",
        signed_by: REQUESTED_BY,
        tax_group_revision: 2,
        tax_items: vec![TaxItem {
            amount: 9.9099,
            category_name: "ECAL",
            category_type: 0,
            label: "F",
            rate: 11,
        }],
        tin: TIN,
        total_amount: total,
        total_counter: 138,
        transaction_type_counter: 100,
        verification_qr_code: "R0lGODlhhAGEAfFAKE",
        verification_url: "https://sandbox.suf.poreskaupravars.org/v/?vl=A1JYNEY3WTVMUlg0FAKE=",
    }
}
