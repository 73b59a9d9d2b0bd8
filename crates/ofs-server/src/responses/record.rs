use serde_json::{Value, json};

use super::{BUSINESS_ADDRESS, BUSINESS_NAME, DEVICE_SERIAL, DISTRICT, REQUESTED_BY, TIN};

/// Builds the fabricated full record of a stored invoice.
///
/// The record echoes the requested invoice number; everything else is
/// canned. Numbers starting with `0` report the zero-rated tax line,
/// any other number reports the 17 % one, so clients can exercise both
/// of their tax handling paths.
#[must_use]
pub fn invoice_record(invoice_number: &str) -> Value {
    let standard_rate = !invoice_number.starts_with('0');

    let tax_item = if standard_rate {
        json!({
            "amount": 8.52,
            "categoryName": "ECAL",
            "categoryType": 0,
            "label": "E",
            "rate": 17,
        })
    } else {
        json!({
            "amount": 0.0,
            "categoryName": "NULA",
            "categoryType": 0,
            "label": "K",
            "rate": 0,
        })
    };

    json!({
        "autoGenerated": false,
        "invoiceRequest": {
            "buyerCostCenterId": null,
            "buyerId": null,
            "cashier": "Radnik 1",
            "dateAndTimeOfIssue": null,
            "invoiceNumber": "13/2.0",
            "invoiceType": "Normal",
            "items": [
                {
                    "articleUuid": null,
                    "discount": null,
                    "discountAmount": null,
                    "gtin": "12345678",
                    "labels": ["Е"],
                    "name": "Artikl 1",
                    "plu": null,
                    "quantity": 2,
                    "totalAmount": 100,
                    "unitPrice": 50,
                }
            ],
            "options": {"omitQRCodeGen": 1, "omitTextualRepresentation": null},
            "payment": [{"amount": 100, "paymentType": "Cash"}],
            "referentDocumentDT": null,
            "referentDocumentNumber": null,
            "transactionType": "Sale",
        },
        "invoiceResponse": {
            "address": BUSINESS_ADDRESS,
            "businessName": BUSINESS_NAME,
            "district": DISTRICT,
            "encryptedInternalData": null,
            "invoiceCounter": "100/138ПП",
            "invoiceCounterExtension": "ПП",
            "invoiceImageHtml": null,
            "invoiceImagePdfBase64": null,
            "invoiceImagePngBase64": null,
            "invoiceNumber": invoice_number,
            "journal": null,
            "locationName": BUSINESS_NAME,
            "messages": "Uspješno",
            "mrc": DEVICE_SERIAL,
            "requestedBy": REQUESTED_BY,
            "sdcDateTime": "2024-03-12T07:47:09.548+01:00",
            "signature": null,
            "signedBy": REQUESTED_BY,
            "taxGroupRevision": 2,
            "taxItems": [tax_item],
            "tin": TIN,
            "totalAmount": 100,
            "totalCounter": 138,
            "transactionTypeCounter": 100,
            "verificationQRCode": "R0lGODlhhAGEAfAAAFAKE",
            "verificationUrl": "https://sandbox.suf.poreskaupravars.org/v/?vl=A1JYNEY3WTVMUlg0FAKE=",
        },
        "issueCopy": false,
        "print": true,
        "receiptImageBase64": "iVBORw0KGgoAAkkZu/FAKE",
        "receiptImageFormat": "Png",
        "receiptLayout": "Slip",
        "renderReceiptImage": false,
        "skipEftPos": false,
        "skipEftPosPrint": false,
    })
}
