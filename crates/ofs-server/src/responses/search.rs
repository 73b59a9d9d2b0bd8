use chrono::NaiveDate;

use serde::Deserialize;

/// Invoice kinds accepted by the search filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum InvoiceType {
    /// Regular invoice.
    Normal,
    /// Advance payment invoice.
    Advance,
}

/// Transaction kinds accepted by the search filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TransactionType {
    /// Sale transaction.
    Sale,
    /// Refund transaction.
    Refund,
}

/// Payment kinds accepted by the search filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PaymentType {
    /// Cash payment.
    Cash,
    /// Wire transfer payment.
    WireTransfer,
    /// Card payment.
    Card,
    /// Any other payment.
    Other,
}

/// An invoice search request.
///
/// The mock validates the shape but ignores every filter; the same fixed
/// sample is returned for any search.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSearch {
    /// Start of the searched period.
    pub from_date: NaiveDate,
    /// End of the searched period.
    pub to_date: NaiveDate,
    /// Lower amount bound.
    #[serde(default)]
    pub amount_from: Option<f64>,
    /// Upper amount bound.
    #[serde(default)]
    pub amount_to: Option<f64>,
    /// Invoice kinds to match.
    pub invoice_types: Vec<InvoiceType>,
    /// Transaction kinds to match.
    pub transaction_types: Vec<TransactionType>,
    /// Payment kinds to match.
    pub payment_types: Vec<PaymentType>,
}

/// The fixed search result, one CSV-like line per invoice:
/// number, invoice type, transaction type, issue time, amount.
pub const SAMPLE_INVOICES: &str = "\
RX4F7Y5L-RX4F7Y5L-1,Normal,Sale,2024-03-06T17:33:12.582+01:00,10.0000
RX4F7Y5L-RX4F7Y5L-131,Normal,Sale,2024-03-11T20:29:05.329+01:00,10.0000
RX4F7Y5L-RX4F7Y5L-132,Normal,Sale,2024-03-11T20:29:25.422+01:00,15.0000
RX4F7Y5L-RX4F7Y5L-133,Normal,Sale,2024-03-11T23:05:53.608+01:00,100.0000
RX4F7Y5L-RX4F7Y5L-134,Normal,Sale,2024-03-11T23:13:55.829+01:00,100.0000
RX4F7Y5L-RX4F7Y5L-135,Normal,Sale,2024-03-11T23:16:03.098+01:00,300.0000
RX4F7Y5L-RX4F7Y5L-137,Normal,Refund,2024-03-11T23:19:54.853+01:00,100.0000
RX4F7Y5L-RX4F7Y5L-138,Normal,Sale,2024-03-12T07:47:09.548+01:00,100.0000
RX4F7Y5L-RX4F7Y5L-139,Normal,Sale,2024-03-12T07:47:38.530+01:00,100.0000
RX4F7Y5L-RX4F7Y5L-140,Normal,Sale,2024-03-12T07:48:47.626+01:00,300.0000
RX4F7Y5L-RX4F7Y5L-142,Normal,Refund,2024-03-12T07:50:19.735+01:00,100.0000
RX4F7Y5L-RX4F7Y5L-143,Advance,Sale,2024-03-12T07:51:53.207+01:00,100.0000
RX4F7Y5L-RX4F7Y5L-144,Advance,Sale,2024-03-12T07:53:26.177+01:00,400.0000
RX4F7Y5L-RX4F7Y5L-145,Advance,Refund,2024-03-12T07:55:07.582+01:00,500.0000
";
