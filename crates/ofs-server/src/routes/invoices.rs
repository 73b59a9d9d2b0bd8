use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use serde::Deserialize;

use serde_json::{Value, json};

use tracing::debug;

use crate::auth::authorize;
use crate::responses::invoice::{
    ErrorBody, InvoiceData, ReceiptOptions, build_invoice_response, find_item_without_gtin,
};
use crate::responses::record::invoice_record;
use crate::responses::search::{InvoiceSearch, SAMPLE_INVOICES};
use crate::state::AppState;

/// Invoice issuance.
///
/// Validates the request, then fabricates an invoice whose total is the
/// sum of the submitted line totals. Business failures, a missing GTIN
/// or an injected fault, are reported inside an HTTP 200 body the way
/// the real device reports them; only a structurally invalid `Copy`
/// request is a transport-level 400.
pub(super) async fn issue(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(data): Json<InvoiceData>,
) -> Response {
    if let Err(unauthorized) = authorize(&headers, state.api_key()) {
        return unauthorized.into_response();
    }

    let request = &data.invoice_request;
    debug!(
        cashier = %request.cashier,
        invoice_type = %request.invoice_type,
        transaction_type = %request.transaction_type,
        "invoice request"
    );
    if let Some(buyer_id) = &request.buyer_id {
        debug!("buyerId: {buyer_id}, gross sale registration starts with VP:");
    }
    for payment in &request.payment {
        debug!(
            "paymentType: {} ; paymentAmount: {}",
            payment.payment_type, payment.amount
        );
    }

    if let Some(fault) = state.invoice_fault() {
        debug!("injected invoice fault: {}", fault.message());
        return (StatusCode::OK, Json(ErrorBody::from(fault))).into_response();
    }

    if let Some(item) = find_item_without_gtin(request) {
        return (StatusCode::OK, Json(ErrorBody::missing_gtin(&item.name))).into_response();
    }

    if request.invoice_type == "Copy"
        && (request.referent_document_number.is_none() || request.referent_document_dt.is_none())
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Copy ne sadrzi referentDocumentNumber and DT" })),
        )
            .into_response();
    }

    if request.transaction_type == "Refund" {
        debug!(
            "refund of referent document {:?} issued {:?}",
            request.referent_document_number, request.referent_document_dt
        );
    }

    let options = ReceiptOptions::resolve(request);
    options.inspect();

    Json(build_invoice_response(request, &options)).into_response()
}

/// Invoice search.
///
/// The typed filters are validated and then ignored; every search
/// returns the same fixed sample.
pub(super) async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(search): Json<InvoiceSearch>,
) -> Response {
    if let Err(unauthorized) = authorize(&headers, state.api_key()) {
        return unauthorized.into_response();
    }

    debug!(
        "invoice search from {} to {}",
        search.from_date, search.to_date
    );

    SAMPLE_INVOICES.into_response()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RecordQuery {
    #[serde(default)]
    image_format: Option<String>,
    #[serde(default)]
    include_header_and_footer: Option<bool>,
    #[serde(default)]
    receipt_layout: Option<String>,
}

/// Invoice retrieval, unauthenticated.
///
/// Echoes the requested number inside a fabricated record; the literal
/// number `ERROR` answers with an error marker so clients can exercise
/// their failure path.
pub(super) async fn retrieve(
    Path(invoice_number): Path<String>,
    Query(query): Query<RecordQuery>,
) -> Json<Value> {
    debug!(
        "invoice retrieval {invoice_number}, imageFormat: {:?}, includeHeaderAndFooter: {:?}, receiptLayout: {:?}",
        query.image_format, query.include_header_and_footer, query.receipt_layout
    );

    if invoice_number.trim() == "ERROR" {
        return Json(json!({ "error": 1 }));
    }

    Json(invoice_record(&invoice_number))
}
