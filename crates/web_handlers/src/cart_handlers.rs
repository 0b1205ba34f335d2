use actix_web::{HttpResponse, web};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use booking_core::{
    AddCartItemRequest, BookingError, CartLineItem, CheckoutRequest, OrderGateway, OrderPayload,
    is_free_for, price_stay,
};

use crate::booking_store::BookingStore;

/// One successfully created order at checkout
#[derive(Debug, Serialize)]
pub struct OrderResult {
    /// The cart line item that was submitted
    pub line_item_id: Uuid,
    /// Identifier of the created order
    pub order_id: String,
    /// Identifier of the reservation the order service created
    pub reservation_id: Option<String>,
}

/// One line item the order service rejected
#[derive(Debug, Serialize)]
pub struct OrderFailure {
    /// The cart line item that was submitted
    pub line_item_id: Uuid,
    /// Why the order service rejected it
    pub error: String,
}

/// Response structure for checkout submission
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// Line items the order service confirmed
    pub confirmed: Vec<OrderResult>,
    /// Line items the order service rejected
    pub failed: Vec<OrderFailure>,
}

/// Adds a priced stay to the cart.
///
/// The site must pass the strict availability filter for the exact window at
/// submission time. The returned line item carries the full priced
/// breakdown; its total is what checkout later forwards unchanged.
pub async fn add_cart_item(
    pool: web::Data<sqlx::PgPool>,
    request: web::Json<AddCartItemRequest>,
) -> Result<HttpResponse, BookingError> {
    // Validate the request
    request
        .validate()
        .map_err(|e| BookingError::Validation(format!("Validation error: {}", e)))?;

    let window = request.window()?;
    let occupants = request.occupants()?;

    let store = BookingStore::new(pool.get_ref().clone());
    let site = store.get_site(&request.site_id).await?;
    let windows = store.get_event_windows_for_site(&request.site_id).await?;

    if !windows.permits(&window) {
        return Err(BookingError::Validation(
            "Requested dates fall outside the event's booking window".to_string(),
        ));
    }

    if !is_free_for(&site, &window) {
        return Err(BookingError::SiteUnavailable);
    }

    let quote = price_stay(&site.rates, &window, &occupants, request.mode)?;
    let item = CartLineItem::build(&site, &window, &occupants, &quote);

    Ok(HttpResponse::Created().json(item))
}

/// Submits cart line items to the external order service.
///
/// Line items are forwarded verbatim; availability is not re-checked here.
/// The order service owns the write-time conflict check, so a stay that was
/// free at add-to-cart time can still come back as a conflict — that
/// rejection is reported per item rather than failing the whole checkout.
pub async fn checkout(
    gateway: web::Data<dyn OrderGateway>,
    request: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, BookingError> {
    // Validate the request
    request
        .validate()
        .map_err(|e| BookingError::Validation(format!("Validation error: {}", e)))?;

    let mut confirmed = Vec::new();
    let mut failed = Vec::new();

    for item in &request.items {
        let payload = OrderPayload::from(item);

        match gateway.create_order(&payload).await {
            Ok(confirmation) => confirmed.push(OrderResult {
                line_item_id: item.id,
                order_id: confirmation.order_id,
                reservation_id: confirmation.reservation_id,
            }),
            Err(e) => {
                log::warn!("Order creation failed for line item {}: {}", item.id, e);
                failed.push(OrderFailure {
                    line_item_id: item.id,
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(HttpResponse::Ok().json(CheckoutResponse { confirmed, failed }))
}
