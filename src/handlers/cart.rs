use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::domain::cart::LineKey;
use crate::errors::AppError;
use crate::state::AppState;

use super::dto::{
    into_responses, AddToCartRequest, CartItemResponse, CartLineParams, ConfirmationResponse,
    UpdateCartItemRequest,
};
use super::identity::CurrentUser;

/// GET /api/cart
///
/// Returns the caller's cart lines in the order they were first added. A cart
/// is created on first access.
#[utoipa::path(
    get,
    path = "/api/cart",
    params(("X-User-Id" = Uuid, Header, description = "Caller's user id")),
    responses(
        (status = 200, description = "Current cart", body = Vec<CartItemResponse>),
        (status = 401, description = "Missing or malformed user id"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn get_cart(
    state: web::Data<AppState>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let items = web::block(move || state.carts.get_cart(user.id())).await??;
    Ok(HttpResponse::Ok().json(into_responses::<_, CartItemResponse>(items)))
}

/// POST /api/cart
///
/// Adds units of a product variant. Adding a variant already in the cart
/// increases that line's quantity instead of adding a second line.
#[utoipa::path(
    post,
    path = "/api/cart",
    params(("X-User-Id" = Uuid, Header, description = "Caller's user id")),
    request_body = AddToCartRequest,
    responses(
        (status = 201, description = "Cart after the add", body = Vec<CartItemResponse>),
        (status = 400, description = "Malformed request, quantity below 1, or unknown size/color"),
        (status = 401, description = "Missing or malformed user id"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn add_to_cart(
    state: web::Data<AppState>,
    user: CurrentUser,
    body: web::Json<AddToCartRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let key = LineKey::new(body.product_id, body.size, body.color);

    let items =
        web::block(move || state.carts.add_to_cart(user.id(), key, body.quantity)).await??;
    Ok(HttpResponse::Created().json(into_responses::<_, CartItemResponse>(items)))
}

/// PUT /api/cart/{product_id}
///
/// Sets the quantity of one line. A quantity of zero or less removes the line.
#[utoipa::path(
    put,
    path = "/api/cart/{product_id}",
    params(
        ("product_id" = Uuid, Path, description = "Product UUID"),
        ("X-User-Id" = Uuid, Header, description = "Caller's user id"),
    ),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Cart after the update", body = Vec<CartItemResponse>),
        (status = 400, description = "Malformed request"),
        (status = 401, description = "Missing or malformed user id"),
        (status = 404, description = "No such line in the cart"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn update_cart_item(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCartItemRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let key = LineKey::new(path.into_inner(), body.size, body.color);

    let items =
        web::block(move || state.carts.update_cart_item(user.id(), key, body.quantity)).await??;
    Ok(HttpResponse::Ok().json(into_responses::<_, CartItemResponse>(items)))
}

/// DELETE /api/cart/{product_id}?size=..&color=..
///
/// Removes one line. Removing a line that is not in the cart is not an error.
#[utoipa::path(
    delete,
    path = "/api/cart/{product_id}",
    params(
        ("product_id" = Uuid, Path, description = "Product UUID"),
        ("size" = String, Query, description = "Size label of the line"),
        ("color" = String, Query, description = "Color label of the line"),
        ("X-User-Id" = Uuid, Header, description = "Caller's user id"),
    ),
    responses(
        (status = 200, description = "Cart after the removal", body = Vec<CartItemResponse>),
        (status = 400, description = "Missing size or color"),
        (status = 401, description = "Missing or malformed user id"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn remove_from_cart(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
    query: web::Query<CartLineParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let key = LineKey::new(path.into_inner(), params.size, params.color);

    let items = web::block(move || state.carts.remove_from_cart(user.id(), key)).await??;
    Ok(HttpResponse::Ok().json(into_responses::<_, CartItemResponse>(items)))
}

/// DELETE /api/cart
#[utoipa::path(
    delete,
    path = "/api/cart",
    params(("X-User-Id" = Uuid, Header, description = "Caller's user id")),
    responses(
        (status = 200, description = "Cart emptied", body = ConfirmationResponse),
        (status = 401, description = "Missing or malformed user id"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn clear_cart(
    state: web::Data<AppState>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    web::block(move || state.carts.clear_cart(user.id())).await??;
    Ok(HttpResponse::Ok().json(ConfirmationResponse {
        success: true,
        message: "Cart cleared".to_string(),
    }))
}
