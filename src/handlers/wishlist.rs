use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

use super::dto::{into_responses, AddToWishlistRequest, WishlistItemResponse};
use super::identity::CurrentUser;

/// GET /api/wishlist
#[utoipa::path(
    get,
    path = "/api/wishlist",
    params(("X-User-Id" = Uuid, Header, description = "Caller's user id")),
    responses(
        (status = 200, description = "Current wishlist", body = Vec<WishlistItemResponse>),
        (status = 401, description = "Missing or malformed user id"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "wishlist"
)]
pub async fn get_wishlist(
    state: web::Data<AppState>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let items = web::block(move || state.wishlists.get_wishlist(user.id())).await??;
    Ok(HttpResponse::Ok().json(into_responses::<_, WishlistItemResponse>(items)))
}

/// POST /api/wishlist
///
/// Saves a product. Saving a product twice keeps the single existing entry;
/// the response is then `200` rather than `201`.
#[utoipa::path(
    post,
    path = "/api/wishlist",
    params(("X-User-Id" = Uuid, Header, description = "Caller's user id")),
    request_body = AddToWishlistRequest,
    responses(
        (status = 201, description = "Product saved", body = Vec<WishlistItemResponse>),
        (status = 200, description = "Product was already saved", body = Vec<WishlistItemResponse>),
        (status = 400, description = "Malformed request"),
        (status = 401, description = "Missing or malformed user id"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "wishlist"
)]
pub async fn add_to_wishlist(
    state: web::Data<AppState>,
    user: CurrentUser,
    body: web::Json<AddToWishlistRequest>,
) -> Result<HttpResponse, AppError> {
    let product_id = body.into_inner().product_id;

    let update =
        web::block(move || state.wishlists.add_to_wishlist(user.id(), product_id)).await??;
    let items = into_responses::<_, WishlistItemResponse>(update.items);
    if update.added {
        Ok(HttpResponse::Created().json(items))
    } else {
        Ok(HttpResponse::Ok().json(items))
    }
}

/// DELETE /api/wishlist/{product_id}
#[utoipa::path(
    delete,
    path = "/api/wishlist/{product_id}",
    params(
        ("product_id" = Uuid, Path, description = "Product UUID"),
        ("X-User-Id" = Uuid, Header, description = "Caller's user id"),
    ),
    responses(
        (status = 200, description = "Wishlist after the removal", body = Vec<WishlistItemResponse>),
        (status = 400, description = "Malformed product id"),
        (status = 401, description = "Missing or malformed user id"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "wishlist"
)]
pub async fn remove_from_wishlist(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();

    let items =
        web::block(move || state.wishlists.remove_from_wishlist(user.id(), product_id)).await??;
    Ok(HttpResponse::Ok().json(into_responses::<_, WishlistItemResponse>(items)))
}
