pub mod cart;
pub mod catalog;
pub mod dto;
pub mod identity;
pub mod wishlist;

use actix_web::{web, HttpResponse};

use crate::errors::AppError;

/// GET /health
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Registers every API route plus extractor configs that turn malformed
/// bodies, paths and query strings into `400 Bad Request`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into()),
    )
    .route("/health", web::get().to(health))
    .service(
        web::scope("/api")
            .service(
                web::scope("/cart")
                    .route("", web::get().to(cart::get_cart))
                    .route("", web::post().to(cart::add_to_cart))
                    .route("", web::delete().to(cart::clear_cart))
                    .route("/{product_id}", web::put().to(cart::update_cart_item))
                    .route("/{product_id}", web::delete().to(cart::remove_from_cart)),
            )
            .service(
                web::scope("/wishlist")
                    .route("", web::get().to(wishlist::get_wishlist))
                    .route("", web::post().to(wishlist::add_to_wishlist))
                    .route("/{product_id}", web::delete().to(wishlist::remove_from_wishlist)),
            )
            .service(
                web::scope("/products")
                    .route("", web::get().to(catalog::list_products))
                    .route("", web::post().to(catalog::create_product))
                    .route("/featured", web::get().to(catalog::list_featured_products))
                    .route("/{id}", web::get().to(catalog::get_product))
                    .route("/{id}", web::put().to(catalog::update_product))
                    .route("/{id}", web::delete().to(catalog::delete_product)),
            )
            .service(
                web::scope("/categories")
                    .route("", web::get().to(catalog::list_categories))
                    .route("", web::post().to(catalog::create_category))
                    .route("/{slug}", web::get().to(catalog::get_category))
                    .route("/{id}", web::put().to(catalog::update_category))
                    .route("/{id}", web::delete().to(catalog::delete_category))
                    .route("/{id}/products", web::get().to(catalog::list_category_products)),
            ),
    );
}
