//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::{HttpRequest, error, web};

use crate::middleware::auth::AuthInterceptor;
use crate::middleware::error::AppError;

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> error::Error {
    AppError::BadRequest(err.to_string()).into()
}

fn query_error(err: error::QueryPayloadError, _req: &HttpRequest) -> error::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .service(
            web::scope("/api")
                .wrap(AuthInterceptor)
                // Public routes
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/posts")
                        .route("", web::post().to(posts::create_post))
                        .route("", web::get().to(posts::list_posts))
                        .route("/{id}", web::get().to(posts::get_post))
                        .route("/{id}", web::put().to(posts::update_post))
                        .route("/{id}", web::delete().to(posts::delete_post)),
                ),
        );
}
