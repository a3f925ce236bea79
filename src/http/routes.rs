use crate::http;
use actix_web::web;

/// Mount the API index plus every HTTP sub-module under `/api`.
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(http::health::index).service(
        web::scope("/api")
            .configure(http::auth::init_routes)
            .configure(http::games::init_routes)
            .configure(http::upload::init_routes)
            .configure(http::health::init_routes),
    );
}
