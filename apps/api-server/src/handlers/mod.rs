//! HTTP handlers and route configuration.

pub mod actions;
pub mod dispatch;


use actix_web::web;

/// Configure all application routes. The whole API is one endpoint;
/// the `action` parameter selects the operation.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(dispatch::dispatch_get))
        .route("/", web::post().to(dispatch::dispatch_post));
}
