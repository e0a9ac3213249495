// src/api/routes.rs
use actix_web::http::{Method, header};
use actix_web::middleware::DefaultHeaders;
use actix_web::{guard, web};

use super::AppState;
use super::handlers;

/// Installs shared state, the body size limit and the route table.
pub fn configure(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let max_body_bytes = state.config.server.max_body_bytes;
        cfg.app_data(web::Data::new(state))
            .app_data(web::PayloadConfig::new(max_body_bytes));
        configure_routes(cfg);
    }
}

/// Every path answers the scoring contract; only `GET /health` is reserved.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            .wrap(DefaultHeaders::new().add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")))
            .service(
                web::resource("/health")
                    .guard(guard::Get())
                    .to(handlers::health_check),
            )
            .service(
                web::resource("/{_:.*}")
                    .route(web::post().to(handlers::assess_risk))
                    .route(web::method(Method::OPTIONS).to(handlers::preflight))
                    .default_service(web::to(handlers::method_not_allowed)),
            ),
    );
}
