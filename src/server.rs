// src/server.rs
use actix_web::dev::Server;
use actix_web::{App, HttpServer, middleware};
use std::net::TcpListener;

use crate::api::{self, AppState};

/// Builds the HTTP server on an already bound listener.
///
/// Binding happens outside so that a taken port surfaces as a startup error
/// and tests can hand over `127.0.0.1:0`.
pub fn build_server(listener: TcpListener, state: AppState) -> std::io::Result<Server> {
    let workers = state.config.server.workers;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .configure(api::configure(state.clone()))
    })
    .workers(workers)
    .listen(listener)?
    .run();

    Ok(server)
}
