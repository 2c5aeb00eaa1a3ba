//! Backend de controle financeiro: relatórios (limites dos bancos, antecipações,
//! lucro) e lucro mensal, persistidos no Postgres e expostos via HTTP/JSON.

use axum::{
    http::HeaderValue,
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::{AppState, Config};

/// Monta o router completo (rotas + Swagger + CORS + trace).
pub fn app(state: AppState, cors_allow: &[String]) -> Router {
    let report_routes = Router::new()
        .route(
            "/reports",
            get(handlers::reports::list_reports).post(handlers::reports::create_report),
        )
        .route(
            "/reports/{id}",
            put(handlers::reports::update_report).delete(handlers::reports::delete_report),
        );

    let monthly_profit_routes = Router::new().route(
        "/monthly-profit",
        get(handlers::monthly_profit::list_monthly_profit)
            .post(handlers::monthly_profit::save_monthly_profit),
    );

    Router::new()
        .route("/health", get(handlers::health::health))
        .merge(report_routes)
        .merge(monthly_profit_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .layer(cors_layer(cors_allow))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(cors_allow: &[String]) -> CorsLayer {
    if cors_allow.is_empty() || cors_allow.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = cors_allow
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Origem CORS inválida ignorada");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
