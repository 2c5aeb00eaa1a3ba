// src/handlers/health.rs

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Servidor no ar", body = String)
    )
)]
pub async fn health() -> &'static str {
    "OK"
}
