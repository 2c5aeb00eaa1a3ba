// src/handlers/monthly_profit.rs

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    models::{
        monthly_profit::{MonthlyEntry, MonthlyEntryPayload},
        response::MessageResponse,
    },
};

// GET /monthly-profit
#[utoipa::path(
    get,
    path = "/monthly-profit",
    tag = "Monthly Profit",
    responses(
        (status = 200, description = "Lucro mensal em ordem de calendário", body = Vec<MonthlyEntry>),
        (status = 500, description = "Erro ao buscar lucro mensal", body = MessageResponse)
    )
)]
pub async fn list_monthly_profit(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {

    let entries = app_state
        .monthly_profit_service
        .list()
        .await
        .map_err(|e| e.to_api_error("Erro ao buscar lucro mensal"))?;

    Ok((StatusCode::OK, Json(entries)))
}

// POST /monthly-profit (espera um array com os 12 meses)
#[utoipa::path(
    post,
    path = "/monthly-profit",
    tag = "Monthly Profit",
    request_body = Vec<MonthlyEntryPayload>,
    responses(
        (status = 200, description = "Todos os meses gravados", body = MessageResponse),
        (status = 400, description = "Campos ausentes, inválidos ou mês repetido", body = MessageResponse),
        (status = 500, description = "Pelo menos um mês falhou (os demais podem ter sido gravados)", body = MessageResponse)
    )
)]
pub async fn save_monthly_profit(
    State(app_state): State<AppState>,
    payload: Result<Json<Vec<MonthlyEntryPayload>>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {

    let Json(payload) = payload.map_err(AppError::from)?;
    tracing::debug!(entries = payload.len(), "Dados recebidos no POST /monthly-profit");

    let entries = payload
        .into_iter()
        .map(MonthlyEntryPayload::into_entry)
        .collect::<Result<Vec<_>, _>>()
        .map_err(AppError::from)?;

    app_state
        .monthly_profit_service
        .save_all(entries)
        .await
        .map_err(|e| e.to_api_error("Erro ao salvar lucro mensal"))?;

    Ok((StatusCode::OK, Json(MessageResponse::new("Lucro mensal salvo com sucesso"))))
}
