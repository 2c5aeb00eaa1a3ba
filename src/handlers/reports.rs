// src/handlers/reports.rs

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    models::{
        report::{Report, ReportInput, ReportPayload},
        response::{CreatedResponse, MessageResponse},
    },
};

// Lê o corpo JSON e valida; qualquer falha vira 400
fn parse_payload(
    payload: Result<Json<ReportPayload>, JsonRejection>,
) -> Result<ReportInput, AppError> {
    let Json(payload) = payload?;
    Ok(payload.into_input()?)
}

// GET /reports
#[utoipa::path(
    get,
    path = "/reports",
    tag = "Reports",
    responses(
        (status = 200, description = "Todos os relatórios, do mais recente para o mais antigo", body = Vec<Report>),
        (status = 500, description = "Erro ao buscar relatórios", body = MessageResponse)
    )
)]
pub async fn list_reports(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {

    let reports = app_state
        .report_service
        .list()
        .await
        .map_err(|e| e.to_api_error("Erro ao buscar relatórios"))?;

    Ok((StatusCode::OK, Json(reports)))
}

// POST /reports
#[utoipa::path(
    post,
    path = "/reports",
    tag = "Reports",
    request_body = ReportPayload,
    responses(
        (status = 201, description = "Relatório salvo", body = CreatedResponse),
        (status = 400, description = "Campos ausentes ou inválidos", body = MessageResponse),
        (status = 500, description = "Erro ao salvar relatório", body = MessageResponse)
    )
)]
pub async fn create_report(
    State(app_state): State<AppState>,
    payload: Result<Json<ReportPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {

    let input = parse_payload(payload)?;

    let id = app_state
        .report_service
        .create(input)
        .await
        .map_err(|e| e.to_api_error("Erro ao salvar relatório"))?;

    let body = CreatedResponse {
        message: "Relatório salvo com sucesso".to_string(),
        id,
    };
    Ok((StatusCode::CREATED, Json(body)))
}

// PUT /reports/{id}
#[utoipa::path(
    put,
    path = "/reports/{id}",
    tag = "Reports",
    request_body = ReportPayload,
    responses(
        (status = 200, description = "Relatório atualizado (id inexistente também responde 200)", body = MessageResponse),
        (status = 400, description = "Campos ausentes ou inválidos", body = MessageResponse),
        (status = 500, description = "Erro ao atualizar relatório", body = MessageResponse)
    ),
    params(
        ("id" = i32, Path, description = "ID do Relatório")
    )
)]
pub async fn update_report(
    State(app_state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ReportPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {

    let Path(id) = id.map_err(AppError::from)?;
    let input = parse_payload(payload)?;

    app_state
        .report_service
        .update(id, input)
        .await
        .map_err(|e| e.to_api_error("Erro ao atualizar relatório"))?;

    Ok((StatusCode::OK, Json(MessageResponse::new("Relatório atualizado com sucesso"))))
}

// DELETE /reports/{id}
#[utoipa::path(
    delete,
    path = "/reports/{id}",
    tag = "Reports",
    responses(
        (status = 200, description = "Relatório excluído (id inexistente também responde 200)", body = MessageResponse),
        (status = 500, description = "Erro ao excluir relatório", body = MessageResponse)
    ),
    params(
        ("id" = i32, Path, description = "ID do Relatório")
    )
)]
pub async fn delete_report(
    State(app_state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {

    let Path(id) = id.map_err(AppError::from)?;

    app_state
        .report_service
        .delete(id)
        .await
        .map_err(|e| e.to_api_error("Erro ao excluir relatório"))?;

    Ok((StatusCode::OK, Json(MessageResponse::new("Relatório excluído com sucesso"))))
}
