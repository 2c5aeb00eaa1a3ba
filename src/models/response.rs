// src/models/response.rs

use serde::Serialize;
use utoipa::ToSchema;

// Corpo padrão das respostas de sucesso (e de erro, ver common::error::ApiError)
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Relatório atualizado com sucesso")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

// 201 do POST /reports
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    #[schema(example = "Relatório salvo com sucesso")]
    pub message: String,
    #[schema(example = 42)]
    pub id: i32,
}
