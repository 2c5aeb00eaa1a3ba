use std::collections::HashMap;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::monthly_profit::Month;

// Nosso tipo de erro interno. Handlers convertem em ApiError com `to_api_error`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Corpo da requisição inválido: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Parâmetro de rota inválido: {0}")]
    InvalidPath(#[from] PathRejection),

    #[error("Valor fora do intervalo suportado ao calcular '{0}'")]
    AmountOverflow(&'static str),

    #[error("O mês {0:?} aparece mais de uma vez no lote")]
    DuplicateMonth(Month),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

/// O erro que de fato vai para o cliente: status + `{"message": ...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<HashMap<String, Vec<String>>>,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<HashMap<String, Vec<String>>>,
}

impl AppError {
    /// `context` é a mensagem genérica da operação (ex: "Erro ao buscar relatórios"),
    /// usada para todo erro que não é culpa do cliente.
    pub fn to_api_error(self, context: &str) -> ApiError {
        match self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(m) => m.to_string(),
                            None => e.code.to_string(),
                        })
                        .collect();
                    details.insert(wire_name(&field), messages);
                }
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    message: "Um ou mais campos são inválidos.".to_string(),
                    details: Some(details),
                }
            }
            AppError::InvalidBody(rejection) => {
                ApiError::bad_request(format!("JSON inválido: {}", rejection.body_text()))
            }
            AppError::InvalidPath(rejection) => {
                ApiError::bad_request(format!("Parâmetro inválido: {}", rejection.body_text()))
            }
            e @ (AppError::AmountOverflow(_) | AppError::DuplicateMonth(_)) => {
                ApiError::bad_request(e.to_string())
            }

            // Banco e erros inesperados viram 500 com a mensagem da operação.
            // O detalhe fica só no log.
            e @ (AppError::DatabaseError(_) | AppError::InternalServerError(_)) => {
                tracing::error!("{}: {}", context, e);
                ApiError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: context.to_string(),
                    details: None,
                }
            }
        }
    }
}

// Os erros do validator vêm com o nome do campo em Rust (total_bills);
// o cliente enviou em camelCase (totalBills).
fn wire_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            name.extend(c.to_uppercase());
            upper_next = false;
        } else {
            name.push(c);
        }
    }
    name
}

impl ApiError {
    fn bad_request(message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
            details: None,
        }
    }
}

// Para os erros do cliente (validação, JSON, rota) o contexto não importa
impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        error.to_api_error("Ocorreu um erro inesperado.")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorBody {
            message: self.message,
            details: self.details,
        });
        (self.status, body).into_response()
    }
}
