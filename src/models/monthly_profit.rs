// src/models/monthly_profit.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

// --- Enum (Mapeando o Postgres) ---

// A ordem das variantes é a ordem do calendário (igual ao enum `month_name` no banco).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
    ToSchema,
)]
#[sqlx(type_name = "month_name", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Month {
    #[serde(alias = "JANEIRO")]
    January,
    #[serde(alias = "FEVEREIRO")]
    February,
    #[serde(alias = "MARCO", alias = "MARÇO")]
    March,
    #[serde(alias = "ABRIL")]
    April,
    #[serde(alias = "MAIO")]
    May,
    #[serde(alias = "JUNHO")]
    June,
    #[serde(alias = "JULHO")]
    July,
    #[serde(alias = "AGOSTO")]
    August,
    #[serde(alias = "SETEMBRO")]
    September,
    #[serde(alias = "OUTUBRO")]
    October,
    #[serde(alias = "NOVEMBRO")]
    November,
    #[serde(alias = "DEZEMBRO")]
    December,
}

impl Month {
    /// Os doze meses em ordem de calendário (um lote completo).
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];
}

// --- Structs ---

/// Uma linha da tabela `monthly_profit` (no máximo uma por mês).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyEntry {
    pub month: Month,

    #[schema(value_type = f64, example = 12500.0)]
    pub receivable: Decimal,

    #[schema(value_type = f64, example = 8300.0)]
    pub payable: Decimal,

    #[schema(example = "Férias coletivas")]
    pub note: Option<String>,
}

// Payload de entrada. Os aliases aceitam o formato do front-end antigo (mes/receber/pagar/observacao).
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyEntryPayload {
    #[serde(alias = "mes")]
    #[validate(required(message = "O campo 'month' é obrigatório."))]
    pub month: Option<Month>,

    #[serde(alias = "receber")]
    #[validate(required(message = "O campo 'receivable' é obrigatório."))]
    #[schema(value_type = f64, example = 12500.0)]
    pub receivable: Option<Decimal>,

    #[serde(alias = "pagar")]
    #[validate(required(message = "O campo 'payable' é obrigatório."))]
    #[schema(value_type = f64, example = 8300.0)]
    pub payable: Option<Decimal>,

    #[serde(alias = "observacao", default)]
    #[validate(length(max = 500, message = "A observação deve ter no máximo 500 caracteres."))]
    pub note: Option<String>,
}

impl MonthlyEntryPayload {
    pub fn into_entry(self) -> Result<MonthlyEntry, ValidationErrors> {
        self.validate()?;

        match (self.month, self.receivable, self.payable) {
            (Some(month), Some(receivable), Some(payable)) => Ok(MonthlyEntry {
                month,
                receivable,
                payable,
                note: self.note,
            }),
            // Inalcançável depois do validate(), mas sem unwrap
            _ => Err(ValidationErrors::new()),
        }
    }
}
