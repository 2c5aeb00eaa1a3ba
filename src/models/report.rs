// src/models/report.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

// --- Structs ---

/// Linha completa da tabela `reports`: os seis valores informados + os seis derivados.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[schema(example = 1)]
    pub id: i32,

    #[schema(value_type = String, format = Date, example = "2025-06-30")]
    pub date: NaiveDate,

    // Valores informados pelo cliente
    #[schema(value_type = f64, example = 1000.0)]
    pub limit_bradesco: Decimal,
    #[schema(value_type = f64, example = 200.0)]
    pub advanced_bradesco: Decimal,
    #[schema(value_type = f64, example = 1500.0)]
    pub limit_itau: Decimal,
    #[schema(value_type = f64, example = 300.0)]
    pub advanced_itau: Decimal,
    #[schema(value_type = f64, example = 0.0)]
    pub loan: Decimal,
    #[schema(value_type = f64, example = 0.0)]
    pub total_bills: Decimal,

    // Valores derivados (ver services::report_calculator)
    #[schema(value_type = f64, example = 2500.0)]
    pub total_limit: Decimal,
    #[schema(value_type = f64, example = 800.0)]
    pub available_bradesco: Decimal,
    #[schema(value_type = f64, example = 1200.0)]
    pub available_itau: Decimal,
    #[schema(value_type = f64, example = 2000.0)]
    pub available_limit: Decimal,
    #[schema(value_type = f64, example = 500.0)]
    pub total_advanced: Decimal,
    #[schema(value_type = f64, example = 2000.0)]
    pub profit: Decimal,
}

/// Os seis valores brutos + data, já validados.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportInput {
    pub date: NaiveDate,
    pub limit_bradesco: Decimal,
    pub advanced_bradesco: Decimal,
    pub limit_itau: Decimal,
    pub advanced_itau: Decimal,
    pub loan: Decimal,
    pub total_bills: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportTotals {
    pub total_limit: Decimal,
    pub available_bradesco: Decimal,
    pub available_itau: Decimal,
    pub available_limit: Decimal,
    pub total_advanced: Decimal,
    pub profit: Decimal,
}

/// O que vai para o banco: entrada + totais calculados (as 13 colunas sem o id).
#[derive(Debug, Clone, PartialEq)]
pub struct NewReport {
    pub input: ReportInput,
    pub totals: ReportTotals,
}

impl NewReport {
    pub fn into_report(self, id: i32) -> Report {
        let NewReport { input, totals } = self;
        Report {
            id,
            date: input.date,
            limit_bradesco: input.limit_bradesco,
            advanced_bradesco: input.advanced_bradesco,
            limit_itau: input.limit_itau,
            advanced_itau: input.advanced_itau,
            loan: input.loan,
            total_bills: input.total_bills,
            total_limit: totals.total_limit,
            available_bradesco: totals.available_bradesco,
            available_itau: totals.available_itau,
            available_limit: totals.available_limit,
            total_advanced: totals.total_advanced,
            profit: totals.profit,
        }
    }
}

// ---
// Payload: POST /reports e PUT /reports/{id}
// ---
// Os aliases aceitam o formato do front-end antigo (limiteBradesco, antecipadoItau, ...).
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    #[serde(alias = "data")]
    #[validate(required(message = "O campo 'date' é obrigatório."))]
    #[schema(value_type = String, format = Date, example = "2025-06-30")]
    pub date: Option<NaiveDate>,

    #[serde(alias = "limiteBradesco")]
    #[validate(required(message = "O campo 'limitBradesco' é obrigatório."))]
    #[schema(value_type = f64, example = 1000.0)]
    pub limit_bradesco: Option<Decimal>,

    #[serde(alias = "antecipadoBradesco")]
    #[validate(required(message = "O campo 'advancedBradesco' é obrigatório."))]
    #[schema(value_type = f64, example = 200.0)]
    pub advanced_bradesco: Option<Decimal>,

    #[serde(alias = "limiteItau")]
    #[validate(required(message = "O campo 'limitItau' é obrigatório."))]
    #[schema(value_type = f64, example = 1500.0)]
    pub limit_itau: Option<Decimal>,

    #[serde(alias = "antecipadoItau")]
    #[validate(required(message = "O campo 'advancedItau' é obrigatório."))]
    #[schema(value_type = f64, example = 300.0)]
    pub advanced_itau: Option<Decimal>,

    #[serde(alias = "emprestimo")]
    #[validate(required(message = "O campo 'loan' é obrigatório."))]
    #[schema(value_type = f64, example = 0.0)]
    pub loan: Option<Decimal>,

    #[serde(alias = "totalContas")]
    #[validate(required(message = "O campo 'totalBills' é obrigatório."))]
    #[schema(value_type = f64, example = 0.0)]
    pub total_bills: Option<Decimal>,
}

impl ReportPayload {
    pub fn into_input(self) -> Result<ReportInput, ValidationErrors> {
        self.validate()?;

        match (
            self.date,
            self.limit_bradesco,
            self.advanced_bradesco,
            self.limit_itau,
            self.advanced_itau,
            self.loan,
            self.total_bills,
        ) {
            (
                Some(date),
                Some(limit_bradesco),
                Some(advanced_bradesco),
                Some(limit_itau),
                Some(advanced_itau),
                Some(loan),
                Some(total_bills),
            ) => Ok(ReportInput {
                date,
                limit_bradesco,
                advanced_bradesco,
                limit_itau,
                advanced_itau,
                loan,
                total_bills,
            }),
            _ => Err(ValidationErrors::new()),
        }
    }
}
