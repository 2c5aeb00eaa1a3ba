// src/services/report_calculator.rs

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    models::report::{NewReport, ReportInput, ReportTotals},
};

/// Calcula os seis campos derivados a partir dos seis valores informados.
///
/// Não há checagem de limites: "disponível" negativo (antecipado > limite) é
/// permitido e passa direto. A única falha possível é estouro do `Decimal`.
pub fn calculate_totals(input: &ReportInput) -> Result<ReportTotals, AppError> {
    let total_limit = add(input.limit_bradesco, input.limit_itau, "totalLimit")?;
    let available_bradesco = sub(
        input.limit_bradesco,
        input.advanced_bradesco,
        "availableBradesco",
    )?;
    let available_itau = sub(input.limit_itau, input.advanced_itau, "availableItau")?;
    let available_limit = add(available_bradesco, available_itau, "availableLimit")?;
    let total_advanced = add(
        input.advanced_bradesco,
        input.advanced_itau,
        "totalAdvanced",
    )?;
    let profit = add(
        add(available_limit, input.loan, "profit")?,
        input.total_bills,
        "profit",
    )?;

    Ok(ReportTotals {
        total_limit,
        available_bradesco,
        available_itau,
        available_limit,
        total_advanced,
        profit,
    })
}

/// Entrada + totais: a linha pronta para INSERT/UPDATE.
pub fn build_report(input: ReportInput) -> Result<NewReport, AppError> {
    let totals = calculate_totals(&input)?;
    Ok(NewReport { input, totals })
}

fn add(a: Decimal, b: Decimal, field: &'static str) -> Result<Decimal, AppError> {
    a.checked_add(b).ok_or(AppError::AmountOverflow(field))
}

fn sub(a: Decimal, b: Decimal, field: &'static str) -> Result<Decimal, AppError> {
    a.checked_sub(b).ok_or(AppError::AmountOverflow(field))
}
