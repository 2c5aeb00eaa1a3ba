// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,

        // --- Reports ---
        handlers::reports::list_reports,
        handlers::reports::create_report,
        handlers::reports::update_report,
        handlers::reports::delete_report,

        // --- Monthly Profit ---
        handlers::monthly_profit::list_monthly_profit,
        handlers::monthly_profit::save_monthly_profit,
    ),
    components(
        schemas(
            // --- Reports ---
            models::report::Report,
            models::report::ReportPayload,

            // --- Monthly Profit ---
            models::monthly_profit::Month,
            models::monthly_profit::MonthlyEntry,
            models::monthly_profit::MonthlyEntryPayload,

            // --- Respostas ---
            models::response::MessageResponse,
            models::response::CreatedResponse,
        )
    ),
    tags(
        (name = "Health", description = "Verificação do servidor"),
        (name = "Reports", description = "Relatórios financeiros (limites, antecipações e lucro)"),
        (name = "Monthly Profit", description = "Lucro mensal: a receber e a pagar por mês")
    )
)]
pub struct ApiDoc;
