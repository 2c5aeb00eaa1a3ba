// src/services/report_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::ReportStore,
    models::report::{Report, ReportInput},
    services::report_calculator::build_report,
};

#[derive(Clone)]
pub struct ReportService {
    store: Arc<dyn ReportStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn ReportStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Report>, AppError> {
        self.store.list().await
    }

    /// Calcula os derivados e insere a linha completa. Devolve o id gerado.
    pub async fn create(&self, input: ReportInput) -> Result<i32, AppError> {
        let report = build_report(input)?;
        let id = self.store.insert(&report).await?;

        tracing::info!(id, date = %report.input.date, "Relatório criado");
        Ok(id)
    }

    /// Recalcula tudo e sobrescreve. Id inexistente não é erro (só fica no log).
    pub async fn update(&self, id: i32, input: ReportInput) -> Result<(), AppError> {
        let report = build_report(input)?;

        if self.store.update(id, &report).await? == 0 {
            tracing::warn!(id, "Atualização não encontrou o relatório");
        }
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if self.store.delete(id).await? == 0 {
            tracing::warn!(id, "Exclusão não encontrou o relatório");
        }
        Ok(())
    }
}
