// src/db/memory.rs

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    common::error::AppError,
    db::{MonthlyProfitStore, ReportStore},
    models::{
        monthly_profit::{Month, MonthlyEntry},
        report::{NewReport, Report},
    },
};

#[derive(Default)]
struct Tables {
    next_report_id: i32,
    reports: BTreeMap<i32, Report>,
    monthly_profit: BTreeMap<Month, MonthlyEntry>,
}

/// Store em memória com a mesma semântica observável dos repositórios Postgres
/// (ids crescentes, ordenação, upsert por mês). Usado nos testes.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportStore for InMemoryStore {
    async fn list(&self) -> Result<Vec<Report>, AppError> {
        let tables = self.tables.read().await;
        let mut reports: Vec<Report> = tables.reports.values().cloned().collect();
        // Mesmo critério do SQL: date DESC, id DESC
        reports.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(reports)
    }

    async fn insert(&self, report: &NewReport) -> Result<i32, AppError> {
        let mut tables = self.tables.write().await;
        tables.next_report_id += 1;
        let id = tables.next_report_id;
        tables.reports.insert(id, report.clone().into_report(id));
        Ok(id)
    }

    async fn update(&self, id: i32, report: &NewReport) -> Result<u64, AppError> {
        let mut tables = self.tables.write().await;
        match tables.reports.get_mut(&id) {
            Some(row) => {
                *row = report.clone().into_report(id);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i32) -> Result<u64, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.reports.remove(&id).map_or(0, |_| 1))
    }
}

#[async_trait]
impl MonthlyProfitStore for InMemoryStore {
    async fn list(&self) -> Result<Vec<MonthlyEntry>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.monthly_profit.values().cloned().collect())
    }

    async fn upsert(&self, entry: &MonthlyEntry) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        tables.monthly_profit.insert(entry.month, entry.clone());
        Ok(())
    }
}
