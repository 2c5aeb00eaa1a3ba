// src/db/report_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::report::{NewReport, Report},
};

/// Persistência da tabela `reports`.
///
/// `update` e `delete` devolvem o número de linhas afetadas; zero significa que o
/// id não existia (não é erro).
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Report>, AppError>;
    async fn insert(&self, report: &NewReport) -> Result<i32, AppError>;
    async fn update(&self, id: i32, report: &NewReport) -> Result<u64, AppError>;
    async fn delete(&self, id: i32) -> Result<u64, AppError>;
}

// O repositório de relatórios, responsável por todas as interações com a tabela 'reports'
#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for ReportRepository {
    async fn list(&self) -> Result<Vec<Report>, AppError> {
        let reports = sqlx::query_as::<_, Report>(
            r#"
            SELECT
                id, date,
                limit_bradesco, advanced_bradesco,
                limit_itau, advanced_itau,
                loan, total_bills,
                total_limit, available_bradesco, available_itau,
                available_limit, total_advanced, profit
            FROM reports
            ORDER BY date DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }

    async fn insert(&self, report: &NewReport) -> Result<i32, AppError> {
        let NewReport { input, totals } = report;

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO reports (
                date,
                limit_bradesco, advanced_bradesco,
                limit_itau, advanced_itau,
                loan, total_bills,
                total_limit, available_bradesco, available_itau,
                available_limit, total_advanced, profit
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id
            "#,
        )
        .bind(input.date)
        .bind(input.limit_bradesco)
        .bind(input.advanced_bradesco)
        .bind(input.limit_itau)
        .bind(input.advanced_itau)
        .bind(input.loan)
        .bind(input.total_bills)
        .bind(totals.total_limit)
        .bind(totals.available_bradesco)
        .bind(totals.available_itau)
        .bind(totals.available_limit)
        .bind(totals.total_advanced)
        .bind(totals.profit)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update(&self, id: i32, report: &NewReport) -> Result<u64, AppError> {
        let NewReport { input, totals } = report;

        // Sobrescreve as 13 colunas: não existe atualização parcial
        let result = sqlx::query(
            r#"
            UPDATE reports SET
                date = $1,
                limit_bradesco = $2, advanced_bradesco = $3,
                limit_itau = $4, advanced_itau = $5,
                loan = $6, total_bills = $7,
                total_limit = $8,
                available_bradesco = $9, available_itau = $10,
                available_limit = $11,
                total_advanced = $12,
                profit = $13,
                updated_at = NOW()
            WHERE id = $14
            "#,
        )
        .bind(input.date)
        .bind(input.limit_bradesco)
        .bind(input.advanced_bradesco)
        .bind(input.limit_itau)
        .bind(input.advanced_itau)
        .bind(input.loan)
        .bind(input.total_bills)
        .bind(totals.total_limit)
        .bind(totals.available_bradesco)
        .bind(totals.available_itau)
        .bind(totals.available_limit)
        .bind(totals.total_advanced)
        .bind(totals.profit)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i32) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
