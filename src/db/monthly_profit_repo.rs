// src/db/monthly_profit_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{common::error::AppError, models::monthly_profit::MonthlyEntry};

/// Persistência da tabela `monthly_profit` (chave única = mês).
#[async_trait]
pub trait MonthlyProfitStore: Send + Sync {
    /// Todas as linhas em ordem de calendário.
    async fn list(&self) -> Result<Vec<MonthlyEntry>, AppError>;

    /// Insere o mês ou sobrescreve receivable/payable/note se ele já existir.
    /// Tem que ser atômico em relação a "existe ou não".
    async fn upsert(&self, entry: &MonthlyEntry) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct MonthlyProfitRepository {
    pool: PgPool,
}

impl MonthlyProfitRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MonthlyProfitStore for MonthlyProfitRepository {
    async fn list(&self) -> Result<Vec<MonthlyEntry>, AppError> {
        // ORDER BY num enum do Postgres segue a ordem de declaração (Janeiro..Dezembro)
        let entries = sqlx::query_as::<_, MonthlyEntry>(
            "SELECT month, receivable, payable, note FROM monthly_profit ORDER BY month ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn upsert(&self, entry: &MonthlyEntry) -> Result<(), AppError> {
        // UPSERT (Insert or Update)
        sqlx::query(
            r#"
            INSERT INTO monthly_profit (month, receivable, payable, note)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (month)
            DO UPDATE SET
                receivable = EXCLUDED.receivable,
                payable = EXCLUDED.payable,
                note = EXCLUDED.note,
                updated_at = NOW()
            "#,
        )
        .bind(entry.month)
        .bind(entry.receivable)
        .bind(entry.payable)
        .bind(entry.note.as_deref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
