// src/services/monthly_profit_service.rs

use std::{collections::HashSet, sync::Arc};

use futures_util::{stream::FuturesUnordered, StreamExt};

use crate::{
    common::error::AppError,
    db::MonthlyProfitStore,
    models::monthly_profit::{Month, MonthlyEntry},
};

/// Tamanho esperado do lote (um registro por mês).
pub const MONTHS_PER_BATCH: usize = Month::ALL.len();

#[derive(Clone)]
pub struct MonthlyProfitService {
    store: Arc<dyn MonthlyProfitStore>,
}

impl MonthlyProfitService {
    pub fn new(store: Arc<dyn MonthlyProfitStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<MonthlyEntry>, AppError> {
        self.store.list().await
    }

    /// Aplica `upsert` em todos os meses do lote, todos disparados ao mesmo tempo.
    ///
    /// O lote só dá certo se todos derem certo. No primeiro erro a função retorna
    /// `Err` sem esperar o resto; as tarefas que ainda estão rodando seguem até o fim
    /// (não são canceladas) e o que já foi gravado continua gravado.
    pub async fn save_all(&self, entries: Vec<MonthlyEntry>) -> Result<usize, AppError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.month) {
                return Err(AppError::DuplicateMonth(entry.month));
            }
        }

        let total = entries.len();
        if total != MONTHS_PER_BATCH {
            let missing: Vec<Month> = Month::ALL.into_iter().filter(|m| !seen.contains(m)).collect();
            tracing::warn!(total, ?missing, "Lote de lucro mensal incompleto");
        }

        // Soltar um JoinHandle não aborta a tarefa, então sair cedo do loop não cancela nada
        let mut pending: FuturesUnordered<_> = entries
            .into_iter()
            .map(|entry| {
                let store = Arc::clone(&self.store);
                tokio::spawn(async move {
                    store.upsert(&entry).await.inspect_err(|e| {
                        tracing::error!(month = ?entry.month, "Erro ao inserir/atualizar mês: {}", e);
                    })
                })
            })
            .collect();

        while let Some(joined) = pending.next().await {
            joined.map_err(|e| AppError::InternalServerError(e.into()))??;
        }

        tracing::info!(total, "Lucro mensal salvo");
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryStore;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };
    use tokio::sync::{watch, Barrier};

    fn entry(month: Month, receivable: Decimal) -> MonthlyEntry {
        MonthlyEntry {
            month,
            receivable,
            payable: dec!(100),
            note: None,
        }
    }

    fn full_year(receivable: Decimal) -> Vec<MonthlyEntry> {
        Month::ALL.iter().map(|m| entry(*m, receivable)).collect()
    }

    // Delega para o store em memória mas falha num mês escolhido
    struct FailingStore {
        inner: InMemoryStore,
        fail_on: Month,
    }

    #[async_trait]
    impl MonthlyProfitStore for FailingStore {
        async fn list(&self) -> Result<Vec<MonthlyEntry>, AppError> {
            MonthlyProfitStore::list(&self.inner).await
        }

        async fn upsert(&self, entry: &MonthlyEntry) -> Result<(), AppError> {
            if entry.month == self.fail_on {
                return Err(AppError::DatabaseError(sqlx::Error::PoolTimedOut));
            }
            self.inner.upsert(entry).await
        }
    }

    // Cada upsert só passa quando todos os 12 chegaram na barreira
    struct BarrierStore {
        inner: InMemoryStore,
        barrier: Barrier,
    }

    #[async_trait]
    impl MonthlyProfitStore for BarrierStore {
        async fn list(&self) -> Result<Vec<MonthlyEntry>, AppError> {
            MonthlyProfitStore::list(&self.inner).await
        }

        async fn upsert(&self, entry: &MonthlyEntry) -> Result<(), AppError> {
            self.barrier.wait().await;
            self.inner.upsert(entry).await
        }
    }

    // Um mês falha na hora; os outros ficam presos até o portão abrir
    struct GatedStore {
        inner: InMemoryStore,
        fail_on: Month,
        gate: watch::Receiver<bool>,
        started: AtomicUsize,
    }

    #[async_trait]
    impl MonthlyProfitStore for GatedStore {
        async fn list(&self) -> Result<Vec<MonthlyEntry>, AppError> {
            MonthlyProfitStore::list(&self.inner).await
        }

        async fn upsert(&self, entry: &MonthlyEntry) -> Result<(), AppError> {
            if entry.month == self.fail_on {
                return Err(AppError::DatabaseError(sqlx::Error::PoolTimedOut));
            }
            self.started.fetch_add(1, Ordering::SeqCst);
            let mut gate = self.gate.clone();
            gate.wait_for(|open| *open)
                .await
                .map_err(|e| AppError::InternalServerError(e.into()))?;
            self.inner.upsert(entry).await
        }
    }

    async fn wait_for_rows(service: &MonthlyProfitService, expected: usize) -> Vec<MonthlyEntry> {
        let mut rows = service.list().await.unwrap();
        for _ in 0..50 {
            if rows.len() == expected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
            rows = service.list().await.unwrap();
        }
        rows
    }

    #[tokio::test]
    async fn all_months_are_in_flight_at_the_same_time() {
        let service = MonthlyProfitService::new(Arc::new(BarrierStore {
            inner: InMemoryStore::new(),
            barrier: Barrier::new(Month::ALL.len()),
        }));

        // Em sequência o primeiro upsert ficaria parado na barreira para sempre
        let saved = tokio::time::timeout(Duration::from_secs(5), service.save_all(full_year(dec!(3))))
            .await
            .expect("os upserts deveriam rodar ao mesmo tempo");

        assert_eq!(saved.unwrap(), 12);
        assert_eq!(service.list().await.unwrap().len(), 12);
    }

    #[tokio::test]
    async fn batch_fails_while_the_other_months_are_still_pending() {
        let (open_gate, gate) = watch::channel(false);
        let store = Arc::new(GatedStore {
            inner: InMemoryStore::new(),
            fail_on: Month::February,
            gate,
            started: AtomicUsize::new(0),
        });
        let service = MonthlyProfitService::new(store.clone());

        let result = tokio::time::timeout(Duration::from_secs(5), service.save_all(full_year(dec!(4))))
            .await
            .expect("o erro deveria voltar sem esperar os outros meses");
        assert!(matches!(result, Err(AppError::DatabaseError(_))));
        assert!(service.list().await.unwrap().is_empty());

        // Nada foi cancelado: ao abrir o portão os 11 meses restantes são gravados
        open_gate.send(true).unwrap();
        let rows = wait_for_rows(&service, 11).await;

        assert_eq!(store.started.load(Ordering::SeqCst), 11);
        assert_eq!(rows.len(), 11);
        assert!(rows.iter().all(|r| r.month != Month::February));
    }

    #[tokio::test]
    async fn full_year_is_saved_once_per_month() {
        let service = MonthlyProfitService::new(Arc::new(InMemoryStore::new()));

        assert_eq!(service.save_all(full_year(dec!(10))).await.unwrap(), 12);
        assert_eq!(service.save_all(full_year(dec!(20))).await.unwrap(), 12);

        let rows = service.list().await.unwrap();
        assert_eq!(rows.len(), 12);
        assert_eq!(rows.iter().map(|r| r.month).collect::<Vec<_>>(), Month::ALL.to_vec());
        assert!(rows.iter().all(|r| r.receivable == dec!(20)));
    }

    #[tokio::test]
    async fn same_values_twice_leave_one_row() {
        let service = MonthlyProfitService::new(Arc::new(InMemoryStore::new()));
        let batch = vec![entry(Month::August, dec!(55))];

        service.save_all(batch.clone()).await.unwrap();
        service.save_all(batch.clone()).await.unwrap();

        assert_eq!(service.list().await.unwrap(), batch);
    }

    #[tokio::test]
    async fn other_batch_sizes_are_accepted() {
        let service = MonthlyProfitService::new(Arc::new(InMemoryStore::new()));

        assert_eq!(service.save_all(Vec::new()).await.unwrap(), 0);
        assert_eq!(
            service
                .save_all(vec![entry(Month::May, dec!(1)), entry(Month::January, dec!(2))])
                .await
                .unwrap(),
            2
        );

        let months: Vec<Month> = service.list().await.unwrap().iter().map(|r| r.month).collect();
        assert_eq!(months, vec![Month::January, Month::May]);
    }

    #[tokio::test]
    async fn duplicate_month_is_rejected_before_any_write() {
        let service = MonthlyProfitService::new(Arc::new(InMemoryStore::new()));
        let batch = vec![entry(Month::May, dec!(1)), entry(Month::May, dec!(2))];

        let result = service.save_all(batch).await;

        assert!(matches!(result, Err(AppError::DuplicateMonth(Month::May))));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn one_failure_fails_the_batch_without_rollback() {
        let service = MonthlyProfitService::new(Arc::new(FailingStore {
            inner: InMemoryStore::new(),
            fail_on: Month::June,
        }));

        let result = service.save_all(full_year(dec!(7))).await;
        assert!(matches!(result, Err(AppError::DatabaseError(_))));

        // As outras tarefas não são canceladas: dá tempo delas terminarem
        let rows = wait_for_rows(&service, 11).await;

        assert_eq!(rows.len(), 11);
        assert!(rows.iter().all(|r| r.month != Month::June));
    }
}
