// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};

use crate::{
    db::{MonthlyProfitRepository, MonthlyProfitStore, ReportRepository, ReportStore},
    services::{MonthlyProfitService, ReportService},
};

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Config {
    pub connect_options: PgConnectOptions,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub port: u16,
    pub cors_allow: Vec<String>,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta a configuração a partir de qualquer fonte chave -> valor.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // DATABASE_URL tem prioridade; sem ela, montamos a partir das partes DB_*
        let connect_options = match lookup("DATABASE_URL") {
            Some(url) => url
                .parse::<PgConnectOptions>()
                .context("DATABASE_URL inválida")?,
            None => {
                let mut options = PgConnectOptions::new()
                    .host(&lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string()))
                    .port(parse_var(&lookup, "DB_PORT", 5432)?)
                    .username(&lookup("DB_USER").unwrap_or_else(|| "postgres".to_string()))
                    .database(
                        &lookup("DB_NAME").unwrap_or_else(|| "controle_financeiro".to_string()),
                    );
                if let Some(password) = lookup("DB_PASSWORD").filter(|p| !p.is_empty()) {
                    options = options.password(&password);
                }
                options
            }
        };

        let cors_allow = lookup("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            connect_options,
            max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            acquire_timeout: Duration::from_secs(parse_var(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 30)?),
            port: parse_var(&lookup, "PORT", 3000)?,
            cors_allow,
            run_migrations: parse_var(&lookup, "RUN_MIGRATIONS", true)?,
        })
    }

    pub async fn connect(&self) -> anyhow::Result<PgPool> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
            .connect_with(self.connect_options.clone())
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!(
            max_connections = self.max_connections,
            "✅ Conexão com o banco de dados estabelecida com sucesso!"
        );
        Ok(pool)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Valor inválido para {}: '{}' ({})", key, raw, e)),
        None => Ok(default),
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub report_service: ReportService,
    pub monthly_profit_service: MonthlyProfitService,
}

impl AppState {
    /// Monta o gráfico de dependências em cima de uma pool Postgres.
    pub fn from_pool(pool: PgPool) -> Self {
        Self::from_stores(
            Arc::new(ReportRepository::new(pool.clone())),
            Arc::new(MonthlyProfitRepository::new(pool)),
        )
    }

    /// Permite trocar o banco por outro store (ex: `InMemoryStore` nos testes).
    pub fn from_stores(
        reports: Arc<dyn ReportStore>,
        monthly_profit: Arc<dyn MonthlyProfitStore>,
    ) -> Self {
        Self {
            report_service: ReportService::new(reports),
            monthly_profit_service: MonthlyProfitService::new(monthly_profit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_reference_deployment() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_allow, vec!["*".to_string()]);
        assert!(config.run_migrations);
        assert_eq!(config.connect_options.get_host(), "localhost");
        assert_eq!(config.connect_options.get_port(), 5432);
        assert_eq!(config.connect_options.get_database(), Some("controle_financeiro"));
    }

    #[test]
    fn db_parts_are_used_without_database_url() {
        let config = Config::from_lookup(lookup(&[
            ("DB_HOST", "db.interno"),
            ("DB_PORT", "6543"),
            ("DB_USER", "financeiro"),
            ("DB_NAME", "relatorios"),
            ("PORT", "8080"),
            ("CORS_ALLOW_ORIGINS", "http://a.com, http://b.com,"),
            ("RUN_MIGRATIONS", "false"),
        ]))
        .unwrap();

        assert_eq!(config.connect_options.get_host(), "db.interno");
        assert_eq!(config.connect_options.get_port(), 6543);
        assert_eq!(config.connect_options.get_username(), "financeiro");
        assert_eq!(config.connect_options.get_database(), Some("relatorios"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_allow, vec!["http://a.com", "http://b.com"]);
        assert!(!config.run_migrations);
    }

    #[test]
    fn database_url_takes_priority() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://app@pg.example:5433/financas"),
            ("DB_HOST", "ignorado"),
        ]))
        .unwrap();

        assert_eq!(config.connect_options.get_host(), "pg.example");
        assert_eq!(config.connect_options.get_port(), 5433);
        assert_eq!(config.connect_options.get_database(), Some("financas"));
    }

    #[test]
    fn invalid_numbers_fail_with_the_variable_name() {
        let error = Config::from_lookup(lookup(&[("DB_MAX_CONNECTIONS", "dez")])).unwrap_err();
        assert!(error.to_string().contains("DB_MAX_CONNECTIONS"));
    }
}
