pub mod report_repo;
pub use report_repo::{ReportRepository, ReportStore};
pub mod monthly_profit_repo;
pub use monthly_profit_repo::{MonthlyProfitRepository, MonthlyProfitStore};
pub mod memory;
pub use memory::InMemoryStore;
