pub mod monthly_profit_service;
pub mod report_calculator;
pub mod report_service;

pub use monthly_profit_service::MonthlyProfitService;
pub use report_service::ReportService;
