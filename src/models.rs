pub mod monthly_profit;
pub mod report;
pub mod response;
