pub mod health;
pub mod monthly_profit;
pub mod reports;
