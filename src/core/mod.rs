pub mod finance_manager;
pub mod services;
pub mod time;

pub use finance_manager::FinanceManager;
pub use time::{Clock, FixedClock, SystemClock};
