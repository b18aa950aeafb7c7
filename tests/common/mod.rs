#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use once_cell::sync::Lazy;
use powerrent_core::{
    config::{Config, ConfigManager},
    core::{FinanceManager, FixedClock},
    domain::{Direction, PaymentInput, PaymentMethod},
    storage::{JsonStore, MemoryStore},
};
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Mexico City offset, where the business operates.
pub fn local() -> FixedOffset {
    FixedOffset::west_opt(6 * 3600).expect("valid offset")
}

/// 2024-03-20 10:00 local time.
pub fn clock() -> FixedClock {
    FixedClock(local().with_ymd_and_hms(2024, 3, 20, 10, 0, 0).unwrap())
}

/// Noon local time on the given March 2024 day.
pub fn march(day: u32) -> DateTime<Utc> {
    local()
        .with_ymd_and_hms(2024, 3, day, 12, 0, 0)
        .unwrap()
        .with_timezone(&Utc)
}

pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Manager over a JSON store in a unique directory, plus the matching config manager.
pub fn setup_test_env() -> (FinanceManager, ConfigManager) {
    let config_manager =
        ConfigManager::with_base_dir(temp_base()).expect("create config manager for temp dir");
    let config = config_manager.load().expect("load config");
    let store = JsonStore::new(config_manager.data_dir(&config)).expect("create json store");
    let manager = FinanceManager::new(Box::new(store), Box::new(clock()), config);
    (manager, config_manager)
}

pub fn memory_manager() -> FinanceManager {
    FinanceManager::new(
        Box::new(MemoryStore::new()),
        Box::new(clock()),
        Config::default(),
    )
}

pub fn rent(amount: i64, day: u32) -> PaymentInput {
    PaymentInput::new(
        Direction::Income,
        "Renta de Generadores",
        "Renta de generador 50kVA",
        Decimal::from(amount),
        march(day),
        PaymentMethod::Cash,
    )
}

pub fn fuel(amount: i64, day: u32) -> PaymentInput {
    PaymentInput::new(
        Direction::Expense,
        "Combustible",
        "Diesel",
        Decimal::from(amount),
        march(day),
        PaymentMethod::Card,
    )
}
