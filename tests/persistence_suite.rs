mod common;

use std::fs;
use std::str::FromStr;

use chrono::Utc;

use common::{clock, march, rent, setup_test_env, temp_base};
use powerrent_core::{
    config::{Config, ConfigManager},
    core::FinanceManager,
    domain::{Client, CreditNoteInput, Movement, Period, Supplier},
    storage::{Collection, EntityStore, EntityStoreExt, JsonStore, MemoryStore},
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use uuid::Uuid;

#[test]
fn collections_survive_reopening_the_store() {
    let (manager, config_manager) = setup_test_env();
    let config = config_manager.load().unwrap();
    let payment = manager.record_payment(rent(1000, 5)).unwrap();
    manager
        .record_credit_note(CreditNoteInput::new(
            Uuid::new_v4(),
            payment.id,
            Decimal::from(200),
            march(7),
            "descuento",
        ))
        .unwrap();

    let store = JsonStore::new(config_manager.data_dir(&config)).unwrap();
    let reopened = FinanceManager::new(Box::new(store), Box::new(clock()), config);
    let books = reopened.load_books().unwrap();
    assert_eq!(books.payments.len(), 1);
    assert_eq!(books.credit_notes.len(), 1);
    assert_eq!(books.movements().len(), 2);
    assert_eq!(
        reopened.current_balance().unwrap().income_total,
        Decimal::from(800)
    );
}

#[test]
fn payments_use_host_field_names() {
    let (manager, config_manager) = setup_test_env();
    let config = config_manager.load().unwrap();
    manager.record_payment(rent(1000, 5)).unwrap();

    let path = config_manager.data_dir(&config).join("pagos.json");
    let raw: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    let record = &raw[0];
    assert_eq!(record["tipo"], "ingreso");
    assert_eq!(record["metodoPago"], "efectivo");
    assert_eq!(record["categoria"], "Renta de Generadores");
    assert_eq!(record["estado"], "completado");
    assert_eq!(record["monto"].as_f64(), Some(1000.0));
}

#[test]
fn amounts_reload_exactly() {
    let (manager, config_manager) = setup_test_env();
    let config = config_manager.load().unwrap();
    let amount = Decimal::from_str("1234567890123.4567").unwrap();
    let mut input = rent(1, 5);
    input.amount = amount;
    let payment = manager.record_payment(input).unwrap();

    let raw = fs::read_to_string(config_manager.data_dir(&config).join("pagos.json")).unwrap();
    assert!(raw.contains("1234567890123.4567"));

    let store = JsonStore::new(config_manager.data_dir(&config)).unwrap();
    let reopened = FinanceManager::new(Box::new(store), Box::new(clock()), config);
    let books = reopened.load_books().unwrap();
    assert_eq!(books.payments[0].id, payment.id);
    assert_eq!(books.payments[0].amount, amount);
    assert_eq!(books.movements()[0].amount, amount);
}

#[test]
fn empty_string_references_load_as_absent() {
    let store = MemoryStore::new();
    store
        .save(
            Collection::Movements.key(),
            json!([{
                "id": Uuid::new_v4(),
                "tipo": "ingreso",
                "categoria": "Depósitos",
                "concepto": "Depósito en garantía",
                "monto": 500,
                "fecha": "2024-03-04T18:00:00Z",
                "metodoPago": "cheque",
                "estado": "completado",
                "referencia": "",
                "pagoId": "",
                "clienteId": null
            }]),
        )
        .unwrap();

    let movements: Vec<Movement> = store.load_records(Collection::Movements).unwrap();
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].payment_id, None);
    assert_eq!(movements[0].client_id, None);
    assert_eq!(movements[0].supplier_id, None);
}

#[test]
fn missing_collections_load_empty() {
    let (manager, _config_manager) = setup_test_env();
    let books = manager.load_books().unwrap();
    assert!(books.payments.is_empty());
    assert!(books.movements().is_empty());
    assert!(manager.clients().unwrap().is_empty());
    assert_eq!(manager.current_balance().unwrap().net_total, Decimal::ZERO);
}

#[test]
fn directory_records_persist() {
    let (manager, _config_manager) = setup_test_env();
    let client = manager
        .add_client(Client::new("Eventos Luna", march(1)))
        .unwrap();
    let supplier = manager
        .add_supplier(Supplier::new("Diesel del Norte", "Combustible", march(1)))
        .unwrap();
    assert_eq!(manager.clients().unwrap()[0].id, client.id);
    assert_eq!(manager.suppliers().unwrap()[0].id, supplier.id);

    manager.remove_supplier(supplier.id).unwrap();
    assert!(manager.suppliers().unwrap().is_empty());
    assert_eq!(manager.clients().unwrap().len(), 1);
}

#[test]
fn configured_default_period_drives_current_balance() {
    let config_manager = ConfigManager::with_base_dir(temp_base()).unwrap();
    let config = Config {
        default_period: Period::Year,
        ..Config::default()
    };
    config_manager.save(&config).unwrap();

    let manager = FinanceManager::open(&config_manager).expect("open");
    assert_eq!(manager.config().default_period, Period::Year);
    let mut today = rent(1000, 5);
    today.date = Utc::now();
    manager.record_payment(today).unwrap();

    let balance = manager.current_balance().unwrap();
    assert_eq!(balance.period, Some(Period::Year));
    assert_eq!(balance.income_total, Decimal::from(1000));
}

#[test]
fn data_dir_override_is_honoured() {
    let base = temp_base();
    let config_manager = ConfigManager::with_base_dir(base.clone()).unwrap();
    let custom = base.join("shared-books");
    let config = Config {
        data_dir: Some(custom.clone()),
        ..Config::default()
    };
    config_manager.save(&config).unwrap();

    let manager = FinanceManager::open(&config_manager).unwrap();
    manager.record_payment(rent(300, 5)).unwrap();
    assert!(custom.join("movimientos.json").exists());
    assert!(!base.join("data").join("movimientos.json").exists());
}
