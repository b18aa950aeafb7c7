use std::fmt;
use std::result::Result as StdResult;

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::quotation::QuotationStatus;

/// Kinds of records that can be referenced by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Payment,
    CreditNote,
    Movement,
    Quotation,
    QuotationItem,
    Client,
    Supplier,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Payment => "Payment",
            EntityKind::CreditNote => "Credit note",
            EntityKind::Movement => "Movement",
            EntityKind::Quotation => "Quotation",
            EntityKind::QuotationItem => "Quotation item",
            EntityKind::Client => "Client",
            EntityKind::Supplier => "Supplier",
        };
        f.write_str(label)
    }
}

/// Unified error type for the domain, service and storage layers.
#[derive(Error, Debug)]
pub enum FinanceError {
    #[error("Invalid amount: {0} (must be greater than zero)")]
    InvalidAmount(Decimal),
    #[error(
        "Credit note amount {requested} exceeds the remaining balance {remaining} of payment {payment_id}"
    )]
    ExcessiveCreditNoteAmount {
        payment_id: Uuid,
        requested: Decimal,
        remaining: Decimal,
    },
    #[error("Credit note already applied: {0}")]
    AlreadyApplied(Uuid),
    #[error("Invalid quotation transition: {from} -> {to}")]
    InvalidTransition {
        from: QuotationStatus,
        to: QuotationStatus,
    },
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },
    #[error("Quotation {0} is linked to a payment and can no longer change")]
    QuotationLocked(Uuid),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl FinanceError {
    pub fn not_found(kind: EntityKind, id: impl ToString) -> Self {
        FinanceError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

pub type Result<T> = StdResult<T, FinanceError>;

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        FinanceError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        FinanceError::StorageError(err.to_string())
    }
}
