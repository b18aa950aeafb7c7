use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::errors::{FinanceError, Result};

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Whether money flows in (`ingreso`) or out (`egreso`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    #[serde(rename = "ingreso")]
    Income,
    #[serde(rename = "egreso")]
    Expense,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Income => "ingreso",
            Direction::Expense => "egreso",
        }
    }

    /// Sign applied to an amount when building cash positions.
    pub fn sign(&self) -> Decimal {
        match self {
            Direction::Income => Decimal::ONE,
            Direction::Expense => Decimal::NEGATIVE_ONE,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PaymentMethod {
    #[serde(rename = "efectivo")]
    Cash,
    #[serde(rename = "transferencia")]
    Transfer,
    #[serde(rename = "tarjeta")]
    Card,
    #[serde(rename = "cheque")]
    Check,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Transfer,
        PaymentMethod::Card,
        PaymentMethod::Check,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "efectivo",
            PaymentMethod::Transfer => "transferencia",
            PaymentMethod::Card => "tarjeta",
            PaymentMethod::Check => "cheque",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settlement status shared by payments and movements.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum EntryStatus {
    #[serde(rename = "pendiente")]
    Pending,
    #[default]
    #[serde(rename = "completado")]
    Completed,
    #[serde(rename = "cancelado")]
    Cancelled,
}

/// Rejects zero and negative amounts.
pub fn ensure_positive(amount: Decimal) -> Result<Decimal> {
    if amount <= Decimal::ZERO {
        return Err(FinanceError::InvalidAmount(amount));
    }
    Ok(amount)
}

/// Deserializes an optional reference, treating `null`, a missing field and an
/// empty string as the same "no reference" state.
pub fn optional_ref<'de, D>(deserializer: D) -> std::result::Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Uuid::parse_str(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Writes an absent reference as `""`, the shape `optional_ref` accepts back.
pub fn ref_or_empty<S>(
    value: &Option<Uuid>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(id) => serializer.collect_str(id),
        None => serializer.serialize_str(""),
    }
}

/// Short form of an identifier used in generated descriptions.
pub fn short_id(id: Uuid) -> String {
    id.simple().to_string().chars().take(8).collect()
}
