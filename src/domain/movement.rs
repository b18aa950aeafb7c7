use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{
    optional_ref, ref_or_empty, Direction, Displayable, EntryStatus, Identifiable, PaymentMethod,
};

/// Category carried by every movement derived from a credit note.
pub const CREDIT_NOTE_CATEGORY: &str = "Credit Notes";

/// Derived ledger entry. One per payment or credit note.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movement {
    pub id: Uuid,
    #[serde(rename = "tipo")]
    pub direction: Direction,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "concepto")]
    pub description: String,
    #[serde(rename = "monto")]
    pub amount: Decimal,
    #[serde(rename = "fecha")]
    pub date: DateTime<Utc>,
    #[serde(rename = "metodoPago")]
    pub method: PaymentMethod,
    #[serde(rename = "estado", default)]
    pub status: EntryStatus,
    #[serde(rename = "referencia", default)]
    pub reference: String,
    #[serde(
        rename = "pagoId",
        default,
        deserialize_with = "optional_ref",
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_id: Option<Uuid>,
    #[serde(
        rename = "notaCreditoId",
        default,
        deserialize_with = "optional_ref",
        skip_serializing_if = "Option::is_none"
    )]
    pub credit_note_id: Option<Uuid>,
    #[serde(
        rename = "clienteId",
        default,
        deserialize_with = "optional_ref",
        serialize_with = "ref_or_empty"
    )]
    pub client_id: Option<Uuid>,
    #[serde(
        rename = "proveedorId",
        default,
        deserialize_with = "optional_ref",
        serialize_with = "ref_or_empty"
    )]
    pub supplier_id: Option<Uuid>,
    #[serde(
        rename = "comprobante",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub proof: Option<String>,
}

impl Movement {
    /// True for the expense entry projected from a credit note.
    pub fn is_credit_note(&self) -> bool {
        self.direction == Direction::Expense && self.category == CREDIT_NOTE_CATEGORY
    }

    pub fn is_income(&self) -> bool {
        self.direction == Direction::Income
    }
}

impl Identifiable for Movement {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Movement {
    fn display_label(&self) -> String {
        format!(
            "{} [{}] {} {}",
            self.date.format("%Y-%m-%d"),
            self.direction,
            self.category,
            self.amount
        )
    }
}

/// Orders a movement log most recent first. Ties keep their relative order.
pub fn sort_newest_first(movements: &mut [Movement]) {
    movements.sort_by_key(|movement| Reverse(movement.date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn deposit() -> Movement {
        Movement {
            id: Uuid::new_v4(),
            direction: Direction::Income,
            category: "Depósitos".into(),
            description: "Depósito en garantía".into(),
            amount: Decimal::from(500),
            date: Utc.with_ymd_and_hms(2024, 3, 4, 18, 0, 0).unwrap(),
            method: PaymentMethod::Cash,
            status: EntryStatus::default(),
            reference: String::new(),
            payment_id: None,
            credit_note_id: None,
            client_id: None,
            supplier_id: None,
            proof: None,
        }
    }

    #[test]
    fn absent_counterparties_are_written_as_empty_strings() {
        let movement = deposit();
        let value = serde_json::to_value(&movement).unwrap();
        assert_eq!(value["clienteId"], "");
        assert_eq!(value["proveedorId"], "");
        assert!(value.get("pagoId").is_none());

        let back: Movement = serde_json::from_value(value).unwrap();
        assert_eq!(back, movement);
    }

    #[test]
    fn present_counterparty_is_written_as_uuid() {
        let client = Uuid::new_v4();
        let movement = Movement {
            client_id: Some(client),
            ..deposit()
        };
        let value = serde_json::to_value(&movement).unwrap();
        assert_eq!(value["clienteId"], client.to_string());
        assert_eq!(value["proveedorId"], "");
    }
}
