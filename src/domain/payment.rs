use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{
    optional_ref, Direction, Displayable, EntryStatus, Identifiable, PaymentMethod,
};

/// A single recorded cash event. Immutable once created; only deletion is supported.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
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
    #[serde(rename = "referencia", default)]
    pub reference: String,
    #[serde(
        rename = "comprobante",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub proof: Option<String>,
    #[serde(
        rename = "cliente",
        default,
        deserialize_with = "optional_ref",
        skip_serializing_if = "Option::is_none"
    )]
    pub client_id: Option<Uuid>,
    #[serde(
        rename = "proveedor",
        default,
        deserialize_with = "optional_ref",
        skip_serializing_if = "Option::is_none"
    )]
    pub supplier_id: Option<Uuid>,
    #[serde(rename = "estado", default)]
    pub status: EntryStatus,
    #[serde(
        rename = "notaCreditoId",
        default,
        deserialize_with = "optional_ref",
        skip_serializing_if = "Option::is_none"
    )]
    pub credit_note_id: Option<Uuid>,
}

impl Payment {
    /// The client for income payments, the supplier for expenses.
    pub fn counterparty(&self) -> Option<Uuid> {
        match self.direction {
            Direction::Income => self.client_id,
            Direction::Expense => self.supplier_id,
        }
    }
}

impl Identifiable for Payment {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Payment {
    fn display_label(&self) -> String {
        format!("{} - ${}", self.description, self.amount)
    }
}

/// Caller-supplied data for a new payment.
#[derive(Debug, Clone)]
pub struct PaymentInput {
    pub direction: Direction,
    pub category: String,
    pub description: String,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub method: PaymentMethod,
    pub reference: String,
    pub proof: Option<String>,
    pub client_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub credit_note_id: Option<Uuid>,
}

impl PaymentInput {
    pub fn new(
        direction: Direction,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
        date: DateTime<Utc>,
        method: PaymentMethod,
    ) -> Self {
        Self {
            direction,
            category: category.into(),
            description: description.into(),
            amount,
            date,
            method,
            reference: String::new(),
            proof: None,
            client_id: None,
            supplier_id: None,
            credit_note_id: None,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn with_proof(mut self, proof: impl Into<String>) -> Self {
        self.proof = Some(proof.into());
        self
    }

    /// Sets the counterparty: client for income, supplier for expenses.
    /// The reference belonging to the other direction is cleared.
    pub fn with_counterparty(mut self, id: Uuid) -> Self {
        match self.direction {
            Direction::Income => {
                self.client_id = Some(id);
                self.supplier_id = None;
            }
            Direction::Expense => {
                self.supplier_id = Some(id);
                self.client_id = None;
            }
        }
        self
    }

    pub fn with_credit_note(mut self, credit_note_id: Uuid) -> Self {
        self.credit_note_id = Some(credit_note_id);
        self
    }
}
