use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CreditNoteStatus {
    #[default]
    #[serde(rename = "activa")]
    Active,
    #[serde(rename = "cancelada")]
    Cancelled,
}

/// A downward adjustment against a prior payment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreditNote {
    pub id: Uuid,
    #[serde(rename = "clienteId")]
    pub client_id: Uuid,
    #[serde(rename = "pagoId")]
    pub payment_id: Uuid,
    #[serde(rename = "monto")]
    pub amount: Decimal,
    #[serde(rename = "fecha")]
    pub date: DateTime<Utc>,
    #[serde(rename = "motivo")]
    pub reason: String,
    #[serde(rename = "estado", default)]
    pub status: CreditNoteStatus,
    #[serde(rename = "aplicada", default)]
    pub applied: bool,
}

impl CreditNote {
    /// Not yet consumed by a payment.
    pub fn is_available(&self) -> bool {
        !self.applied
    }

    /// Counts against the credited payment's balance.
    pub fn is_active(&self) -> bool {
        self.status == CreditNoteStatus::Active
    }
}

impl Identifiable for CreditNote {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for CreditNote {
    fn display_label(&self) -> String {
        format!("NC {} - ${} ({})", self.id, self.amount, self.reason)
    }
}

/// Caller-supplied data for a new credit note.
#[derive(Debug, Clone)]
pub struct CreditNoteInput {
    pub client_id: Uuid,
    pub payment_id: Uuid,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub reason: String,
}

impl CreditNoteInput {
    pub fn new(
        client_id: Uuid,
        payment_id: Uuid,
        amount: Decimal,
        date: DateTime<Utc>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            client_id,
            payment_id,
            amount,
            date,
            reason: reason.into(),
        }
    }
}
