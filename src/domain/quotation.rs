use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{optional_ref, Displayable, Identifiable};

/// Fixed VAT rate applied to every quotation subtotal (16%).
pub const TAX_RATE: Decimal = Decimal::from_parts(16, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum QuotationStatus {
    #[default]
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "aprobada")]
    Approved,
    #[serde(rename = "rechazada")]
    Rejected,
    #[serde(rename = "pagada")]
    Paid,
}

impl QuotationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotationStatus::Pending => "pendiente",
            QuotationStatus::Approved => "aprobada",
            QuotationStatus::Rejected => "rechazada",
            QuotationStatus::Paid => "pagada",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, QuotationStatus::Rejected | QuotationStatus::Paid)
    }
}

impl fmt::Display for QuotationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuotationItem {
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "cantidad")]
    pub quantity: Decimal,
    #[serde(rename = "precioUnitario")]
    pub unit_price: Decimal,
    pub total: Decimal,
}

impl QuotationItem {
    pub fn new(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
            total: quantity * unit_price,
        }
    }
}

/// A priced proposal for a client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quotation {
    pub id: Uuid,
    #[serde(rename = "clienteId")]
    pub client_id: Uuid,
    #[serde(rename = "fecha")]
    pub date: DateTime<Utc>,
    #[serde(rename = "fechaReserva", default, skip_serializing_if = "Option::is_none")]
    pub reservation_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<QuotationItem>,
    #[serde(default)]
    pub subtotal: Decimal,
    #[serde(rename = "iva", default)]
    pub tax: Decimal,
    #[serde(default)]
    pub total: Decimal,
    #[serde(rename = "vigencia", default)]
    pub validity: String,
    #[serde(rename = "notas", default)]
    pub notes: String,
    #[serde(rename = "estado", default)]
    pub status: QuotationStatus,
    #[serde(rename = "pdfGenerado", default, skip_serializing_if = "Option::is_none")]
    pub pdf_generated: Option<bool>,
    #[serde(
        rename = "pagoId",
        default,
        deserialize_with = "optional_ref",
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_id: Option<Uuid>,
}

impl Quotation {
    /// Starts an empty pending quotation for `client_id`.
    pub fn new(client_id: Uuid, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id,
            date,
            reservation_date: None,
            items: Vec::new(),
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
            validity: String::new(),
            notes: String::new(),
            status: QuotationStatus::Pending,
            pdf_generated: None,
            payment_id: None,
        }
    }

    /// Status as shown to users: anything linked to a payment reads as paid.
    pub fn displayed_status(&self) -> QuotationStatus {
        if self.payment_id.is_some() {
            QuotationStatus::Paid
        } else {
            self.status
        }
    }

    /// Pending or approved, and not yet linked to a payment.
    pub fn is_payable(&self) -> bool {
        self.payment_id.is_none()
            && matches!(
                self.status,
                QuotationStatus::Pending | QuotationStatus::Approved
            )
    }
}

impl Identifiable for Quotation {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Quotation {
    fn display_label(&self) -> String {
        format!("Cotización #{} [{}] ${}", self.id, self.status, self.total)
    }
}
