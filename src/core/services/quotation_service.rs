//! Quotation pricing and status lifecycle.
//!
//! `pendiente -> aprobada | rechazada` through [`QuotationService::transition`];
//! `pendiente | aprobada -> pagada` only through [`QuotationService::link_to_payment`].
//! A quotation holding a payment id accepts no further changes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::services::LedgerService;
use crate::domain::{
    common::{short_id, Direction, PaymentMethod},
    movement::Movement,
    party::Client,
    payment::{Payment, PaymentInput},
    quotation::{Quotation, QuotationItem, QuotationStatus, TAX_RATE},
    Books,
};
use crate::errors::{EntityKind, FinanceError, Result};

/// Result of settling a quotation with a new payment.
#[derive(Debug, Clone)]
pub struct QuotationPayment {
    pub payment: Payment,
    pub movement: Movement,
    pub quotation: Quotation,
}

pub struct QuotationService;

impl QuotationService {
    pub fn can_transition(from: QuotationStatus, to: QuotationStatus) -> bool {
        matches!(
            (from, to),
            (QuotationStatus::Pending, QuotationStatus::Approved)
                | (QuotationStatus::Pending, QuotationStatus::Rejected)
        )
    }

    /// Moves a quotation to `to`. Paid is never reachable here; use `link_to_payment`.
    pub fn transition(quotation: &Quotation, to: QuotationStatus) -> Result<Quotation> {
        if quotation.payment_id.is_some() || !Self::can_transition(quotation.status, to) {
            warn!(quotation_id = %quotation.id, from = %quotation.status, %to, "rejected transition");
            return Err(FinanceError::InvalidTransition {
                from: quotation.displayed_status(),
                to,
            });
        }
        let mut next = quotation.clone();
        next.status = to;
        Ok(next)
    }

    /// Sets the payment id and the paid status together.
    pub fn link_to_payment(quotation: &Quotation, payment_id: Uuid) -> Result<Quotation> {
        if !quotation.is_payable() {
            return Err(FinanceError::InvalidTransition {
                from: quotation.displayed_status(),
                to: QuotationStatus::Paid,
            });
        }
        let mut next = quotation.clone();
        next.status = QuotationStatus::Paid;
        next.payment_id = Some(payment_id);
        Ok(next)
    }

    /// Recalculates subtotal, tax and total from the current items.
    pub fn recompute_totals(quotation: &Quotation) -> Quotation {
        let mut next = quotation.clone();
        Self::refresh_totals(&mut next);
        next
    }

    pub fn add_item(quotation: &Quotation, item: QuotationItem) -> Result<Quotation> {
        Self::ensure_editable(quotation)?;
        if item.quantity <= Decimal::ZERO {
            return Err(FinanceError::InvalidAmount(item.quantity));
        }
        if item.unit_price < Decimal::ZERO {
            return Err(FinanceError::InvalidAmount(item.unit_price));
        }
        let mut next = quotation.clone();
        next.items.push(QuotationItem::new(
            item.description,
            item.quantity,
            item.unit_price,
        ));
        Self::refresh_totals(&mut next);
        Ok(next)
    }

    pub fn remove_item(quotation: &Quotation, index: usize) -> Result<Quotation> {
        Self::ensure_editable(quotation)?;
        if index >= quotation.items.len() {
            return Err(FinanceError::not_found(EntityKind::QuotationItem, index));
        }
        let mut next = quotation.clone();
        next.items.remove(index);
        Self::refresh_totals(&mut next);
        Ok(next)
    }

    /// Quotations of a client that can still be settled by a payment.
    pub fn payable_quotations(client: &Client) -> Vec<&Quotation> {
        client.quotations.iter().filter(|q| q.is_payable()).collect()
    }

    /// Payable quotations whose id or client company name contains `term`, ignoring case.
    pub fn search_payable<'a>(books: &'a Books, term: &str) -> Vec<(&'a Client, &'a Quotation)> {
        let needle = term.trim().to_lowercase();
        books
            .clients
            .iter()
            .flat_map(|client| {
                Self::payable_quotations(client)
                    .into_iter()
                    .map(move |q| (client, q))
            })
            .filter(|(client, q)| {
                needle.is_empty()
                    || q.id.to_string().contains(&needle)
                    || client.company_name.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Quotations across all clients whose displayed status equals `status`.
    pub fn with_status(books: &Books, status: QuotationStatus) -> Vec<(&Client, &Quotation)> {
        books
            .clients
            .iter()
            .flat_map(|client| client.quotations.iter().map(move |q| (client, q)))
            .filter(|(_, q)| q.displayed_status() == status)
            .collect()
    }

    /// Attaches a new quotation to its client as pending. Re-saving an unlinked
    /// quotation replaces its items and keeps its current status.
    pub fn save_quotation(books: &mut Books, quotation: Quotation) -> Result<Quotation> {
        let client = books
            .client_mut(quotation.client_id)
            .ok_or_else(|| FinanceError::not_found(EntityKind::Client, quotation.client_id))?;
        let mut saved = Self::recompute_totals(&quotation);
        saved.status = QuotationStatus::Pending;
        saved.payment_id = None;
        match client.quotation_mut(saved.id) {
            Some(existing) => {
                Self::ensure_editable(existing)?;
                saved.status = existing.status;
                *existing = saved.clone();
            }
            None => client.quotations.push(saved.clone()),
        }
        debug!(quotation_id = %saved.id, total = %saved.total, "quotation saved");
        Ok(saved)
    }

    /// Applies a status transition to a stored quotation.
    pub fn update_status(books: &mut Books, id: Uuid, to: QuotationStatus) -> Result<Quotation> {
        let stored = Self::stored_mut(books, id)?;
        let next = Self::transition(stored, to)?;
        *stored = next.clone();
        info!(quotation_id = %id, status = %to, "quotation status changed");
        Ok(next)
    }

    /// Removes a quotation from its client. Quotations linked to a payment are kept.
    pub fn delete_quotation(books: &mut Books, id: Uuid) -> Result<Quotation> {
        let client = books
            .clients
            .iter_mut()
            .find(|c| c.quotation(id).is_some())
            .ok_or_else(|| FinanceError::not_found(EntityKind::Quotation, id))?;
        let index = client
            .quotations
            .iter()
            .position(|q| q.id == id)
            .ok_or_else(|| FinanceError::not_found(EntityKind::Quotation, id))?;
        if client.quotations[index].payment_id.is_some() {
            warn!(quotation_id = %id, "refusing to delete paid quotation");
            return Err(FinanceError::QuotationLocked(id));
        }
        Ok(client.quotations.remove(index))
    }

    /// Records an income payment for the quotation total and links it, all or nothing.
    pub fn pay_quotation(
        books: &mut Books,
        id: Uuid,
        category: impl Into<String>,
        method: PaymentMethod,
        date: DateTime<Utc>,
    ) -> Result<QuotationPayment> {
        let (client, quotation) = books
            .quotation(id)
            .ok_or_else(|| FinanceError::not_found(EntityKind::Quotation, id))?;
        let tag = short_id(quotation.id);
        let input = PaymentInput::new(
            Direction::Income,
            category,
            format!("Pago de cotización #{tag}"),
            quotation.total,
            date,
            method,
        )
        .with_reference(format!("Cotización #{tag}"))
        .with_counterparty(client.id);

        let (payment, movement) = LedgerService::project_payment(&input)?;
        let linked = Self::link_to_payment(quotation, payment.id)?;

        *Self::stored_mut(books, id)? = linked.clone();
        LedgerService::commit_payment(books, payment.clone(), movement.clone());
        info!(quotation_id = %id, payment_id = %payment.id, "quotation paid");
        Ok(QuotationPayment {
            payment,
            movement,
            quotation: linked,
        })
    }

    fn refresh_totals(quotation: &mut Quotation) {
        for item in quotation.items.iter_mut() {
            item.total = item.quantity * item.unit_price;
        }
        quotation.subtotal = quotation.items.iter().map(|item| item.total).sum();
        quotation.tax = quotation.subtotal * TAX_RATE;
        quotation.total = quotation.subtotal + quotation.tax;
    }

    fn ensure_editable(quotation: &Quotation) -> Result<()> {
        if quotation.payment_id.is_some() {
            return Err(FinanceError::QuotationLocked(quotation.id));
        }
        Ok(())
    }

    fn stored_mut(books: &mut Books, id: Uuid) -> Result<&mut Quotation> {
        books
            .clients
            .iter_mut()
            .find_map(|client| client.quotation_mut(id))
            .ok_or_else(|| FinanceError::not_found(EntityKind::Quotation, id))
    }
}
