//! Credit note availability and the effective value of income movements.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    common::Direction, credit_note::CreditNote, movement::Movement, payment::Payment,
};
use crate::errors::{EntityKind, FinanceError, Result};

pub struct CreditNoteService;

impl CreditNoteService {
    /// Amount of an income movement after subtracting the credit-note movements
    /// issued against the same payment. Expenses are returned unchanged.
    pub fn effective_amount(movement: &Movement, all_movements: &[Movement]) -> Decimal {
        if movement.direction != Direction::Income {
            return movement.amount;
        }
        let Some(payment_id) = movement.payment_id else {
            return movement.amount;
        };
        let credited: Decimal = all_movements
            .iter()
            .filter(|m| m.is_credit_note() && m.payment_id == Some(payment_id))
            .map(|m| m.amount)
            .sum();
        movement.amount - credited
    }

    /// Sums credit-note movements per credited payment, for repeated lookups.
    pub fn credits_by_payment(all_movements: &[Movement]) -> HashMap<Uuid, Decimal> {
        let mut index = HashMap::new();
        for movement in all_movements.iter().filter(|m| m.is_credit_note()) {
            if let Some(payment_id) = movement.payment_id {
                *index.entry(payment_id).or_insert(Decimal::ZERO) += movement.amount;
            }
        }
        index
    }

    /// Same rule as [`CreditNoteService::effective_amount`] against a prebuilt index.
    pub fn effective_amount_indexed(
        movement: &Movement,
        credits: &HashMap<Uuid, Decimal>,
    ) -> Decimal {
        if movement.direction != Direction::Income {
            return movement.amount;
        }
        let credited = movement
            .payment_id
            .and_then(|id| credits.get(&id))
            .copied()
            .unwrap_or(Decimal::ZERO);
        movement.amount - credited
    }

    pub fn available_credit_notes(all_credit_notes: &[CreditNote]) -> Vec<&CreditNote> {
        all_credit_notes.iter().filter(|n| n.is_available()).collect()
    }

    /// Available credit value for a client (income) or supplier (expense), resolved
    /// through each note's originating payment.
    pub fn total_available_for(
        entity_id: Uuid,
        direction: Direction,
        all_credit_notes: &[CreditNote],
        all_payments: &[Payment],
    ) -> Decimal {
        Self::available_credit_notes(all_credit_notes)
            .into_iter()
            .filter(|note| {
                all_payments
                    .iter()
                    .find(|p| p.id == note.payment_id)
                    .and_then(|payment| match direction {
                        Direction::Income => payment.client_id,
                        Direction::Expense => payment.supplier_id,
                    })
                    == Some(entity_id)
            })
            .map(|note| note.amount)
            .sum()
    }

    /// Returns a copy of the collection with the note marked applied.
    /// Applying twice fails so double spends surface.
    pub fn apply_credit_note(id: Uuid, all_credit_notes: &[CreditNote]) -> Result<Vec<CreditNote>> {
        let note = all_credit_notes
            .iter()
            .find(|n| n.id == id)
            .ok_or_else(|| FinanceError::not_found(EntityKind::CreditNote, id))?;
        if note.applied {
            warn!(credit_note_id = %id, "credit note already applied");
            return Err(FinanceError::AlreadyApplied(id));
        }
        info!(credit_note_id = %id, "applying credit note");
        Ok(all_credit_notes
            .iter()
            .cloned()
            .map(|mut n| {
                if n.id == id {
                    n.applied = true;
                }
                n
            })
            .collect())
    }

    /// Total of active credit notes already issued against a payment.
    pub fn credited_total(payment_id: Uuid, all_credit_notes: &[CreditNote]) -> Decimal {
        all_credit_notes
            .iter()
            .filter(|n| n.payment_id == payment_id && n.is_active())
            .map(|n| n.amount)
            .sum()
    }

    /// What can still be credited against a payment.
    pub fn remaining_balance(payment: &Payment, all_credit_notes: &[CreditNote]) -> Decimal {
        payment.amount - Self::credited_total(payment.id, all_credit_notes)
    }

    /// Rejects a new note when the cumulative credit would exceed the payment amount.
    pub fn ensure_within_balance(
        payment: &Payment,
        all_credit_notes: &[CreditNote],
        amount: Decimal,
    ) -> Result<()> {
        let remaining = Self::remaining_balance(payment, all_credit_notes);
        if amount > remaining {
            warn!(
                payment_id = %payment.id,
                requested = %amount,
                remaining = %remaining,
                "credit note exceeds payment balance"
            );
            return Err(FinanceError::ExcessiveCreditNoteAmount {
                payment_id: payment.id,
                requested: amount,
                remaining,
            });
        }
        Ok(())
    }
}
