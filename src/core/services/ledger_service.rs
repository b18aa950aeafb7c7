//! Projects financial events into the movement log and cascades deletions.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::services::CreditNoteService;
use crate::domain::{
    common::{ensure_positive, Direction, Displayable, EntryStatus, PaymentMethod},
    credit_note::{CreditNote, CreditNoteInput, CreditNoteStatus},
    movement::{Movement, CREDIT_NOTE_CATEGORY},
    payment::{Payment, PaymentInput},
    Books,
};
use crate::errors::{EntityKind, FinanceError, Result};

/// Outcome of deleting a payment.
#[derive(Debug, Clone)]
pub struct PaymentDeletion {
    pub payment: Payment,
    pub removed_movements: usize,
    /// Credit notes issued against the payment, removed with it.
    pub removed_credit_notes: Vec<CreditNote>,
}

pub struct LedgerService;

impl LedgerService {
    /// Builds a completed payment and its mirror movement without touching any collection.
    pub fn project_payment(input: &PaymentInput) -> Result<(Payment, Movement)> {
        let amount = ensure_positive(input.amount)?;
        let (client_id, supplier_id) = match input.direction {
            Direction::Income => (input.client_id, None),
            Direction::Expense => (None, input.supplier_id),
        };
        let payment = Payment {
            id: Uuid::new_v4(),
            direction: input.direction,
            category: input.category.clone(),
            description: input.description.clone(),
            amount,
            date: input.date,
            method: input.method,
            reference: input.reference.clone(),
            proof: input.proof.clone(),
            client_id,
            supplier_id,
            status: EntryStatus::Completed,
            credit_note_id: input.credit_note_id,
        };
        let movement = Movement {
            id: Uuid::new_v4(),
            direction: payment.direction,
            category: payment.category.clone(),
            description: payment.description.clone(),
            amount: payment.amount,
            date: payment.date,
            method: payment.method,
            status: payment.status,
            reference: payment.reference.clone(),
            payment_id: Some(payment.id),
            credit_note_id: None,
            client_id: payment.client_id,
            supplier_id: payment.supplier_id,
            proof: payment.proof.clone(),
        };
        Ok((payment, movement))
    }

    /// Records a payment and its movement. When the input names a credit note, the
    /// note must be available and cover the amount; it is marked applied.
    pub fn record_payment(books: &mut Books, input: PaymentInput) -> Result<(Payment, Movement)> {
        let (payment, movement) = Self::project_payment(&input)?;
        if let Some(note_id) = input.credit_note_id {
            let note = books
                .credit_note(note_id)
                .ok_or_else(|| FinanceError::not_found(EntityKind::CreditNote, note_id))?;
            if payment.amount > note.amount {
                warn!(%note_id, amount = %payment.amount, "payment exceeds credit note value");
                return Err(FinanceError::ExcessiveCreditNoteAmount {
                    payment_id: note.payment_id,
                    requested: payment.amount,
                    remaining: note.amount,
                });
            }
            books.credit_notes = CreditNoteService::apply_credit_note(note_id, &books.credit_notes)?;
        }
        Self::commit_payment(books, payment.clone(), movement.clone());
        Ok((payment, movement))
    }

    /// Appends an already projected payment/movement pair.
    pub fn commit_payment(books: &mut Books, payment: Payment, movement: Movement) {
        debug!(payment_id = %payment.id, payment = %payment.display_label(), "recording payment");
        books.payments.push(payment);
        books.push_movement(movement);
    }

    /// Records a credit note against an existing payment along with its expense movement.
    pub fn record_credit_note(
        books: &mut Books,
        input: CreditNoteInput,
    ) -> Result<(CreditNote, Movement)> {
        let amount = ensure_positive(input.amount)?;
        let payment = books
            .payment(input.payment_id)
            .ok_or_else(|| FinanceError::not_found(EntityKind::Payment, input.payment_id))?;
        CreditNoteService::ensure_within_balance(payment, &books.credit_notes, amount)?;

        let note = CreditNote {
            id: Uuid::new_v4(),
            client_id: input.client_id,
            payment_id: input.payment_id,
            amount,
            date: input.date,
            reason: input.reason,
            status: CreditNoteStatus::Active,
            applied: false,
        };
        let movement = Movement {
            id: Uuid::new_v4(),
            direction: Direction::Expense,
            category: CREDIT_NOTE_CATEGORY.to_string(),
            description: format!("Nota de Crédito - {}", note.reason),
            amount: note.amount,
            date: note.date,
            method: PaymentMethod::Transfer,
            status: EntryStatus::Completed,
            reference: note.id.to_string(),
            payment_id: Some(note.payment_id),
            credit_note_id: Some(note.id),
            client_id: Some(note.client_id),
            supplier_id: None,
            proof: None,
        };
        debug!(credit_note_id = %note.id, payment_id = %note.payment_id, "recording credit note");
        books.credit_notes.push(note.clone());
        books.push_movement(movement.clone());
        Ok((note, movement))
    }

    /// Removes a payment, every movement referencing it, and the credit notes issued against it.
    pub fn delete_payment(books: &mut Books, id: Uuid) -> Result<PaymentDeletion> {
        let index = books
            .payments
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| FinanceError::not_found(EntityKind::Payment, id))?;
        let payment = books.payments.remove(index);
        let removed_movements = books.remove_movements(|m| m.payment_id == Some(id));
        let (removed_credit_notes, kept): (Vec<_>, Vec<_>) = books
            .credit_notes
            .drain(..)
            .partition(|note| note.payment_id == id);
        books.credit_notes = kept;
        info!(
            payment_id = %id,
            removed_movements,
            removed_credit_notes = removed_credit_notes.len(),
            "payment deleted"
        );
        Ok(PaymentDeletion {
            payment,
            removed_movements,
            removed_credit_notes,
        })
    }

    /// Removes a credit note and its derived movement.
    pub fn delete_credit_note(books: &mut Books, id: Uuid) -> Result<(CreditNote, usize)> {
        let index = books
            .credit_notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| FinanceError::not_found(EntityKind::CreditNote, id))?;
        let note = books.credit_notes.remove(index);
        let removed = books.remove_movements(|m| m.credit_note_id == Some(id));
        info!(credit_note_id = %id, removed_movements = removed, "credit note deleted");
        Ok((note, removed))
    }
}
