use uuid::Uuid;

use crate::domain::{
    common::Identifiable,
    credit_note::CreditNote,
    movement::{sort_newest_first, Movement},
    party::{Client, Supplier},
    payment::Payment,
    quotation::Quotation,
};

/// In-memory snapshot of every financial collection, loaded and saved as a unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Books {
    pub payments: Vec<Payment>,
    pub credit_notes: Vec<CreditNote>,
    movements: Vec<Movement>,
    pub clients: Vec<Client>,
    pub suppliers: Vec<Supplier>,
}

impl Books {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        payments: Vec<Payment>,
        credit_notes: Vec<CreditNote>,
        movements: Vec<Movement>,
        clients: Vec<Client>,
        suppliers: Vec<Supplier>,
    ) -> Self {
        let mut books = Self {
            payments,
            credit_notes,
            movements,
            clients,
            suppliers,
        };
        sort_newest_first(&mut books.movements);
        books
    }

    /// The movement log, most recent first.
    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    pub fn push_movement(&mut self, movement: Movement) {
        self.movements.push(movement);
        sort_newest_first(&mut self.movements);
    }

    /// Drops every movement matching `predicate`, returning how many were removed.
    pub fn remove_movements<F>(&mut self, predicate: F) -> usize
    where
        F: Fn(&Movement) -> bool,
    {
        let before = self.movements.len();
        self.movements.retain(|movement| !predicate(movement));
        before - self.movements.len()
    }

    pub fn payment(&self, id: Uuid) -> Option<&Payment> {
        find_by_id(&self.payments, id)
    }

    pub fn credit_note(&self, id: Uuid) -> Option<&CreditNote> {
        find_by_id(&self.credit_notes, id)
    }

    pub fn client(&self, id: Uuid) -> Option<&Client> {
        find_by_id(&self.clients, id)
    }

    pub fn client_mut(&mut self, id: Uuid) -> Option<&mut Client> {
        self.clients.iter_mut().find(|c| c.id() == id)
    }

    pub fn supplier(&self, id: Uuid) -> Option<&Supplier> {
        find_by_id(&self.suppliers, id)
    }

    /// Finds a quotation together with its owning client.
    pub fn quotation(&self, id: Uuid) -> Option<(&Client, &Quotation)> {
        self.clients
            .iter()
            .find_map(|client| client.quotation(id).map(|q| (client, q)))
    }
}

fn find_by_id<T: Identifiable>(items: &[T], id: Uuid) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::{Direction, EntryStatus, PaymentMethod};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn movement(day: u32) -> Movement {
        Movement {
            id: Uuid::new_v4(),
            direction: Direction::Income,
            category: "Depósitos".into(),
            description: format!("day {day}"),
            amount: Decimal::TEN,
            date: Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap(),
            method: PaymentMethod::Cash,
            status: EntryStatus::Completed,
            reference: String::new(),
            payment_id: None,
            credit_note_id: None,
            client_id: None,
            supplier_id: None,
            proof: None,
        }
    }

    #[test]
    fn movement_log_reads_newest_first() {
        let mut books = Books::from_parts(
            Vec::new(),
            Vec::new(),
            vec![movement(3), movement(9), movement(1)],
            Vec::new(),
            Vec::new(),
        );
        books.push_movement(movement(5));
        let days: Vec<String> = books
            .movements()
            .iter()
            .map(|m| m.description.clone())
            .collect();
        assert_eq!(days, vec!["day 9", "day 5", "day 3", "day 1"]);
    }
}
