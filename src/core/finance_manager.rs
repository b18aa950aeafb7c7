//! Host-side facade: every operation reads the collections it needs from the
//! Entity Store, runs the matching service on the snapshot, and writes back
//! only the collections that changed. Nothing is written when a service fails.

use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{Config, ConfigManager};
use crate::core::services::{
    BalanceFilter, BalanceService, CreditNoteService, DirectoryService, LedgerService,
    PaymentDeletion, QuotationPayment, QuotationService,
};
use crate::core::time::{Clock, SystemClock};
use crate::domain::{
    Balance, Books, Client, CreditNote, CreditNoteInput, DailyTotals, DateWindow, Direction,
    Movement, Payment, PaymentInput, PaymentMethod, Period, Quotation, QuotationStatus, Supplier,
};
use crate::errors::{EntityKind, FinanceError, Result};
use crate::storage::{Collection, EntityStore, EntityStoreExt, JsonStore};

const LEDGER: [Collection; 3] = [
    Collection::Payments,
    Collection::CreditNotes,
    Collection::Movements,
];

pub struct FinanceManager {
    store: Box<dyn EntityStore>,
    clock: Box<dyn Clock>,
    config: Config,
}

impl FinanceManager {
    pub fn new(store: Box<dyn EntityStore>, clock: Box<dyn Clock>, config: Config) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// Opens the JSON store configured under the application directory.
    pub fn open(manager: &ConfigManager) -> Result<Self> {
        let config = manager.load()?;
        let store = JsonStore::new(manager.data_dir(&config))?;
        info!(root = %store.root().display(), "opened finance store");
        Ok(Self::new(Box::new(store), Box::new(SystemClock), config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &dyn EntityStore {
        self.store.as_ref()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Loads every collection into one snapshot.
    pub fn load_books(&self) -> Result<Books> {
        let store = self.store.as_ref();
        Ok(Books::from_parts(
            store.load_records(Collection::Payments)?,
            store.load_records(Collection::CreditNotes)?,
            store.load_records(Collection::Movements)?,
            store.load_records(Collection::Clients)?,
            store.load_records(Collection::Suppliers)?,
        ))
    }

    fn persist(&self, books: &Books, touched: &[Collection]) -> Result<()> {
        let store = self.store.as_ref();
        for collection in touched {
            match collection {
                Collection::Payments => store.save_records(*collection, &books.payments)?,
                Collection::CreditNotes => store.save_records(*collection, &books.credit_notes)?,
                Collection::Movements => store.save_records(*collection, books.movements())?,
                Collection::Clients => store.save_records(*collection, &books.clients)?,
                Collection::Suppliers => store.save_records(*collection, &books.suppliers)?,
            }
        }
        debug!(collections = touched.len(), "snapshot persisted");
        Ok(())
    }

    fn mutate<T, F>(&self, touched: &[Collection], op: F) -> Result<T>
    where
        F: FnOnce(&mut Books) -> Result<T>,
    {
        let mut books = self.load_books()?;
        let outcome = op(&mut books)?;
        self.persist(&books, touched)?;
        Ok(outcome)
    }

    pub fn record_payment(&self, input: PaymentInput) -> Result<Payment> {
        self.mutate(&LEDGER, |books| {
            LedgerService::record_payment(books, input).map(|(payment, _)| payment)
        })
    }

    pub fn record_credit_note(&self, input: CreditNoteInput) -> Result<CreditNote> {
        self.mutate(&LEDGER, |books| {
            LedgerService::record_credit_note(books, input).map(|(note, _)| note)
        })
    }

    pub fn delete_payment(&self, id: Uuid) -> Result<PaymentDeletion> {
        self.mutate(&LEDGER, |books| LedgerService::delete_payment(books, id))
    }

    pub fn delete_credit_note(&self, id: Uuid) -> Result<CreditNote> {
        self.mutate(&LEDGER, |books| {
            LedgerService::delete_credit_note(books, id).map(|(note, _)| note)
        })
    }

    /// Marks a credit note as consumed.
    pub fn apply_credit_note(&self, id: Uuid) -> Result<CreditNote> {
        self.mutate(&[Collection::CreditNotes], |books| {
            books.credit_notes = CreditNoteService::apply_credit_note(id, &books.credit_notes)?;
            let note = books.credit_notes.iter().find(|n| n.id == id).cloned();
            note.ok_or_else(|| FinanceError::not_found(EntityKind::CreditNote, id))
        })
    }

    pub fn available_credit_notes(&self) -> Result<Vec<CreditNote>> {
        let notes: Vec<CreditNote> = self.store.load_records(Collection::CreditNotes)?;
        Ok(CreditNoteService::available_credit_notes(&notes)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn total_available_for(&self, entity_id: Uuid, direction: Direction) -> Result<Decimal> {
        let notes: Vec<CreditNote> = self.store.load_records(Collection::CreditNotes)?;
        let payments: Vec<Payment> = self.store.load_records(Collection::Payments)?;
        Ok(CreditNoteService::total_available_for(
            entity_id, direction, &notes, &payments,
        ))
    }

    /// The movement log, most recent first.
    pub fn movements(&self) -> Result<Vec<Movement>> {
        Ok(self.load_books()?.movements().to_vec())
    }

    pub fn add_client(&self, client: Client) -> Result<Client> {
        self.mutate(&[Collection::Clients], |books| {
            DirectoryService::add_client(books, client)
        })
    }

    pub fn edit_client(&self, id: Uuid, changes: Client) -> Result<Client> {
        self.mutate(&[Collection::Clients], |books| {
            DirectoryService::edit_client(books, id, changes)
        })
    }

    pub fn remove_client(&self, id: Uuid) -> Result<Client> {
        self.mutate(&[Collection::Clients], |books| {
            DirectoryService::remove_client(books, id)
        })
    }

    pub fn clients(&self) -> Result<Vec<Client>> {
        self.store.load_records(Collection::Clients)
    }

    pub fn add_supplier(&self, supplier: Supplier) -> Result<Supplier> {
        self.mutate(&[Collection::Suppliers], |books| {
            DirectoryService::add_supplier(books, supplier)
        })
    }

    pub fn remove_supplier(&self, id: Uuid) -> Result<Supplier> {
        self.mutate(&[Collection::Suppliers], |books| {
            DirectoryService::remove_supplier(books, id)
        })
    }

    pub fn suppliers(&self) -> Result<Vec<Supplier>> {
        self.store.load_records(Collection::Suppliers)
    }

    pub fn save_quotation(&self, quotation: Quotation) -> Result<Quotation> {
        self.mutate(&[Collection::Clients], |books| {
            QuotationService::save_quotation(books, quotation)
        })
    }

    pub fn update_quotation_status(&self, id: Uuid, to: QuotationStatus) -> Result<Quotation> {
        self.mutate(&[Collection::Clients], |books| {
            QuotationService::update_status(books, id, to)
        })
    }

    pub fn delete_quotation(&self, id: Uuid) -> Result<Quotation> {
        self.mutate(&[Collection::Clients], |books| {
            QuotationService::delete_quotation(books, id)
        })
    }

    /// Settles a quotation with an income payment dated now.
    pub fn pay_quotation(
        &self,
        id: Uuid,
        category: impl Into<String>,
        method: PaymentMethod,
    ) -> Result<QuotationPayment> {
        let date = self.clock.now_utc();
        self.mutate(
            &[
                Collection::Payments,
                Collection::Movements,
                Collection::Clients,
            ],
            |books| QuotationService::pay_quotation(books, id, category, method, date),
        )
    }

    pub fn search_payable_quotations(&self, term: &str) -> Result<Vec<Quotation>> {
        let books = self.load_books()?;
        Ok(QuotationService::search_payable(&books, term)
            .into_iter()
            .map(|(_, quotation)| quotation.clone())
            .collect())
    }

    pub fn quotations_with_status(&self, status: QuotationStatus) -> Result<Vec<Quotation>> {
        let books = self.load_books()?;
        Ok(QuotationService::with_status(&books, status)
            .into_iter()
            .map(|(_, quotation)| quotation.clone())
            .collect())
    }

    pub fn balance(&self, period: Period, filter: &BalanceFilter) -> Result<Balance> {
        let movements: Vec<Movement> = self.store.load_records(Collection::Movements)?;
        Ok(BalanceService::compute_for_period(
            &movements,
            period,
            self.clock.now(),
            filter,
        ))
    }

    pub fn balance_between(&self, window: &DateWindow, filter: &BalanceFilter) -> Result<Balance> {
        let movements: Vec<Movement> = self.store.load_records(Collection::Movements)?;
        Ok(BalanceService::compute_balance(&movements, window, filter))
    }

    /// Unfiltered balance over the configured default period.
    pub fn current_balance(&self) -> Result<Balance> {
        self.balance(self.config.default_period, &BalanceFilter::default())
    }

    pub fn daily_series(&self, period: Period) -> Result<Vec<DailyTotals>> {
        let movements: Vec<Movement> = self.store.load_records(Collection::Movements)?;
        let now = self.clock.now();
        Ok(BalanceService::daily_series(
            &movements,
            &period.window(now),
            *now.offset(),
        ))
    }
}
