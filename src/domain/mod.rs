pub mod balance;
pub mod books;
pub mod categories;
pub mod common;
pub mod credit_note;
pub mod movement;
pub mod party;
pub mod payment;
pub mod period;
pub mod quotation;

pub use balance::{Balance, DailyTotals};
pub use books::Books;
pub use common::{Direction, Displayable, EntryStatus, Identifiable, PaymentMethod};
pub use credit_note::{CreditNote, CreditNoteInput, CreditNoteStatus};
pub use movement::{Movement, CREDIT_NOTE_CATEGORY};
pub use party::{Client, Supplier};
pub use payment::{Payment, PaymentInput};
pub use period::{DateWindow, Period};
pub use quotation::{Quotation, QuotationItem, QuotationStatus, TAX_RATE};
