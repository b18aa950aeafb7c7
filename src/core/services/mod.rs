pub mod balance_service;
pub mod credit_note_service;
pub mod directory_service;
pub mod ledger_service;
pub mod quotation_service;

pub use balance_service::{BalanceFilter, BalanceService};
pub use credit_note_service::CreditNoteService;
pub use directory_service::DirectoryService;
pub use ledger_service::{LedgerService, PaymentDeletion};
pub use quotation_service::{QuotationPayment, QuotationService};
