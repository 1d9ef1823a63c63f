//! Role facades over the shared operation set.

pub mod oversight;
pub mod shared;
pub mod transferring;

pub use oversight::OversightAgencyApi;
pub use shared::{ExpenseDocument, SharedOperations};
pub use transferring::{CreditEntryIdentification, CreditExpenseCategory, TransferringAgencyApi};
