pub mod aggregate;

pub use aggregate::{BankDocument, BankDocumentDto, BankDocumentStatus};
