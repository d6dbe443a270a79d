pub mod aggregate;

pub use aggregate::{DocumentStatus, DocumentType, HrDocument, HrUploadDraft};
