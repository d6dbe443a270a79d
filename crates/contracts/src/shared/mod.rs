pub mod date_tuple;
pub mod form_schema;
pub mod serde_helpers;
pub mod validation;
