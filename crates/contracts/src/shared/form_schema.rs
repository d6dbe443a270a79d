//! Field descriptors for add/edit/view forms
//!
//! All descriptors are `'static` so each resource declares its schema as a
//! compile-time constant.

use crate::shared::validation::ValidationError;
use std::collections::BTreeMap;

/// Kind of input rendered for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Password,
    Number,
    Select,
    Date,
    File,
    TextArea,
}

impl FieldKind {
    /// Value of the `type` attribute for `<input>` based kinds
    pub fn input_type(&self) -> &'static str {
        match self {
            Self::Text | Self::Select | Self::TextArea => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Number => "number",
            Self::Date => "date",
            Self::File => "file",
        }
    }
}

/// Descriptor of a single form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Options of a `Select` field, empty otherwise
    pub options: &'static [&'static str],
    /// Masked in view mode until revealed
    pub secret: bool,
    /// Accept filter for `File` fields (e.g. `image/*`)
    pub accept: Option<&'static str>,
    /// Initial value of a blank form
    pub default_value: Option<&'static str>,
}

impl FieldDescriptor {
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text,
            required: false,
            options: &[],
            secret: false,
            accept: None,
            default_value: None,
        }
    }

    pub const fn of_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn select(mut self, options: &'static [&'static str]) -> Self {
        self.kind = FieldKind::Select;
        self.options = options;
        self
    }

    pub const fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    pub const fn accept(mut self, accept: &'static str) -> Self {
        self.accept = Some(accept);
        self
    }

    pub const fn default_value(mut self, value: &'static str) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn is_file(&self) -> bool {
        self.kind == FieldKind::File
    }
}

/// Raw string values of a form, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank form for `schema`: defaults applied, file fields skipped
    pub fn blank(schema: &[FieldDescriptor]) -> Self {
        let mut values = Self::new();
        for field in schema.iter().filter(|f| !f.is_file()) {
            values.set(field.name, field.default_value.unwrap_or_default());
        }
        values
    }

    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_string(), value.into());
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Trimmed value, owned
    pub fn trimmed(&self, name: &str) -> String {
        self.get(name).trim().to_string()
    }

    /// Trimmed value or `None` when empty
    pub fn optional(&self, name: &str) -> Option<String> {
        let value = self.trimmed(name);
        (!value.is_empty()).then_some(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Labels of required fields left empty.
///
/// File fields count as filled when an attachment has been chosen or the
/// value under the field name holds the server path of an existing file.
pub fn missing_required(
    schema: &[FieldDescriptor],
    values: &FormValues,
    has_attachment: bool,
) -> Vec<&'static str> {
    schema
        .iter()
        .filter(|f| f.required)
        .filter(|f| {
            if f.is_file() {
                !has_attachment && values.get(f.name).trim().is_empty()
            } else {
                values.get(f.name).trim().is_empty()
            }
        })
        .map(|f| f.label)
        .collect()
}

/// Entity that can be edited through a schema-driven form
pub trait FormModel: Sized {
    /// Payload sent to the backend on create/update (the entity without its id)
    type Draft: Clone + std::fmt::Debug;

    fn schema() -> &'static [FieldDescriptor];

    fn blank_form() -> FormValues {
        FormValues::blank(Self::schema())
    }

    /// Current field values of an existing entity
    fn to_form(&self) -> FormValues;

    /// Typed payload from form values that passed the required check
    fn draft_from_form(values: &FormValues) -> Result<Self::Draft, ValidationError>;

    /// Server-relative path of the attached binary, if any
    fn attachment_path(&self) -> Option<&str> {
        None
    }
}

/// Schema-level check run before a draft is built
pub fn check_required<M: FormModel>(
    values: &FormValues,
    has_attachment: bool,
) -> Result<(), ValidationError> {
    let missing = missing_required(M::schema(), values, has_attachment);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingRequired(missing))
    }
}

/// Parse a select value into one of `options`
pub fn parse_option<T>(
    values: &FormValues,
    field: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, ValidationError> {
    let raw = values.trimmed(field);
    parse(&raw).ok_or_else(|| ValidationError::InvalidField {
        field,
        message: format!("'{}' is not an allowed value", raw),
    })
}
