use crate::domain::common::ListEntity;
use crate::shared::date_tuple::{self, DateTuple};
use crate::shared::form_schema::{parse_option, FieldDescriptor, FieldKind, FormModel, FormValues};
use crate::shared::validation::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BankDocumentStatus {
    #[default]
    Valid,
    Expired,
    Pending,
}

impl BankDocumentStatus {
    pub const ALL: [BankDocumentStatus; 3] = [Self::Valid, Self::Expired, Self::Pending];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "Valid",
            Self::Expired => "Expired",
            Self::Pending => "Pending",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

/// Банковский документ (выписка, гарантия, справка)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankDocument {
    pub id: i64,

    #[serde(flatten)]
    pub data: BankDocumentDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDocumentDto {
    pub document_type: String,
    pub bank_name: String,
    pub account_number: String,
    /// Бэкенд ждёт `YYYY-MM-DD`, а отдаёт как строку, так и массив
    #[serde(with = "date_tuple::as_iso")]
    pub date: DateTuple,
    pub status: BankDocumentStatus,
}

impl ListEntity for BankDocument {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn display_name(&self) -> String {
        format!("{} ({})", self.data.document_type, self.data.bank_name)
    }

    fn collection_name() -> &'static str {
        "bank_documents"
    }

    fn element_name() -> &'static str {
        "Bank Document"
    }

    fn list_name() -> &'static str {
        "Bank Documents"
    }
}

pub const DOCUMENT_TYPE_OPTIONS: &[&str] = &["Bank Statement", "Bank Guarantee", "Bank Certificate"];
pub const STATUS_OPTIONS: &[&str] = &["Valid", "Expired", "Pending"];

pub const BANK_DOCUMENT_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::text("documentType", "Document Type")
        .select(DOCUMENT_TYPE_OPTIONS)
        .required()
        .default_value("Bank Statement"),
    FieldDescriptor::text("bankName", "Bank Name").required(),
    FieldDescriptor::text("accountNumber", "Account Number").required(),
    FieldDescriptor::text("date", "Date").of_kind(FieldKind::Date).required(),
    FieldDescriptor::text("status", "Status")
        .select(STATUS_OPTIONS)
        .required()
        .default_value("Valid"),
];

/// Заголовок CSV-выгрузки
pub const CSV_HEADER: [&str; 5] = ["Document Type", "Bank Name", "Account Number", "Date", "Status"];

impl BankDocument {
    pub fn csv_row(&self) -> Vec<String> {
        vec![
            self.data.document_type.clone(),
            self.data.bank_name.clone(),
            self.data.account_number.clone(),
            self.data.date.to_iso_string(),
            self.data.status.as_str().to_string(),
        ]
    }
}

impl FormModel for BankDocument {
    type Draft = BankDocumentDto;

    fn schema() -> &'static [FieldDescriptor] {
        BANK_DOCUMENT_FIELDS
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("documentType", &self.data.document_type)
            .with("bankName", &self.data.bank_name)
            .with("accountNumber", &self.data.account_number)
            .with("date", self.data.date.to_iso_string())
            .with("status", self.data.status.as_str())
    }

    fn draft_from_form(values: &FormValues) -> Result<Self::Draft, ValidationError> {
        let date = DateTuple::parse_iso(values.get("date")).map_err(|e| ValidationError::InvalidField {
            field: "Date",
            message: e.to_string(),
        })?;
        Ok(BankDocumentDto {
            document_type: values.trimmed("documentType"),
            bank_name: values.trimmed("bankName"),
            account_number: values.trimmed("accountNumber"),
            date,
            status: parse_option(values, "status", BankDocumentStatus::parse)?,
        })
    }
}
