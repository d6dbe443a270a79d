use crate::domain::common::ListEntity;
use crate::shared::form_schema::{
    parse_option, FieldDescriptor, FieldKind, FormModel, FormValues,
};
use crate::shared::serde_helpers::null_as_default;
use crate::shared::validation::ValidationError;
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Document type
// ============================================================================

/// Категория кадрового документа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    Resume,
    Marks,
    Id,
    Offer,
}

impl DocumentType {
    pub const ALL: [DocumentType; 4] = [Self::Resume, Self::Marks, Self::Id, Self::Offer];

    /// Идентификатор в списке (нижний регистр)
    pub fn as_id(&self) -> &'static str {
        match self {
            Self::Resume => "resume",
            Self::Marks => "marks",
            Self::Id => "id",
            Self::Offer => "offer",
        }
    }

    /// Сегмент URL для upload/download (верхний регистр)
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Resume => "RESUME",
            Self::Marks => "MARKS",
            Self::Id => "ID",
            Self::Offer => "OFFER",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Resume => "Resume",
            Self::Marks => "Marks Card",
            Self::Id => "ID Proof",
            Self::Offer => "Offer Letter",
        }
    }

    /// Case-insensitive lookup by id
    pub fn from_id(value: &str) -> Option<Self> {
        let lower = value.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|t| t.as_id() == lower)
    }
}

// ============================================================================
// Status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Approved,
    Pending,
    Rejected,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Pending => "pending",
            Self::Rejected => "rejected",
        }
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Загруженный кадровый документ сотрудника
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HrDocument {
    pub id: i64,
    pub employee_id: String,
    /// Always lower case after decoding
    #[serde(default, deserialize_with = "lowercase_or_empty")]
    pub document_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_download_uri: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: u64,
    // бэкенд статус не присылает
    #[serde(default)]
    pub status: DocumentStatus,
}

fn lowercase_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.map(|s| s.to_lowercase()).unwrap_or_default())
}

impl HrDocument {
    pub fn kind(&self) -> Option<DocumentType> {
        DocumentType::from_id(&self.document_type)
    }

    pub fn type_label(&self) -> &str {
        self.kind()
            .map(|t| t.label())
            .unwrap_or(self.document_type.as_str())
    }

    /// Size for display: B, KB or MB
    pub fn size_label(&self) -> String {
        const KB: f64 = 1024.0;
        let size = self.size as f64;
        if size < KB {
            format!("{} B", self.size)
        } else if size < KB * KB {
            format!("{:.1} KB", size / KB)
        } else {
            format!("{:.1} MB", size / (KB * KB))
        }
    }
}

impl ListEntity for HrDocument {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn display_name(&self) -> String {
        self.file_name.clone()
    }

    fn collection_name() -> &'static str {
        "hr_documents"
    }

    fn element_name() -> &'static str {
        "Document"
    }

    fn list_name() -> &'static str {
        "HR Documents"
    }
}

// ============================================================================
// Upload form
// ============================================================================

/// Параметры загрузки: попадают в URL, сам файл идёт частью `file`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HrUploadDraft {
    pub document_type: DocumentType,
    pub employee_id: String,
}

pub const DOCUMENT_TYPE_OPTIONS: &[&str] = &["resume", "marks", "id", "offer"];

pub const HR_DOCUMENT_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::text("documentType", "Document Type")
        .select(DOCUMENT_TYPE_OPTIONS)
        .required(),
    FieldDescriptor::text("employeeId", "Employee ID").required(),
    FieldDescriptor::text("file", "File")
        .of_kind(FieldKind::File)
        .required(),
];

impl FormModel for HrDocument {
    type Draft = HrUploadDraft;

    fn schema() -> &'static [FieldDescriptor] {
        HR_DOCUMENT_FIELDS
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("documentType", &self.document_type)
            .with("employeeId", &self.employee_id)
    }

    fn draft_from_form(values: &FormValues) -> Result<Self::Draft, ValidationError> {
        Ok(HrUploadDraft {
            document_type: parse_option(values, "documentType", DocumentType::from_id)?,
            employee_id: values.trimmed("employeeId"),
        })
    }

    fn attachment_path(&self) -> Option<&str> {
        (!self.file_download_uri.is_empty()).then_some(self.file_download_uri.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_normalizes_type_and_defaults() {
        let raw = r#"{"id": 3, "employeeId": "EMP7", "documentType": "RESUME",
                      "fileName": null, "size": 2048}"#;
        let doc: HrDocument = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.document_type, "resume");
        assert_eq!(doc.kind(), Some(DocumentType::Resume));
        assert_eq!(doc.file_name, "");
        assert_eq!(doc.file_type, "");
        assert_eq!(doc.status, DocumentStatus::Approved);
        assert_eq!(doc.size_label(), "2.0 KB");
    }

    #[test]
    fn test_record_without_employee_is_rejected() {
        let raw = r#"{"id": 3, "documentType": "ID"}"#;
        assert!(serde_json::from_str::<HrDocument>(raw).is_err());
    }

    #[test]
    fn test_upload_draft_path() {
        let values = HrDocument::blank_form()
            .with("documentType", "offer")
            .with("employeeId", " EMP9 ");
        let draft = HrDocument::draft_from_form(&values).unwrap();
        assert_eq!(draft.document_type.path_segment(), "OFFER");
        assert_eq!(draft.employee_id, "EMP9");
    }

    #[test]
    fn test_unknown_type_is_invalid() {
        let values = FormValues::new()
            .with("documentType", "passport")
            .with("employeeId", "EMP1");
        assert!(matches!(
            HrDocument::draft_from_form(&values),
            Err(ValidationError::InvalidField { field: "documentType", .. })
        ));
    }

    #[test]
    fn test_type_labels() {
        assert_eq!(DocumentType::from_id("ID"), Some(DocumentType::Id));
        assert_eq!(DocumentType::Marks.label(), "Marks Card");
        assert_eq!(DocumentType::Offer.path_segment(), "OFFER");
    }
}
