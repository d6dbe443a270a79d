use contracts::domain::a002_hr_document::aggregate::{HrDocument, HrUploadDraft};
use contracts::shared::validation::ValidationError;

use crate::shared::api_utils::path_segment;
use crate::shared::entity_editor::error::{message_from_body, FetchError, MutationError};
use crate::shared::entity_editor::resource::{DraftOf, Resource};
use crate::shared::entity_editor::transport::{
    ApiRequest, Attachment, HttpTransport, Method, MultipartPart,
};
use crate::shared::list_utils::{Faceted, Searchable};

/// Multipart part carrying the uploaded document
pub const FILE_PART: &str = "file";

pub const FACET_TYPE: &str = "documentType";

/// `/api/hr/upload/{TYPE}/{employeeId}`
pub fn upload_path(draft: &HrUploadDraft) -> String {
    format!(
        "/api/hr/upload/{}/{}",
        draft.document_type.path_segment(),
        path_segment(&draft.employee_id)
    )
}

/// `/api/hr/download/{employeeId}/{TYPE}`
pub fn download_path(document: &HrDocument) -> String {
    format!(
        "/api/hr/download/{}/{}",
        path_segment(&document.employee_id),
        path_segment(&document.document_type.to_uppercase())
    )
}

/// Кадровые документы: загрузка файлом, без редактирования
pub struct HrDocumentResource;

impl Resource for HrDocumentResource {
    type Entity = HrDocument;
    const ENDPOINT: &'static str = "/api/hr/documents";
    // upload отвечает текстом, список перечитываем
    const CREATE_MAY_OMIT_ENTITY: bool = true;
    const CAN_EDIT: bool = false;

    fn create_request(
        draft: &DraftOf<Self>,
        attachment: Option<&Attachment>,
    ) -> Result<ApiRequest, MutationError> {
        let file = attachment.ok_or(ValidationError::MissingRequired(vec!["File"]))?;
        Ok(ApiRequest::multipart(
            Method::Post,
            upload_path(draft),
            vec![MultipartPart::file(FILE_PART, file.clone())],
        ))
    }
}

/// Скачать файл документа
pub async fn download<T: HttpTransport>(
    transport: &T,
    document: &HrDocument,
) -> Result<Attachment, FetchError> {
    let response = transport.send(ApiRequest::get(download_path(document))).await?;
    if !response.is_success() {
        let error = FetchError::Status {
            status: response.status,
            message: message_from_body(&response),
        };
        log::error!("HR document {}: download failed: {}", document.id, error);
        return Err(error);
    }

    let file_name = if document.file_name.is_empty() {
        format!("{}_{}", document.employee_id, document.document_type)
    } else {
        document.file_name.clone()
    };
    let mime_type = response
        .content_type
        .clone()
        .or_else(|| (!document.file_type.is_empty()).then(|| document.file_type.clone()))
        .unwrap_or_else(|| "application/octet-stream".to_string());
    Ok(Attachment::new(file_name, mime_type, response.body))
}

impl Searchable for HrDocument {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.file_name.as_str(),
            self.employee_id.as_str(),
            self.type_label(),
        ]
    }
}

impl Faceted for HrDocument {
    fn facet_value(&self, facet: &str) -> Option<String> {
        match facet {
            FACET_TYPE => Some(self.document_type.clone()),
            _ => None,
        }
    }
}
