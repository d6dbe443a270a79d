use contracts::domain::a003_bank_document::aggregate::{BankDocument, CSV_HEADER};

use crate::shared::entity_editor::error::MutationError;
use crate::shared::entity_editor::resource::{DraftOf, IdOf, Resource};
use crate::shared::entity_editor::transport::{ApiRequest, Attachment, Method};
use crate::shared::export::CsvExportable;
use crate::shared::list_utils::{Faceted, Searchable};

pub const FACET_TYPE: &str = "documentType";
pub const FACET_STATUS: &str = "status";

pub const CSV_FILE_NAME: &str = "bank_documents.csv";

pub struct BankDocumentResource;

impl Resource for BankDocumentResource {
    type Entity = BankDocument;
    const ENDPOINT: &'static str = "/api/bankdocuments";

    fn create_request(
        draft: &DraftOf<Self>,
        _attachment: Option<&Attachment>,
    ) -> Result<ApiRequest, MutationError> {
        Ok(ApiRequest::json(Method::Post, Self::ENDPOINT, draft)?)
    }

    fn update_request(
        id: &IdOf<Self>,
        draft: &DraftOf<Self>,
        _attachment: Option<&Attachment>,
    ) -> Result<ApiRequest, MutationError> {
        Ok(ApiRequest::json(Method::Put, Self::item_path(id), draft)?)
    }
}

impl Searchable for BankDocument {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.data.bank_name.as_str(),
            self.data.account_number.as_str(),
            self.data.document_type.as_str(),
        ]
    }
}

impl Faceted for BankDocument {
    fn facet_value(&self, facet: &str) -> Option<String> {
        match facet {
            FACET_TYPE => Some(self.data.document_type.clone()),
            FACET_STATUS => Some(self.data.status.as_str().to_string()),
            _ => None,
        }
    }
}

impl CsvExportable for BankDocument {
    fn headers() -> Vec<&'static str> {
        CSV_HEADER.to_vec()
    }

    fn to_csv_row(&self) -> Vec<String> {
        self.csv_row()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::entity_editor::gateway::MutationGateway;
    use crate::shared::entity_editor::store::{EntityStore, Reconciliation};
    use crate::shared::entity_editor::transport::testing::ScriptedTransport;
    use crate::shared::export::build_csv;
    use crate::shared::list_utils::{filter_list, FacetSelection};
    use contracts::shared::form_schema::FormModel;
    use futures::executor::block_on;
    use serde_json::json;

    fn document(id: i64, bank: &str, status: &str) -> BankDocument {
        serde_json::from_value(json!({
            "id": id,
            "documentType": "Bank Statement",
            "bankName": bank,
            "accountNumber": format!("00{}", id),
            "date": [2024, 5, 1],
            "status": status
        }))
        .unwrap()
    }

    #[test]
    fn test_create_posts_json_and_appends() {
        let t = ScriptedTransport::new();
        t.reply_json(
            201,
            json!({"id": 42, "documentType": "Bank Guarantee", "bankName": "SBI",
                   "accountNumber": "9", "date": "2024-02-29", "status": "Pending"}),
        );
        let gateway: MutationGateway<BankDocumentResource, _> = MutationGateway::new(t.clone());
        let values = BankDocument::blank_form()
            .with("documentType", "Bank Guarantee")
            .with("bankName", "SBI")
            .with("accountNumber", "9")
            .with("date", "2024-02-29")
            .with("status", "Pending");

        let mut store = EntityStore::default();
        store.replace_all(vec![document(1, "HDFC", "Valid")]);
        let reconciliation = block_on(gateway.create(&values, None)).unwrap();
        store.apply(reconciliation);

        assert_eq!(store.len(), 2);
        assert!(store.contains(&42));
        let body = t.sent()[0].json_body().unwrap();
        assert_eq!(t.sent()[0].path, "/api/bankdocuments");
        assert_eq!(body["date"], "2024-02-29");
        assert_eq!(body["bankName"], "SBI");
    }

    #[test]
    fn test_rejected_update_keeps_store() {
        let t = ScriptedTransport::new();
        t.reply_text(500, "text/html", "<html>Internal Server Error</html>");
        let gateway: MutationGateway<BankDocumentResource, _> = MutationGateway::new(t.clone());

        let original = document(3, "Axis", "Valid");
        let values = original.to_form().with("status", "Expired");
        let err = block_on(gateway.update(&3, &values, None)).unwrap_err();

        assert_eq!(
            err,
            MutationError::Rejected {
                status: 500,
                message: String::new()
            }
        );
        assert_eq!(t.sent()[0].path, "/api/bankdocuments/3");
        assert_eq!(t.sent()[0].method, Method::Put);
    }

    #[test]
    fn test_status_facet_and_csv() {
        let list = vec![document(1, "HDFC", "Valid"), document(2, "Axis, Ltd", "Expired")];
        let expired = filter_list(&list, "", &FacetSelection::new().with(FACET_STATUS, "Expired"));
        assert_eq!(expired.len(), 1);

        let csv = build_csv(&expired);
        assert_eq!(
            csv,
            "Document Type,Bank Name,Account Number,Date,Status\n\
             Bank Statement,\"Axis, Ltd\",002,2024-05-01,Expired\n"
        );
    }

    #[test]
    fn test_reconciliation_replace() {
        let mut store = EntityStore::default();
        store.replace_all(vec![document(1, "HDFC", "Valid"), document(2, "SBI", "Valid")]);
        store.apply(Reconciliation::Replace(document(2, "SBI", "Expired")));
        assert_eq!(store.get(&2).map(|d| d.data.status.as_str()), Some("Expired"));
        assert_eq!(store.len(), 2);
    }
}
