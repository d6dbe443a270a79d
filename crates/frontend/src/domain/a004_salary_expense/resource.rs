use contracts::domain::a004_salary_expense::aggregate::SalaryExpense;

use crate::shared::entity_editor::error::MutationError;
use crate::shared::entity_editor::resource::{DraftOf, IdOf, Resource};
use crate::shared::entity_editor::transport::{ApiRequest, Attachment, Method};
use crate::shared::list_utils::{Faceted, Searchable};

pub struct SalaryResource;

impl Resource for SalaryResource {
    type Entity = SalaryExpense;
    const ENDPOINT: &'static str = "/api/salaries";

    fn create_request(
        draft: &DraftOf<Self>,
        _attachment: Option<&Attachment>,
    ) -> Result<ApiRequest, MutationError> {
        Ok(ApiRequest::json(Method::Post, Self::ENDPOINT, draft)?)
    }

    /// Тело PUT содержит и `id`
    fn update_request(
        id: &IdOf<Self>,
        draft: &DraftOf<Self>,
        _attachment: Option<&Attachment>,
    ) -> Result<ApiRequest, MutationError> {
        let body = SalaryExpense::with_draft(*id, draft.clone());
        Ok(ApiRequest::json(Method::Put, Self::item_path(id), &body)?)
    }
}

impl Searchable for SalaryExpense {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.data.employee_name.as_str(),
            self.data.description.as_str(),
        ]
    }
}

// фасетов на экране зарплат нет
impl Faceted for SalaryExpense {
    fn facet_value(&self, _facet: &str) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::entity_editor::gateway::MutationGateway;
    use crate::shared::entity_editor::loader::load;
    use crate::shared::entity_editor::store::Reconciliation;
    use crate::shared::entity_editor::transport::testing::ScriptedTransport;
    use crate::shared::list_utils::{filter_list, FacetSelection};
    use contracts::domain::a004_salary_expense::aggregate::total_amount;
    use contracts::shared::form_schema::{FormModel, FormValues};
    use futures::executor::block_on;
    use serde_json::json;

    fn form() -> FormValues {
        SalaryExpense::blank_form()
            .with("employeeName", "Alice")
            .with("date", "2024-01-31")
            .with("amount", "2500.50")
            .with("description", "January")
    }

    #[test]
    fn test_create_sends_date_tuple() {
        let t = ScriptedTransport::new();
        t.reply_json(
            201,
            json!({"id": 42, "employeeName": "Alice", "date": [2024, 1, 31],
                   "amount": 2500.5, "description": "January"}),
        );
        let gateway: MutationGateway<SalaryResource, _> = MutationGateway::new(t.clone());

        let result = block_on(gateway.create(&form(), None)).unwrap();

        assert!(matches!(result, Reconciliation::Append(ref e) if e.id == 42));
        let body = t.sent()[0].json_body().unwrap();
        assert_eq!(body["date"], json!([2024, 1, 31]));
        assert_eq!(body["amount"], json!(2500.5));
        assert!(body.get("id").is_none());
    }

    #[test]
    fn test_update_body_includes_id() {
        let t = ScriptedTransport::new();
        t.reply_json(
            200,
            json!({"id": 7, "employeeName": "Alice", "date": [2024, 1, 31],
                   "amount": 2500.5, "description": "January"}),
        );
        let gateway: MutationGateway<SalaryResource, _> = MutationGateway::new(t.clone());

        block_on(gateway.update(&7, &form(), None)).unwrap();

        let sent = &t.sent()[0];
        assert_eq!(sent.path, "/api/salaries/7");
        assert_eq!(sent.json_body().unwrap()["id"], json!(7));
    }

    #[test]
    fn test_bad_amount_is_a_validation_error() {
        let t = ScriptedTransport::new();
        let gateway: MutationGateway<SalaryResource, _> = MutationGateway::new(t.clone());

        let err = block_on(gateway.create(&form().with("amount", "lots"), None)).unwrap_err();

        assert!(err.is_validation());
        assert!(t.sent().is_empty());
    }

    #[test]
    fn test_total_of_filtered_rows() {
        let t = ScriptedTransport::new();
        t.reply_json(
            200,
            json!([
                {"id": 1, "employeeName": "Alice", "date": [2024, 1, 31], "amount": 100.0, "description": "Jan"},
                {"id": 2, "employeeName": "Bob", "date": [2024, 1, 31], "amount": 200.0, "description": "Jan"},
                {"id": 3, "employeeName": "Alice", "date": [2024, 2, 29], "amount": 50.25, "description": "Feb"},
                {"id": 4, "employeeName": "Broken", "date": [2024, 2, 30], "amount": 1.0, "description": "bad date"}
            ]),
        );
        let report = block_on(load::<SalaryResource, _>(&t)).unwrap();
        assert_eq!(report.items.len(), 3);
        assert_eq!(report.dropped_count(), 1);

        let alice = filter_list(&report.items, "alice", &FacetSelection::new());
        assert_eq!(total_amount(&alice), 150.25);
    }
}
