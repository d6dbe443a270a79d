use contracts::domain::a001_employee::aggregate::{Employee, EmployeeDto};

use crate::shared::entity_editor::error::MutationError;
use crate::shared::entity_editor::resource::{DraftOf, IdOf, Resource};
use crate::shared::entity_editor::transport::{ApiRequest, Attachment, Method, MultipartPart};
use crate::shared::list_utils::{Faceted, Searchable};

/// Multipart part carrying the employee JSON
pub const EMPLOYEE_PART: &str = "employee";
/// Multipart part carrying the profile photo
pub const PHOTO_PART: &str = "photo";

pub const FACET_DEPARTMENT: &str = "department";
pub const FACET_STATUS: &str = "status";

/// `/api/employees`: create/update идут multipart-ом
pub struct EmployeeResource;

impl Resource for EmployeeResource {
    type Entity = Employee;
    const ENDPOINT: &'static str = "/api/employees";

    fn create_request(
        draft: &DraftOf<Self>,
        attachment: Option<&Attachment>,
    ) -> Result<ApiRequest, MutationError> {
        Ok(ApiRequest::multipart(
            Method::Post,
            Self::ENDPOINT,
            employee_parts(draft, attachment)?,
        ))
    }

    fn update_request(
        id: &IdOf<Self>,
        draft: &DraftOf<Self>,
        attachment: Option<&Attachment>,
    ) -> Result<ApiRequest, MutationError> {
        Ok(ApiRequest::multipart(
            Method::Put,
            Self::item_path(id),
            employee_parts(draft, attachment)?,
        ))
    }
}

fn employee_parts(
    draft: &EmployeeDto,
    attachment: Option<&Attachment>,
) -> Result<Vec<MultipartPart>, MutationError> {
    let mut parts = vec![MultipartPart::json(EMPLOYEE_PART, draft)?];
    if let Some(photo) = attachment {
        parts.push(MultipartPart::file(PHOTO_PART, photo.clone()));
    }
    Ok(parts)
}

impl Searchable for Employee {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.data.employee_name.as_str(),
            self.data.employee_id.as_str(),
            self.data.department.as_str(),
            self.data.position.as_str(),
            self.data.email.as_str(),
        ]
    }
}

impl Faceted for Employee {
    fn facet_value(&self, facet: &str) -> Option<String> {
        match facet {
            FACET_DEPARTMENT => Some(self.data.department.clone()),
            FACET_STATUS => Some(self.data.status.as_str().to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::entity_editor::gateway::MutationGateway;
    use crate::shared::entity_editor::store::Reconciliation;
    use crate::shared::entity_editor::transport::testing::ScriptedTransport;
    use crate::shared::list_utils::{filter_list, FacetSelection};
    use contracts::shared::form_schema::{FormModel, FormValues};
    use futures::executor::block_on;
    use serde_json::json;

    fn raw_employee(id: &str, name: &str, department: &str) -> serde_json::Value {
        json!({
            "id": id,
            "employeeId": format!("EMP-{}", id),
            "employeeName": name,
            "email": format!("{}@corp.test", name.to_lowercase()),
            "password": "Secret#123",
            "phoneNumber": "555-0100",
            "position": "Engineer",
            "department": department,
            "joiningDate": [2024, 1, 15],
            "status": "Active"
        })
    }

    fn employee(id: &str, name: &str, department: &str) -> Employee {
        serde_json::from_value(raw_employee(id, name, department)).unwrap()
    }

    fn filled_form() -> FormValues {
        employee("0", "Alice", "HR").to_form()
    }

    #[test]
    fn test_create_sends_json_part_and_photo() {
        let t = ScriptedTransport::new();
        t.reply_json(201, raw_employee("9", "Alice", "HR"));
        let gateway: MutationGateway<EmployeeResource, _> = MutationGateway::new(t.clone());

        let photo = Attachment::new("me.png", "image/png", vec![1, 2, 3]);
        let result = block_on(gateway.create(&filled_form(), Some(&photo))).unwrap();

        assert!(matches!(result, Reconciliation::Append(ref e) if e.id == "9"));
        let sent = t.sent();
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(sent[0].path, "/api/employees");
        let names: Vec<&str> = sent[0].parts().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["employee", "photo"]);
        match &sent[0].parts()[0] {
            MultipartPart::Json { value, .. } => {
                let body: serde_json::Value = serde_json::from_str(value).unwrap();
                assert_eq!(body["joiningDate"], json!([2024, 1, 15]));
                assert_eq!(body["employeeName"], "Alice");
                assert!(body.get("id").is_none());
            }
            other => panic!("unexpected part {:?}", other),
        }
    }

    #[test]
    fn test_update_without_photo_puts_to_item_path() {
        let t = ScriptedTransport::new();
        t.reply_json(200, raw_employee("5", "Alice", "Finance"));
        let gateway: MutationGateway<EmployeeResource, _> = MutationGateway::new(t.clone());

        let mut values = filled_form();
        values.set("department", "Finance");
        let result = block_on(gateway.update(&"5".to_string(), &values, None)).unwrap();

        assert!(matches!(result, Reconciliation::Replace(ref e) if e.data.department == "Finance"));
        let sent = t.sent();
        assert_eq!(sent[0].method, Method::Put);
        assert_eq!(sent[0].path, "/api/employees/5");
        assert_eq!(sent[0].parts().len(), 1);
    }

    #[test]
    fn test_missing_required_field_sends_nothing() {
        let t = ScriptedTransport::new();
        let gateway: MutationGateway<EmployeeResource, _> = MutationGateway::new(t.clone());

        let mut values = filled_form();
        values.set("phoneNumber", "  ");
        let err = block_on(gateway.create(&values, None)).unwrap_err();

        assert!(err.is_validation());
        assert!(t.sent().is_empty());
    }

    #[test]
    fn test_search_and_department_facet() {
        let list = vec![
            employee("1", "Alice", "HR"),
            employee("2", "Bob", "IT"),
        ];
        let by_name = filter_list(&list, "ali", &FacetSelection::new());
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "1");

        let by_dept = filter_list(&list, "", &FacetSelection::new().with(FACET_DEPARTMENT, "IT"));
        assert_eq!(by_dept.len(), 1);
        assert_eq!(by_dept[0].data.employee_name, "Bob");
    }
}
