use crate::domain::common::ListEntity;
use crate::shared::date_tuple::DateTuple;
use crate::shared::form_schema::{
    parse_option, FieldDescriptor, FieldKind, FormModel, FormValues,
};
use crate::shared::serde_helpers::{null_as_default, string_or_number};
use crate::shared::validation::ValidationError;
use serde::{Deserialize, Serialize};

// ============================================================================
// Status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EmployeeStatus {
    #[default]
    Active,
    Joining,
    Relieving,
}

impl EmployeeStatus {
    pub const ALL: [EmployeeStatus; 3] = [Self::Active, Self::Joining, Self::Relieving];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Joining => "Joining",
            Self::Relieving => "Relieving",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Сотрудник (карточка на экране приёма на работу)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    #[serde(flatten)]
    pub data: EmployeeDto,
}

/// Поля сотрудника без идентификатора: тело create/update (часть `employee`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub employee_id: String,
    pub employee_name: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub password: String,
    pub phone_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub blood_group: String,
    #[serde(default)]
    pub profile_photo_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permanent_address: String,
    pub position: String,
    pub department: String,
    pub joining_date: DateTuple,
    pub status: EmployeeStatus,
}

impl ListEntity for Employee {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }

    fn display_name(&self) -> String {
        self.data.employee_name.clone()
    }

    fn collection_name() -> &'static str {
        "employees"
    }

    fn element_name() -> &'static str {
        "Employee"
    }

    fn list_name() -> &'static str {
        "Employees"
    }
}

// ============================================================================
// Form
// ============================================================================

pub const STATUS_OPTIONS: &[&str] = &["Active", "Joining", "Relieving"];

/// File field; during an edit it holds the current photo path
pub const PHOTO_URL_KEY: &str = "photo";

pub const EMPLOYEE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::text("employeeId", "Employee ID").required(),
    FieldDescriptor::text("employeeName", "Full Name").required(),
    FieldDescriptor::text("email", "Email").of_kind(FieldKind::Email).required(),
    FieldDescriptor::text("password", "Password")
        .of_kind(FieldKind::Password)
        .required()
        .secret(),
    FieldDescriptor::text("phoneNumber", "Phone Number").required(),
    FieldDescriptor::text("bloodGroup", "Blood Group"),
    FieldDescriptor::text("position", "Position").required(),
    FieldDescriptor::text("department", "Department").required(),
    FieldDescriptor::text("joiningDate", "Joining Date")
        .of_kind(FieldKind::Date)
        .required(),
    FieldDescriptor::text("status", "Status")
        .select(STATUS_OPTIONS)
        .required()
        .default_value("Active"),
    FieldDescriptor::text("currentAddress", "Current Address").of_kind(FieldKind::TextArea),
    FieldDescriptor::text("permanentAddress", "Permanent Address").of_kind(FieldKind::TextArea),
    FieldDescriptor::text(PHOTO_URL_KEY, "Profile Photo")
        .of_kind(FieldKind::File)
        .accept("image/*"),
];

impl FormModel for Employee {
    type Draft = EmployeeDto;

    fn schema() -> &'static [FieldDescriptor] {
        EMPLOYEE_FIELDS
    }

    fn to_form(&self) -> FormValues {
        let d = &self.data;
        let mut values = FormValues::new()
            .with("employeeId", &d.employee_id)
            .with("employeeName", &d.employee_name)
            .with("email", &d.email)
            .with("password", &d.password)
            .with("phoneNumber", &d.phone_number)
            .with("bloodGroup", &d.blood_group)
            .with("position", &d.position)
            .with("department", &d.department)
            .with("joiningDate", d.joining_date.to_iso_string())
            .with("status", d.status.as_str())
            .with("currentAddress", &d.current_address)
            .with("permanentAddress", &d.permanent_address);
        if let Some(url) = &d.profile_photo_url {
            values.set(PHOTO_URL_KEY, url);
        }
        values
    }

    fn draft_from_form(values: &FormValues) -> Result<Self::Draft, ValidationError> {
        let joining_date = DateTuple::parse_iso(values.get("joiningDate")).map_err(|e| {
            ValidationError::InvalidField {
                field: "Joining Date",
                message: e.to_string(),
            }
        })?;
        let status = parse_option(values, "status", EmployeeStatus::parse)?;

        Ok(EmployeeDto {
            employee_id: values.trimmed("employeeId"),
            employee_name: values.trimmed("employeeName"),
            email: values.trimmed("email"),
            password: values.get("password").to_string(),
            phone_number: values.trimmed("phoneNumber"),
            blood_group: values.trimmed("bloodGroup"),
            profile_photo_url: values.optional(PHOTO_URL_KEY),
            current_address: values.trimmed("currentAddress"),
            permanent_address: values.trimmed("permanentAddress"),
            position: values.trimmed("position"),
            department: values.trimmed("department"),
            joining_date,
            status,
        })
    }

    fn attachment_path(&self) -> Option<&str> {
        self.data
            .profile_photo_url
            .as_deref()
            .filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = r#"{
        "id": "e-1",
        "employeeId": "EMP001",
        "employeeName": "Alice Smith",
        "email": "alice@example.com",
        "password": "secret123",
        "phoneNumber": "555-0100",
        "bloodGroup": null,
        "profilePhotoUrl": "/api/employees/download/alice.png",
        "currentAddress": "1 Main St",
        "permanentAddress": "1 Main St",
        "position": "Engineer",
        "department": "IT",
        "joiningDate": [2024, 1, 15],
        "status": "Joining"
    }"#;

    #[test]
    fn test_decode_backend_record() {
        let e: Employee = serde_json::from_str(RAW).unwrap();
        assert_eq!(e.id, "e-1");
        assert_eq!(e.data.joining_date.to_iso_string(), "2024-01-15");
        assert_eq!(e.data.status, EmployeeStatus::Joining);
        assert_eq!(e.data.blood_group, "");
        assert_eq!(e.attachment_path(), Some("/api/employees/download/alice.png"));
    }

    #[test]
    fn test_numeric_id_is_accepted() {
        let raw = RAW.replace("\"id\": \"e-1\"", "\"id\": 7");
        let e: Employee = serde_json::from_str(&raw).unwrap();
        assert_eq!(e.id, "7");
    }

    #[test]
    fn test_missing_required_field_fails_decode() {
        let raw = RAW.replace("\"employeeName\": \"Alice Smith\",", "");
        assert!(serde_json::from_str::<Employee>(&raw).is_err());
    }

    #[test]
    fn test_form_round_trip_keeps_every_field() {
        let e: Employee = serde_json::from_str(RAW).unwrap();
        let draft = Employee::draft_from_form(&e.to_form()).unwrap();
        assert_eq!(draft, e.data);
    }

    #[test]
    fn test_draft_serializes_date_as_tuple() {
        let e: Employee = serde_json::from_str(RAW).unwrap();
        let json = serde_json::to_value(&e.data).unwrap();
        assert_eq!(json["joiningDate"], serde_json::json!([2024, 1, 15]));
        assert_eq!(json["employeeName"], "Alice Smith");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_bad_date_is_a_validation_error() {
        let e: Employee = serde_json::from_str(RAW).unwrap();
        let mut values = e.to_form();
        values.set("joiningDate", "2024-02-30");
        let err = Employee::draft_from_form(&values).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { field: "Joining Date", .. }));
    }
}
