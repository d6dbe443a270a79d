use crate::domain::common::ListEntity;
use crate::shared::date_tuple::DateTuple;
use crate::shared::form_schema::{FieldDescriptor, FieldKind, FormModel, FormValues};
use crate::shared::validation::ValidationError;
use serde::{Deserialize, Serialize};

/// Запись о выплате зарплаты (постоянные расходы)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryExpense {
    pub id: i64,

    #[serde(flatten)]
    pub data: SalaryExpenseDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryExpenseDto {
    pub employee_name: String,
    pub date: DateTuple,
    pub amount: f64,
    pub description: String,
}

impl SalaryExpense {
    /// Тело PUT: бэкенд ждёт id и в пути, и в теле
    pub fn with_draft(id: i64, data: SalaryExpenseDto) -> Self {
        Self { id, data }
    }

    pub fn amount_label(&self) -> String {
        format_amount(self.data.amount)
    }
}

pub fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Сумма по записям
pub fn total_amount<'a>(items: impl IntoIterator<Item = &'a SalaryExpense>) -> f64 {
    items.into_iter().map(|e| e.data.amount).sum()
}

impl ListEntity for SalaryExpense {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn display_name(&self) -> String {
        self.data.employee_name.clone()
    }

    fn collection_name() -> &'static str {
        "salaries"
    }

    fn element_name() -> &'static str {
        "Salary Entry"
    }

    fn list_name() -> &'static str {
        "Salaries"
    }
}

pub const SALARY_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::text("employeeName", "Employee Name").required(),
    FieldDescriptor::text("date", "Date").of_kind(FieldKind::Date).required(),
    FieldDescriptor::text("amount", "Amount").of_kind(FieldKind::Number).required(),
    FieldDescriptor::text("description", "Description").required(),
];

impl FormModel for SalaryExpense {
    type Draft = SalaryExpenseDto;

    fn schema() -> &'static [FieldDescriptor] {
        SALARY_FIELDS
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("employeeName", &self.data.employee_name)
            .with("date", self.data.date.to_iso_string())
            .with("amount", self.data.amount.to_string())
            .with("description", &self.data.description)
    }

    fn draft_from_form(values: &FormValues) -> Result<Self::Draft, ValidationError> {
        let date = DateTuple::parse_iso(values.get("date")).map_err(|e| ValidationError::InvalidField {
            field: "Date",
            message: e.to_string(),
        })?;
        let amount = values
            .trimmed("amount")
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite())
            .ok_or_else(|| ValidationError::InvalidField {
                field: "Amount",
                message: "must be a number".to_string(),
            })?;
        Ok(SalaryExpenseDto {
            employee_name: values.trimmed("employeeName"),
            date,
            amount,
            description: values.trimmed("description"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SalaryExpense {
        serde_json::from_str(
            r#"{"id": 4, "employeeName": "Bob", "date": [2024, 3, 1],
                "amount": 1500.5, "description": "March"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_update_body_carries_id_and_tuple_date() {
        let e = sample();
        let draft = SalaryExpense::draft_from_form(&e.to_form()).unwrap();
        let body = serde_json::to_value(SalaryExpense::with_draft(e.id, draft)).unwrap();
        assert_eq!(body["id"], 4);
        assert_eq!(body["date"], serde_json::json!([2024, 3, 1]));
        assert_eq!(body["amount"], 1500.5);
    }

    #[test]
    fn test_amount_must_be_numeric() {
        let values = sample().to_form().with("amount", "12abc");
        assert!(matches!(
            SalaryExpense::draft_from_form(&values),
            Err(ValidationError::InvalidField { field: "Amount", .. })
        ));
        let values = sample().to_form().with("amount", "NaN");
        assert!(SalaryExpense::draft_from_form(&values).is_err());
    }

    #[test]
    fn test_total_and_label() {
        let mut second = sample();
        second.id = 5;
        second.data.amount = 499.5;
        let items = vec![sample(), second];
        assert_eq!(total_amount(&items), 2000.0);
        assert_eq!(items[0].amount_label(), "$1500.50");
    }
}
