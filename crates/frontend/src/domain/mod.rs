pub mod a001_employee;
pub mod a002_hr_document;
pub mod a003_bank_document;
pub mod a004_salary_expense;
