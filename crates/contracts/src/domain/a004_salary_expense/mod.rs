pub mod aggregate;

pub use aggregate::{SalaryExpense, SalaryExpenseDto};
