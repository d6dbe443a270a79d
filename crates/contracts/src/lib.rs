//! Общие типы клиента: сущности, формы, даты, авторизация

pub mod domain;
pub mod shared;
pub mod system;
