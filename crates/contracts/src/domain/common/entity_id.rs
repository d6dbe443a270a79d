use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Трейт для типов идентификаторов сущностей.
///
/// Идентификатор назначает бэкенд; клиент его не генерирует.
pub trait EntityId:
    Clone + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug + Send + Sync + 'static
{
    /// Преобразовать ID в строку (для URL и ключей списков)
    fn as_string(&self) -> String;

    /// Создать ID из строки
    fn from_string(s: &str) -> Result<Self, String>;
}

// Реализация для базовых типов

impl EntityId for i64 {
    fn as_string(&self) -> String {
        ToString::to_string(self)
    }

    fn from_string(s: &str) -> Result<Self, String> {
        s.parse::<i64>().map_err(|e| format!("Invalid i64: {}", e))
    }
}

impl EntityId for String {
    fn as_string(&self) -> String {
        self.clone()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        if s.trim().is_empty() {
            Err("Empty id".to_string())
        } else {
            Ok(s.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_string() {
        assert_eq!(i64::from_string(&42i64.as_string()), Ok(42));
        assert!(i64::from_string("4x2").is_err());
        assert_eq!(String::from_string("emp-7"), Ok("emp-7".to_string()));
        assert!(String::from_string("  ").is_err());
    }
}
