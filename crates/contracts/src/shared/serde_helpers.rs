//! Lenient field readers for backend JSON

use serde::{Deserialize, Deserializer};

/// `null` is read as the type's default (backend sends `null` for blank text columns)
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Identifier that may arrive either as a JSON string or a number
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        UInt(u64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Text(s) => Ok(s),
        Raw::Int(n) => Ok(n.to_string()),
        Raw::UInt(n) => Ok(n.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "string_or_number")]
        id: String,
        #[serde(default, deserialize_with = "null_as_default")]
        note: String,
    }

    #[test]
    fn test_lenient_fields() {
        let row: Row = serde_json::from_str(r#"{"id": 17, "note": null}"#).unwrap();
        assert_eq!(row.id, "17");
        assert_eq!(row.note, "");

        let row: Row = serde_json::from_str(r#"{"id": "E-1"}"#).unwrap();
        assert_eq!(row.id, "E-1");
        assert_eq!(row.note, "");
    }
}
