//! Ошибки загрузки и изменения списков
//!
//! Каждая ошибка умеет превращаться в текст для пользователя (`user_message`);
//! в `Display` остаются технические детали для лога.

use contracts::shared::validation::ValidationError;

use super::transport::ApiResponse;

const TRY_AGAIN: &str = "Unexpected response from server. Please try again.";
const NETWORK: &str = "Network error. Please check your connection and try again.";

/// Запрос не дошёл до сервера или не был собран
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("failed to build request: {0}")]
    Build(String),
}

impl TransportError {
    pub fn user_message(&self) -> String {
        NETWORK.to_string()
    }
}

/// Ответ не того формата, который ожидался
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnexpectedResponseError {
    #[error("expected JSON, got content type '{content_type}'")]
    NotJson { content_type: String },

    #[error("malformed response body: {0}")]
    Malformed(String),
}

impl UnexpectedResponseError {
    pub fn user_message(&self) -> String {
        TRY_AGAIN.to_string()
    }
}

/// Запись коллекции, не прошедшая проверку схемы
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("record #{index}: {message}")]
pub struct DecodeError {
    pub index: usize,
    pub message: String,
}

/// Ошибка чтения коллекции
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error(transparent)]
    Unexpected(#[from] UnexpectedResponseError),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(e) => e.user_message(),
            Self::Status { status, message } if message.is_empty() => {
                format!("Failed to load data (status {}).", status)
            }
            Self::Status { message, .. } => message.clone(),
            Self::Unexpected(e) => e.user_message(),
        }
    }
}

/// Ошибка create/update/delete; список при этом не меняется
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MutationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("record not found")]
    NotFound,

    #[error("rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error(transparent)]
    Unexpected(#[from] UnexpectedResponseError),

    #[error("{0} is not supported for this list")]
    Unsupported(&'static str),
}

impl MutationError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.user_message(),
            Self::Transport(e) => e.user_message(),
            Self::NotFound => "The record no longer exists. Refresh the list and try again.".to_string(),
            Self::Rejected { status, message } if message.is_empty() => {
                format!("The server rejected the request (status {}).", status)
            }
            Self::Rejected { message, .. } => message.clone(),
            Self::Unexpected(e) => e.user_message(),
            Self::Unsupported(action) => format!("{} is not available here.", capitalize(action)),
        }
    }

    /// Ошибка валидации: запрос не отправлялся
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Текст ошибки из тела ответа: поле `message` JSON-объекта или короткий текст
pub fn message_from_body(response: &ApiResponse) -> String {
    if response.is_json() {
        if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&response.body) {
            if let Some(msg) = value.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
            if let Some(msg) = value.get("error").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
        }
        return String::new();
    }
    let text = response.text();
    let text = text.trim();
    // HTML-страницы ошибок показывать не стоит
    if text.is_empty() || text.starts_with('<') || text.chars().count() > 200 {
        String::new()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, content_type: Option<&str>, body: &str) -> ApiResponse {
        ApiResponse {
            status,
            content_type: content_type.map(str::to_string),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_message_from_json_body() {
        let r = response(400, Some("application/json"), r#"{"message": "Email already used"}"#);
        assert_eq!(message_from_body(&r), "Email already used");
    }

    #[test]
    fn test_message_from_plain_and_html_bodies() {
        assert_eq!(message_from_body(&response(500, Some("text/plain"), "boom")), "boom");
        assert_eq!(
            message_from_body(&response(502, Some("text/html"), "<html>Bad gateway</html>")),
            ""
        );
    }

    #[test]
    fn test_user_messages() {
        let e = MutationError::Rejected { status: 500, message: String::new() };
        assert_eq!(e.user_message(), "The server rejected the request (status 500).");
        let e = MutationError::Unsupported("update");
        assert_eq!(e.user_message(), "Update is not available here.");
        let e = FetchError::Status { status: 503, message: String::new() };
        assert_eq!(e.user_message(), "Failed to load data (status 503).");
        assert_eq!(
            FetchError::from(UnexpectedResponseError::Malformed("x".into())).user_message(),
            TRY_AGAIN
        );
    }
}
