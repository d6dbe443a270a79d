//! Вход и регистрация

use contracts::system::auth::{
    ApiMessage, EmployeeLoginResponse, LoginRequest, LoginResponse, RegisterRequest,
};
use contracts::shared::validation::{
    check_email, check_login_form, check_password_strength, ValidationError,
};
use serde::de::DeserializeOwned;

use super::session::Session;
use crate::shared::entity_editor::transport::{ApiRequest, ApiResponse, HttpTransport, Method};
use crate::shared::entity_editor::TransportError;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const EMPLOYEE_LOGIN_PATH: &str = "/api/employees/login";
pub const REGISTER_PATH: &str = "/api/auth/register";

const REGISTERED: &str = "Account created successfully! Please log in.";
const REGISTER_FAILED: &str = "Registration failed. Please try again.";
const INVALID_LOGIN_RESPONSE: &str = "Invalid login response. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Backend answered with an error; `message` is ready to show
    #[error("rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Unexpected(&'static str),
}

impl AuthError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.user_message(),
            Self::Transport(_) => "Network error".to_string(),
            Self::Rejected { message, .. } => message.clone(),
            Self::Unexpected(message) => message.to_string(),
        }
    }
}

/// Текст для ответа не в JSON
fn login_status_message(status: u16) -> &'static str {
    match status {
        401 => "Invalid email or password.",
        404 => "Login service not found.",
        s if s >= 500 => "Server error. Try again later.",
        _ => "Login failed. Please check your credentials.",
    }
}

fn backend_message(response: &ApiResponse) -> Option<String> {
    response
        .json::<ApiMessage>()
        .ok()
        .and_then(|m| m.message)
        .filter(|m| !m.trim().is_empty())
}

fn parse<T: DeserializeOwned>(response: &ApiResponse, invalid: &'static str) -> Result<T, AuthError> {
    response.json::<T>().map_err(|e| {
        log::error!("{}", e);
        AuthError::Unexpected(invalid)
    })
}

/// Войти как пользователь или как сотрудник.
///
/// Валидация формы выполняется до запроса; на успех возвращается новая сессия.
pub async fn login<T: HttpTransport>(
    transport: &T,
    email: &str,
    password: &str,
    as_employee: bool,
) -> Result<Session, AuthError> {
    let email = email.trim();
    check_login_form(email, password)?;

    let request = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    let path = if as_employee { EMPLOYEE_LOGIN_PATH } else { LOGIN_PATH };
    let response = transport
        .send(ApiRequest::json(Method::Post, path, &request)?)
        .await?;

    if !response.is_json() {
        log::warn!("login: non-JSON response with status {}", response.status);
        return Err(AuthError::Rejected {
            status: response.status,
            message: login_status_message(response.status).to_string(),
        });
    }
    if !response.is_success() {
        return Err(AuthError::Rejected {
            status: response.status,
            message: backend_message(&response).unwrap_or_else(|| "Login failed.".to_string()),
        });
    }

    let session = if as_employee {
        let data: EmployeeLoginResponse = parse(&response, "Invalid employee login response.")?;
        Session::from_employee_login(email, data)
    } else {
        let data: LoginResponse = parse(&response, INVALID_LOGIN_RESPONSE)?;
        Session::from_login(email, data)
    };
    if !session.is_authenticated() {
        return Err(AuthError::Unexpected(INVALID_LOGIN_RESPONSE));
    }
    log::info!("login: {} -> {}", email, session.landing_route());
    Ok(session)
}

/// Client-side checks of the registration form
pub fn validate_registration(request: &RegisterRequest) -> Result<(), ValidationError> {
    if request.name.trim().is_empty() {
        return Err(ValidationError::MissingRequired(vec!["Full Name"]));
    }
    check_email(request.email.trim())?;
    check_password_strength(&request.password)?;
    if request.roles.is_empty() {
        return Err(ValidationError::NoRoleSelected);
    }
    Ok(())
}

/// Зарегистрировать учётную запись; на успех возвращает текст для пользователя
pub async fn register<T: HttpTransport>(
    transport: &T,
    request: &RegisterRequest,
) -> Result<String, AuthError> {
    validate_registration(request)?;

    let response = transport
        .send(ApiRequest::json(Method::Post, REGISTER_PATH, request)?)
        .await?;

    if !response.is_json() {
        log::warn!("register: non-JSON response with status {}", response.status);
        return Err(AuthError::Unexpected("Invalid response from server."));
    }
    if !response.is_success() {
        return Err(AuthError::Rejected {
            status: response.status,
            message: backend_message(&response).unwrap_or_else(|| REGISTER_FAILED.to_string()),
        });
    }
    log::info!("register: account created for {}", request.email);
    Ok(REGISTERED.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::entity_editor::transport::testing::ScriptedTransport;
    use contracts::system::auth::Role;
    use futures::executor::block_on;
    use serde_json::json;

    const PASSWORD: &str = "Str0ng!pass";

    fn registration(roles: &[&str]) -> RegisterRequest {
        RegisterRequest {
            name: "Dana".into(),
            email: "dana@corp.test".into(),
            password: PASSWORD.into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_login_builds_session() {
        let t = ScriptedTransport::new();
        t.reply_json(200, json!({"token": "jwt", "roles": ["FINANCE"]}));

        let session = block_on(login(&t, " fin@corp.test ", PASSWORD, false)).unwrap();

        assert_eq!(session.token.as_deref(), Some("jwt"));
        assert_eq!(session.landing_route(), "/finance-manager/dashboard");
        let sent = &t.sent()[0];
        assert_eq!(sent.path, LOGIN_PATH);
        assert_eq!(sent.json_body().unwrap()["email"], "fin@corp.test");
    }

    #[test]
    fn test_employee_login_uses_employee_endpoint() {
        let t = ScriptedTransport::new();
        t.reply_json(200, json!({"employeeId": "EMP3", "userEmail": "e@corp.test"}));

        let session = block_on(login(&t, "e@corp.test", PASSWORD, true)).unwrap();

        assert_eq!(t.sent()[0].path, EMPLOYEE_LOGIN_PATH);
        assert_eq!(session.roles, vec![Role::Employee]);
        assert_eq!(session.employee_id.as_deref(), Some("EMP3"));
    }

    #[test]
    fn test_invalid_form_sends_nothing() {
        let t = ScriptedTransport::new();

        let err = block_on(login(&t, "not-an-email", PASSWORD, false)).unwrap_err();
        assert_eq!(err, AuthError::Validation(ValidationError::InvalidEmail));

        let err = block_on(login(&t, "a@b.co", "short", false)).unwrap_err();
        assert_eq!(err, AuthError::Validation(ValidationError::PasswordTooShort));

        assert!(t.sent().is_empty());
    }

    #[test]
    fn test_non_json_login_status_messages() {
        for (status, expected) in [
            (401, "Invalid email or password."),
            (404, "Login service not found."),
            (502, "Server error. Try again later."),
            (400, "Login failed. Please check your credentials."),
        ] {
            let t = ScriptedTransport::new();
            t.reply_text(status, "text/html", "<html></html>");
            let err = block_on(login(&t, "a@b.co", PASSWORD, false)).unwrap_err();
            assert_eq!(err.user_message(), expected);
        }
    }

    #[test]
    fn test_backend_message_is_shown_on_failure() {
        let t = ScriptedTransport::new();
        t.reply_json(403, json!({"message": "Account locked"}));
        let err = block_on(login(&t, "a@b.co", PASSWORD, false)).unwrap_err();
        assert_eq!(err.user_message(), "Account locked");
    }

    #[test]
    fn test_login_response_without_token_is_invalid() {
        let t = ScriptedTransport::new();
        t.reply_json(200, json!({"message": "ok"}));
        let err = block_on(login(&t, "a@b.co", PASSWORD, false)).unwrap_err();
        assert_eq!(err.user_message(), INVALID_LOGIN_RESPONSE);
    }

    #[test]
    fn test_register_requires_a_role() {
        let t = ScriptedTransport::new();
        let err = block_on(register(&t, &registration(&[]))).unwrap_err();
        assert_eq!(err, AuthError::Validation(ValidationError::NoRoleSelected));
        assert!(t.sent().is_empty());
    }

    #[test]
    fn test_register_rejects_weak_password() {
        let mut request = registration(&["HR"]);
        request.password = "password".into();
        assert!(matches!(
            validate_registration(&request),
            Err(ValidationError::WeakPassword(_))
        ));
    }

    #[test]
    fn test_register_success_and_non_json() {
        let t = ScriptedTransport::new();
        t.reply_json(201, json!({"message": "User registered"}));
        t.reply_text(200, "text/plain", "ok");

        let ok = block_on(register(&t, &registration(&["HR", "STORE"]))).unwrap();
        assert_eq!(ok, REGISTERED);
        assert_eq!(t.sent()[0].json_body().unwrap()["roles"], json!(["HR", "STORE"]));

        let err = block_on(register(&t, &registration(&["HR"]))).unwrap_err();
        assert_eq!(err.user_message(), "Invalid response from server.");
    }

    #[test]
    fn test_register_failure_falls_back_to_generic_message() {
        let t = ScriptedTransport::new();
        t.reply_json(409, json!({}));
        let err = block_on(register(&t, &registration(&["ADMIN"]))).unwrap_err();
        assert_eq!(err.user_message(), REGISTER_FAILED);
    }
}
