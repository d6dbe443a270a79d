use contracts::system::auth::{landing_route, EmployeeLoginResponse, LoginResponse, Role};

/// Сессия пользователя: задаётся при входе, очищается при выходе
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub roles: Vec<Role>,
    pub user_email: Option<String>,
    pub employee_id: Option<String>,
    pub employee_profile: Option<serde_json::Value>,
}

impl Session {
    pub fn from_login(email: &str, response: LoginResponse) -> Self {
        Self {
            token: Some(response.token).filter(|t| !t.is_empty()),
            roles: Role::parse_all(&response.roles),
            user_email: Some(email.to_string()),
            employee_id: None,
            employee_profile: None,
        }
    }

    /// Employee login has no token; the role is always `EMPLOYEE`
    pub fn from_employee_login(email: &str, response: EmployeeLoginResponse) -> Self {
        let profile = serde_json::to_value(&response).ok();
        Self {
            token: None,
            roles: vec![Role::Employee],
            user_email: Some(email.to_string()),
            employee_id: Some(response.employee_id),
            employee_profile: profile,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() || self.employee_id.is_some()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn landing_route(&self) -> &'static str {
        landing_route(&self.roles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_login_keeps_known_roles() {
        let session = Session::from_login(
            "hr@corp.test",
            LoginResponse {
                token: "jwt".into(),
                roles: vec!["HR".into(), "AUDITOR".into()],
                message: None,
            },
        );
        assert!(session.is_authenticated());
        assert_eq!(session.roles, vec![Role::Hr]);
        assert_eq!(session.landing_route(), "/hr");
        assert_eq!(session.user_email.as_deref(), Some("hr@corp.test"));
    }

    #[test]
    fn test_empty_token_is_not_a_session() {
        let session = Session::from_login(
            "a@b.co",
            LoginResponse {
                token: String::new(),
                roles: vec!["ADMIN".into()],
                message: None,
            },
        );
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_employee_login_lands_on_employee_page() {
        let response: EmployeeLoginResponse =
            serde_json::from_str(r#"{"employeeId": "EMP1", "roles": ["ADMIN"]}"#).unwrap();
        let session = Session::from_employee_login("e@corp.test", response);
        assert!(session.is_authenticated());
        assert_eq!(session.roles, vec![Role::Employee]);
        assert_eq!(session.landing_route(), "/employee");
        assert_eq!(
            session.employee_profile.as_ref().and_then(|p| p.get("employeeId")).and_then(|v| v.as_str()),
            Some("EMP1")
        );
    }

    #[test]
    fn test_default_session_is_anonymous() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert_eq!(session.landing_route(), "/dashboard");
    }
}
