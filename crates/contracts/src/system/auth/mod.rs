use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Ответ `/api/auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub roles: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Ответ `/api/employees/login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeLoginResponse {
    pub employee_id: String,
    #[serde(default)]
    pub employee_profile: Option<serde_json::Value>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub roles: Vec<String>,
}

/// Тело ошибки или подтверждения: `{ "message": "..." }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================================================
// Roles
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Admin,
    Store,
    Finance,
    Hr,
    DataManager,
    Employee,
}

impl Role {
    /// Роли, доступные при регистрации (сотрудник регистрируется через HR)
    pub const REGISTRABLE: [Role; 5] = [
        Self::Admin,
        Self::Hr,
        Self::Finance,
        Self::Store,
        Self::DataManager,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Store => "STORE",
            Self::Finance => "FINANCE",
            Self::Hr => "HR",
            Self::DataManager => "DATA_MANAGER",
            Self::Employee => "EMPLOYEE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "ADMIN" => Some(Self::Admin),
            "STORE" => Some(Self::Store),
            "FINANCE" => Some(Self::Finance),
            "HR" => Some(Self::Hr),
            "DATA_MANAGER" => Some(Self::DataManager),
            "EMPLOYEE" => Some(Self::Employee),
            _ => None,
        }
    }

    /// Unknown role names are ignored
    pub fn parse_all<S: AsRef<str>>(values: &[S]) -> Vec<Role> {
        values.iter().filter_map(|v| Self::parse(v.as_ref())).collect()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const EMPLOYEE_LANDING: &str = "/employee";
pub const DEFAULT_LANDING: &str = "/dashboard";

/// Стартовая страница по ролям; порядок проверки фиксирован
pub fn landing_route(roles: &[Role]) -> &'static str {
    const ORDER: [(Role, &str); 5] = [
        (Role::Admin, "/admin"),
        (Role::Store, "/store"),
        (Role::Finance, "/finance-manager/dashboard"),
        (Role::Hr, "/hr"),
        (Role::DataManager, "/data-manager"),
    ];
    ORDER
        .iter()
        .find(|(role, _)| roles.contains(role))
        .map(|(_, route)| *route)
        .unwrap_or_else(|| {
            if roles.contains(&Role::Employee) {
                EMPLOYEE_LANDING
            } else {
                DEFAULT_LANDING
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landing_route_priority() {
        assert_eq!(landing_route(&[Role::Hr, Role::Admin]), "/admin");
        assert_eq!(landing_route(&[Role::Hr, Role::Finance]), "/finance-manager/dashboard");
        assert_eq!(landing_route(&[Role::DataManager]), "/data-manager");
        assert_eq!(landing_route(&[Role::Employee]), "/employee");
        assert_eq!(landing_route(&[]), "/dashboard");
    }

    #[test]
    fn test_parse_roles_skips_unknown() {
        let roles = Role::parse_all(&["HR", "AUDITOR", "STORE"]);
        assert_eq!(roles, vec![Role::Hr, Role::Store]);
    }

    #[test]
    fn test_employee_login_response_minimal() {
        let r: EmployeeLoginResponse = serde_json::from_str(r#"{"employeeId": "EMP1"}"#).unwrap();
        assert_eq!(r.employee_id, "EMP1");
        assert!(r.roles.is_none());
    }

    #[test]
    fn test_login_response_requires_token() {
        assert!(serde_json::from_str::<LoginResponse>(r#"{"roles": ["HR"]}"#).is_err());
    }
}
