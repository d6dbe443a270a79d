use contracts::system::auth::Role;
use web_sys::window;

use super::session::Session;

const TOKEN_KEY: &str = "token";
const ROLES_KEY: &str = "roles";
const USER_EMAIL_KEY: &str = "userEmail";
const EMPLOYEE_ID_KEY: &str = "employeeId";
const EMPLOYEE_PROFILE_KEY: &str = "employeeProfile";

const ALL_KEYS: [&str; 5] = [
    TOKEN_KEY,
    ROLES_KEY,
    USER_EMAIL_KEY,
    EMPLOYEE_ID_KEY,
    EMPLOYEE_PROFILE_KEY,
];

fn get_session_storage() -> Option<web_sys::Storage> {
    window()?.session_storage().ok()?
}

fn get_item(storage: &web_sys::Storage, key: &str) -> Option<String> {
    storage.get_item(key).ok().flatten().filter(|v| !v.is_empty())
}

/// Save the session to sessionStorage; absent fields are removed
pub fn save_session(session: &Session) {
    let Some(storage) = get_session_storage() else {
        log::warn!("sessionStorage is not available, session will not survive reload");
        return;
    };
    let roles: Vec<&str> = session.roles.iter().map(Role::as_str).collect();
    let entries = [
        (TOKEN_KEY, session.token.clone()),
        (ROLES_KEY, serde_json::to_string(&roles).ok()),
        (USER_EMAIL_KEY, session.user_email.clone()),
        (EMPLOYEE_ID_KEY, session.employee_id.clone()),
        (
            EMPLOYEE_PROFILE_KEY,
            session
                .employee_profile
                .as_ref()
                .and_then(|p| serde_json::to_string(p).ok()),
        ),
    ];
    for (key, value) in entries {
        let _ = match value {
            Some(value) => storage.set_item(key, &value),
            None => storage.remove_item(key),
        };
    }
}

/// Restore the session saved by [`save_session`]
pub fn load_session() -> Session {
    let Some(storage) = get_session_storage() else {
        return Session::default();
    };
    let roles: Vec<String> = get_item(&storage, ROLES_KEY)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default();
    Session {
        token: get_item(&storage, TOKEN_KEY),
        roles: Role::parse_all(&roles),
        user_email: get_item(&storage, USER_EMAIL_KEY),
        employee_id: get_item(&storage, EMPLOYEE_ID_KEY),
        employee_profile: get_item(&storage, EMPLOYEE_PROFILE_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok()),
    }
}

/// Clear all session keys
pub fn clear_session() {
    if let Some(storage) = get_session_storage() {
        for key in ALL_KEYS {
            let _ = storage.remove_item(key);
        }
    }
}
