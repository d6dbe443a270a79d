use leptos::prelude::*;

use crate::system::auth::context::use_auth;

/// Поля профиля из ответа входа сотрудника: только скалярные значения
fn profile_rows(profile: &serde_json::Value) -> Vec<(String, String)> {
    let Some(object) = profile
        .get("employeeProfile")
        .filter(|p| p.is_object())
        .or(Some(profile))
        .and_then(|p| p.as_object())
    else {
        return Vec::new();
    };
    object
        .iter()
        .filter_map(|(key, value)| {
            let text = match value {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            (key != "password" && !text.is_empty()).then(|| (key.clone(), text))
        })
        .collect()
}

/// Страница сотрудника: данные, полученные при входе
#[component]
pub fn EmployeeProfile() -> impl IntoView {
    let auth = use_auth();
    let session = auth.session();
    let rows = session
        .employee_profile
        .as_ref()
        .map(profile_rows)
        .unwrap_or_default();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"My Profile"}</h1>
                    <span class="header__subtitle">
                        {session.employee_id.clone().unwrap_or_default()}
                    </span>
                </div>
            </div>
            <dl class="profile-list">
                {rows
                    .into_iter()
                    .map(|(key, value)| view! {
                        <dt>{key}</dt>
                        <dd>{value}</dd>
                    })
                    .collect_view()}
            </dl>
        </div>
    }
}
