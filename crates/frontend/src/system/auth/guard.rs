use contracts::system::auth::Role;
use leptos::prelude::*;

use super::context::use_auth;

/// Renders children only for sessions holding one of `roles`; `ADMIN` passes everywhere
#[component]
pub fn RequireRole(roles: &'static [Role], children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let allowed = move || {
        let granted = auth.roles();
        granted.contains(&Role::Admin) || roles.iter().any(|r| granted.contains(r))
    };

    view! {
        <Show
            when=allowed
            fallback=|| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__text">"Access denied. Your role cannot open this page."</span>
                </div>
            }
        >
            {children()}
        </Show>
    }
}
