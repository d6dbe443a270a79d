use contracts::shared::validation::{PasswordRule, ValidationError};
use contracts::system::auth::{RegisterRequest, Role};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::entity_editor::GlooTransport;
use crate::shared::notify::{use_notices, Notice};
use crate::system::auth::api;

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Admin => "Admin",
        Role::Hr => "HR",
        Role::Finance => "Finance Manager",
        Role::Store => "Store",
        Role::DataManager => "Data Manager",
        Role::Employee => "Employee",
    }
}

#[component]
pub fn RegisterPage(
    /// Возврат к форме входа
    on_back: Callback<()>,
) -> impl IntoView {
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let roles = RwSignal::new(Vec::<Role>::new());
    let error_message = RwSignal::new(Option::<String>::None);
    let is_loading = RwSignal::new(false);

    let notices = use_notices();

    let toggle_role = move |role: Role, checked: bool| {
        roles.update(|selected| {
            selected.retain(|r| *r != role);
            if checked {
                selected.push(role);
            }
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }

        let request = RegisterRequest {
            name: name.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            roles: roles
                .get_untracked()
                .iter()
                .map(|r| r.as_str().to_string())
                .collect(),
        };
        if let Err(e) = api::validate_registration(&request) {
            let text = match e {
                ValidationError::WeakPassword(_) => "Please fix password requirements".to_string(),
                other => other.user_message(),
            };
            error_message.set(Some(text));
            return;
        }

        is_loading.set(true);
        error_message.set(None);

        spawn_local(async move {
            let transport = GlooTransport::from_config();
            match api::register(&transport, &request).await {
                Ok(text) => {
                    notices.push(Notice::success(text));
                    on_back.run(());
                }
                Err(e) => {
                    log::warn!("registration failed: {}", e);
                    error_message.set(Some(e.user_message()));
                }
            }
            is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Create account"</h1>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit novalidate>
                    <div class="form-group">
                        <label for="name">"Full Name"</label>
                        <input
                            type="text"
                            id="name"
                            prop:value=move || name.get()
                            on:input=move |ev| name.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="email">"Email"</label>
                        <input
                            type="email"
                            id="email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                        <ul class="password-checklist">
                            {PasswordRule::ALL
                                .into_iter()
                                .map(|rule| {
                                    let met = move || password.with(|p| rule.is_satisfied_by(p));
                                    view! {
                                        <li class=move || {
                                            if met() {
                                                "password-checklist__item password-checklist__item--met"
                                            } else {
                                                "password-checklist__item"
                                            }
                                        }>
                                            {move || if met() { "✓ " } else { "• " }}
                                            {rule.description()}
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    </div>

                    <fieldset class="form-group">
                        <legend>"Roles"</legend>
                        {Role::REGISTRABLE
                            .into_iter()
                            .map(|role| view! {
                                <label class="form-group--inline">
                                    <input
                                        type="checkbox"
                                        value=role.as_str()
                                        prop:checked=move || roles.with(|r| r.contains(&role))
                                        on:change=move |ev| toggle_role(role, event_target_checked(&ev))
                                        disabled=move || is_loading.get()
                                    />
                                    {role_label(role)}
                                </label>
                            })
                            .collect_view()}
                    </fieldset>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Creating account..." } else { "Register" }}
                    </button>
                </form>

                <div class="login-info">
                    <span>"Already registered? "</span>
                    <button class="button button--link" on:click=move |_| on_back.run(())>
                        "Sign in"
                    </button>
                </div>
            </div>
        </div>
    }
}
