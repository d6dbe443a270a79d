use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::entity_editor::GlooTransport;
use crate::shared::notify::{use_notices, Notice};
use crate::system::auth::{api, context::use_auth};

#[component]
pub fn LoginPage(
    /// Переход на форму регистрации
    on_register: Callback<()>,
) -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let as_employee = RwSignal::new(false);
    let error_message = RwSignal::new(Option::<String>::None);
    let is_loading = RwSignal::new(false);

    let auth = use_auth();
    let notices = use_notices();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }

        let email_val = email.get_untracked();
        let password_val = password.get_untracked();
        let employee = as_employee.get_untracked();

        is_loading.set(true);
        error_message.set(None);

        spawn_local(async move {
            let transport = GlooTransport::from_config();
            match api::login(&transport, &email_val, &password_val, employee).await {
                Ok(session) => {
                    let text = if employee {
                        "Employee login successful!"
                    } else {
                        "Login successful!"
                    };
                    notices.push(Notice::success(text));
                    // смена сессии переключит на основной layout
                    auth.sign_in(session);
                }
                Err(e) => {
                    log::warn!("login failed: {}", e);
                    // неудачный вход сбрасывает сохранённую сессию
                    if !matches!(e, api::AuthError::Validation(_)) {
                        auth.logout();
                    }
                    error_message.set(Some(e.user_message()));
                }
            }
            is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"HR & Finance Console"</h1>
                <h2>{move || if as_employee.get() { "Employee sign in" } else { "Sign in" }}</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit novalidate>
                    <div class="form-group">
                        <label for="email">"Email"</label>
                        <input
                            type="email"
                            id="email"
                            placeholder="name@company.com"
                            prop:value=move || email.get()
                            on:input=move |ev| {
                                email.set(event_target_value(&ev));
                                error_message.set(None);
                            }
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            prop:value=move || password.get()
                            on:input=move |ev| {
                                password.set(event_target_value(&ev));
                                error_message.set(None);
                            }
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <label class="form-group form-group--inline">
                        <input
                            type="checkbox"
                            prop:checked=move || as_employee.get()
                            on:change=move |ev| as_employee.set(event_target_checked(&ev))
                            disabled=move || is_loading.get()
                        />
                        "Login as employee"
                    </label>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>

                <div class="login-info">
                    <span>"No account yet? "</span>
                    <button class="button button--link" on:click=move |_| on_register.run(())>
                        "Create one"
                    </button>
                </div>
            </div>
        </div>
    }
}
