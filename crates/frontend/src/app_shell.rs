//! Основной layout приложения
//!
//! Левая навигация по разделам роли, шапка с пользователем и выходом,
//! центральная область с активным разделом.

use crate::routes::routes::{pages_for, render_page, Page};
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use leptos::prelude::*;

#[component]
pub fn MainLayout() -> impl IntoView {
    let auth = use_auth();
    let pages = Memo::new(move |_| pages_for(&auth.roles()));
    let active = RwSignal::new(pages.get_untracked().first().copied());

    // раздел, недоступный после смены сессии, сбрасывается на первый доступный
    Effect::new(move |_| {
        let available = pages.get();
        if !active.get_untracked().is_some_and(|p| available.contains(&p)) {
            active.set(available.first().copied());
        }
    });

    view! {
        <div class="app-shell">
            <aside class="app-shell__sidebar">
                <div class="app-shell__brand">{"HR & Finance"}</div>
                <nav class="navbar">
                    <For
                        each=move || pages.get()
                        key=|page| *page
                        children=move |page: Page| {
                            view! {
                                <button
                                    class=move || {
                                        if active.get() == Some(page) {
                                            "navbar__item navbar__item--active"
                                        } else {
                                            "navbar__item"
                                        }
                                    }
                                    on:click=move |_| active.set(Some(page))
                                >
                                    {icon(page.icon())}
                                    <span>{page.title()}</span>
                                </button>
                            }
                        }
                    />
                </nav>
            </aside>
            <div class="app-shell__main">
                <header class="top-header">
                    <span class="top-header__section">
                        {move || auth.session().landing_route()}
                    </span>
                    <div class="top-header__user">
                        {icon("user")}
                        <span>{move || auth.user_email().unwrap_or_default()}</span>
                        <button class="button button--secondary" on:click=move |_| auth.logout()>
                            {icon("logout")}
                            {"Logout"}
                        </button>
                    </div>
                </header>
                <main class="app-shell__content">
                    {move || match active.get() {
                        Some(page) => render_page(page),
                        None => view! {
                            <div class="empty-state">
                                {"No sections are available for your role."}
                            </div>
                        }
                        .into_any(),
                    }}
                </main>
            </div>
        </div>
    }
}
