use crate::routes::routes::AppRoutes;
use crate::shared::notify::{NoticeHost, NoticeService};
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Уведомления доступны всем экранам через контекст
    provide_context(NoticeService::new());

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
        <NoticeHost />
    }
}
