use contracts::system::auth::Role;
use leptos::prelude::*;

use super::session::Session;
use super::storage;
use crate::shared::entity_editor::GlooTransport;

/// Сессия в контексте приложения; меняется только входом и выходом
#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    session: RwSignal<Session>,
}

impl AuthContext {
    pub fn session(&self) -> Session {
        self.session.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(Session::is_authenticated)
    }

    pub fn roles(&self) -> Vec<Role> {
        self.session.with(|s| s.roles.clone())
    }

    pub fn user_email(&self) -> Option<String> {
        self.session.with(|s| s.user_email.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.session.with_untracked(|s| s.token.clone())
    }

    /// Start a session after a successful login
    pub fn sign_in(&self, session: Session) {
        storage::save_session(&session);
        self.session.set(session);
    }

    pub fn logout(&self) {
        log::info!("logout");
        storage::clear_session();
        self.session.set(Session::default());
    }
}

/// Auth context provider component; restores the session saved in sessionStorage
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let restored = storage::load_session();
    if restored.is_authenticated() {
        log::debug!("session restored for {:?}", restored.user_email);
    }
    provide_context(AuthContext {
        session: RwSignal::new(restored),
    });

    children()
}

/// Hook to access auth state
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthProvider not found in component tree")
}

/// Транспорт к бэкенду с токеном текущей сессии
pub fn api_transport() -> GlooTransport {
    let token = use_context::<AuthContext>().and_then(|auth| auth.token());
    GlooTransport::from_config().with_bearer(token)
}
