//! Универсальный редактор списка сущностей
//!
//! Загрузка коллекции, фильтрация, модальное окно формы и мутации с
//! последующей сверкой списка. Экран ресурса задаёт только [`Resource`].

pub mod editor;
pub mod error;
pub mod gateway;
pub mod loader;
pub mod modal;
pub mod resource;
pub mod store;
pub mod transport;
pub mod view;

pub use editor::{EditorState, EntityListEditor};
pub use error::{FetchError, MutationError, TransportError, UnexpectedResponseError};
pub use gateway::{AlreadyConfirmed, BrowserConfirm, ConfirmGate, MutationGateway};
pub use modal::{FormModal, ModalMode};
pub use resource::Resource;
pub use store::{EntityStore, Reconciliation};
pub use transport::{ApiRequest, ApiResponse, Attachment, GlooTransport, HttpTransport};

#[cfg(test)]
pub(crate) mod testing {
    use super::resource::{DraftOf, IdOf};
    use super::store::testing::Person;
    use super::transport::Method;
    use super::*;

    pub struct PeopleResource;

    impl Resource for PeopleResource {
        type Entity = Person;
        const ENDPOINT: &'static str = "/api/people";

        fn create_request(
            draft: &DraftOf<Self>,
            _attachment: Option<&Attachment>,
        ) -> Result<ApiRequest, MutationError> {
            Ok(ApiRequest::json(Method::Post, Self::ENDPOINT, draft)?)
        }

        fn update_request(
            id: &IdOf<Self>,
            draft: &DraftOf<Self>,
            _attachment: Option<&Attachment>,
        ) -> Result<ApiRequest, MutationError> {
            Ok(ApiRequest::json(Method::Put, Self::item_path(id), draft)?)
        }
    }

    /// Resource whose create may answer without an entity
    pub struct ReloadingPeople;

    impl Resource for ReloadingPeople {
        type Entity = Person;
        const ENDPOINT: &'static str = "/api/people";
        const CREATE_MAY_OMIT_ENTITY: bool = true;

        fn create_request(
            draft: &DraftOf<Self>,
            attachment: Option<&Attachment>,
        ) -> Result<ApiRequest, MutationError> {
            PeopleResource::create_request(draft, attachment)
        }
    }
}
