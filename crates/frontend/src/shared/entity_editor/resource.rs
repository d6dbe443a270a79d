use contracts::domain::common::{EntityId, ListEntity};
use contracts::shared::form_schema::FormModel;

use super::error::MutationError;
use super::transport::{ApiRequest, Attachment};
use crate::shared::api_utils::path_segment;

/// Черновик сущности ресурса
pub type DraftOf<R> = <<R as Resource>::Entity as FormModel>::Draft;
/// Идентификатор сущности ресурса
pub type IdOf<R> = <<R as Resource>::Entity as ListEntity>::Id;

/// Описание REST-ресурса для универсального редактора списка.
///
/// Конкретный экран задаёт только эндпоинты и формат тел запросов;
/// загрузка, сверка списка и модальное окно общие.
pub trait Resource: 'static {
    type Entity: ListEntity + FormModel;

    /// Коллекция: `GET` список, `POST` создание, `/{id}` для PUT/DELETE
    const ENDPOINT: &'static str;

    /// Бэкенд может ответить на создание без тела сущности; тогда список перечитывается
    const CREATE_MAY_OMIT_ENTITY: bool = false;

    const CAN_EDIT: bool = true;

    fn list_request() -> ApiRequest {
        ApiRequest::get(Self::ENDPOINT)
    }

    /// Разбор одной записи коллекции
    fn decode(raw: serde_json::Value) -> Result<Self::Entity, serde_json::Error> {
        serde_json::from_value(raw)
    }

    fn item_path(id: &IdOf<Self>) -> String {
        format!("{}/{}", Self::ENDPOINT, path_segment(&id.as_string()))
    }

    fn create_request(
        draft: &DraftOf<Self>,
        attachment: Option<&Attachment>,
    ) -> Result<ApiRequest, MutationError>;

    fn update_request(
        _id: &IdOf<Self>,
        _draft: &DraftOf<Self>,
        _attachment: Option<&Attachment>,
    ) -> Result<ApiRequest, MutationError> {
        Err(MutationError::Unsupported("update"))
    }

    fn delete_request(id: &IdOf<Self>) -> ApiRequest {
        ApiRequest::delete(Self::item_path(id))
    }
}
