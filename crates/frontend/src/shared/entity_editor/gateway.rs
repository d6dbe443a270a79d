use contracts::domain::common::{EntityId, ListEntity};
use contracts::shared::form_schema::{check_required, FormModel, FormValues};
use std::marker::PhantomData;

use super::error::{message_from_body, MutationError, UnexpectedResponseError};
use super::modal::{SubmitTarget, Submission};
use super::resource::{IdOf, Resource};
use super::store::Reconciliation;
use super::transport::{ApiRequest, ApiResponse, Attachment, HttpTransport};

// ============================================================================
// Confirmation
// ============================================================================

/// Синхронное подтверждение перед удалением
pub trait ConfirmGate {
    fn confirm(&self, message: &str) -> bool;
}

impl<F: Fn(&str) -> bool> ConfirmGate for F {
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// `window.confirm`
pub struct BrowserConfirm;

impl ConfirmGate for BrowserConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

/// Пользователь уже подтвердил удаление в собственном диалоге экрана
pub struct AlreadyConfirmed;

impl ConfirmGate for AlreadyConfirmed {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

// ============================================================================
// Gateway
// ============================================================================

/// Create/update/delete against the resource endpoint.
///
/// Returns a [`Reconciliation`] to apply once the request has resolved;
/// the gateway itself never touches the list.
pub struct MutationGateway<R, T> {
    transport: T,
    _resource: PhantomData<fn() -> R>,
}

impl<R, T: Clone> Clone for MutationGateway<R, T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource, T: HttpTransport> MutationGateway<R, T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            _resource: PhantomData,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn create(
        &self,
        values: &FormValues,
        attachment: Option<&Attachment>,
    ) -> Result<Reconciliation<R::Entity>, MutationError> {
        let draft = validate::<R>(values, attachment)?;
        let request = R::create_request(&draft, attachment)?;
        let response = self.send(request, "create").await?;

        match entity_from(&response, R::decode) {
            Ok(entity) => {
                log::debug!(
                    "{}: created {}",
                    R::Entity::list_name(),
                    entity.id().as_string()
                );
                Ok(Reconciliation::Append(entity))
            }
            Err(_) if R::CREATE_MAY_OMIT_ENTITY => {
                log::debug!("{}: created, reloading list", R::Entity::list_name());
                Ok(Reconciliation::Reload)
            }
            Err(e) => {
                log::error!("{}: create returned {}", R::Entity::list_name(), e);
                Err(e.into())
            }
        }
    }

    pub async fn update(
        &self,
        id: &IdOf<R>,
        values: &FormValues,
        attachment: Option<&Attachment>,
    ) -> Result<Reconciliation<R::Entity>, MutationError> {
        let draft = validate::<R>(values, attachment)?;
        let request = R::update_request(id, &draft, attachment)?;
        let response = self.send(request, "update").await?;

        let entity = entity_from(&response, R::decode).map_err(|e| {
            log::error!("{}: update returned {}", R::Entity::list_name(), e);
            MutationError::from(e)
        })?;
        log::debug!("{}: updated {}", R::Entity::list_name(), id.as_string());
        Ok(Reconciliation::Replace(entity))
    }

    /// Delete after confirmation; `Ok(None)` means the user declined and nothing was sent
    pub async fn delete(
        &self,
        entity: &R::Entity,
        gate: &impl ConfirmGate,
    ) -> Result<Option<Reconciliation<R::Entity>>, MutationError> {
        let prompt = format!(
            "Are you sure you want to delete this {} record?",
            R::Entity::element_name().to_lowercase()
        );
        if !gate.confirm(&prompt) {
            return Ok(None);
        }
        let id = entity.id();
        self.send(R::delete_request(&id), "delete").await?;
        log::debug!("{}: deleted {}", R::Entity::list_name(), id.as_string());
        Ok(Some(Reconciliation::Remove(id)))
    }

    /// Dispatch a modal submission to create or update
    pub async fn submit(
        &self,
        submission: Submission<R::Entity>,
    ) -> Result<Reconciliation<R::Entity>, MutationError> {
        let attachment = submission.attachment.as_ref();
        match &submission.target {
            SubmitTarget::Create => self.create(&submission.values, attachment).await,
            SubmitTarget::Update(id) => self.update(id, &submission.values, attachment).await,
        }
    }

    async fn send(&self, request: ApiRequest, action: &str) -> Result<ApiResponse, MutationError> {
        let list_name = R::Entity::list_name();
        let response = self.transport.send(request).await.map_err(|e| {
            log::error!("{}: {} failed: {}", list_name, action, e);
            MutationError::from(e)
        })?;
        if response.is_success() {
            return Ok(response);
        }
        let error = if response.status == 404 {
            MutationError::NotFound
        } else {
            MutationError::Rejected {
                status: response.status,
                message: message_from_body(&response),
            }
        };
        log::error!("{}: {} failed: {}", list_name, action, error);
        Err(error)
    }
}

fn validate<R: Resource>(
    values: &FormValues,
    attachment: Option<&Attachment>,
) -> Result<<R::Entity as FormModel>::Draft, MutationError> {
    check_required::<R::Entity>(values, attachment.is_some())?;
    Ok(R::Entity::draft_from_form(values)?)
}

fn entity_from<E>(
    response: &ApiResponse,
    decode: fn(serde_json::Value) -> Result<E, serde_json::Error>,
) -> Result<E, UnexpectedResponseError> {
    if !response.has_body() {
        return Err(UnexpectedResponseError::Malformed("empty body".into()));
    }
    let value: serde_json::Value = response.json()?;
    decode(value).map_err(|e| UnexpectedResponseError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::entity_editor::store::testing::{person, Person};
    use crate::shared::entity_editor::testing::{PeopleResource, ReloadingPeople};
    use crate::shared::entity_editor::transport::testing::ScriptedTransport;
    use crate::shared::entity_editor::transport::Method;
    use contracts::shared::validation::ValidationError;
    use futures::executor::block_on;
    use serde_json::json;

    fn gateway(t: &ScriptedTransport) -> MutationGateway<PeopleResource, ScriptedTransport> {
        MutationGateway::new(t.clone())
    }

    fn form(name: &str, dept: &str) -> FormValues {
        FormValues::new().with("name", name).with("dept", dept)
    }

    #[test]
    fn test_create_appends_backend_entity() {
        let t = ScriptedTransport::new();
        t.reply_json(201, json!({"id": 42, "name": "Carol", "dept": "IT"}));

        let rec = block_on(gateway(&t).create(&form("Carol", "IT"), None)).unwrap();
        assert_eq!(rec, Reconciliation::Append(person(42, "Carol", "IT")));

        let sent = t.sent();
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(sent[0].json_body(), Some(json!({"name": "Carol", "dept": "IT"})));
    }

    #[test]
    fn test_missing_required_field_sends_nothing() {
        let t = ScriptedTransport::new();
        let err = block_on(gateway(&t).create(&form("  ", "IT"), None)).unwrap_err();
        assert_eq!(
            err,
            MutationError::Validation(ValidationError::MissingRequired(vec!["Name"]))
        );
        assert!(t.sent().is_empty());
    }

    #[test]
    fn test_update_replaces_by_id() {
        let t = ScriptedTransport::new();
        t.reply_json(200, json!({"id": 2, "name": "Bob", "dept": "Finance"}));

        let rec = block_on(gateway(&t).update(&2, &form("Bob", "Finance"), None)).unwrap();
        assert_eq!(rec, Reconciliation::Replace(person(2, "Bob", "Finance")));
        assert_eq!(t.sent()[0].method, Method::Put);
        assert_eq!(t.sent()[0].path, "/api/people/2");
    }

    #[test]
    fn test_rejections() {
        let t = ScriptedTransport::new();
        t.reply_text(404, "text/plain", "");
        t.reply_json(500, json!({"message": "db down"}));

        let g = gateway(&t);
        assert_eq!(
            block_on(g.update(&7, &form("X", "Y"), None)).unwrap_err(),
            MutationError::NotFound
        );
        assert_eq!(
            block_on(g.create(&form("X", "Y"), None)).unwrap_err(),
            MutationError::Rejected {
                status: 500,
                message: "db down".into()
            }
        );
    }

    #[test]
    fn test_create_without_entity_body() {
        let t = ScriptedTransport::new();
        t.reply_text(200, "text/plain", "File uploaded");
        let err = block_on(gateway(&t).create(&form("X", "Y"), None)).unwrap_err();
        assert!(matches!(err, MutationError::Unexpected(_)));

        t.reply_text(200, "text/plain", "File uploaded");
        let g: MutationGateway<ReloadingPeople, _> = MutationGateway::new(t.clone());
        assert_eq!(
            block_on(g.create(&form("X", "Y"), None)).unwrap(),
            Reconciliation::Reload
        );
    }

    #[test]
    fn test_declined_delete_sends_nothing() {
        let t = ScriptedTransport::new();
        let decline = |_: &str| false;
        let result = block_on(gateway(&t).delete(&person(1, "Alice", "HR"), &decline)).unwrap();
        assert_eq!(result, None);
        assert!(t.sent().is_empty());
    }

    #[test]
    fn test_confirmed_delete_removes() {
        let t = ScriptedTransport::new();
        t.reply_text(204, "text/plain", "");
        let result =
            block_on(gateway(&t).delete(&person(1, "Alice", "HR"), &AlreadyConfirmed)).unwrap();
        assert_eq!(result, Some(Reconciliation::<Person>::Remove(1)));
        assert_eq!(t.sent()[0].method, Method::Delete);
        assert_eq!(t.sent()[0].path, "/api/people/1");
    }
}
