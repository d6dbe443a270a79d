use contracts::domain::common::ListEntity;
use contracts::shared::form_schema::FormModel;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::marker::PhantomData;

use super::error::{FetchError, MutationError};
use super::gateway::{ConfirmGate, MutationGateway};
use super::loader::{load, LoadReport};
use super::modal::{FormModal, SubmitTarget};
use super::resource::Resource;
use super::store::{EntityStore, Reconciliation};
use super::transport::HttpTransport;
use crate::shared::list_utils::{filter_list, FacetSelection, Faceted, Searchable};
use crate::shared::notify::{Notice, NoticeService};

// ============================================================================
// State
// ============================================================================

/// Состояние экрана-списка без реактивности: список, модальное окно, загрузка
#[derive(Debug, Clone)]
pub struct EditorState<E: ListEntity> {
    pub store: EntityStore<E>,
    pub modal: FormModal<E>,
    pub loading: bool,
    pub load_error: Option<String>,
    pub dropped: usize,
}

impl<E: ListEntity> Default for EditorState<E> {
    fn default() -> Self {
        Self {
            store: EntityStore::default(),
            modal: FormModal::default(),
            loading: false,
            load_error: None,
            dropped: 0,
        }
    }
}

/// Итог мутации для экрана
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    pub notice: Notice,
    pub reload: bool,
}

impl<E: ListEntity + FormModel> EditorState<E> {
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.load_error = None;
    }

    /// Load errors are shown inline; the previous list stays as it was
    pub fn finish_load(&mut self, result: Result<LoadReport<E>, FetchError>) -> Option<Notice> {
        self.loading = false;
        match result {
            Ok(report) => {
                self.dropped = report.dropped_count();
                self.store.replace_all(report.items);
                (self.dropped > 0).then(|| {
                    Notice::warning(format!(
                        "{} record(s) could not be read and were skipped.",
                        self.dropped
                    ))
                })
            }
            Err(e) => {
                self.load_error = Some(e.user_message());
                None
            }
        }
    }

    /// The list and the notice follow every response; the modal only reacts
    /// when it is still the form that sent `target`.
    pub fn finish_submit(
        &mut self,
        target: &SubmitTarget<E::Id>,
        result: Result<Reconciliation<E>, MutationError>,
    ) -> MutationOutcome {
        let awaited = self.modal.awaits(target);
        match result {
            Ok(reconciliation) => {
                let text = match &reconciliation {
                    Reconciliation::Replace(_) => format!("{} updated successfully.", E::element_name()),
                    _ => format!("{} saved successfully.", E::element_name()),
                };
                let reload = self.store.apply(reconciliation);
                if awaited {
                    self.modal.succeed();
                }
                MutationOutcome {
                    notice: Notice::success(text),
                    reload,
                }
            }
            Err(e) => {
                let message = e.user_message();
                if awaited {
                    self.modal.fail(message.clone());
                }
                MutationOutcome {
                    notice: Notice::error(message),
                    reload: false,
                }
            }
        }
    }

    /// `Ok(None)` (declined) yields no notice
    pub fn finish_delete(
        &mut self,
        result: Result<Option<Reconciliation<E>>, MutationError>,
    ) -> Option<MutationOutcome> {
        match result {
            Ok(None) => None,
            Ok(Some(reconciliation)) => {
                let reload = self.store.apply(reconciliation);
                Some(MutationOutcome {
                    notice: Notice::success(format!("{} deleted.", E::element_name())),
                    reload,
                })
            }
            Err(e) => Some(MutationOutcome {
                notice: Notice::error(e.user_message()),
                reload: false,
            }),
        }
    }
}

// ============================================================================
// Reactive editor
// ============================================================================

/// Универсальный редактор списка: один экземпляр на экран ресурса
pub struct EntityListEditor<R: Resource, T> {
    pub state: RwSignal<EditorState<R::Entity>>,
    pub query: RwSignal<String>,
    pub facets: RwSignal<FacetSelection>,
    transport: StoredValue<T>,
    notices: NoticeService,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource, T> Clone for EntityListEditor<R, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Resource, T> Copy for EntityListEditor<R, T> {}

impl<R, T> EntityListEditor<R, T>
where
    R: Resource,
    R::Entity: Searchable + Faceted,
    T: HttpTransport + Send + Sync,
{
    pub fn new(transport: T, notices: NoticeService) -> Self {
        Self {
            state: RwSignal::new(EditorState::default()),
            query: RwSignal::new(String::new()),
            facets: RwSignal::new(FacetSelection::default()),
            transport: StoredValue::new(transport),
            notices,
            _resource: PhantomData,
        }
    }

    fn gateway(&self) -> MutationGateway<R, T> {
        MutationGateway::new(self.transport.get_value())
    }

    pub fn transport(&self) -> T {
        self.transport.get_value()
    }

    /// Fetch the whole collection and replace the list
    pub fn load(&self) {
        let this = *self;
        this.state.update(|s| s.begin_load());
        spawn_local(async move {
            let result = load::<R, T>(&this.transport.get_value()).await;
            if let Some(Some(notice)) = this.state.try_update(|s| s.finish_load(result)) {
                this.notices.push(notice);
            }
        });
    }

    pub fn open_add(&self) {
        self.state.update(|s| s.modal.open_add());
    }

    pub fn open_edit(&self, entity: &R::Entity) {
        self.state.update(|s| s.modal.open_edit(entity));
    }

    pub fn open_view(&self, entity: &R::Entity) {
        self.state.update(|s| s.modal.open_view(entity));
    }

    pub fn close_modal(&self) {
        self.state.update(|s| s.modal.close());
    }

    /// Submit the open form; the list changes only after the response
    pub fn submit(&self) {
        let this = *self;
        let Some(Ok(submission)) = this.state.try_update(|s| s.modal.begin_submit()) else {
            return;
        };
        let gateway = this.gateway();
        let target = submission.target.clone();
        spawn_local(async move {
            let result = gateway.submit(submission).await;
            if let Some(outcome) = this.state.try_update(|s| s.finish_submit(&target, result)) {
                this.notices.push(outcome.notice);
                if outcome.reload {
                    this.load();
                }
            }
        });
    }

    pub fn delete(&self, entity: R::Entity, gate: impl ConfirmGate + 'static) {
        let this = *self;
        let gateway = this.gateway();
        spawn_local(async move {
            let result = gateway.delete(&entity, &gate).await;
            if let Some(Some(outcome)) = this.state.try_update(|s| s.finish_delete(result)) {
                this.notices.push(outcome.notice);
                if outcome.reload {
                    this.load();
                }
            }
        });
    }

    pub fn set_facet(&self, facet: &str, value: String) {
        self.facets.update(|f| f.set(facet, value));
    }

    /// All loaded entities, unfiltered
    pub fn items(&self) -> Vec<R::Entity> {
        self.state.with(|s| s.store.items().to_vec())
    }

    /// Filtered projection of the list
    pub fn visible(&self) -> Vec<R::Entity> {
        let query = self.query.get();
        let facets = self.facets.get();
        self.state
            .with(|s| filter_list(s.store.items(), &query, &facets))
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    pub fn load_error(&self) -> Option<String> {
        self.state.with(|s| s.load_error.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::entity_editor::gateway::MutationGateway;
    use crate::shared::entity_editor::store::testing::{person, Person};
    use crate::shared::entity_editor::testing::PeopleResource;
    use crate::shared::entity_editor::transport::testing::ScriptedTransport;
    use crate::shared::notify::NoticeLevel;
    use futures::executor::block_on;
    use serde_json::json;

    fn loaded() -> EditorState<Person> {
        let mut s = EditorState::default();
        s.store
            .replace_all(vec![person(1, "Alice", "HR"), person(2, "Bob", "IT")]);
        s
    }

    #[test]
    fn test_failed_update_leaves_list_and_reports_once() {
        let t = ScriptedTransport::new();
        t.reply_json(500, json!({"message": "boom"}));
        let gateway: MutationGateway<PeopleResource, _> = MutationGateway::new(t.clone());

        let mut state = loaded();
        let before = state.store.clone();
        state.modal.open_edit(&person(2, "Bob", "IT"));
        state.modal.set_value("dept", "Finance");
        let submission = state.modal.begin_submit().unwrap();
        let target = submission.target.clone();

        let result = block_on(gateway.submit(submission));
        let outcome = state.finish_submit(&target, result);

        assert_eq!(state.store, before);
        assert_eq!(outcome.notice, Notice::error("boom"));
        assert!(!outcome.reload);
        assert!(state.modal.is_open());
        assert_eq!(state.modal.value("dept"), "Finance");
        assert_eq!(t.sent().len(), 1);
    }

    #[test]
    fn test_successful_create_closes_modal() {
        let t = ScriptedTransport::new();
        t.reply_json(201, json!({"id": 42, "name": "Carol", "dept": "IT"}));
        let gateway: MutationGateway<PeopleResource, _> = MutationGateway::new(t.clone());

        let mut state = loaded();
        state.modal.open_add();
        state.modal.set_value("name", "Carol");
        state.modal.set_value("dept", "IT");
        let submission = state.modal.begin_submit().unwrap();
        let target = submission.target.clone();
        let outcome = state.finish_submit(&target, block_on(gateway.submit(submission)));

        assert_eq!(outcome.notice.level, NoticeLevel::Success);
        assert_eq!(state.store.len(), 3);
        assert!(state.store.contains(&42));
        assert!(!state.modal.is_open());
    }

    #[test]
    fn test_successful_delete() {
        let t = ScriptedTransport::new();
        t.reply_text(200, "text/plain", "");
        let gateway: MutationGateway<PeopleResource, _> = MutationGateway::new(t.clone());

        let mut state = loaded();
        let target = person(1, "Alice", "HR");
        let confirm = |_: &str| true;
        let outcome = state
            .finish_delete(block_on(gateway.delete(&target, &confirm)))
            .unwrap();

        assert_eq!(outcome.notice.level, NoticeLevel::Success);
        assert_eq!(state.store.len(), 1);
        assert!(!state.store.contains(&1));
    }

    #[test]
    fn test_declined_delete_is_silent() {
        let mut state = loaded();
        assert_eq!(state.finish_delete(Ok(None)), None);
        assert_eq!(state.store.len(), 2);
    }

    #[test]
    fn test_load_error_keeps_previous_list() {
        let mut state = loaded();
        state.begin_load();
        assert!(state.loading);
        let notice = state.finish_load(Err(FetchError::Status {
            status: 500,
            message: "down".into(),
        }));
        assert_eq!(notice, None);
        assert!(!state.loading);
        assert_eq!(state.load_error.as_deref(), Some("down"));
        assert_eq!(state.store.len(), 2);
    }

    #[test]
    fn test_load_report_replaces_list_and_warns_on_drops() {
        let mut state = loaded();
        let notice = state.finish_load(Ok(LoadReport {
            items: vec![person(7, "Dan", "Ops")],
            dropped: vec![crate::shared::entity_editor::error::DecodeError {
                index: 0,
                message: "missing field `name`".into(),
            }],
            duplicates: 0,
        }));
        assert_eq!(state.store.len(), 1);
        assert_eq!(state.dropped, 1);
        assert_eq!(notice.map(|n| n.level), Some(NoticeLevel::Warning));
    }

    #[test]
    fn test_response_for_closed_form_leaves_new_form_alone() {
        let mut state = loaded();
        state.modal.open_edit(&person(1, "Alice", "HR"));
        let target = state.modal.begin_submit().unwrap().target;
        state.modal.close();
        state.modal.open_edit(&person(2, "Bob", "IT"));
        state.modal.set_value("dept", "Ops");

        let outcome = state.finish_submit(&target, Ok(Reconciliation::Replace(person(1, "Alice", "Sales"))));

        assert_eq!(outcome.notice.level, NoticeLevel::Success);
        assert_eq!(state.store.get(&1).map(|p| p.dept.as_str()), Some("Sales"));
        assert!(state.modal.is_open());
        assert_eq!(state.modal.value("dept"), "Ops");
    }

    #[test]
    fn test_failure_for_closed_form_is_only_a_notice() {
        let mut state = loaded();
        state.modal.open_edit(&person(1, "Alice", "HR"));
        let target = state.modal.begin_submit().unwrap().target;
        state.modal.close();
        state.modal.open_edit(&person(2, "Bob", "IT"));

        let outcome = state.finish_submit(
            &target,
            Err(MutationError::Rejected {
                status: 500,
                message: "boom".into(),
            }),
        );

        assert_eq!(outcome.notice, Notice::error("boom"));
        assert_eq!(state.modal.error(), None);
        assert!(!state.modal.is_submitting());
    }
}
