use crate::domain::a002_hr_document::resource::{download, HrDocumentResource, FACET_TYPE};
use crate::shared::entity_editor::view::{form_modal, list_status};
use crate::shared::entity_editor::{AlreadyConfirmed, EntityListEditor, GlooTransport};
use crate::shared::export::download_bytes;
use crate::shared::icons::icon;
use crate::shared::list_utils::{count_for, facet_counts, highlight_matches, SearchInput, ALL};
use crate::shared::modal::Modal;
use crate::shared::notify::{use_notices, Notice};
use crate::system::auth::context::api_transport;
use contracts::domain::a002_hr_document::aggregate::{DocumentType, HrDocument};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Button, ButtonAppearance};

type Editor = EntityListEditor<HrDocumentResource, GlooTransport>;

#[component]
#[allow(non_snake_case)]
pub fn HrDocumentList() -> impl IntoView {
    let notices = use_notices();
    let editor: Editor = EntityListEditor::new(api_transport(), notices);
    editor.load();

    // документ, ожидающий подтверждения удаления
    let pending_delete = RwSignal::new(None::<HrDocument>);

    let counts = Memo::new(move |_| {
        editor
            .state
            .with(|s| facet_counts(s.store.items(), FACET_TYPE))
    });

    let on_download = move |document: HrDocument| {
        let transport = editor.transport();
        spawn_local(async move {
            let result = download(&transport, &document).await;
            match result {
                Ok(file) => {
                    if let Err(e) = download_bytes(&file.bytes, &file.mime_type, &file.file_name) {
                        log::error!("HR document {}: {}", document.id, e);
                        notices.push(Notice::error("Could not save the downloaded file."));
                    }
                }
                Err(e) => notices.push(Notice::error(e.user_message())),
            }
        });
    };

    let confirm_delete = move |_| {
        if let Some(document) = pending_delete.get_untracked() {
            pending_delete.set(None);
            editor.delete(document, AlreadyConfirmed);
        }
    };

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"HR Documents"}</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--primary" on:click=move |_| editor.open_add()>
                        {icon("upload")}
                        {"Upload Document"}
                    </button>
                    <button class="button button--secondary" on:click=move |_| editor.load()>
                        {icon("refresh")}
                        {"Refresh"}
                    </button>
                </div>
            </div>

            <div class="category-cards">
                <CategoryCard
                    label="All Documents"
                    value=ALL
                    count=Signal::derive(move || editor.state.with(|s| s.store.len()))
                    editor=editor
                />
                {DocumentType::ALL
                    .into_iter()
                    .map(|kind| view! {
                        <CategoryCard
                            label=kind.label()
                            value=kind.as_id()
                            count=Signal::derive(move || counts.with(|c| count_for(c, kind.as_id())))
                            editor=editor
                        />
                    })
                    .collect_view()}
            </div>

            <div class="filter-bar">
                <SearchInput value=editor.query placeholder="Search by file name or employee ID..." />
            </div>

            {list_status(editor)}

            <table class="data-table">
                <thead>
                    <tr>
                        <th>{"File Name"}</th>
                        <th>{"Employee ID"}</th>
                        <th>{"Type"}</th>
                        <th>{"Size"}</th>
                        <th>{"Status"}</th>
                        <th>{"Actions"}</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let visible = editor.visible();
                        if visible.is_empty() && !editor.is_loading() {
                            return view! {
                                <tr><td colspan="6" class="empty-state">{"No documents found."}</td></tr>
                            }
                            .into_any();
                        }
                        visible
                            .into_iter()
                            .map(|document| {
                                let file_name = document.file_name.clone();
                                let name = move || highlight_matches(&file_name, &editor.query.get());
                                let for_download = document.clone();
                                let for_delete = document.clone();
                                let status = document.status.as_str();
                                view! {
                                    <tr>
                                        <td>{name}</td>
                                        <td>{document.employee_id.clone()}</td>
                                        <td>{document.type_label().to_string()}</td>
                                        <td>{document.size_label()}</td>
                                        <td>
                                            <span class=format!("status-badge status-badge--{}", status)>{status}</span>
                                        </td>
                                        <td class="data-table__actions">
                                            <button
                                                class="button button--icon"
                                                title="Download"
                                                on:click=move |_| on_download(for_download.clone())
                                            >
                                                {icon("download")}
                                            </button>
                                            <button
                                                class="button button--icon button--danger"
                                                title="Delete"
                                                on:click=move |_| pending_delete.set(Some(for_delete.clone()))
                                            >
                                                {icon("delete")}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </tbody>
            </table>

            {form_modal(editor)}

            {move || pending_delete.get().map(|document| view! {
                <Modal
                    title="Delete Document".to_string()
                    on_close=Callback::new(move |_| pending_delete.set(None))
                    class="modal--narrow"
                >
                    <p>
                        {format!(
                            "Delete \"{}\" of employee {}? This cannot be undone.",
                            document.file_name,
                            document.employee_id,
                        )}
                    </p>
                    <div class="entity-form__actions">
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| pending_delete.set(None)
                        >
                            "Cancel"
                        </Button>
                        <Button appearance=ButtonAppearance::Primary on_click=confirm_delete>
                            "Delete"
                        </Button>
                    </div>
                </Modal>
            })}
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
fn CategoryCard(
    label: &'static str,
    value: &'static str,
    #[prop(into)] count: Signal<usize>,
    editor: Editor,
) -> impl IntoView {
    let is_selected = move || editor.facets.with(|f| f.get(FACET_TYPE) == value);
    view! {
        <button
            class=move || {
                if is_selected() {
                    "category-card category-card--active"
                } else {
                    "category-card"
                }
            }
            on:click=move |_| editor.set_facet(FACET_TYPE, value.to_string())
        >
            <span class="category-card__icon">{icon("documents")}</span>
            <span class="category-card__label">{label}</span>
            <span class="category-card__count">{move || count.get()}</span>
        </button>
    }
}
