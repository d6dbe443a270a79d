use crate::domain::a003_bank_document::resource::{
    BankDocumentResource, CSV_FILE_NAME, FACET_STATUS, FACET_TYPE,
};
use crate::shared::date_utils::format_date;
use crate::shared::entity_editor::view::{form_modal, list_status};
use crate::shared::entity_editor::{BrowserConfirm, EntityListEditor, GlooTransport};
use crate::shared::export::export_csv;
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, FacetSelect, SearchInput, ALL};
use crate::shared::notify::{use_notices, Notice};
use crate::system::auth::context::api_transport;
use contracts::domain::a003_bank_document::aggregate::{
    BankDocument, DOCUMENT_TYPE_OPTIONS, STATUS_OPTIONS,
};
use leptos::prelude::*;

type Editor = EntityListEditor<BankDocumentResource, GlooTransport>;

fn with_all(options: &[&str]) -> Vec<String> {
    std::iter::once(ALL)
        .chain(options.iter().copied())
        .map(str::to_string)
        .collect()
}

#[component]
#[allow(non_snake_case)]
pub fn BankDocumentList() -> impl IntoView {
    let notices = use_notices();
    let editor: Editor = EntityListEditor::new(api_transport(), notices);
    editor.load();

    let on_export = move |_| {
        let rows = editor.visible();
        match export_csv(&rows, CSV_FILE_NAME) {
            Ok(()) => notices.push(Notice::info(format!("Exported {} document(s).", rows.len()))),
            Err(e) => {
                log::warn!("Bank documents export: {}", e);
                notices.push(Notice::warning(e));
            }
        }
    };

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Bank Documents"}</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--primary" on:click=move |_| editor.open_add()>
                        {icon("plus")}
                        {"Add Document"}
                    </button>
                    <button class="button button--secondary" on:click=on_export>
                        {icon("download")}
                        {"Export CSV"}
                    </button>
                    <button class="button button--secondary" on:click=move |_| editor.load()>
                        {icon("refresh")}
                        {"Refresh"}
                    </button>
                </div>
            </div>

            <div class="filter-bar">
                <SearchInput value=editor.query placeholder="Search by bank or account..." />
                <FacetSelect
                    label="Type"
                    facet=FACET_TYPE
                    selection=editor.facets
                    options=Signal::derive(|| with_all(DOCUMENT_TYPE_OPTIONS))
                />
                <FacetSelect
                    label="Status"
                    facet=FACET_STATUS
                    selection=editor.facets
                    options=Signal::derive(|| with_all(STATUS_OPTIONS))
                />
            </div>

            {list_status(editor)}

            <table class="data-table">
                <thead>
                    <tr>
                        <th>{"Document Type"}</th>
                        <th>{"Bank Name"}</th>
                        <th>{"Account Number"}</th>
                        <th>{"Date"}</th>
                        <th>{"Status"}</th>
                        <th>{"Actions"}</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let visible = editor.visible();
                        if visible.is_empty() && !editor.is_loading() {
                            return view! {
                                <tr><td colspan="6" class="empty-state">{"No bank documents found."}</td></tr>
                            }
                            .into_any();
                        }
                        visible
                            .into_iter()
                            .map(|document| document_row(editor, document))
                            .collect_view()
                            .into_any()
                    }}
                </tbody>
            </table>

            {form_modal(editor)}
        </div>
    }
}

fn document_row(editor: Editor, document: BankDocument) -> impl IntoView {
    let d = &document.data;
    let bank_name = d.bank_name.clone();
    let bank = move || highlight_matches(&bank_name, &editor.query.get());
    let document_type = d.document_type.clone();
    let account_number = d.account_number.clone();
    let date = format_date(&d.date);
    let status = d.status.as_str();

    let for_view = document.clone();
    let for_edit = document.clone();
    let for_delete = document;

    view! {
        <tr>
            <td>{document_type}</td>
            <td>{bank}</td>
            <td>{account_number}</td>
            <td>{date}</td>
            <td>
                <span class=format!("status-badge status-badge--{}", status.to_lowercase())>{status}</span>
            </td>
            <td class="data-table__actions">
                <button class="button button--icon" title="View" on:click=move |_| editor.open_view(&for_view)>
                    {icon("eye")}
                </button>
                <button class="button button--icon" title="Edit" on:click=move |_| editor.open_edit(&for_edit)>
                    {icon("edit")}
                </button>
                <button
                    class="button button--icon button--danger"
                    title="Delete"
                    on:click=move |_| editor.delete(for_delete.clone(), BrowserConfirm)
                >
                    {icon("delete")}
                </button>
            </td>
        </tr>
    }
}
