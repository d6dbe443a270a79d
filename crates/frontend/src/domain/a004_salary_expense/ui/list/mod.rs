use crate::domain::a004_salary_expense::resource::SalaryResource;
use crate::shared::date_utils::format_date;
use crate::shared::entity_editor::view::{form_modal, list_status};
use crate::shared::entity_editor::{BrowserConfirm, EntityListEditor, GlooTransport};
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::notify::use_notices;
use crate::system::auth::context::api_transport;
use contracts::domain::a004_salary_expense::aggregate::{format_amount, total_amount, SalaryExpense};
use leptos::prelude::*;

type Editor = EntityListEditor<SalaryResource, GlooTransport>;

#[component]
#[allow(non_snake_case)]
pub fn SalaryList() -> impl IntoView {
    let editor: Editor = EntityListEditor::new(api_transport(), use_notices());
    editor.load();

    let visible = Memo::new(move |_| editor.visible());
    let total = move || visible.with(|rows| format_amount(total_amount(rows)));

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Salary Expenses"}</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--primary" on:click=move |_| editor.open_add()>
                        {icon("plus")}
                        {"Add Salary"}
                    </button>
                    <button class="button button--secondary" on:click=move |_| editor.load()>
                        {icon("refresh")}
                        {"Refresh"}
                    </button>
                </div>
            </div>

            <div class="filter-bar">
                <SearchInput value=editor.query placeholder="Search by employee or description..." />
                <div class="summary-chip">
                    <span class="summary-chip__label">{"Total"}</span>
                    <span class="summary-chip__value">{total}</span>
                </div>
            </div>

            {list_status(editor)}

            <table class="data-table">
                <thead>
                    <tr>
                        <th>{"Employee"}</th>
                        <th>{"Date"}</th>
                        <th class="data-table__number">{"Amount"}</th>
                        <th>{"Description"}</th>
                        <th>{"Actions"}</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let rows = visible.get();
                        if rows.is_empty() && !editor.is_loading() {
                            return view! {
                                <tr><td colspan="5" class="empty-state">{"No salary entries found."}</td></tr>
                            }
                            .into_any();
                        }
                        rows.into_iter()
                            .map(|entry| salary_row(editor, entry))
                            .collect_view()
                            .into_any()
                    }}
                </tbody>
                <tfoot>
                    <tr>
                        <td colspan="2">{"Total"}</td>
                        <td class="data-table__number">{total}</td>
                        <td colspan="2"></td>
                    </tr>
                </tfoot>
            </table>

            {form_modal(editor)}
        </div>
    }
}

fn salary_row(editor: Editor, entry: SalaryExpense) -> impl IntoView {
    let name = entry.data.employee_name.clone();
    let employee = move || highlight_matches(&name, &editor.query.get());
    let date = format_date(&entry.data.date);
    let amount = entry.amount_label();
    let description = entry.data.description.clone();

    let for_view = entry.clone();
    let for_edit = entry.clone();
    let for_delete = entry;

    view! {
        <tr>
            <td>{employee}</td>
            <td>{date}</td>
            <td class="data-table__number">{amount}</td>
            <td>{description}</td>
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
