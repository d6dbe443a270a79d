use crate::domain::a001_employee::resource::{EmployeeResource, FACET_DEPARTMENT, FACET_STATUS};
use crate::shared::entity_editor::view::{form_modal, list_status, preview_src};
use crate::shared::entity_editor::{BrowserConfirm, EntityListEditor, GlooTransport};
use crate::shared::icons::icon;
use crate::shared::list_utils::{facet_options, highlight_matches, FacetSelect, SearchInput, ALL};
use crate::shared::notify::use_notices;
use crate::system::auth::context::api_transport;
use contracts::domain::a001_employee::aggregate::{Employee, STATUS_OPTIONS};
use leptos::prelude::*;

type Editor = EntityListEditor<EmployeeResource, GlooTransport>;

#[component]
#[allow(non_snake_case)]
pub fn EmployeeList() -> impl IntoView {
    let editor: Editor = EntityListEditor::new(api_transport(), use_notices());
    editor.load();

    let department_options = Signal::derive(move || {
        editor
            .state
            .with(|s| facet_options(s.store.items(), FACET_DEPARTMENT))
    });
    let status_options = Signal::derive(|| {
        std::iter::once(ALL)
            .chain(STATUS_OPTIONS.iter().copied())
            .map(str::to_string)
            .collect::<Vec<_>>()
    });

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Employee Onboarding"}</h1>
                    <span class="header__subtitle">
                        {move || format!("{} employees", editor.state.with(|s| s.store.len()))}
                    </span>
                </div>
                <div class="header__actions">
                    <button class="button button--primary" on:click=move |_| editor.open_add()>
                        {icon("plus")}
                        {"Add Employee"}
                    </button>
                    <button class="button button--secondary" on:click=move |_| editor.load()>
                        {icon("refresh")}
                        {"Refresh"}
                    </button>
                </div>
            </div>

            <div class="filter-bar">
                <SearchInput value=editor.query placeholder="Search by name, ID, department..." />
                <FacetSelect
                    label="Department"
                    facet=FACET_DEPARTMENT
                    selection=editor.facets
                    options=department_options
                />
                <FacetSelect
                    label="Status"
                    facet=FACET_STATUS
                    selection=editor.facets
                    options=status_options
                />
            </div>

            {list_status(editor)}

            <div class="card-grid">
                {move || {
                    let visible = editor.visible();
                    if visible.is_empty() && !editor.is_loading() {
                        return view! { <div class="empty-state">{"No employees found."}</div> }
                            .into_any();
                    }
                    visible
                        .into_iter()
                        .map(|employee| employee_card(editor, employee))
                        .collect_view()
                        .into_any()
                }}
            </div>

            {form_modal(editor)}
        </div>
    }
}

fn employee_card(editor: Editor, employee: Employee) -> impl IntoView {
    let d = &employee.data;
    let name = d.employee_name.clone();
    let initials: String = name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase();
    let photo = employee
        .data
        .profile_photo_url
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(preview_src);
    let status = d.status.as_str();
    let subtitle = format!("{} · {}", d.position, d.department);
    let employee_id = d.employee_id.clone();
    let email = d.email.clone();

    let title_name = name.clone();
    let title = move || highlight_matches(&title_name, &editor.query.get());

    let for_view = employee.clone();
    let for_edit = employee.clone();
    let for_delete = employee;

    view! {
        <div class="employee-card">
            <div class="employee-card__photo">
                {match photo {
                    Some(src) => view! { <img src=src alt=name /> }.into_any(),
                    None => view! { <div class="employee-card__avatar">{initials}</div> }.into_any(),
                }}
            </div>
            <div class="employee-card__body">
                <h3 class="employee-card__name">{title}</h3>
                <div class="employee-card__meta">{subtitle}</div>
                <div class="employee-card__meta">{employee_id}" · "{email}</div>
                <span class=format!("status-badge status-badge--{}", status.to_lowercase())>
                    {status}
                </span>
            </div>
            <div class="employee-card__actions">
                <button
                    class="button button--icon"
                    title="View"
                    on:click=move |_| editor.open_view(&for_view)
                >
                    {icon("eye")}
                </button>
                <button
                    class="button button--icon"
                    title="Edit"
                    on:click=move |_| editor.open_edit(&for_edit)
                >
                    {icon("edit")}
                </button>
                <button
                    class="button button--icon button--danger"
                    title="Delete"
                    on:click=move |_| editor.delete(for_delete.clone(), BrowserConfirm)
                >
                    {icon("delete")}
                </button>
            </div>
        </div>
    }
}
