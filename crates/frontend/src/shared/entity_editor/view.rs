//! Общие куски разметки экранов-списков: модальная форма и статус загрузки

use contracts::shared::form_schema::{FieldDescriptor, FieldKind, FormModel};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Button, ButtonAppearance, Spinner};

use super::editor::EntityListEditor;
use super::modal::ModalMode;
use super::resource::Resource;
use super::transport::{read_file, HttpTransport};
use crate::shared::api_utils::api_url;
use crate::shared::date_utils::format_iso_date;
use crate::shared::icons::icon;
use crate::shared::list_utils::{Faceted, Searchable};
use crate::shared::modal::Modal;

/// URL для `<img>`: object URL выбранного файла или путь на сервере
pub fn preview_src(preview: &str) -> String {
    if preview.starts_with("blob:") || preview.starts_with("data:") {
        preview.to_string()
    } else {
        api_url(preview)
    }
}

fn revoke_object_url(url: &str) {
    if let Err(e) = web_sys::Url::revoke_object_url(url) {
        log::warn!("Failed to revoke {}: {:?}", url, e);
    }
}

/// Индикатор загрузки и ошибка чтения списка с кнопкой повтора
pub fn list_status<R, T>(editor: EntityListEditor<R, T>) -> impl IntoView
where
    R: Resource,
    R::Entity: Searchable + Faceted,
    T: HttpTransport + Send + Sync,
{
    view! {
        <Show when=move || editor.is_loading()>
            <div class="list-status">
                <Spinner />
            </div>
        </Show>
        {move || editor.load_error().map(|e| view! {
            <div class="warning-box warning-box--error">
                <span class="warning-box__icon">"⚠"</span>
                <span class="warning-box__text">{e}</span>
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| editor.load()
                >
                    "Retry"
                </Button>
            </div>
        })}
    }
}

/// Модальное окно add/edit/view для любого ресурса.
///
/// Разметка пересоздаётся только при смене режима; значения полей читаются
/// из состояния по месту, поэтому ввод не теряет фокус.
pub fn form_modal<R, T>(editor: EntityListEditor<R, T>) -> impl IntoView
where
    R: Resource,
    R::Entity: Searchable + Faceted,
    T: HttpTransport + Send + Sync,
{
    let mode_key = Memo::new(move |_| {
        editor
            .state
            .with(|s| s.modal.mode().map(|m| format!("{:?}", m)))
    });

    move || {
        mode_key.get().map(|_| {
            let (title, read_only) = editor
                .state
                .with_untracked(|s| (s.modal.title(), s.modal.is_read_only()));
            let on_close = Callback::new(move |_| editor.close_modal());

            view! {
                <Modal title=title on_close=on_close>
                    <form
                        class="entity-form"
                        on:submit=move |ev| {
                            ev.prevent_default();
                            editor.submit();
                        }
                    >
                        {R::Entity::schema()
                            .iter()
                            .copied()
                            .map(|field| form_field(editor, field, read_only))
                            .collect_view()}

                        {move || editor.state.with(|s| s.modal.error().map(str::to_string)).map(|e| view! {
                            <div class="entity-form__error">{e}</div>
                        })}

                        <div class="entity-form__actions">
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| editor.close_modal()
                            >
                                {if read_only { "Close" } else { "Cancel" }}
                            </Button>
                            <Show when=move || !read_only>
                                <button
                                    type="submit"
                                    class="button button--primary"
                                    disabled=move || editor.state.with(|s| s.modal.is_submitting())
                                >
                                    {move || {
                                        let submitting = editor.state.with(|s| s.modal.is_submitting());
                                        let editing = editor.state.with(|s| matches!(s.modal.mode(), Some(ModalMode::Edit(_))));
                                        match (submitting, editing) {
                                            (true, _) => "Saving...",
                                            (false, true) => "Update",
                                            (false, false) => "Save",
                                        }
                                    }}
                                </button>
                            </Show>
                        </div>
                    </form>
                </Modal>
            }
        })
    }
}

fn form_field<R, T>(
    editor: EntityListEditor<R, T>,
    field: FieldDescriptor,
    read_only: bool,
) -> AnyView
where
    R: Resource,
    R::Entity: Searchable + Faceted,
    T: HttpTransport + Send + Sync,
{
    let label = if field.required && !read_only {
        format!("{} *", field.label)
    } else {
        field.label.to_string()
    };

    let control = if field.kind == FieldKind::File {
        file_control(editor, field, read_only)
    } else if read_only {
        read_only_control(editor, field)
    } else {
        input_control(editor, field)
    };

    view! {
        <div class="form-field">
            <label class="form-field__label" for=field.name>{label}</label>
            {control}
        </div>
    }
    .into_any()
}

fn read_only_control<R, T>(editor: EntityListEditor<R, T>, field: FieldDescriptor) -> AnyView
where
    R: Resource,
    R::Entity: Searchable + Faceted,
    T: HttpTransport + Send + Sync,
{
    let is_date = matches!(field.kind, FieldKind::Date);
    let value = move || {
        let shown = editor.state.with(|s| s.modal.display_value(&field));
        if is_date {
            format_iso_date(&shown)
        } else {
            shown
        }
    };
    if !field.secret {
        return view! { <div class="form-field__value">{value}</div> }.into_any();
    }
    view! {
        <div class="form-field__value form-field__value--secret">
            <span>{value}</span>
            <button
                type="button"
                class="button button--icon"
                title="Show / hide"
                on:click=move |_| editor.state.update(|s| s.modal.toggle_secrets())
            >
                {move || if editor.state.with(|s| s.modal.secrets_revealed()) {
                    icon("eye-off")
                } else {
                    icon("eye")
                }}
            </button>
        </div>
    }
    .into_any()
}

fn input_control<R, T>(editor: EntityListEditor<R, T>, field: FieldDescriptor) -> AnyView
where
    R: Resource,
    R::Entity: Searchable + Faceted,
    T: HttpTransport + Send + Sync,
{
    let name = field.name;
    let current = move || editor.state.with(|s| s.modal.value(name).to_string());
    let set = move |value: String| editor.state.update(|s| s.modal.set_value(name, value));

    match field.kind {
        FieldKind::Select => view! {
            <select
                id=name
                class="form-field__input"
                prop:value=current
                on:change=move |ev| set(event_target_value(&ev))
            >
                <option value="">"Select..."</option>
                {field
                    .options
                    .iter()
                    .map(|option| view! { <option value=*option>{*option}</option> })
                    .collect_view()}
            </select>
        }
        .into_any(),
        FieldKind::TextArea => view! {
            <textarea
                id=name
                class="form-field__input"
                rows="3"
                prop:value=current
                on:input=move |ev| set(event_target_value(&ev))
            />
        }
        .into_any(),
        kind => view! {
            <input
                id=name
                class="form-field__input"
                type=kind.input_type()
                step=(kind == FieldKind::Number).then_some("0.01")
                prop:value=current
                on:input=move |ev| set(event_target_value(&ev))
            />
        }
        .into_any(),
    }
}

fn file_control<R, T>(
    editor: EntityListEditor<R, T>,
    field: FieldDescriptor,
    read_only: bool,
) -> AnyView
where
    R: Resource,
    R::Entity: Searchable + Faceted,
    T: HttpTransport + Send + Sync,
{
    let preview = move || {
        editor.state.with(|s| {
            let chosen = s.modal.attachment().map(|a| (a.file_name.clone(), a.is_image()));
            s.modal.preview().map(|p| (preview_src(p), chosen))
        })
    };
    let preview_view = move || {
        preview().map(|(src, chosen)| match chosen {
            Some((name, false)) => view! { <span class="form-field__file">{name}</span> }.into_any(),
            _ if field.accept == Some("image/*") => {
                view! { <img class="form-field__preview" src=src alt="preview" /> }.into_any()
            }
            _ => view! {
                <a class="form-field__file" href=src target="_blank">"Open file"</a>
            }
            .into_any(),
        })
    };

    if read_only {
        return view! { <div class="form-field__value">{preview_view}</div> }.into_any();
    }

    // object URL выбранного файла живёт, пока поле на экране
    let shown_url = StoredValue::new(Option::<String>::None);
    on_cleanup(move || {
        if let Some(url) = shown_url.try_get_value().flatten() {
            revoke_object_url(&url);
        }
    });

    let on_change = move |ev: leptos::ev::Event| {
        let Some(mode) = editor.state.with_untracked(|s| s.modal.mode().cloned()) else {
            return;
        };
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            editor.state.update(|s| {
                s.modal.attach_for(&mode, None, None);
            });
            return;
        };
        let object_url = web_sys::Url::create_object_url_with_blob(&file).ok();
        spawn_local(async move {
            match read_file(file).await {
                Ok(attachment) => {
                    let unused = editor
                        .state
                        .try_update(|s| {
                            s.modal.attach_for(&mode, Some(attachment), object_url.clone())
                        })
                        .flatten();
                    if let Some(url) = unused {
                        revoke_object_url(&url);
                    }
                    let attached = editor
                        .state
                        .try_with_untracked(|s| s.modal.object_url().map(str::to_string))
                        .flatten();
                    if attached.is_some() && attached == object_url {
                        shown_url.try_update_value(|shown| *shown = attached);
                    }
                }
                Err(e) => {
                    log::error!("{}", e);
                    if let Some(url) = object_url {
                        revoke_object_url(&url);
                    }
                    editor.state.update(|s| {
                        if s.modal.mode() == Some(&mode) {
                            s.modal.fail(e.user_message());
                        }
                    });
                }
            }
        });
    };

    view! {
        <input
            id=field.name
            class="form-field__input"
            type="file"
            accept=field.accept.unwrap_or("*/*")
            on:change=on_change
        />
        {preview_view}
    }
    .into_any()
}
