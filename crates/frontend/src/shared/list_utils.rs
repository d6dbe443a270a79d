/// Универсальные утилиты для работы со списками (поиск, фасеты, UI компоненты)
use leptos::prelude::*;
use std::collections::BTreeMap;

/// Значение фасета "без фильтра"
pub const ALL: &str = "all";

/// Trait для типов данных, поддерживающих поиск
pub trait Searchable {
    /// Поля, по которым идёт поиск (имя, идентификатор, категория)
    fn search_fields(&self) -> Vec<&str>;

    /// Проверяет, соответствует ли объект поисковому запросу (без учёта регистра)
    fn matches_filter(&self, filter: &str) -> bool {
        let needle = filter.trim().to_lowercase();
        needle.is_empty()
            || self
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Trait для типов с фасетами (отдел, статус, тип документа)
pub trait Faceted {
    /// Значение фасета или `None`, если у типа такого фасета нет
    fn facet_value(&self, facet: &str) -> Option<String>;
}

/// Выбранные значения фасетов; отсутствующий фасет равен [`ALL`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetSelection(BTreeMap<String, String>);

impl FacetSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, facet: &str, value: impl Into<String>) -> Self {
        self.set(facet, value);
        self
    }

    pub fn set(&mut self, facet: &str, value: impl Into<String>) {
        let value = value.into();
        if value == ALL || value.is_empty() {
            self.0.remove(facet);
        } else {
            self.0.insert(facet.to_string(), value);
        }
    }

    pub fn get(&self, facet: &str) -> &str {
        self.0.get(facet).map(String::as_str).unwrap_or(ALL)
    }

    pub fn is_active(&self) -> bool {
        !self.0.is_empty()
    }

    /// Exact equality on every selected facet
    pub fn matches<T: Faceted>(&self, item: &T) -> bool {
        self.0
            .iter()
            .all(|(facet, wanted)| item.facet_value(facet).as_deref() == Some(wanted.as_str()))
    }
}

/// Фильтрует список по запросу и фасетам, сохраняя порядок
pub fn filter_list<T: Searchable + Faceted + Clone>(
    items: &[T],
    query: &str,
    facets: &FacetSelection,
) -> Vec<T> {
    items
        .iter()
        .filter(|item| item.matches_filter(query) && facets.matches(*item))
        .cloned()
        .collect()
}

/// `["all", ...]` с уникальными значениями фасета в порядке появления
pub fn facet_options<T: Faceted>(items: &[T], facet: &str) -> Vec<String> {
    let mut options = vec![ALL.to_string()];
    for value in items.iter().filter_map(|item| item.facet_value(facet)) {
        if !value.is_empty() && !options.contains(&value) {
            options.push(value);
        }
    }
    options
}

/// Количество записей по каждому значению фасета (в порядке появления)
pub fn facet_counts<T: Faceted>(items: &[T], facet: &str) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in items.iter().filter_map(|item| item.facet_value(facet)) {
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value, 1)),
        }
    }
    counts
}

pub fn count_for(counts: &[(String, usize)], value: &str) -> usize {
    counts
        .iter()
        .find(|(v, _)| v == value)
        .map(|(_, n)| *n)
        .unwrap_or(0)
}

/// Подсветка совпадений в тексте (case-insensitive)
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let filter_lower = filter.trim().to_lowercase();
    let text_lower = text.to_lowercase();

    // смещения байтов совпадают, только если регистр не меняет длину
    if filter_lower.is_empty()
        || text_lower.len() != text.len()
        || !text_lower.contains(&filter_lower)
    {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last_pos = 0;

    while let Some(pos) = text_lower[last_pos..].find(&filter_lower) {
        let actual_pos = last_pos + pos;

        if actual_pos > last_pos {
            parts.push(view! { <span>{text[last_pos..actual_pos].to_string()}</span> }.into_any());
        }

        let match_end = actual_pos + filter_lower.len();
        parts.push(view! {
            <mark class="search-highlight">{text[actual_pos..match_end].to_string()}</mark>
        }.into_any());

        last_pos = match_end;
    }

    if last_pos < text.len() {
        parts.push(view! { <span>{text[last_pos..].to_string()}</span> }.into_any());
    }

    view! { <>{parts}</> }.into_any()
}

/// Поле поиска с кнопкой очистки
#[component]
pub fn SearchInput(
    /// Текущее значение фильтра
    value: RwSignal<String>,
    /// Placeholder текст
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    let is_filter_active = move || !value.get().trim().is_empty();

    view! {
        <div class="search-input">
            <input
                type="text"
                placeholder=placeholder
                class=move || {
                    if is_filter_active() {
                        "search-input__field search-input__field--active"
                    } else {
                        "search-input__field"
                    }
                }
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <Show when=is_filter_active>
                <button
                    class="search-input__clear"
                    on:click=move |_| value.set(String::new())
                    title="Clear"
                >
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

/// Выпадающий список значений фасета
#[component]
pub fn FacetSelect(
    /// Подпись перед списком
    label: &'static str,
    /// Фасет (ключ в [`FacetSelection`])
    facet: &'static str,
    selection: RwSignal<FacetSelection>,
    #[prop(into)]
    options: Signal<Vec<String>>,
) -> impl IntoView {
    view! {
        <label class="facet-select">
            <span class="facet-select__label">{label}</span>
            <select
                prop:value=move || selection.get().get(facet).to_string()
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    selection.update(|s| s.set(facet, value));
                }
            >
                <For
                    each=move || options.get()
                    key=|option| option.clone()
                    children=move |option| {
                        let text = if option == ALL { "All".to_string() } else { option.clone() };
                        view! { <option value=option>{text}</option> }
                    }
                />
            </select>
        </label>
    }
}
