//! Упорядоченный список сущностей с уникальными id

use contracts::domain::common::ListEntity;
use std::collections::HashSet;

/// Как изменить список после подтверждённого ответа сервера
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciliation<E: ListEntity> {
    Append(E),
    Replace(E),
    Remove(E::Id),
    /// Ответ без сущности: список нужно перечитать
    Reload,
}

/// Keep the first occurrence of every id; returns the number of dropped duplicates
pub fn dedup_by_id<E: ListEntity>(items: &mut Vec<E>) -> usize {
    let before = items.len();
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(item.id()));
    before - items.len()
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityStore<E> {
    items: Vec<E>,
}

impl<E> Default for EntityStore<E> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<E: ListEntity> EntityStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &E::Id) -> Option<&E> {
        self.items.iter().find(|item| &item.id() == id)
    }

    pub fn contains(&self, id: &E::Id) -> bool {
        self.get(id).is_some()
    }

    /// Replace the whole list (never merges); returns dropped duplicates
    pub fn replace_all(&mut self, mut items: Vec<E>) -> usize {
        let duplicates = dedup_by_id(&mut items);
        self.items = items;
        duplicates
    }

    /// Apply a reconciliation; returns `true` when the list must be reloaded
    pub fn apply(&mut self, reconciliation: Reconciliation<E>) -> bool {
        match reconciliation {
            Reconciliation::Append(entity) => {
                let id = entity.id();
                match self.items.iter_mut().find(|item| item.id() == id) {
                    Some(existing) => *existing = entity,
                    None => self.items.push(entity),
                }
                false
            }
            Reconciliation::Replace(entity) => {
                let id = entity.id();
                if let Some(existing) = self.items.iter_mut().find(|item| item.id() == id) {
                    *existing = entity;
                } else {
                    log::warn!(
                        "{}: updated record {} is not in the list",
                        E::list_name(),
                        entity.display_name()
                    );
                }
                false
            }
            Reconciliation::Remove(id) => {
                self.items.retain(|item| item.id() != id);
                false
            }
            Reconciliation::Reload => true,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Minimal entity for store/editor tests

    use contracts::domain::common::ListEntity;
    use contracts::shared::form_schema::{FieldDescriptor, FormModel, FormValues};
    use contracts::shared::validation::ValidationError;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Person {
        pub id: i64,
        pub name: String,
        pub dept: String,
    }

    pub fn person(id: i64, name: &str, dept: &str) -> Person {
        Person {
            id,
            name: name.to_string(),
            dept: dept.to_string(),
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct PersonDraft {
        pub name: String,
        pub dept: String,
    }

    impl ListEntity for Person {
        type Id = i64;

        fn id(&self) -> i64 {
            self.id
        }

        fn display_name(&self) -> String {
            self.name.clone()
        }

        fn collection_name() -> &'static str {
            "people"
        }

        fn element_name() -> &'static str {
            "Person"
        }

        fn list_name() -> &'static str {
            "People"
        }
    }

    const FIELDS: &[FieldDescriptor] = &[
        FieldDescriptor::text("name", "Name").required(),
        FieldDescriptor::text("dept", "Department").required(),
        FieldDescriptor::text("secret", "PIN").secret(),
    ];

    impl FormModel for Person {
        type Draft = PersonDraft;

        fn schema() -> &'static [FieldDescriptor] {
            FIELDS
        }

        fn to_form(&self) -> FormValues {
            FormValues::new()
                .with("name", &self.name)
                .with("dept", &self.dept)
                .with("secret", "1234")
        }

        fn draft_from_form(values: &FormValues) -> Result<PersonDraft, ValidationError> {
            Ok(PersonDraft {
                name: values.trimmed("name"),
                dept: values.trimmed("dept"),
            })
        }
    }
}
