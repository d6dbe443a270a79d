//! Состояние модального окна добавления/редактирования/просмотра

use contracts::domain::common::ListEntity;
use contracts::shared::form_schema::{check_required, FieldDescriptor, FormModel, FormValues};
use contracts::shared::validation::ValidationError;

use super::transport::Attachment;

const MASK: &str = "••••••••";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalMode<Id> {
    Add,
    Edit(Id),
    View(Id),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitTarget<Id> {
    Create,
    Update(Id),
}

/// Снимок формы, переданный в gateway
#[derive(Debug, Clone)]
pub struct Submission<E: ListEntity> {
    pub target: SubmitTarget<E::Id>,
    pub values: FormValues,
    pub attachment: Option<Attachment>,
}

fn is_object_url(path: &str) -> bool {
    path.starts_with("blob:")
}

#[derive(Debug, Clone)]
pub struct FormModal<E: ListEntity> {
    mode: Option<ModalMode<E::Id>>,
    values: FormValues,
    attachment: Option<Attachment>,
    /// Путь к уже сохранённому файлу или object URL выбранного
    preview: Option<String>,
    error: Option<String>,
    submitting: bool,
    secrets_revealed: bool,
}

impl<E: ListEntity> Default for FormModal<E> {
    fn default() -> Self {
        Self {
            mode: None,
            values: FormValues::new(),
            attachment: None,
            preview: None,
            error: None,
            submitting: false,
            secrets_revealed: false,
        }
    }
}

impl<E: ListEntity + FormModel> FormModal<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_add(&mut self) {
        *self = Self {
            mode: Some(ModalMode::Add),
            values: E::blank_form(),
            ..Self::default()
        };
    }

    pub fn open_edit(&mut self, entity: &E) {
        self.open_existing(ModalMode::Edit(entity.id()), entity);
    }

    pub fn open_view(&mut self, entity: &E) {
        self.open_existing(ModalMode::View(entity.id()), entity);
    }

    fn open_existing(&mut self, mode: ModalMode<E::Id>, entity: &E) {
        *self = Self {
            mode: Some(mode),
            values: entity.to_form(),
            preview: entity.attachment_path().map(str::to_string),
            ..Self::default()
        };
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn is_open(&self) -> bool {
        self.mode.is_some()
    }

    pub fn mode(&self) -> Option<&ModalMode<E::Id>> {
        self.mode.as_ref()
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self.mode, Some(ModalMode::View(_)))
    }

    pub fn title(&self) -> String {
        let name = E::element_name();
        match self.mode {
            Some(ModalMode::Add) => format!("Add {}", name),
            Some(ModalMode::Edit(_)) => format!("Edit {}", name),
            Some(ModalMode::View(_)) => format!("{} Details", name),
            None => String::new(),
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, name: &str) -> &str {
        self.values.get(name)
    }

    /// Ignored in view mode
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        if self.is_open() && !self.is_read_only() {
            self.values.set(name, value);
        }
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// Attach a file picked while the form was in `mode`.
    ///
    /// Returns the object URL that is no longer shown: the replaced preview,
    /// or the new one when the form has since been closed or reopened.
    pub fn attach_for(
        &mut self,
        mode: &ModalMode<E::Id>,
        attachment: Option<Attachment>,
        preview: Option<String>,
    ) -> Option<String> {
        if self.mode.as_ref() != Some(mode) || self.is_read_only() {
            return preview.filter(|p| is_object_url(p));
        }
        self.attachment = attachment;
        match preview {
            Some(p) => self.preview.replace(p).filter(|old| is_object_url(old)),
            None => None,
        }
    }

    /// Object URL to revoke when the form goes away
    pub fn object_url(&self) -> Option<&str> {
        self.preview.as_deref().filter(|p| is_object_url(p))
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn toggle_secrets(&mut self) {
        self.secrets_revealed = !self.secrets_revealed;
    }

    pub fn secrets_revealed(&self) -> bool {
        self.secrets_revealed
    }

    pub fn is_masked(&self, field: &FieldDescriptor) -> bool {
        field.secret && self.is_read_only() && !self.secrets_revealed
    }

    /// Value shown in view mode
    pub fn display_value(&self, field: &FieldDescriptor) -> String {
        let raw = self.values.get(field.name);
        if self.is_masked(field) && !raw.is_empty() {
            MASK.to_string()
        } else {
            raw.to_string()
        }
    }

    /// Validate and snapshot the form.
    ///
    /// On failure the modal stays open with the error shown and no request
    /// must be issued.
    pub fn begin_submit(&mut self) -> Result<Submission<E>, ValidationError> {
        let target = match &self.mode {
            Some(ModalMode::Add) => SubmitTarget::Create,
            Some(ModalMode::Edit(id)) => SubmitTarget::Update(id.clone()),
            Some(ModalMode::View(_)) | None => return Err(ValidationError::ReadOnly),
        };
        let checked = check_required::<E>(&self.values, self.attachment.is_some())
            .and_then(|_| E::draft_from_form(&self.values).map(|_| ()));
        if let Err(e) = checked {
            self.error = Some(e.user_message());
            return Err(e);
        }
        self.error = None;
        self.submitting = true;
        Ok(Submission {
            target,
            values: self.values.clone(),
            attachment: self.attachment.clone(),
        })
    }

    /// The open form is still waiting for the response to `target`
    pub fn awaits(&self, target: &SubmitTarget<E::Id>) -> bool {
        if !self.submitting {
            return false;
        }
        match (&self.mode, target) {
            (Some(ModalMode::Add), SubmitTarget::Create) => true,
            (Some(ModalMode::Edit(open)), SubmitTarget::Update(id)) => open == id,
            _ => false,
        }
    }

    pub fn succeed(&mut self) {
        self.close();
    }

    /// Keep the fields intact and show the error
    pub fn fail(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.error = Some(message.into());
    }
}
