pub mod api_utils;
pub mod date_utils;
pub mod entity_editor;
pub mod export;
pub mod icons;
pub mod list_utils;
pub mod modal;
pub mod notify;
