use super::EntityId;
use serde::{de::DeserializeOwned, Serialize};

/// Трейт для записи, которую экран показывает списком и редактирует в модальном окне.
///
/// Определяет идентификатор записи и статические метаданные ресурса.
pub trait ListEntity: Clone + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Тип идентификатора
    type Id: EntityId;

    // ============================================================================
    // Методы экземпляра
    // ============================================================================

    /// Получить ID записи
    fn id(&self) -> Self::Id;

    /// Краткое название записи для сообщений ("Alice Smith", "resume.pdf")
    fn display_name(&self) -> String;

    // ============================================================================
    // Метаданные ресурса (статические данные)
    // ============================================================================

    /// Имя коллекции (например, "employees")
    fn collection_name() -> &'static str;

    /// Имя элемента для UI (единственное число, например, "Employee")
    fn element_name() -> &'static str;

    /// Имя списка для UI (множественное число, например, "Employees")
    fn list_name() -> &'static str;
}
