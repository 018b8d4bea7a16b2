use super::AggregateId;

/// Трейт для корня агрегата
///
/// Определяет идентичность записи и метаданные класса агрегата,
/// общие для репозиториев, обработчиков API и списков UI.
pub trait AggregateRoot {
    /// Тип идентификатора агрегата
    type Id: AggregateId;

    // ============================================================================
    // Методы экземпляра
    // ============================================================================

    /// ID записи; `None`, пока запись не сохранена
    fn id(&self) -> Option<Self::Id>;

    // ============================================================================
    // Метаданные класса агрегата (статические данные)
    // ============================================================================

    /// Индекс агрегата в системе (например, "a001")
    fn aggregate_index() -> &'static str;

    /// Имя коллекции для БД и API (например, "doctor")
    fn collection_name() -> &'static str;

    /// Имя элемента для UI (единственное число, например, "Доктор")
    fn element_name() -> &'static str;

    /// Имя списка для UI (множественное число, например, "Доктора")
    fn list_name() -> &'static str;

    /// Полное имя агрегата для системы (например, "a001_doctor")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }

    /// Признак новой (ещё не сохранённой) записи
    fn is_transient(&self) -> bool {
        self.id().is_none()
    }
}
