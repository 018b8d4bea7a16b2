use super::ValidationErrors;

/// Форма, привязанная к сущности.
///
/// Запись идёт по принципу "всё или ничего": сначала проверяются все поля,
/// и только при успехе значения переносятся в сущность.
pub trait Bindable: Clone + Default {
    type Entity;

    /// Заполнить форму значениями сущности
    fn read_bean(entity: &Self::Entity) -> Self;

    /// Проверить все поля формы
    fn validate(&self) -> Result<(), ValidationErrors>;

    /// Перенести значения формы в сущность без проверки
    fn write_bean(&self, target: &mut Self::Entity);

    /// Проверить форму и построить новую (несохранённую) сущность
    fn create_bean(&self) -> Result<Self::Entity, ValidationErrors>;

    /// Проверить форму и, если ошибок нет, записать значения в сущность
    fn commit(&self, target: &mut Self::Entity) -> Result<(), ValidationErrors> {
        self.validate()?;
        self.write_bean(target);
        Ok(())
    }
}
