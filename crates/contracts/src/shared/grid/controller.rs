use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

use super::editor::{EditorRefusal, RowEditor};
use super::{EditState, FilterSet, GridEntity, Repository, RepositoryError, VersionedCache};
use crate::shared::validation::{Bindable, ValidationErrors};

/// Текст блокирующего окна при попытке удалить используемую запись
pub const DELETE_BLOCKED_MESSAGE: &str = "Не удалось удалить запись, так как она используется.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("Не удалось удалить запись, так как она используется.")]
    ReferentialIntegrity,

    #[error("Другая строка уже редактируется")]
    EditorBusy,

    #[error("Нет открытой строки для редактирования")]
    NoActiveEdit,

    #[error("Запись не найдена")]
    NotFound,

    #[error("Ошибка хранилища: {0}")]
    Repository(String),
}

impl From<RepositoryError> for GridError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::ReferentialIntegrity(_) => GridError::ReferentialIntegrity,
            RepositoryError::NotFound => GridError::NotFound,
            RepositoryError::Rejected(errors) => GridError::Validation(errors),
            RepositoryError::Other(message) => GridError::Repository(message),
        }
    }
}

impl From<EditorRefusal> for GridError {
    fn from(r: EditorRefusal) -> Self {
        match r {
            EditorRefusal::Busy => GridError::EditorBusy,
            EditorRefusal::NotOpen => GridError::NoActiveEdit,
        }
    }
}

struct GridState<E: GridEntity> {
    cache: VersionedCache<E>,
    filters: FilterSet<E>,
    editor: RowEditor<E>,
}

/// Контроллер таблицы над репозиторием.
///
/// Клонирование дешёвое: клоны разделяют одно состояние. Блокировка
/// состояния никогда не удерживается через `.await`.
pub struct GridController<E: GridEntity, R: Repository<E>> {
    repository: Arc<R>,
    state: Arc<Mutex<GridState<E>>>,
}

impl<E: GridEntity, R: Repository<E>> Clone for GridController<E, R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            state: Arc::clone(&self.state),
        }
    }
}

impl<E: GridEntity, R: Repository<E>> GridController<E, R> {
    /// Контроллер с пустым, ещё не загруженным списком
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            state: Arc::new(Mutex::new(GridState {
                cache: VersionedCache::new(),
                filters: FilterSet::new(),
                editor: RowEditor::new(),
            })),
        }
    }

    /// Создать контроллер и сразу загрузить список
    pub async fn load(repository: R) -> Result<Self, GridError> {
        let grid = Self::new(repository);
        grid.refresh().await?;
        Ok(grid)
    }

    fn lock(&self) -> MutexGuard<'_, GridState<E>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    // ============================================================================
    // Список
    // ============================================================================

    /// Полная перезагрузка списка из репозитория
    pub async fn refresh(&self) -> Result<(), GridError> {
        let rows = self.repository.find_all().await?;
        let count = rows.len();
        let version = self.lock().cache.replace(rows);
        log::debug!("{}: loaded {} rows (version {})", E::full_name(), count, version);
        Ok(())
    }

    /// Все записи последней загрузки
    pub fn rows(&self) -> Vec<E> {
        self.lock().cache.rows().to_vec()
    }

    /// Записи последней загрузки, прошедшие все фильтры
    pub fn visible(&self) -> Vec<E> {
        let state = self.lock();
        state.filters.apply(state.cache.rows())
    }

    pub fn version(&self) -> u64 {
        self.lock().cache.version()
    }

    pub fn find(&self, id: E::Id) -> Option<E> {
        self.lock()
            .cache
            .rows()
            .iter()
            .find(|row| row.id() == Some(id))
            .cloned()
    }

    // ============================================================================
    // Фильтры
    // ============================================================================

    /// Пустое значение снимает фильтр колонки
    pub fn set_filter<F>(&self, column: &str, value: &str, matcher: F)
    where
        F: Fn(&E, &str) -> bool + Send + Sync + 'static,
    {
        self.lock().filters.set(column, value, matcher);
    }

    pub fn clear_filters(&self) {
        self.lock().filters.clear();
    }

    // ============================================================================
    // Создание
    // ============================================================================

    /// Проверить форму, создать новую запись и перезагрузить список
    pub async fn create(&self, form: &E::Dto) -> Result<E, GridError> {
        let entity = form.create_bean().map_err(|errors| {
            log::debug!("{}: create rejected: {}", E::full_name(), errors);
            GridError::Validation(errors)
        })?;
        let saved = self.repository.save(entity).await?;
        self.refresh().await?;
        Ok(saved)
    }

    // ============================================================================
    // Построчное редактирование
    // ============================================================================

    pub fn edit_state(&self) -> EditState<E::Id> {
        self.lock().editor.state()
    }

    /// Кнопки редактирования доступны, только пока ни одна строка не открыта
    pub fn can_begin_edit(&self) -> bool {
        self.edit_state().is_idle()
    }

    /// Открыть строку на редактирование; возвращает копию формы
    pub fn begin_edit(&self, id: E::Id) -> Result<E::Dto, GridError> {
        let mut state = self.lock();
        if !state.editor.state().is_idle() {
            return Err(GridError::EditorBusy);
        }
        let row = state
            .cache
            .rows()
            .iter()
            .find(|row| row.id() == Some(id))
            .cloned()
            .ok_or(GridError::NotFound)?;
        Ok(state.editor.open(id, &row)?)
    }

    pub fn edit_buffer(&self) -> Option<E::Dto> {
        self.lock().editor.buffer().cloned()
    }

    /// Изменить буфер открытой строки
    pub fn update_buffer<F>(&self, f: F) -> Result<(), GridError>
    where
        F: FnOnce(&mut E::Dto),
    {
        let mut state = self.lock();
        f(state.editor.buffer_mut()?);
        Ok(())
    }

    /// Закрыть редактор без сохранения
    pub fn cancel_edit(&self) {
        self.lock().editor.close();
    }

    /// Сохранить открытую строку.
    ///
    /// При ошибке валидации строка остаётся открытой, запись не меняется.
    pub async fn save_edit(&self) -> Result<E, GridError> {
        let target = {
            let mut state = self.lock();
            let (mut target, buffer) = state.editor.snapshot()?;
            if let Err(errors) = buffer.commit(&mut target) {
                log::debug!("{}: edit rejected: {}", E::full_name(), errors);
                return Err(GridError::Validation(errors));
            }
            state.editor.mark_saving();
            target
        };

        match self.repository.save(target).await {
            Ok(saved) => {
                self.lock().editor.close();
                self.refresh().await?;
                Ok(saved)
            }
            Err(e) => {
                log::warn!("{}: save failed: {}", E::full_name(), e);
                self.lock().editor.resume();
                Err(e.into())
            }
        }
    }

    // ============================================================================
    // Удаление
    // ============================================================================

    /// Удалить запись.
    ///
    /// Если запись используется, удаление отменяется, а строка остаётся
    /// в списке. Редактор закрывается, только если открыта эта же строка.
    pub async fn delete(&self, id: E::Id) -> Result<(), GridError> {
        match self.repository.delete_by_id(id).await {
            Ok(()) => {
                self.lock().editor.close_row(id);
                self.refresh().await
            }
            Err(RepositoryError::ReferentialIntegrity(reason)) => {
                log::warn!("{}: delete of {:?} blocked: {}", E::full_name(), id, reason);
                self.lock().editor.close_row(id);
                Err(GridError::ReferentialIntegrity)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_doctor::aggregate::{Doctor, DoctorDto, DoctorId};
    use crate::domain::a003_formula::aggregate::{Formula, FormulaDto, FormulaId};
    use crate::domain::a003_formula::filters;
    use crate::domain::common::PersonNameDto;
    use crate::enums::FormulaPriority;
    use crate::shared::grid::memory::InMemoryRepository;
    use chrono::NaiveDate;

    type DoctorGrid = GridController<Doctor, InMemoryRepository<Doctor>>;

    fn doctor_form(name: &str, last_name: &str) -> DoctorDto {
        DoctorDto {
            person: PersonNameDto {
                name: name.into(),
                last_name: last_name.into(),
                patronymic: "Иванович".into(),
            },
            specialization: "Терапевт".into(),
        }
    }

    fn doctor_repo() -> InMemoryRepository<Doctor> {
        InMemoryRepository::new(|d: &mut Doctor, n| d.id = Some(DoctorId(n)))
    }

    async fn grid_with_doctors(names: &[&str]) -> DoctorGrid {
        let grid = GridController::load(doctor_repo()).await.unwrap();
        for name in names {
            grid.create(&doctor_form(name, "Петров")).await.unwrap();
        }
        grid
    }

    #[tokio::test]
    async fn refresh_is_idempotent_and_order_stable() {
        let grid = grid_with_doctors(&["Анна", "Борис", "Виктор"]).await;
        let first = grid.rows();
        let version = grid.version();

        grid.refresh().await.unwrap();
        grid.refresh().await.unwrap();

        assert_eq!(grid.rows(), first);
        assert_eq!(grid.version(), version + 2);
    }

    #[tokio::test]
    async fn create_trims_fields_and_reloads() {
        let grid = grid_with_doctors(&[]).await;
        let saved = grid.create(&doctor_form("  Анна ", " Петрова  ")).await.unwrap();

        assert_eq!(saved.id, Some(DoctorId(1)));
        let rows = grid.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].person.name, "Анна");
        assert_eq!(rows[0].person.last_name, "Петрова");
    }

    #[tokio::test]
    async fn invalid_create_never_reaches_repository() {
        let grid = grid_with_doctors(&[]).await;
        let err = grid.create(&doctor_form("Ан", "Петрова")).await.unwrap_err();

        match err {
            GridError::Validation(errors) => {
                assert_eq!(errors.message_for("name"), Some("Имя не корректно"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(grid.repository().save_count(), 0);
        assert!(grid.rows().is_empty());
    }

    #[tokio::test]
    async fn only_one_row_is_editable_at_a_time() {
        let grid = grid_with_doctors(&["Анна", "Борис"]).await;

        grid.begin_edit(DoctorId(1)).unwrap();
        assert_eq!(grid.edit_state(), EditState::Editing(DoctorId(1)));
        assert!(!grid.can_begin_edit());
        assert_eq!(grid.begin_edit(DoctorId(2)), Err(GridError::EditorBusy));

        grid.cancel_edit();
        assert!(grid.can_begin_edit());
        assert!(grid.begin_edit(DoctorId(2)).is_ok());
    }

    #[tokio::test]
    async fn cancel_discards_buffered_changes() {
        let grid = grid_with_doctors(&["Анна"]).await;
        let saves = grid.repository().save_count();

        grid.begin_edit(DoctorId(1)).unwrap();
        grid.update_buffer(|form| form.person.name = "Мария".into())
            .unwrap();
        assert_eq!(grid.edit_buffer().unwrap().person.name, "Мария");
        grid.cancel_edit();

        assert_eq!(grid.rows()[0].person.name, "Анна");
        assert_eq!(grid.edit_buffer(), None);
        assert_eq!(grid.repository().save_count(), saves);
        assert_eq!(
            grid.update_buffer(|form| form.person.name.clear()),
            Err(GridError::NoActiveEdit)
        );
    }

    #[tokio::test]
    async fn invalid_edit_keeps_session_open_and_row_intact() {
        let grid = grid_with_doctors(&["Анна"]).await;
        let saves = grid.repository().save_count();

        grid.begin_edit(DoctorId(1)).unwrap();
        grid.update_buffer(|form| {
            form.person.name = "Мария".into();
            form.specialization = "  ".into();
        })
        .unwrap();

        let err = grid.save_edit().await.unwrap_err();
        assert!(matches!(err, GridError::Validation(_)));
        assert_eq!(grid.edit_state(), EditState::Editing(DoctorId(1)));
        assert_eq!(grid.repository().save_count(), saves);
        assert_eq!(grid.repository().snapshot()[0].person.name, "Анна");
    }

    #[tokio::test]
    async fn valid_edit_is_saved_and_closes_editor() {
        let grid = grid_with_doctors(&["Анна"]).await;

        grid.begin_edit(DoctorId(1)).unwrap();
        grid.update_buffer(|form| form.specialization = " Хирург ".into())
            .unwrap();
        let saved = grid.save_edit().await.unwrap();

        assert_eq!(saved.specialization, "Хирург");
        assert!(grid.edit_state().is_idle());
        assert_eq!(grid.rows()[0].specialization, "Хирург");
    }

    #[tokio::test]
    async fn failed_save_returns_to_editing() {
        let grid = grid_with_doctors(&["Анна"]).await;
        grid.repository().fail_saves(true);

        grid.begin_edit(DoctorId(1)).unwrap();
        let err = grid.save_edit().await.unwrap_err();

        assert_eq!(err, GridError::Repository("disk full".into()));
        assert_eq!(grid.edit_state(), EditState::Editing(DoctorId(1)));
    }

    #[tokio::test]
    async fn referenced_row_survives_delete() {
        let grid = grid_with_doctors(&["Анна", "Борис"]).await;
        grid.repository().mark_referenced(DoctorId(1));
        grid.begin_edit(DoctorId(1)).unwrap();
        let before = grid.rows();

        let err = grid.delete(DoctorId(1)).await.unwrap_err();

        assert_eq!(err, GridError::ReferentialIntegrity);
        assert_eq!(err.to_string(), DELETE_BLOCKED_MESSAGE);
        assert!(grid.edit_state().is_idle());
        grid.refresh().await.unwrap();
        assert_eq!(grid.rows(), before);
    }

    #[tokio::test]
    async fn unreferenced_delete_removes_exactly_one_row() {
        let grid = grid_with_doctors(&["Анна", "Борис", "Виктор"]).await;
        grid.repository().mark_referenced(DoctorId(1));

        grid.delete(DoctorId(2)).await.unwrap();

        let ids: Vec<_> = grid.rows().iter().filter_map(|d| d.id).collect();
        assert_eq!(ids, vec![DoctorId(1), DoctorId(3)]);
    }

    #[tokio::test]
    async fn deleting_another_row_keeps_open_edit() {
        let grid = grid_with_doctors(&["Анна", "Борис", "Виктор"]).await;

        grid.begin_edit(DoctorId(1)).unwrap();
        grid.update_buffer(|form| form.person.name = "Мария".into())
            .unwrap();
        grid.delete(DoctorId(2)).await.unwrap();

        assert_eq!(grid.edit_state(), EditState::Editing(DoctorId(1)));
        assert_eq!(grid.edit_buffer().unwrap().person.name, "Мария");
        assert_eq!(grid.rows().len(), 2);

        let saved = grid.save_edit().await.unwrap();
        assert_eq!(saved.person.name, "Мария");
    }

    #[tokio::test]
    async fn blocked_delete_of_another_row_keeps_open_edit() {
        let grid = grid_with_doctors(&["Анна", "Борис"]).await;
        grid.repository().mark_referenced(DoctorId(2));

        grid.begin_edit(DoctorId(1)).unwrap();
        let err = grid.delete(DoctorId(2)).await.unwrap_err();

        assert_eq!(err, GridError::ReferentialIntegrity);
        assert_eq!(grid.edit_state(), EditState::Editing(DoctorId(1)));
    }

    #[tokio::test]
    async fn deleting_edited_row_closes_editor() {
        let grid = grid_with_doctors(&["Анна", "Борис"]).await;

        grid.begin_edit(DoctorId(2)).unwrap();
        grid.delete(DoctorId(2)).await.unwrap();

        assert!(grid.edit_state().is_idle());
        assert_eq!(grid.edit_buffer(), None);
    }

    #[tokio::test]
    async fn saving_row_refuses_new_edits() {
        let grid = grid_with_doctors(&["Анна", "Борис"]).await;
        let gate = grid.repository().hold_saves();

        grid.begin_edit(DoctorId(1)).unwrap();
        grid.update_buffer(|form| form.specialization = "Хирург".into())
            .unwrap();

        let (saved, ()) = tokio::join!(grid.save_edit(), async {
            while grid.edit_state() != EditState::Saving(DoctorId(1)) {
                tokio::task::yield_now().await;
            }
            assert!(!grid.can_begin_edit());
            assert_eq!(grid.begin_edit(DoctorId(2)), Err(GridError::EditorBusy));
            assert_eq!(
                grid.update_buffer(|form| form.specialization.clear()),
                Err(GridError::EditorBusy)
            );
            gate.notify_one();
        });

        assert_eq!(saved.unwrap().specialization, "Хирург");
        assert!(grid.edit_state().is_idle());
        assert_eq!(grid.rows()[0].specialization, "Хирург");
    }

    #[tokio::test]
    async fn filters_apply_to_loaded_snapshot() {
        let repo = InMemoryRepository::new(|f: &mut Formula, n| f.id = Some(FormulaId(n)));
        let grid = GridController::<Formula, _>::load(repo).await.unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 5, 1);
        for (description, priority) in [
            ("Аспирин 100 мг", FormulaPriority::Normal),
            ("аспирин кардио", FormulaPriority::Immediate),
            ("Ибупрофен", FormulaPriority::Normal),
        ] {
            let form = FormulaDto {
                description: description.into(),
                priority: Some(priority),
                doctor_id: Some(DoctorId(1)),
                patient_id: None,
                creation_date: day,
                validity_date: day,
            };
            grid.create(&form).await.unwrap();
        }

        grid.set_filter(filters::DESCRIPTION, "АСПИРИН", filters::description_contains);
        assert_eq!(grid.visible().len(), 2);

        grid.set_filter(filters::PRIORITY, "Normal", filters::priority_matches);
        let visible = grid.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].description, "Аспирин 100 мг");

        grid.clear_filters();
        assert_eq!(grid.visible(), grid.rows());
    }
}
