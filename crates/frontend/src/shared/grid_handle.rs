//! Связка контроллера таблицы с реактивными сигналами leptos.
//!
//! Контроллер живёт вне реактивной системы; после каждого действия
//! увеличивается `tick`, и представления перечитывают его состояние.

use contracts::shared::grid::{EditState, GridController, GridEntity, GridError};
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen_futures::spawn_local;

use super::http_repository::HttpRepository;

pub type HttpGrid<E> = GridController<E, HttpRepository<E>>;

pub struct GridHandle<E>
where
    E: GridEntity + Serialize + DeserializeOwned,
{
    grid: StoredValue<HttpGrid<E>>,
    tick: RwSignal<u64>,
    /// Растёт после каждой успешной записи (создание, сохранение, удаление)
    pub changes: RwSignal<u64>,
    /// Ошибка, не относящаяся к полям формы
    pub error: RwSignal<Option<String>>,
    /// Показать блокирующее окно "запись используется"
    pub blocked: RwSignal<bool>,
    pub create_errors: RwSignal<ValidationErrors>,
    pub edit_errors: RwSignal<ValidationErrors>,
}

impl<E> Clone for GridHandle<E>
where
    E: GridEntity + Serialize + DeserializeOwned,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for GridHandle<E> where E: GridEntity + Serialize + DeserializeOwned {}

impl<E> GridHandle<E>
where
    E: GridEntity + Serialize + DeserializeOwned,
    E::Id: Send + Sync,
{
    /// Создать контроллер и запустить первую загрузку
    pub fn new() -> Self {
        let handle = Self {
            grid: StoredValue::new(GridController::new(HttpRepository::new())),
            tick: RwSignal::new(0),
            changes: RwSignal::new(0),
            error: RwSignal::new(None),
            blocked: RwSignal::new(false),
            create_errors: RwSignal::new(ValidationErrors::new()),
            edit_errors: RwSignal::new(ValidationErrors::new()),
        };
        handle.reload();
        handle
    }

    /// Клон контроллера; клоны разделяют одно состояние
    pub fn controller(&self) -> HttpGrid<E> {
        self.grid.get_value()
    }

    fn touch(&self) {
        self.tick.update(|t| *t += 1);
    }

    fn changed(&self) {
        self.changes.update(|n| *n += 1);
    }

    fn report(&self, err: GridError) {
        log::warn!("{}: {}", E::full_name(), err);
        match err {
            GridError::ReferentialIntegrity => self.blocked.set(true),
            other => self.error.set(Some(other.to_string())),
        }
        self.touch();
    }

    /// Видимые строки; отслеживается реактивно
    pub fn visible(&self) -> Vec<E> {
        self.tick.get();
        self.controller().visible()
    }

    pub fn edit_state(&self) -> EditState<E::Id> {
        self.tick.get();
        self.controller().edit_state()
    }

    pub fn can_begin_edit(&self) -> bool {
        self.edit_state().is_idle()
    }

    pub fn is_editing(&self, id: Option<E::Id>) -> bool {
        match (self.edit_state(), id) {
            (EditState::Editing(open) | EditState::Saving(open), Some(id)) => open == id,
            _ => false,
        }
    }

    pub fn reload(&self) {
        let handle = *self;
        spawn_local(async move {
            match handle.controller().refresh().await {
                Ok(()) => {
                    handle.error.set(None);
                    handle.touch();
                }
                Err(e) => handle.report(e),
            }
        });
    }

    /// Создать запись из формы; при успехе форма очищается
    pub fn create<F>(&self, form: RwSignal<E::Dto>, on_created: F)
    where
        F: FnOnce(E) + 'static,
    {
        let handle = *self;
        let dto = form.get_untracked();
        spawn_local(async move {
            match handle.controller().create(&dto).await {
                Ok(saved) => {
                    form.set(E::Dto::default());
                    handle.create_errors.set(ValidationErrors::new());
                    handle.error.set(None);
                    handle.touch();
                    handle.changed();
                    on_created(saved);
                }
                Err(GridError::Validation(errors)) => handle.create_errors.set(errors),
                Err(e) => handle.report(e),
            }
        });
    }

    /// Открыть строку; возвращает копию формы для полей ввода
    pub fn begin_edit(&self, id: E::Id) -> Option<E::Dto> {
        match self.controller().begin_edit(id) {
            Ok(form) => {
                self.edit_errors.set(ValidationErrors::new());
                self.touch();
                Some(form)
            }
            Err(e) => {
                self.report(e);
                None
            }
        }
    }

    pub fn cancel_edit(&self) {
        self.controller().cancel_edit();
        self.edit_errors.set(ValidationErrors::new());
        self.touch();
    }

    /// Перенести форму в буфер редактора и сохранить строку.
    ///
    /// Поля ввода держат форму в собственном сигнале, чтобы набор текста
    /// не перерисовывал таблицу.
    pub fn save_edit(&self, form: E::Dto) {
        if let Err(e) = self.controller().update_buffer(|buffer| *buffer = form) {
            self.report(e);
            return;
        }
        let handle = *self;
        spawn_local(async move {
            match handle.controller().save_edit().await {
                Ok(_) => {
                    handle.edit_errors.set(ValidationErrors::new());
                    handle.error.set(None);
                    handle.changed();
                }
                Err(GridError::Validation(errors)) => handle.edit_errors.set(errors),
                Err(e) => handle.report(e),
            }
            handle.touch();
        });
    }

    pub fn delete(&self, id: E::Id) {
        let handle = *self;
        spawn_local(async move {
            match handle.controller().delete(id).await {
                Ok(()) => {
                    handle.error.set(None);
                    handle.touch();
                    handle.changed();
                }
                Err(e) => handle.report(e),
            }
        });
    }

    pub fn set_filter<M>(&self, column: &str, value: &str, matcher: M)
    where
        M: Fn(&E, &str) -> bool + Send + Sync + 'static,
    {
        self.controller().set_filter(column, value, matcher);
        self.touch();
    }

    pub fn clear_filters(&self) {
        self.controller().clear_filters();
        self.touch();
    }
}
