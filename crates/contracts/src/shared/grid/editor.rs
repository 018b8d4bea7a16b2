use super::GridEntity;
use crate::shared::validation::Bindable;

/// Состояние сессии построчного редактирования
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState<Id> {
    Idle,
    Editing(Id),
    Saving(Id),
}

impl<Id> EditState<Id> {
    pub fn is_idle(&self) -> bool {
        matches!(self, EditState::Idle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Editing,
    Saving,
}

struct OpenEdit<E: GridEntity> {
    id: E::Id,
    original: E,
    buffer: E::Dto,
    stage: Stage,
}

/// Буферизованный редактор: исходная запись не меняется до явного сохранения.
/// Одновременно открыта не более одной строки.
pub(crate) struct RowEditor<E: GridEntity> {
    open: Option<OpenEdit<E>>,
}

/// Причина, по которой редактор не может выполнить действие
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EditorRefusal {
    Busy,
    NotOpen,
}

impl<E: GridEntity> RowEditor<E> {
    pub(crate) fn new() -> Self {
        Self { open: None }
    }

    pub(crate) fn state(&self) -> EditState<E::Id> {
        match &self.open {
            None => EditState::Idle,
            Some(edit) if edit.stage == Stage::Saving => EditState::Saving(edit.id),
            Some(edit) => EditState::Editing(edit.id),
        }
    }

    /// Idle -> Editing
    pub(crate) fn open(&mut self, id: E::Id, row: &E) -> Result<E::Dto, EditorRefusal> {
        if self.open.is_some() {
            return Err(EditorRefusal::Busy);
        }
        let buffer = E::Dto::read_bean(row);
        self.open = Some(OpenEdit {
            id,
            original: row.clone(),
            buffer: buffer.clone(),
            stage: Stage::Editing,
        });
        Ok(buffer)
    }

    pub(crate) fn buffer(&self) -> Option<&E::Dto> {
        self.open.as_ref().map(|edit| &edit.buffer)
    }

    pub(crate) fn buffer_mut(&mut self) -> Result<&mut E::Dto, EditorRefusal> {
        match self.open.as_mut() {
            None => Err(EditorRefusal::NotOpen),
            Some(edit) if edit.stage == Stage::Saving => Err(EditorRefusal::Busy),
            Some(edit) => Ok(&mut edit.buffer),
        }
    }

    /// Копия исходной записи и буфера для сохранения
    pub(crate) fn snapshot(&self) -> Result<(E, E::Dto), EditorRefusal> {
        match self.open.as_ref() {
            None => Err(EditorRefusal::NotOpen),
            Some(edit) if edit.stage == Stage::Saving => Err(EditorRefusal::Busy),
            Some(edit) => Ok((edit.original.clone(), edit.buffer.clone())),
        }
    }

    /// Editing -> Saving
    pub(crate) fn mark_saving(&mut self) {
        if let Some(edit) = self.open.as_mut() {
            edit.stage = Stage::Saving;
        }
    }

    /// Saving -> Editing (сохранение не удалось)
    pub(crate) fn resume(&mut self) {
        if let Some(edit) = self.open.as_mut() {
            edit.stage = Stage::Editing;
        }
    }

    /// Любое состояние -> Idle; буфер отбрасывается
    pub(crate) fn close(&mut self) {
        self.open = None;
    }

    /// Закрыть редактор, только если открыта строка `id`
    pub(crate) fn close_row(&mut self, id: E::Id) {
        if self.open.as_ref().is_some_and(|edit| edit.id == id) {
            self.open = None;
        }
    }
}
