pub mod details;
pub mod list;

use leptos::prelude::*;

/// Счётчик изменений списка докторов вне вкладки "Доктора"
/// (например, после выписки рецепта)
#[derive(Clone, Copy)]
pub struct DoctorsChanged(pub RwSignal<u64>);

impl DoctorsChanged {
    pub fn new() -> Self {
        Self(RwSignal::new(0))
    }

    pub fn notify(&self) {
        self.0.update(|n| *n += 1);
    }
}
