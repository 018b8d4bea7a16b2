pub mod details;
pub mod list;

use contracts::domain::a001_doctor::aggregate::Doctor;
use contracts::domain::a002_patient::aggregate::Patient;
use contracts::domain::common::{AggregateId, AggregateRoot, NameBearing};
use leptos::prelude::*;

/// Счётчик изменений докторов и пациентов: вкладка "Рецепты"
/// перезагружает по нему списки выбора и подписи в таблице
#[derive(Clone, Copy)]
pub struct ReferencesChanged(pub RwSignal<u64>);

impl ReferencesChanged {
    pub fn new() -> Self {
        Self(RwSignal::new(0))
    }

    pub fn notify(&self) {
        self.0.update(|n| *n += 1);
    }

    /// Сообщать об изменениях, записанных через `changes` таблицы
    pub fn follow(&self, changes: RwSignal<u64>) {
        let this = *self;
        Effect::watch(move || changes.get(), move |_, _, _| this.notify(), false);
    }
}

/// Списки докторов и пациентов для выбора в рецепте.
/// Загружаются независимо от вкладок "Доктора" и "Пациенты".
#[derive(Clone, Copy)]
pub struct ReferenceLists {
    pub doctors: RwSignal<Vec<Doctor>>,
    pub patients: RwSignal<Vec<Patient>>,
}

impl ReferenceLists {
    pub fn new() -> Self {
        Self {
            doctors: RwSignal::new(Vec::new()),
            patients: RwSignal::new(Vec::new()),
        }
    }

    pub fn doctor_options(&self) -> Signal<Vec<(String, String)>> {
        let doctors = self.doctors;
        Signal::derive(move || doctors.with(|list| options(list)))
    }

    pub fn patient_options(&self) -> Signal<Vec<(String, String)>> {
        let patients = self.patients;
        Signal::derive(move || patients.with(|list| options(list)))
    }
}

/// Варианты выбора: ID и "Фамилия Имя"
fn options<E: AggregateRoot + NameBearing>(list: &[E]) -> Vec<(String, String)> {
    list.iter()
        .filter_map(|e| Some((e.id()?.as_string(), e.display_name())))
        .collect()
}

/// Подпись записи по ID или прочерк, если запись не найдена
pub fn label_of<E: AggregateRoot + NameBearing>(list: &[E], id: Option<E::Id>) -> String {
    id.and_then(|id| list.iter().find(|e| e.id() == Some(id)))
        .map(|e| e.display_name())
        .unwrap_or_else(|| "-".to_string())
}
