use crate::shared::components::text_field::{field_error, TextField};
use crate::shared::grid_handle::GridHandle;
use contracts::domain::a002_patient::aggregate::{Patient, PatientDto};
use leptos::prelude::*;

/// Панель добавления пациента
#[component]
#[allow(non_snake_case)]
pub fn PatientCreatePanel(grid: GridHandle<Patient>) -> impl IntoView {
    let form = RwSignal::new(PatientDto::default());
    let errors = grid.create_errors;

    view! {
        <div class="form-panel">
            <h3 class="form-panel__title">"Новый пациент"</h3>
            <div class="form-panel__fields">
                <TextField
                    label="Фамилия"
                    value=Signal::derive(move || form.with(|f| f.person.last_name.clone()))
                    on_input=move |v| form.update(|f| f.person.last_name = v)
                    error=field_error(errors, "lastName")
                />
                <TextField
                    label="Имя"
                    value=Signal::derive(move || form.with(|f| f.person.name.clone()))
                    on_input=move |v| form.update(|f| f.person.name = v)
                    error=field_error(errors, "name")
                />
                <TextField
                    label="Отчество"
                    value=Signal::derive(move || form.with(|f| f.person.patronymic.clone()))
                    on_input=move |v| form.update(|f| f.person.patronymic = v)
                    error=field_error(errors, "patronymic")
                />
                <TextField
                    label="Телефон"
                    placeholder="+7 (900) 000-00-00"
                    value=Signal::derive(move || form.with(|f| f.phone_number.clone()))
                    on_input=move |v| form.update(|f| f.phone_number = v)
                    error=field_error(errors, "phoneNumber")
                />
            </div>
            <button class="button button--primary" on:click=move |_| grid.create(form, |_| ())>
                "Добавить"
            </button>
        </div>
    }
}
