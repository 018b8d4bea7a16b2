use crate::shared::components::text_field::{field_error, TextField};
use crate::shared::grid_handle::GridHandle;
use contracts::domain::a001_doctor::aggregate::{Doctor, DoctorDto};
use leptos::prelude::*;

/// Панель добавления доктора
#[component]
#[allow(non_snake_case)]
pub fn DoctorCreatePanel(grid: GridHandle<Doctor>) -> impl IntoView {
    let form = RwSignal::new(DoctorDto::default());
    let errors = grid.create_errors;

    view! {
        <div class="form-panel">
            <h3 class="form-panel__title">"Новый доктор"</h3>
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
                    label="Специализация"
                    value=Signal::derive(move || form.with(|f| f.specialization.clone()))
                    on_input=move |v| form.update(|f| f.specialization = v)
                    error=field_error(errors, "specialization")
                />
            </div>
            <button class="button button--primary" on:click=move |_| grid.create(form, |_| ())>
                "Добавить"
            </button>
        </div>
    }
}
