use crate::domain::a002_patient::ui::details::PatientCreatePanel;
use crate::domain::a003_formula::ui::ReferencesChanged;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::text_field::{field_error, TextField};
use crate::shared::grid_handle::GridHandle;
use crate::shared::modal::DeleteBlockedModal;
use contracts::domain::a002_patient::aggregate::{Patient, PatientDto, PatientId};
use leptos::ev;
use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn PatientList() -> impl IntoView {
    let grid = GridHandle::<Patient>::new();
    let edit_form = RwSignal::new(PatientDto::default());
    let errors = grid.edit_errors;

    if let Some(references) = use_context::<ReferencesChanged>() {
        references.follow(grid.changes);
    }

    let listener = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" && !grid.can_begin_edit() {
            grid.cancel_edit();
        }
    });
    on_cleanup(move || listener.remove());

    let begin_edit = move |id: PatientId| {
        if let Some(form) = grid.begin_edit(id) {
            edit_form.set(form);
        }
    };

    let row_view = move |patient: Patient| {
        let Some(id) = patient.id else {
            return ().into_any();
        };

        if grid.is_editing(Some(id)) {
            view! {
                <tr class="table__row table__row--editing">
                    <td class="table__cell">
                        <TextField
                            value=Signal::derive(move || edit_form.with(|f| f.person.last_name.clone()))
                            on_input=move |v| edit_form.update(|f| f.person.last_name = v)
                            error=field_error(errors, "lastName")
                        />
                    </td>
                    <td class="table__cell">
                        <TextField
                            value=Signal::derive(move || edit_form.with(|f| f.person.name.clone()))
                            on_input=move |v| edit_form.update(|f| f.person.name = v)
                            error=field_error(errors, "name")
                        />
                    </td>
                    <td class="table__cell">
                        <TextField
                            value=Signal::derive(move || edit_form.with(|f| f.person.patronymic.clone()))
                            on_input=move |v| edit_form.update(|f| f.person.patronymic = v)
                            error=field_error(errors, "patronymic")
                        />
                    </td>
                    <td class="table__cell">
                        <TextField
                            value=Signal::derive(move || edit_form.with(|f| f.phone_number.clone()))
                            on_input=move |v| edit_form.update(|f| f.phone_number = v)
                            error=field_error(errors, "phoneNumber")
                        />
                    </td>
                    <td class="table__cell table__cell--actions">
                        <button class="button button--primary" on:click=move |_| grid.save_edit(edit_form.get_untracked())>
                            "Сохранить"
                        </button>
                        <button class="button button--secondary" on:click=move |_| grid.cancel_edit()>
                            "Отмена"
                        </button>
                    </td>
                </tr>
            }
            .into_any()
        } else {
            view! {
                <tr class="table__row">
                    <td class="table__cell">{patient.person.last_name}</td>
                    <td class="table__cell">{patient.person.name}</td>
                    <td class="table__cell">{patient.person.patronymic}</td>
                    <td class="table__cell">{patient.phone_number}</td>
                    <td class="table__cell table__cell--actions">
                        <button
                            class="button button--secondary"
                            disabled=move || !grid.can_begin_edit()
                            on:click=move |_| begin_edit(id)
                        >
                            "Изменить"
                        </button>
                        <button class="button button--secondary" on:click=move |_| grid.delete(id)>
                            "Удалить"
                        </button>
                    </td>
                </tr>
            }
            .into_any()
        }
    };

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Пациенты"}</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--secondary" on:click=move |_| grid.reload()>
                        {"Обновить"}
                    </button>
                </div>
            </div>

            <ErrorBanner error=grid.error />

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">{"Фамилия"}</th>
                            <th class="table__header-cell">{"Имя"}</th>
                            <th class="table__header-cell">{"Отчество"}</th>
                            <th class="table__header-cell">{"Телефон"}</th>
                            <th class="table__header-cell"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || grid.visible().into_iter().map(row_view).collect_view()}
                    </tbody>
                </table>
            </div>

            <PatientCreatePanel grid=grid />
            <DeleteBlockedModal show=grid.blocked />
        </div>
    }
}
