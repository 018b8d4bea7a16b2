use crate::domain::a001_doctor::ui::details::DoctorCreatePanel;
use crate::domain::a001_doctor::ui::DoctorsChanged;
use crate::domain::a003_formula::ui::ReferencesChanged;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::text_field::{field_error, TextField};
use crate::shared::grid_handle::GridHandle;
use crate::shared::modal::DeleteBlockedModal;
use contracts::domain::a001_doctor::aggregate::{Doctor, DoctorDto, DoctorId};
use leptos::ev;
use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn DoctorList() -> impl IntoView {
    let grid = GridHandle::<Doctor>::new();
    let edit_form = RwSignal::new(DoctorDto::default());
    let selected = RwSignal::new(None::<DoctorId>);
    let errors = grid.edit_errors;

    // Рецепт, выписанный на другой вкладке, меняет счётчик доктора
    if let Some(changed) = use_context::<DoctorsChanged>() {
        Effect::watch(move || changed.0.get(), move |_, _, _| grid.reload(), false);
    }
    if let Some(references) = use_context::<ReferencesChanged>() {
        references.follow(grid.changes);
    }

    let listener = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" && !grid.can_begin_edit() {
            grid.cancel_edit();
        }
    });
    on_cleanup(move || listener.remove());

    let begin_edit = move |id: DoctorId| {
        if let Some(form) = grid.begin_edit(id) {
            edit_form.set(form);
        }
    };

    let summary = move || {
        let id = selected.get()?;
        grid.visible()
            .into_iter()
            .find(|d| d.id == Some(id))
            .map(|d| d.formula_summary())
    };

    let row_view = move |doctor: Doctor| {
        let Some(id) = doctor.id else {
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
                            value=Signal::derive(move || edit_form.with(|f| f.specialization.clone()))
                            on_input=move |v| edit_form.update(|f| f.specialization = v)
                            error=field_error(errors, "specialization")
                        />
                    </td>
                    <td class="table__cell table__cell--number">{doctor.formula_count}</td>
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
                <tr
                    class="table__row"
                    class:table__row--selected=move || selected.get() == Some(id)
                    on:click=move |_| selected.set(Some(id))
                >
                    <td class="table__cell">{doctor.person.last_name}</td>
                    <td class="table__cell">{doctor.person.name}</td>
                    <td class="table__cell">{doctor.person.patronymic}</td>
                    <td class="table__cell">{doctor.specialization}</td>
                    <td class="table__cell table__cell--number">{doctor.formula_count}</td>
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
                    <h1 class="header__title">{"Доктора"}</h1>
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
                            <th class="table__header-cell">{"Специализация"}</th>
                            <th class="table__header-cell">{"Рецептов"}</th>
                            <th class="table__header-cell"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || grid.visible().into_iter().map(row_view).collect_view()}
                    </tbody>
                </table>
            </div>

            {move || summary().map(|text| view! { <p class="details-line">{text}</p> })}

            <DoctorCreatePanel grid=grid />
            <DeleteBlockedModal show=grid.blocked />
        </div>
    }
}
