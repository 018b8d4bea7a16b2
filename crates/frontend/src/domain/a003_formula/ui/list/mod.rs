use super::details::{
    DescriptionField, DoctorPicker, FormulaCreatePanel, FormulaDateField, PatientPicker,
    PrioritySelect,
};
use super::{label_of, ReferenceLists, ReferencesChanged};
use crate::domain::a001_doctor::ui::DoctorsChanged;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::select_field::SelectField;
use crate::shared::grid_handle::GridHandle;
use crate::shared::http_repository::HttpRepository;
use crate::shared::modal::DeleteBlockedModal;
use chrono::NaiveDate;
use contracts::domain::a001_doctor::aggregate::Doctor;
use contracts::domain::a002_patient::aggregate::Patient;
use contracts::domain::a003_formula::aggregate::{Formula, FormulaDto, FormulaId};
use contracts::domain::a003_formula::filters;
use contracts::enums::FormulaPriority;
use contracts::shared::grid::Repository;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Перезагрузить списки выбора докторов и пациентов
fn load_reference_lists(refs: ReferenceLists, error: RwSignal<Option<String>>) {
    spawn_local(async move {
        match HttpRepository::<Doctor>::new().find_all().await {
            Ok(list) => refs.doctors.set(list),
            Err(e) => error.set(Some(format!("Ошибка загрузки докторов: {}", e))),
        }
        match HttpRepository::<Patient>::new().find_all().await {
            Ok(list) => refs.patients.set(list),
            Err(e) => error.set(Some(format!("Ошибка загрузки пациентов: {}", e))),
        }
    });
}

#[component]
#[allow(non_snake_case)]
pub fn FormulaList() -> impl IntoView {
    let grid = GridHandle::<Formula>::new();
    let refs = ReferenceLists::new();
    let edit_form = RwSignal::new(FormulaDto::default());
    let errors = grid.edit_errors;
    let doctors_changed = use_context::<DoctorsChanged>();

    load_reference_lists(refs, grid.error);

    // Доктор или пациент изменён на своей вкладке
    if let Some(references) = use_context::<ReferencesChanged>() {
        Effect::watch(
            move || references.0.get(),
            move |_, _, _| load_reference_lists(refs, grid.error),
            false,
        );
    }

    // Фильтры
    let description_filter = RwSignal::new(String::new());
    let patient_filter = RwSignal::new(String::new());
    let priority_filter = RwSignal::new(String::new());

    let listener = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" && !grid.can_begin_edit() {
            grid.cancel_edit();
        }
    });
    on_cleanup(move || listener.remove());

    let begin_edit = move |id: FormulaId| {
        if let Some(form) = grid.begin_edit(id) {
            edit_form.set(form);
        }
    };

    // Счётчик доктора меняется на сервере вместе с рецептом
    let on_created = Callback::new(move |_| {
        load_reference_lists(refs, grid.error);
        if let Some(changed) = doctors_changed {
            changed.notify();
        }
    });

    let reset_filters = move |_: ev::MouseEvent| {
        description_filter.set(String::new());
        patient_filter.set(String::new());
        priority_filter.set(String::new());
        grid.clear_filters();
    };

    let row_view = move |formula: Formula| {
        let Some(id) = formula.id else {
            return ().into_any();
        };

        if grid.is_editing(Some(id)) {
            view! {
                <tr class="table__row table__row--editing">
                    <td class="table__cell"><DescriptionField form=edit_form errors=errors /></td>
                    <td class="table__cell"><DoctorPicker form=edit_form errors=errors refs=refs /></td>
                    <td class="table__cell"><PatientPicker form=edit_form errors=errors refs=refs /></td>
                    <td class="table__cell"><PrioritySelect form=edit_form errors=errors /></td>
                    <td class="table__cell"><FormulaDateField form=edit_form errors=errors field="creationDate" /></td>
                    <td class="table__cell"><FormulaDateField form=edit_form errors=errors field="validityDate" /></td>
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
            let doctor = move || refs.doctors.with(|list| label_of(list, Some(formula.doctor_id)));
            let patient = move || refs.patients.with(|list| label_of(list, formula.patient_id));
            view! {
                <tr class="table__row">
                    <td class="table__cell">{formula.description.clone()}</td>
                    <td class="table__cell">{doctor}</td>
                    <td class="table__cell">{patient}</td>
                    <td class="table__cell">{formula.priority.display_name()}</td>
                    <td class="table__cell">{format_date(formula.creation_date)}</td>
                    <td class="table__cell">{format_date(formula.validity_date)}</td>
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
                    <h1 class="header__title">{"Рецепты"}</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--secondary" on:click=move |_| {
                        grid.reload();
                        load_reference_lists(refs, grid.error);
                    }>
                        {"Обновить"}
                    </button>
                </div>
            </div>

            <ErrorBanner error=grid.error />

            <div class="filter-panel">
                <label class="field">
                    <span class="field__label">"Описание"</span>
                    <input
                        type="text"
                        class="field__input"
                        placeholder="Поиск по описанию"
                        prop:value=move || description_filter.get()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            grid.set_filter(filters::DESCRIPTION, &value, filters::description_contains);
                            description_filter.set(value);
                        }
                    />
                </label>
                <SelectField
                    label="Пациент"
                    options=refs.patient_options()
                    value=patient_filter
                    on_change=move |value: String| {
                        grid.set_filter(filters::PATIENT, &value, filters::patient_is);
                        patient_filter.set(value);
                    }
                    empty_label="Все"
                />
                <SelectField
                    label="Приоритет"
                    options=Signal::derive(|| {
                        FormulaPriority::all()
                            .into_iter()
                            .map(|p| (p.code().to_string(), p.display_name().to_string()))
                            .collect::<Vec<_>>()
                    })
                    value=priority_filter
                    on_change=move |value: String| {
                        grid.set_filter(filters::PRIORITY, &value, filters::priority_matches);
                        priority_filter.set(value);
                    }
                    empty_label="Все"
                />
                <button class="button button--secondary" on:click=reset_filters>
                    "Сбросить"
                </button>
            </div>

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">{"Описание"}</th>
                            <th class="table__header-cell">{"Доктор"}</th>
                            <th class="table__header-cell">{"Пациент"}</th>
                            <th class="table__header-cell">{"Приоритет"}</th>
                            <th class="table__header-cell">{"Создан"}</th>
                            <th class="table__header-cell">{"Действует до"}</th>
                            <th class="table__header-cell"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || grid.visible().into_iter().map(row_view).collect_view()}
                    </tbody>
                </table>
            </div>

            <FormulaCreatePanel grid=grid refs=refs on_created=on_created />
            <DeleteBlockedModal show=grid.blocked />
        </div>
    }
}
