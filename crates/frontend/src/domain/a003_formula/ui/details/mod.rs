use super::ReferenceLists;
use crate::shared::components::date_input::DateInput;
use crate::shared::components::select_field::SelectField;
use crate::shared::components::text_field::{field_error, TextField};
use crate::shared::grid_handle::GridHandle;
use chrono::NaiveDate;
use contracts::domain::a001_doctor::aggregate::DoctorId;
use contracts::domain::a002_patient::aggregate::PatientId;
use contracts::domain::a003_formula::aggregate::{Formula, FormulaDto};
use contracts::domain::common::AggregateId;
use contracts::enums::FormulaPriority;
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;

fn priority_options() -> Vec<(String, String)> {
    FormulaPriority::all()
        .into_iter()
        .map(|p| (p.code().to_string(), p.display_name().to_string()))
        .collect()
}

#[component]
pub fn DescriptionField(
    form: RwSignal<FormulaDto>,
    errors: RwSignal<ValidationErrors>,
    #[prop(optional)] label: &'static str,
) -> impl IntoView {
    view! {
        <TextField
            label=label
            value=Signal::derive(move || form.with(|f| f.description.clone()))
            on_input=move |v| form.update(|f| f.description = v)
            error=field_error(errors, "description")
        />
    }
}

#[component]
pub fn DoctorPicker(
    form: RwSignal<FormulaDto>,
    errors: RwSignal<ValidationErrors>,
    refs: ReferenceLists,
    #[prop(optional)] label: &'static str,
) -> impl IntoView {
    view! {
        <SelectField
            label=label
            options=refs.doctor_options()
            value=Signal::derive(move || form.with(|f| f.doctor_id.map(|id| id.as_string()).unwrap_or_default()))
            on_change=move |v: String| form.update(|f| f.doctor_id = DoctorId::from_string(&v).ok())
            error=field_error(errors, "doctorId")
            empty_label="Выберите доктора"
        />
    }
}

#[component]
pub fn PatientPicker(
    form: RwSignal<FormulaDto>,
    errors: RwSignal<ValidationErrors>,
    refs: ReferenceLists,
    #[prop(optional)] label: &'static str,
) -> impl IntoView {
    view! {
        <SelectField
            label=label
            options=refs.patient_options()
            value=Signal::derive(move || form.with(|f| f.patient_id.map(|id| id.as_string()).unwrap_or_default()))
            on_change=move |v: String| form.update(|f| f.patient_id = PatientId::from_string(&v).ok())
            error=field_error(errors, "patientId")
            empty_label="Без пациента"
        />
    }
}

#[component]
pub fn PrioritySelect(
    form: RwSignal<FormulaDto>,
    errors: RwSignal<ValidationErrors>,
    #[prop(optional)] label: &'static str,
) -> impl IntoView {
    view! {
        <SelectField
            label=label
            options=Signal::derive(priority_options)
            value=Signal::derive(move || form.with(|f| f.priority.map(|p| p.code().to_string()).unwrap_or_default()))
            on_change=move |v: String| form.update(|f| f.priority = FormulaPriority::from_code(&v))
            error=field_error(errors, "priority")
            empty_label="Выберите приоритет"
        />
    }
}

/// Поле даты рецепта: `creationDate` или `validityDate`
#[component]
pub fn FormulaDateField(
    form: RwSignal<FormulaDto>,
    errors: RwSignal<ValidationErrors>,
    field: &'static str,
    #[prop(optional)] label: &'static str,
) -> impl IntoView {
    let validity = field == "validityDate";
    let value = Signal::derive(move || {
        form.with(|f| if validity { f.validity_date } else { f.creation_date })
    });
    let on_change = move |date: Option<NaiveDate>| {
        form.update(|f| {
            if validity {
                f.validity_date = date;
            } else {
                f.creation_date = date;
            }
        })
    };
    let error = field_error(errors, field);

    view! {
        <label class="field">
            {(!label.is_empty()).then(|| view! { <span class="field__label">{label}</span> })}
            <DateInput value=value on_change=on_change invalid=Signal::derive(move || error.get().is_some()) />
            {move || error.get().map(|message| view! { <span class="field__error">{message}</span> })}
        </label>
    }
}

/// Панель выписки рецепта
#[component]
#[allow(non_snake_case)]
pub fn FormulaCreatePanel(
    grid: GridHandle<Formula>,
    refs: ReferenceLists,
    /// Вызывается после сохранения рецепта
    on_created: Callback<()>,
) -> impl IntoView {
    let form = RwSignal::new(FormulaDto::default());
    let errors = grid.create_errors;

    view! {
        <div class="form-panel">
            <h3 class="form-panel__title">"Новый рецепт"</h3>
            <div class="form-panel__fields">
                <DescriptionField form=form errors=errors label="Описание" />
                <DoctorPicker form=form errors=errors refs=refs label="Доктор" />
                <PatientPicker form=form errors=errors refs=refs label="Пациент" />
                <PrioritySelect form=form errors=errors label="Приоритет" />
                <FormulaDateField form=form errors=errors field="creationDate" label="Дата создания" />
                <FormulaDateField form=form errors=errors field="validityDate" label="Срок действия" />
            </div>
            <button
                class="button button--primary"
                on:click=move |_| grid.create(form, move |_| on_created.run(()))
            >
                "Выписать"
            </button>
        </div>
    }
}
