use crate::domain::a001_doctor::ui::list::DoctorList;
use crate::domain::a001_doctor::ui::DoctorsChanged;
use crate::domain::a002_patient::ui::list::PatientList;
use crate::domain::a003_formula::ui::list::FormulaList;
use crate::domain::a003_formula::ui::ReferencesChanged;
use crate::domain::contacts::ContactsView;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Patients,
    Doctors,
    Formulas,
    Contacts,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Patients, Tab::Doctors, Tab::Formulas, Tab::Contacts];

    fn title(self) -> &'static str {
        match self {
            Tab::Patients => "Пациенты",
            Tab::Doctors => "Доктора",
            Tab::Formulas => "Рецепты",
            Tab::Contacts => "Контакты",
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(DoctorsChanged::new());
    provide_context(ReferencesChanged::new());

    let active = RwSignal::new(Tab::Patients);

    // Вкладки остаются смонтированными, чтобы не терять фильтры и формы
    let panel = move |tab: Tab| move || if active.get() == tab { "" } else { "display: none;" };

    view! {
        <div class="app">
            <nav class="tabs">
                {Tab::ALL
                    .into_iter()
                    .map(|tab| {
                        view! {
                            <button
                                class="tabs__tab"
                                class:tabs__tab--active=move || active.get() == tab
                                on:click=move |_| active.set(tab)
                            >
                                {tab.title()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
            <section style=panel(Tab::Patients)><PatientList /></section>
            <section style=panel(Tab::Doctors)><DoctorList /></section>
            <section style=panel(Tab::Formulas)><FormulaList /></section>
            <section style=panel(Tab::Contacts)><ContactsView /></section>
        </div>
    }
}
