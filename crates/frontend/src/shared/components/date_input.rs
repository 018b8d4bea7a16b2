use chrono::NaiveDate;
use leptos::prelude::*;

/// Поле даты с нативным календарём браузера.
/// Пустое или неразборчивое значение передаётся как `None`.
#[component]
pub fn DateInput(
    #[prop(into)] value: Signal<Option<NaiveDate>>,
    on_change: impl Fn(Option<NaiveDate>) + 'static,
    #[prop(optional, into)] invalid: Signal<bool>,
) -> impl IntoView {
    view! {
        <input
            type="date"
            class="field__input"
            class:field__input--invalid=move || invalid.get()
            prop:value=move || value.get().map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
            on:input=move |ev| {
                let raw = event_target_value(&ev);
                on_change(NaiveDate::parse_from_str(&raw, "%Y-%m-%d").ok());
            }
        />
    }
}
