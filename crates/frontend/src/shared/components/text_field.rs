use leptos::prelude::*;

/// Текстовое поле с сообщением об ошибке под ним.
/// Без подписи используется в ячейках редактируемой строки.
#[component]
pub fn TextField(
    #[prop(optional)] label: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: impl Fn(String) + 'static,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView {
    view! {
        <label class="field">
            {(!label.is_empty()).then(|| view! { <span class="field__label">{label}</span> })}
            <input
                type="text"
                class="field__input"
                class:field__input--invalid=move || error.get().is_some()
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input(event_target_value(&ev))
            />
            {move || error.get().map(|message| view! { <span class="field__error">{message}</span> })}
        </label>
    }
}

/// Сообщение об ошибке поля как реактивный сигнал
pub fn field_error(
    errors: RwSignal<contracts::shared::validation::ValidationErrors>,
    field: &'static str,
) -> Signal<Option<String>> {
    Signal::derive(move || errors.with(|e| e.message_for(field).map(str::to_string)))
}
