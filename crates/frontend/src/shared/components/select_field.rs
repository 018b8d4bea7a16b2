use leptos::prelude::*;

/// Выпадающий список; пустое значение означает "не выбрано"
#[component]
pub fn SelectField(
    #[prop(optional)] label: &'static str,
    /// Пары (значение, подпись)
    #[prop(into)]
    options: Signal<Vec<(String, String)>>,
    #[prop(into)] value: Signal<String>,
    on_change: impl Fn(String) + 'static,
    #[prop(optional, into)] error: Signal<Option<String>>,
    /// Подпись пустого варианта
    #[prop(optional)]
    empty_label: &'static str,
) -> impl IntoView {
    view! {
        <label class="field">
            {(!label.is_empty()).then(|| view! { <span class="field__label">{label}</span> })}
            <select
                class="field__input"
                class:field__input--invalid=move || error.get().is_some()
                on:change=move |ev| on_change(event_target_value(&ev))
            >
                <option value="" selected=move || value.get().is_empty()>{empty_label}</option>
                {move || {
                    options
                        .get()
                        .into_iter()
                        .map(|(option, text)| {
                            let current = option.clone();
                            view! {
                                <option value=option selected=move || value.get() == current>
                                    {text}
                                </option>
                            }
                        })
                        .collect_view()
                }}
            </select>
            {move || error.get().map(|message| view! { <span class="field__error">{message}</span> })}
        </label>
    }
}
