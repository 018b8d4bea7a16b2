use leptos::prelude::*;

#[component]
pub fn ErrorBanner(error: RwSignal<Option<String>>) -> impl IntoView {
    move || {
        error.get().map(|e| {
            view! {
                <div class="warning-box">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                    <button class="button button--icon" on:click=move |_| error.set(None)>"×"</button>
                </div>
            }
        })
    }
}
