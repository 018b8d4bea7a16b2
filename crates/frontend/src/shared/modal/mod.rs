use contracts::shared::grid::DELETE_BLOCKED_MESSAGE;
use leptos::ev;
use leptos::prelude::*;

#[component]
pub fn Modal(
    /// Title of the modal
    title: String,
    /// Callback when modal should close
    on_close: Callback<()>,
    /// Modal content
    children: Children,
) -> impl IntoView {
    // Escape закрывает окно
    let listener = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || listener.remove());

    // Prevent click propagation from modal content
    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal" role="dialog" aria-modal="true" on:click=stop_propagation>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
            </div>
        </div>
    }
}

/// Блокирующее окно: запись используется и не может быть удалена
#[component]
pub fn DeleteBlockedModal(show: RwSignal<bool>) -> impl IntoView {
    let close = Callback::new(move |_| show.set(false));

    view! {
        <Show when=move || show.get()>
            <Modal title="Удаление невозможно".to_string() on_close=close>
                <p>{DELETE_BLOCKED_MESSAGE}</p>
                <div class="modal-actions">
                    <button class="button button--primary" on:click=move |_| close.run(())>
                        "Закрыть"
                    </button>
                </div>
            </Modal>
        </Show>
    }
}
