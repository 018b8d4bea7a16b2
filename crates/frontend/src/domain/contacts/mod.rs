use leptos::prelude::*;

/// Контакты разработчика
#[component]
#[allow(non_snake_case)]
pub fn ContactsView() -> impl IntoView {
    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Контакты"}</h1>
                </div>
            </div>
            <div class="contacts">
                <p>"Developed by Dmitry Kalistratov"</p>
                <p>"Телефон: " <a href="tel:+79043302866">"+7 (904) 330-28-66"</a></p>
                <p>"E-mail: " <a href="mailto:dmitry@kalistratov.ru">"dmitry@kalistratov.ru"</a></p>
            </div>
        </div>
    }
}
