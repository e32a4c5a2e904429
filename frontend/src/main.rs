use log::info;
use yew::prelude::*;
use yew_router::prelude::*;

mod age_gate;
mod config;
mod consent;
mod newsletter;
mod notifications;
mod platform;
mod services;

mod components {
    pub mod age_verification;
    pub mod cookie_consent;
    pub mod newsletter_form;
    pub mod notification;
}
mod pages {
    pub mod home;
}

use age_gate::AgeGateState;
use components::{
    age_verification::AgeVerification,
    cookie_consent::CookieConsent,
    notification::{use_notification_center, Notifier, Toaster},
};
use pages::home::Home;
use services::Services;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        }
        // Legal and info pages are static files served next to the app.
        Route::NotFound => html! { <Redirect<Route> to={Route::Home} /> },
    }
}

#[function_component]
fn App() -> Html {
    let services = use_state(Services::browser);
    let gate = {
        let services = services.clone();
        use_state(move || AgeGateState::initial(&*services.session))
    };
    let center = use_notification_center();

    if *gate == AgeGateState::Exited {
        return html! {};
    }
    if gate.blocks_content() {
        let on_confirm = {
            let gate = gate.clone();
            let services = services.clone();
            Callback::from(move |_: ()| gate.set(age_gate::confirm(&*services.session)))
        };
        let on_exit = {
            let gate = gate.clone();
            let services = services.clone();
            Callback::from(move |_: ()| gate.set(age_gate::exit(&*services.navigator)))
        };
        return html! { <AgeVerification {on_confirm} {on_exit} /> };
    }

    html! {
        <ContextProvider<Services> context={(*services).clone()}>
            <ContextProvider<Notifier> context={center.show.clone()}>
                <BrowserRouter>
                    <Switch<Route> render={switch} />
                </BrowserRouter>
                <CookieConsent services={(*services).clone()} />
                <Toaster notification={center.current.clone()} on_close={center.dismiss.clone()} />
            </ContextProvider<Notifier>>
        </ContextProvider<Services>>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    console_log::init_with_level(config::get_log_level()).expect("error initializing log");

    info!("Starting {}", config::SITE_NAME);
    yew::Renderer::<App>::new().render();
}
