use log::warn;
use web_sys::window;
use yew::prelude::*;

use crate::components::newsletter_form::NewsletterForm;
use crate::components::notification::Notifier;
use crate::config;
use crate::platform::Navigator;
use crate::services::Services;

fn set_page_metadata() {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };
    document.set_title(config::PAGE_TITLE);
    if let Ok(Some(meta)) = document.query_selector("meta[name=\"description\"]") {
        if let Err(e) = meta.set_attribute("content", config::PAGE_DESCRIPTION) {
            warn!("Could not set page description: {:?}", e);
        }
    }
}

#[derive(Properties, PartialEq)]
struct CastingTileProps {
    label: &'static str,
    alt: &'static str,
    onclick: Callback<MouseEvent>,
}

#[function_component(CastingTile)]
fn casting_tile(props: &CastingTileProps) -> Html {
    html! {
        <div class="casting-tile" onclick={props.onclick.clone()}>
            <img src={config::CASTING_ICON_URL} alt={props.alt} />
            <p>{props.label}</p>
        </div>
    }
}

#[function_component(Home)]
pub fn home() -> Html {
    let services = use_context::<Services>();
    let notifier = use_context::<Notifier>().unwrap_or_else(Callback::noop);

    use_effect_with_deps(
        move |_| {
            set_page_metadata();
            || ()
        },
        (),
    );

    let Some(services) = services else {
        return html! {};
    };

    let open_casting = |url: &'static str| {
        let navigator = services.navigator.clone();
        Callback::from(move |_: MouseEvent| navigator.open_external(url))
    };

    html! {
        <div class="splash">
            <style>
                {r#"
                    .splash {
                        min-height: 100vh;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        justify-content: center;
                        padding: 1rem;
                        position: relative;
                        overflow: hidden;
                        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
                    }
                    .splash-glow { position: absolute; background: #fff; border-radius: 50%; opacity: 0.1; filter: blur(24px); }
                    .splash-main {
                        text-align: center;
                        z-index: 10;
                        max-width: 56rem;
                        margin: 0 auto;
                        flex-grow: 1;
                        display: flex;
                        flex-direction: column;
                        justify-content: center;
                        gap: 3rem;
                        animation: fadeDown 0.8s ease-out;
                    }
                    @keyframes fadeDown {
                        from { opacity: 0; transform: translateY(-50px); }
                        to { opacity: 1; transform: translateY(0); }
                    }
                    .splash-logo { max-width: 28rem; width: 100%; height: auto; margin: 0 auto; filter: drop-shadow(0 25px 25px rgba(0, 0, 0, 0.15)); }
                    .splash h1 { font-size: 3.75rem; font-weight: bold; color: #fff; }
                    .splash-subline { font-size: 1.5rem; color: rgba(255, 255, 255, 0.9); font-weight: 500; }
                    .casting-row { display: flex; gap: 3rem; justify-content: center; align-items: center; }
                    .casting-tile { cursor: pointer; transition: transform 0.3s ease; }
                    .casting-tile:hover { transform: translateY(-10px) scale(1.1); }
                    .casting-tile img { width: 10rem; height: 10rem; object-fit: contain; }
                    .casting-tile p { font-size: 1.25rem; font-weight: bold; color: #fff; margin-top: 0.5rem; opacity: 0; transition: opacity 0.3s ease; }
                    .casting-tile:hover p { opacity: 1; }
                    .splash-footer { width: 100%; text-align: center; padding: 1.5rem 0; z-index: 10; }
                    .splash-footer a { color: rgba(255, 255, 255, 0.8); text-decoration: none; }
                    .splash-footer a:hover { color: #fff; }
                    .splash-contact { font-weight: 500; }
                    .splash-links { display: flex; flex-wrap: wrap; justify-content: center; gap: 1rem; margin-top: 1rem; font-size: 0.875rem; }
                    @media (max-width: 768px) {
                        .splash h1 { font-size: 2.25rem; }
                        .splash-subline { font-size: 1.25rem; }
                        .casting-row { flex-direction: column; }
                        .casting-tile img { width: 8rem; height: 8rem; }
                    }
                "#}
            </style>
            <div class="splash-glow" style="top: 5rem; left: 2.5rem; width: 8rem; height: 8rem;"></div>
            <div class="splash-glow" style="bottom: 5rem; right: 2.5rem; width: 10rem; height: 10rem;"></div>
            <div class="splash-glow" style="top: 50%; left: 25%; width: 6rem; height: 6rem;"></div>

            <main class="splash-main">
                <img
                    class="splash-logo"
                    src={config::LOGO_URL}
                    alt={format!("{} Logo - Professional casting platform", config::SITE_NAME)}
                />
                <div>
                    <h1>{"We're building something amazing!"}</h1>
                    <p class="splash-subline">{"Our site is under construction. Get ready for something new!"}</p>
                </div>
                <div class="casting-row">
                    <CastingTile
                        label="Casting Girls"
                        alt="Casting icon for girls - white drop"
                        onclick={open_casting(config::CASTING_GIRLS_URL)}
                    />
                    <CastingTile
                        label="Casting Guys"
                        alt="Casting icon for guys - splash design"
                        onclick={open_casting(config::CASTING_GUYS_URL)}
                    />
                </div>
                <NewsletterForm services={services.clone()} on_notify={notifier} />
            </main>

            <footer class="splash-footer">
                <a class="splash-contact" href={format!("mailto:{}", config::CONTACT_EMAIL)}>
                    {"✉ "}{config::CONTACT_EMAIL}
                </a>
                <nav class="splash-links">
                    { for config::FOOTER_LINKS.iter().map(|(label, href)| html! {
                        <a href={*href}>{*label}</a>
                    }) }
                </nav>
            </footer>
        </div>
    }
}
