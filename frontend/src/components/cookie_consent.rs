use yew::prelude::*;

use crate::config;
use crate::consent::{ConsentChoices, ConsentManager};
use crate::platform::{BrowserScripts, BrowserStorage};
use crate::services::Services;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Analytics,
    Advertising,
}

pub enum CookieConsentMsg {
    AcceptAll,
    RejectAll,
    OpenSettings,
    CloseSettings,
    Toggle(Category),
    SaveSettings,
    Revoke,
}

#[derive(Properties, PartialEq)]
pub struct CookieConsentProps {
    pub services: Services,
}

pub struct CookieConsent {
    manager: ConsentManager<BrowserStorage, BrowserScripts>,
    show_settings: bool,
    draft: ConsentChoices,
}

impl Component for CookieConsent {
    type Message = CookieConsentMsg;
    type Properties = CookieConsentProps;

    fn create(ctx: &Context<Self>) -> Self {
        let services = &ctx.props().services;
        let manager = ConsentManager::start(services.consent.clone(), services.analytics.clone());
        let draft = manager.choices();
        Self {
            manager,
            show_settings: false,
            draft,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            CookieConsentMsg::AcceptAll => {
                self.manager.accept_all();
                self.show_settings = false;
            }
            CookieConsentMsg::RejectAll => {
                self.manager.reject_all();
                self.show_settings = false;
            }
            CookieConsentMsg::OpenSettings => {
                self.draft = self.manager.choices();
                self.show_settings = true;
            }
            CookieConsentMsg::CloseSettings => {
                self.show_settings = false;
            }
            CookieConsentMsg::Toggle(Category::Analytics) => {
                self.draft.analytics = !self.draft.analytics;
            }
            CookieConsentMsg::Toggle(Category::Advertising) => {
                self.draft.advertising = !self.draft.advertising;
            }
            CookieConsentMsg::SaveSettings => {
                self.manager.save_custom(self.draft);
                self.show_settings = false;
            }
            CookieConsentMsg::Revoke => {
                self.manager.revoke();
                self.draft = ConsentChoices::default();
                self.show_settings = false;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let body = if self.show_settings {
            self.settings_dialog(link)
        } else if self.manager.state().shows_banner() {
            Self::banner(link)
        } else {
            html! {
                <button class="cookie-reopen" onclick={link.callback(|_| CookieConsentMsg::Revoke)}>
                    {"Cookie settings"}
                </button>
            }
        };

        html! {
            <>
                <style>
                    {r#"
                        .cookie-banner {
                            position: fixed;
                            bottom: 0;
                            left: 0;
                            right: 0;
                            background: #1f2937;
                            color: #fff;
                            padding: 1rem;
                            text-align: center;
                            z-index: 50;
                        }
                        .cookie-banner p { margin-bottom: 1rem; }
                        .cookie-banner a { text-decoration: underline; color: inherit; }
                        .cookie-actions { display: flex; justify-content: center; gap: 1rem; flex-wrap: wrap; }
                        .cookie-actions button, .cookie-dialog-actions button {
                            color: #fff;
                            font-weight: bold;
                            padding: 0.5rem 1rem;
                            border: none;
                            border-radius: 4px;
                            cursor: pointer;
                        }
                        .cookie-accept { background: #22c55e; }
                        .cookie-accept:hover { background: #15803d; }
                        .cookie-reject { background: #ef4444; }
                        .cookie-reject:hover { background: #b91c1c; }
                        .cookie-configure { background: #6b7280; }
                        .cookie-configure:hover { background: #374151; }
                        .cookie-cancel { background: #d1d5db; color: #000 !important; }
                        .cookie-modal {
                            position: fixed;
                            inset: 0;
                            background: rgba(31, 41, 55, 0.75);
                            display: flex;
                            align-items: center;
                            justify-content: center;
                            z-index: 50;
                        }
                        .cookie-dialog {
                            background: #fff;
                            color: #111827;
                            padding: 1.5rem;
                            border-radius: 8px;
                            width: 100%;
                            max-width: 28rem;
                        }
                        .cookie-dialog h2 { font-size: 1.25rem; margin-bottom: 1rem; }
                        .cookie-category { margin-bottom: 1rem; }
                        .cookie-category label { display: flex; justify-content: space-between; align-items: center; font-weight: bold; }
                        .cookie-category p { font-size: 0.875rem; color: #4b5563; margin-top: 0.25rem; }
                        .cookie-dialog-actions { display: flex; justify-content: flex-end; gap: 1rem; margin-top: 1.5rem; }
                        .cookie-reopen {
                            position: fixed;
                            bottom: 1rem;
                            right: 1rem;
                            background: #3b82f6;
                            color: #fff;
                            font-weight: bold;
                            padding: 0.5rem 1rem;
                            border: none;
                            border-radius: 9999px;
                            box-shadow: 0 8px 16px rgba(0, 0, 0, 0.3);
                            cursor: pointer;
                        }
                        .cookie-reopen:hover { background: #1d4ed8; }
                    "#}
                </style>
                {body}
            </>
        }
    }
}

impl CookieConsent {
    fn banner(link: &yew::html::Scope<Self>) -> Html {
        html! {
            <div class="cookie-banner">
                <p>
                    {"We use our own and third-party cookies to analyse how the site is used and to show you advertising related to your preferences, based on a profile built from your browsing habits (for example, pages visited). You can read our "}
                    <a href={config::COOKIE_POLICY_URL} target="_blank" rel="noopener noreferrer">{"Cookie Policy here"}</a>
                    {"."}
                </p>
                <div class="cookie-actions">
                    <button class="cookie-accept" onclick={link.callback(|_| CookieConsentMsg::AcceptAll)}>{"ACCEPT ALL"}</button>
                    <button class="cookie-reject" onclick={link.callback(|_| CookieConsentMsg::RejectAll)}>{"REJECT ALL"}</button>
                    <button class="cookie-configure" onclick={link.callback(|_| CookieConsentMsg::OpenSettings)}>{"CONFIGURE"}</button>
                </div>
            </div>
        }
    }

    fn settings_dialog(&self, link: &yew::html::Scope<Self>) -> Html {
        html! {
            <div class="cookie-modal">
                <div class="cookie-dialog">
                    <h2>{"Cookie settings"}</h2>
                    <p>{"Below you can enable or disable the types of cookies we use."}</p>
                    <div class="cookie-category">
                        <label>
                            <span>{"Necessary"}</span>
                            <input type="checkbox" checked={true} disabled={true} />
                        </label>
                        <p>{"These cookies are essential for the website to work and cannot be switched off."}</p>
                    </div>
                    <div class="cookie-category">
                        <label>
                            <span>{"Analytics"}</span>
                            <input
                                type="checkbox"
                                checked={self.draft.analytics}
                                onchange={link.callback(|_| CookieConsentMsg::Toggle(Category::Analytics))}
                            />
                        </label>
                        <p>{"These cookies help us understand how visitors interact with the website by collecting information anonymously."}</p>
                    </div>
                    <div class="cookie-category">
                        <label>
                            <span>{"Advertising"}</span>
                            <input
                                type="checkbox"
                                checked={self.draft.advertising}
                                onchange={link.callback(|_| CookieConsentMsg::Toggle(Category::Advertising))}
                            />
                        </label>
                        <p>{"These cookies track visitors across websites in order to show relevant and engaging ads."}</p>
                    </div>
                    <div class="cookie-dialog-actions">
                        <button class="cookie-accept" onclick={link.callback(|_| CookieConsentMsg::SaveSettings)}>{"Save settings"}</button>
                        <button class="cookie-cancel" onclick={link.callback(|_| CookieConsentMsg::CloseSettings)}>{"Cancel"}</button>
                    </div>
                </div>
            </div>
        }
    }
}
