use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::config;
use crate::notifications::{Notification, NotificationAction, NotificationSlot, Severity};

/// Shared sink components post their outcome messages to.
pub type Notifier = Callback<Notification>;

pub struct NotificationCenter {
    pub current: Option<Notification>,
    pub show: Notifier,
    pub dismiss: Callback<()>,
}

/// Single-slot notification state with a 5 second auto-dismiss.
///
/// Each `show` replaces the pending timer, and dropping a `Timeout` cancels
/// it. The slot additionally ignores expiries for ids it no longer holds.
#[hook]
pub fn use_notification_center() -> NotificationCenter {
    let slot = use_reducer(NotificationSlot::default);
    let timer = use_mut_ref(|| None::<Timeout>);
    let next_id = use_mut_ref(|| 0u64);

    let show = {
        let slot = slot.clone();
        let timer = timer.clone();
        Callback::from(move |notification: Notification| {
            let id = {
                let mut next_id = next_id.borrow_mut();
                *next_id += 1;
                *next_id
            };
            slot.dispatch(NotificationAction::Show { id, notification });
            let expire = slot.clone();
            // Dropping the previous Timeout here is what cancels its pending dismiss.
            *timer.borrow_mut() = Some(Timeout::new(config::NOTIFICATION_DURATION_MS, move || {
                expire.dispatch(NotificationAction::Expire(id));
            }));
        })
    };

    let dismiss = {
        let slot = slot.clone();
        Callback::from(move |_: ()| {
            timer.borrow_mut().take();
            slot.dispatch(NotificationAction::Dismiss);
        })
    };

    NotificationCenter {
        current: slot.current().cloned(),
        show,
        dismiss,
    }
}

#[derive(Properties, PartialEq)]
pub struct ToasterProps {
    pub notification: Option<Notification>,
    pub on_close: Callback<()>,
}

#[function_component(Toaster)]
pub fn toaster(props: &ToasterProps) -> Html {
    let Some(notification) = props.notification.as_ref() else {
        return html! {};
    };

    let severity_class = match notification.severity {
        Severity::Info => "toast-info",
        Severity::Error => "toast-error",
    };
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <>
            <style>
                {r#"
                    @keyframes toastIn {
                        from { transform: translateY(-20px); opacity: 0; }
                        to { transform: translateY(0); opacity: 1; }
                    }
                    .toast {
                        position: fixed;
                        top: 1.5rem;
                        right: 1.5rem;
                        z-index: 100;
                        max-width: 360px;
                        padding: 1rem 2.5rem 1rem 1.25rem;
                        border-radius: 12px;
                        box-shadow: 0 8px 32px rgba(0, 0, 0, 0.3);
                        animation: toastIn 0.3s ease-out forwards;
                        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
                    }
                    .toast-info { background: #ffffff; color: #1a1a1a; }
                    .toast-error { background: #dc2626; color: #ffffff; }
                    .toast-title { font-weight: 600; margin: 0; }
                    .toast-description { margin: 0.25rem 0 0 0; opacity: 0.9; font-size: 0.9rem; }
                    .toast-close {
                        position: absolute;
                        top: 0.5rem;
                        right: 0.75rem;
                        background: none;
                        border: none;
                        color: inherit;
                        font-size: 1.1rem;
                        cursor: pointer;
                        opacity: 0.7;
                    }
                    .toast-close:hover { opacity: 1; }
                "#}
            </style>
            <div class={classes!("toast", severity_class)} role="status">
                <p class="toast-title">{&notification.title}</p>
                if let Some(description) = notification.description.as_ref() {
                    <p class="toast-description">{description}</p>
                }
                <button class="toast-close" aria-label="Close" onclick={on_close}>{"×"}</button>
            </div>
        </>
    }
}
