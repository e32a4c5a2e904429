use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::newsletter::{send_subscription, NewsletterState, SubmitError, SubmitStart};
use crate::notifications::Notification;
use crate::services::Services;

pub enum NewsletterMsg {
    SetEmail(String),
    Submit,
    Finished(Result<(), SubmitError>),
}

#[derive(Properties, PartialEq)]
pub struct NewsletterFormProps {
    pub services: Services,
    pub on_notify: Callback<Notification>,
}

pub struct NewsletterForm {
    state: NewsletterState,
}

impl Component for NewsletterForm {
    type Message = NewsletterMsg;
    type Properties = NewsletterFormProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            state: NewsletterState::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            NewsletterMsg::SetEmail(email) => {
                self.state.set_email(email);
                true
            }
            NewsletterMsg::Submit => match self.state.begin_submit() {
                SubmitStart::Send(email) => {
                    let http = ctx.props().services.http.clone();
                    let endpoint = ctx.props().services.newsletter_endpoint;
                    // Every path through send_subscription resolves to Finished,
                    // which is what clears the submitting flag.
                    ctx.link().send_future(async move {
                        NewsletterMsg::Finished(send_subscription(&*http, endpoint, &email).await)
                    });
                    true
                }
                SubmitStart::Rejected(notification) => {
                    ctx.props().on_notify.emit(notification);
                    false
                }
                SubmitStart::Busy => false,
            },
            NewsletterMsg::Finished(outcome) => {
                let notification = self.state.finish_submit(&outcome);
                ctx.props().on_notify.emit(notification);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            NewsletterMsg::Submit
        });
        let oninput = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            NewsletterMsg::SetEmail(input.value())
        });
        let submitting = self.state.is_submitting();

        html! {
            <div class="newsletter">
                <style>
                    {r#"
                        .newsletter { max-width: 32rem; margin: 0 auto; width: 100%; padding-top: 2rem; }
                        .newsletter p { font-size: 1.125rem; color: rgba(255, 255, 255, 0.9); margin-bottom: 1rem; font-weight: 600; }
                        .newsletter form {
                            display: flex;
                            align-items: center;
                            gap: 0.5rem;
                            background: rgba(255, 255, 255, 0.2);
                            backdrop-filter: blur(4px);
                            padding: 0.5rem;
                            border-radius: 12px;
                            border: 1px solid rgba(255, 255, 255, 0.3);
                            box-shadow: 0 8px 32px rgba(0, 0, 0, 0.3);
                        }
                        .newsletter input {
                            flex: 1;
                            background: transparent;
                            border: none;
                            outline: none;
                            color: #fff;
                            font-size: 1rem;
                            padding: 0.5rem;
                        }
                        .newsletter input::placeholder { color: rgba(255, 255, 255, 0.7); }
                        .newsletter button {
                            background: rgba(255, 255, 255, 0.3);
                            border: none;
                            border-radius: 8px;
                            color: #fff;
                            width: 2.5rem;
                            height: 2.5rem;
                            cursor: pointer;
                        }
                        .newsletter button:hover { background: rgba(255, 255, 255, 0.5); }
                        .newsletter button:disabled, .newsletter input:disabled { opacity: 0.5; cursor: not-allowed; }
                    "#}
                </style>
                <p>{"Subscribe to stay up to date with the latest news"}</p>
                <form {onsubmit} novalidate={true}>
                    <input
                        type="email"
                        placeholder="Your email address"
                        value={self.state.email().to_string()}
                        {oninput}
                        disabled={submitting}
                    />
                    <button type="submit" aria-label="Subscribe" disabled={submitting}>
                        {"➤"}
                    </button>
                </form>
            </div>
        }
    }
}
