use yew::prelude::*;

use crate::config;

#[derive(Properties, PartialEq)]
pub struct AgeVerificationProps {
    pub on_confirm: Callback<()>,
    pub on_exit: Callback<()>,
}

/// Full-screen overlay shown until the visitor confirms they are of age.
#[function_component(AgeVerification)]
pub fn age_verification(props: &AgeVerificationProps) -> Html {
    let onconfirm = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| on_confirm.emit(()))
    };
    let onexit = {
        let on_exit = props.on_exit.clone();
        Callback::from(move |_: MouseEvent| on_exit.emit(()))
    };

    html! {
        <div class="age-gate-overlay">
            <style>
                {r#"
                    .age-gate-overlay {
                        position: fixed;
                        inset: 0;
                        background: rgba(0, 0, 0, 0.9);
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        z-index: 50;
                        padding: 1rem;
                    }
                    .age-gate-card {
                        background: #fff;
                        border-radius: 16px;
                        padding: 2rem;
                        box-shadow: 0 16px 32px rgba(0, 0, 0, 0.3);
                        text-align: center;
                        max-width: 28rem;
                    }
                    .age-gate-card img { width: 12rem; margin: 0 auto 1.5rem auto; }
                    .age-gate-card h2 { font-size: 1.875rem; color: #111827; margin-bottom: 1rem; }
                    .age-gate-card p { font-size: 1.125rem; color: #374151; margin-bottom: 2rem; }
                    .age-gate-actions { display: flex; gap: 1rem; }
                    .age-gate-actions button {
                        width: 100%;
                        padding: 0.75rem;
                        border: none;
                        border-radius: 8px;
                        font-weight: 600;
                        font-size: 1.125rem;
                        cursor: pointer;
                        transition: background 0.3s ease;
                    }
                    .age-gate-exit { background: #d1d5db; color: #1f2937; }
                    .age-gate-exit:hover { background: #9ca3af; }
                    .age-gate-confirm { background: #2563eb; color: #fff; }
                    .age-gate-confirm:hover { background: #1d4ed8; }
                    .age-gate-card .age-gate-note { font-size: 0.75rem; color: #6b7280; margin: 1.5rem 0 0 0; }
                "#}
            </style>
            <div class="age-gate-card">
                <img src={config::GATE_LOGO_URL} alt={format!("{} Logo", config::SITE_NAME)} />
                <h2>{"Age Verification"}</h2>
                <p>{"You must be 18 years or older to enter this site. Please confirm your age."}</p>
                <div class="age-gate-actions">
                    <button class="age-gate-exit" onclick={onexit}>{"Exit"}</button>
                    <button class="age-gate-confirm" onclick={onconfirm}>{"I am 18 or older"}</button>
                </div>
                <p class="age-gate-note">
                    {"By entering this site, you are agreeing to our Terms of Service and Privacy Policy. If you are not of legal age, please exit."}
                </p>
            </div>
        </div>
    }
}
