use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::notifications::Notification;
use crate::platform::{HttpClient, TransportError};

/// Exact body the form-processing endpoint returns on success.
pub const SUCCESS_MARKER: &str = "Success";

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("email address is empty")]
    Empty,
    #[error("email address is malformed")]
    Malformed,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("endpoint answered with status {0}")]
    Status(u16),
    #[error("endpoint rejected the signup: {0:?}")]
    Rejected(String),
}

/// An email that passed the client-side format check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(candidate: &str) -> Result<Self, ValidationError> {
        if candidate.is_empty() {
            return Err(ValidationError::Empty);
        }
        if !EMAIL_PATTERN.is_match(candidate) {
            return Err(ValidationError::Malformed);
        }
        Ok(Self(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Just the part after the last `@`, for logs.
    pub fn domain(&self) -> &str {
        self.0.rsplit('@').next().unwrap_or_default()
    }
}

pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("{}={}", urlencoding::encode(name), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// One POST, no retry. Only a 2xx answer whose body is exactly
/// [`SUCCESS_MARKER`] counts as a subscription.
pub async fn send_subscription<H: HttpClient>(
    http: &H,
    endpoint: &str,
    email: &EmailAddress,
) -> Result<(), SubmitError> {
    let body = encode_form(&[("email", email.as_str())]);
    let response = http.post_form(endpoint, &body).await?;
    if !response.is_success() {
        return Err(SubmitError::Status(response.status));
    }
    if response.body != SUCCESS_MARKER {
        return Err(SubmitError::Rejected(response.body));
    }
    Ok(())
}

pub fn invalid_email_notification() -> Notification {
    Notification::error("Invalid email").with_description("Please enter a valid email address.")
}

pub fn subscribed_notification() -> Notification {
    Notification::info("Subscription successful! 🎉")
        .with_description("Thank you for subscribing to our newsletter.")
}

pub fn failure_notification() -> Notification {
    Notification::error("An error occurred.").with_description("Please try again later.")
}

/// What the form should do after the visitor hits submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStart {
    Send(EmailAddress),
    Rejected(Notification),
    /// A submission is already in flight.
    Busy,
}

/// Input value and in-flight flag of one newsletter form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsletterState {
    email: String,
    submitting: bool,
}

impl NewsletterState {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_email(&mut self, value: String) {
        if !self.submitting {
            self.email = value;
        }
    }

    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.submitting {
            return SubmitStart::Busy;
        }
        match EmailAddress::parse(&self.email) {
            Ok(email) => {
                self.submitting = true;
                info!("Submitting newsletter signup for @{}", email.domain());
                SubmitStart::Send(email)
            }
            Err(e) => {
                info!("Newsletter signup rejected locally: {}", e);
                SubmitStart::Rejected(invalid_email_notification())
            }
        }
    }

    /// Clears the in-flight flag whatever the outcome and picks the notification to show.
    pub fn finish_submit(&mut self, outcome: &Result<(), SubmitError>) -> Notification {
        self.submitting = false;
        match outcome {
            Ok(()) => {
                info!("Newsletter signup succeeded");
                self.email.clear();
                subscribed_notification()
            }
            Err(e) => {
                warn!("Newsletter signup failed: {}", e);
                failure_notification()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::Severity;
    use crate::platform::testing::RecordingHttp;
    use futures::executor::block_on;

    const ENDPOINT: &str = "https://forms.example.test/exec";

    fn form_with(email: &str) -> NewsletterState {
        let mut state = NewsletterState::default();
        state.set_email(email.to_string());
        state
    }

    /// Drives one submit the way the form component does.
    fn submit(state: &mut NewsletterState, http: &RecordingHttp) -> Option<Notification> {
        match state.begin_submit() {
            SubmitStart::Send(email) => {
                assert!(state.is_submitting());
                let outcome = block_on(send_subscription(http, ENDPOINT, &email));
                Some(state.finish_submit(&outcome))
            }
            SubmitStart::Rejected(notification) => Some(notification),
            SubmitStart::Busy => None,
        }
    }

    #[test]
    fn accepts_plausible_addresses() {
        for email in ["user@example.com", "a.b+c@sub.domain.org", "x@y.z"] {
            assert!(EmailAddress::parse(email).is_ok(), "{}", email);
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert_eq!(EmailAddress::parse(""), Err(ValidationError::Empty));
        for email in [
            "not-an-email",
            "user@",
            "@example.com",
            "user@example",
            "user @example.com",
            " user@example.com",
            "user@example.",
        ] {
            assert_eq!(EmailAddress::parse(email), Err(ValidationError::Malformed), "{}", email);
        }
    }

    #[test]
    fn invalid_input_never_reaches_the_network() {
        let http = RecordingHttp::replying(200, "Success");
        let mut state = form_with("not-an-email");
        let notification = submit(&mut state, &http).unwrap();
        assert_eq!(notification.title, "Invalid email");
        assert_eq!(notification.severity, Severity::Error);
        assert_eq!(http.request_count(), 0);
        assert!(!state.is_submitting());
        assert_eq!(state.email(), "not-an-email");
    }

    #[test]
    fn success_clears_the_field() {
        let http = RecordingHttp::replying(200, "Success");
        let mut state = form_with("user@example.com");
        let notification = submit(&mut state, &http).unwrap();
        assert!(notification.title.contains("successful"));
        assert_eq!(notification.severity, Severity::Info);
        assert_eq!(state.email(), "");
        assert!(!state.is_submitting());

        let requests = http.requests.borrow();
        assert_eq!(requests.as_slice(), [(ENDPOINT.to_string(), "email=user%40example.com".to_string())]);
    }

    #[test]
    fn any_other_body_is_a_failure() {
        for body in ["Error: duplicate", "success", "Success\n", " Success", ""] {
            let http = RecordingHttp::replying(200, body);
            let mut state = form_with("user@example.com");
            let notification = submit(&mut state, &http).unwrap();
            assert_eq!(notification.title, "An error occurred.", "body {:?}", body);
            assert_eq!(state.email(), "user@example.com");
            assert!(!state.is_submitting());
        }
    }

    #[test]
    fn error_status_is_a_failure_even_with_success_body() {
        let http = RecordingHttp::replying(500, "Success");
        let mut state = form_with("user@example.com");
        let notification = submit(&mut state, &http).unwrap();
        assert_eq!(notification.title, "An error occurred.");
        assert_eq!(state.email(), "user@example.com");
    }

    #[test]
    fn transport_failure_keeps_the_input_and_hides_details() {
        let http = RecordingHttp::unreachable();
        let mut state = form_with("user@example.com");
        let notification = submit(&mut state, &http).unwrap();
        assert_eq!(notification, failure_notification());
        assert!(!notification
            .description
            .as_deref()
            .unwrap_or_default()
            .contains("refused"));
        assert_eq!(state.email(), "user@example.com");
        assert!(!state.is_submitting());
        assert_eq!(http.request_count(), 1);
    }

    #[test]
    fn only_one_submission_in_flight() {
        let mut state = form_with("user@example.com");
        assert!(matches!(state.begin_submit(), SubmitStart::Send(_)));
        assert_eq!(state.begin_submit(), SubmitStart::Busy);

        // Input is frozen while submitting.
        state.set_email("other@example.com".to_string());
        assert_eq!(state.email(), "user@example.com");

        state.finish_submit(&Err(SubmitError::Status(502)));
        assert!(!state.is_submitting());
        assert!(matches!(state.begin_submit(), SubmitStart::Send(_)));
    }

    #[test]
    fn form_body_is_urlencoded() {
        assert_eq!(
            encode_form(&[("email", "a+b@example.com"), ("x", "1 2")]),
            "email=a%2Bb%40example.com&x=1%202"
        );
    }

    #[test]
    fn logs_only_the_domain() {
        let email = EmailAddress::parse("someone@example.com").unwrap();
        assert_eq!(email.domain(), "example.com");
    }
}
