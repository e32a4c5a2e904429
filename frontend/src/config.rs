use log::Level;

pub const SITE_NAME: &str = "Bukkakery";
pub const PAGE_TITLE: &str = "Bukkakery - Under Construction | Professional Casting";
pub const PAGE_DESCRIPTION: &str =
    "Bukkakery is building something amazing. Join our professional castings for girls and guys. Come back soon!";

pub const LOGO_URL: &str = "https://drive.google.com/uc?export=view&id=10oPo5xjtvYU9YAhp21CqizBDesxuwlbx";
pub const GATE_LOGO_URL: &str =
    "https://github.com/bukkakery/BUKKRY-ASTS/blob/main/BUKKAKERY.COMLOGO.png?raw=true";
pub const CASTING_ICON_URL: &str = "https://drive.google.com/file/d/1mGTpbNihUPlKI0MohOkeYJqM4UIUKzxD";

pub const CASTING_GIRLS_URL: &str = "https://docs.google.com/forms/d/e/1FAIpQLSc2YkTX3niYNfODM8sHjwdZGqDy3eeL1P0FXIM3I7F8foxaVQ/viewform?usp=sharing&ouid=100736357196836765397";
pub const CASTING_GUYS_URL: &str = "https://docs.google.com/forms/d/e/1FAIpQLSe8jIC5PG8wQEXbbUpzgLOVDSGnKDy6vMS7HDkPwViiOd62UQ/viewform?usp=sharing&ouid=100736357196836765397";

pub const CONTACT_EMAIL: &str = "info@bukkakery.com";

/// Where the age gate sends visitors who choose to leave.
pub const EXIT_URL: &str = "https://www.google.com";

pub const COOKIE_POLICY_URL: &str = "/cookie-policy.html";

pub const FOOTER_LINKS: &[(&str, &str)] = &[
    ("Legal notice", "/legal-notice.html"),
    ("Privacy policy", "/privacy-policy.html"),
    ("Cookie policy", COOKIE_POLICY_URL),
    ("Terms", "/terms.html"),
    ("Contact", "/contact.html"),
    ("Pricing", "/pricing.html"),
];

pub const CONSENT_STORAGE_KEY: &str = "cookie_consent";
pub const AGE_VERIFIED_KEY: &str = "age_verified";

pub const NOTIFICATION_DURATION_MS: u32 = 5_000;

const DEFAULT_NEWSLETTER_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbzYDOjU8OipcfrYwzT30TZYa8KR3qkmsk_rWpKeFqUYEXFfYoXYvI6ieJt3-V6jOlhU/exec";

/// Form-processing endpoint for newsletter signups. Override at build time
/// with `NEWSLETTER_ENDPOINT`.
pub fn get_newsletter_endpoint() -> &'static str {
    option_env!("NEWSLETTER_ENDPOINT")
        .filter(|url| !url.trim().is_empty())
        .unwrap_or(DEFAULT_NEWSLETTER_ENDPOINT)
}

/// Analytics stays disabled unless `ANALYTICS_MEASUREMENT_ID` was set at build time.
pub fn get_analytics_measurement_id() -> Option<&'static str> {
    option_env!("ANALYTICS_MEASUREMENT_ID").filter(|id| !id.trim().is_empty())
}

#[cfg(debug_assertions)]
pub fn get_log_level() -> Level {
    Level::Debug // Verbose console output when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_log_level() -> Level {
    Level::Info
}
