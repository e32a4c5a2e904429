use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::config;
use crate::platform::{ScriptLoader, Storage, StorageError};

/// The optional cookie categories a visitor can toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsentChoices {
    pub analytics: bool,
    pub advertising: bool,
}

impl ConsentChoices {
    pub const ALL: Self = Self {
        analytics: true,
        advertising: true,
    };
    pub const NONE: Self = Self {
        analytics: false,
        advertising: false,
    };
}

/// A persisted consent decision. `necessary` is always true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    #[serde(default)]
    necessary: bool,
    #[serde(default)]
    pub analytics: bool,
    #[serde(default)]
    pub advertising: bool,
    #[serde(rename = "timestamp")]
    pub decided_at: DateTime<Utc>,
}

impl ConsentRecord {
    pub fn new(choices: ConsentChoices, decided_at: DateTime<Utc>) -> Self {
        Self {
            necessary: true,
            analytics: choices.analytics,
            advertising: choices.advertising,
            decided_at,
        }
    }

    pub fn necessary(&self) -> bool {
        self.necessary
    }

    pub fn choices(&self) -> ConsentChoices {
        ConsentChoices {
            analytics: self.analytics,
            advertising: self.advertising,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum StoredConsent {
    Current(ConsentRecord),
    /// Plain `accepted` / `declined` strings written by the older banner.
    Legacy(ConsentRecord),
}

fn parse_stored(raw: &str, now: DateTime<Utc>) -> Option<StoredConsent> {
    let trimmed = raw.trim().trim_matches('"');
    match trimmed {
        "accepted" => return Some(StoredConsent::Legacy(ConsentRecord::new(ConsentChoices::ALL, now))),
        "declined" => return Some(StoredConsent::Legacy(ConsentRecord::new(ConsentChoices::NONE, now))),
        _ => {}
    }
    let mut record: ConsentRecord = serde_json::from_str(raw).ok()?;
    record.necessary = true;
    Some(StoredConsent::Current(record))
}

/// The single place the consent decision is read from and written to.
pub struct ConsentStore<S> {
    storage: S,
    key: &'static str,
}

impl<S: Storage> ConsentStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            key: config::CONSENT_STORAGE_KEY,
        }
    }

    /// Reads the stored decision. Missing, unreadable or malformed values all
    /// come back as `None`.
    pub fn load(&self) -> Option<ConsentRecord> {
        let raw = match self.storage.get(self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Could not read consent decision: {}", e);
                return None;
            }
        };

        match parse_stored(&raw, Utc::now()) {
            Some(StoredConsent::Current(record)) => Some(record),
            Some(StoredConsent::Legacy(record)) => {
                info!("Migrating legacy consent value {:?}", raw);
                if let Err(e) = self.save(&record) {
                    warn!("Could not rewrite migrated consent decision: {}", e);
                }
                Some(record)
            }
            None => {
                warn!("Ignoring unreadable consent value");
                None
            }
        }
    }

    pub fn save(&self, record: &ConsentRecord) -> Result<(), StorageError> {
        let json = serde_json::to_string(record).map_err(|_| StorageError::Write(self.key.to_string()))?;
        self.storage.set(self.key, &json)
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(self.key)
    }
}

/// Injects the analytics tag at most once per page load.
pub struct AnalyticsLoader<L> {
    scripts: L,
    measurement_id: Option<String>,
    loaded: Cell<bool>,
}

impl<L: ScriptLoader> AnalyticsLoader<L> {
    pub fn new(scripts: L, measurement_id: Option<&str>) -> Self {
        Self {
            scripts,
            measurement_id: measurement_id.map(str::to_string),
            loaded: Cell::new(false),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get()
    }

    /// Returns true only for the call that actually injected the tag.
    pub fn ensure_loaded(&self) -> bool {
        if self.loaded.get() {
            return false;
        }
        let Some(id) = self.measurement_id.as_deref() else {
            debug!("Analytics consented but no measurement id configured");
            return false;
        };

        // Set before injecting: a failed injection is not retried this page load.
        self.loaded.set(true);
        let src = format!(
            "https://www.googletagmanager.com/gtag/js?id={}",
            urlencoding::encode(id)
        );
        let injected = self
            .scripts
            .inject_external(&src)
            .and_then(|_| self.scripts.inject_inline(&gtag_bootstrap(id)));
        match injected {
            Ok(()) => info!("Analytics loaded"),
            Err(e) => error!("Failed to load analytics: {}", e),
        }
        true
    }
}

fn gtag_bootstrap(measurement_id: &str) -> String {
    // serde_json gives us a correctly escaped JS string literal.
    let id = serde_json::to_string(measurement_id).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        "window.dataLayer = window.dataLayer || [];\
         function gtag(){{dataLayer.push(arguments);}}\
         gtag('js', new Date());\
         gtag('config', {});",
        id
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsentState {
    Undecided,
    Decided(ConsentRecord),
}

impl ConsentState {
    pub fn shows_banner(&self) -> bool {
        matches!(self, ConsentState::Undecided)
    }

    pub fn record(&self) -> Option<&ConsentRecord> {
        match self {
            ConsentState::Undecided => None,
            ConsentState::Decided(record) => Some(record),
        }
    }
}

pub struct ConsentManager<S, L> {
    store: Rc<ConsentStore<S>>,
    analytics: Rc<AnalyticsLoader<L>>,
    state: ConsentState,
}

impl<S: Storage, L: ScriptLoader> ConsentManager<S, L> {
    /// Reads the stored decision once and fires analytics if it was granted.
    pub fn start(store: Rc<ConsentStore<S>>, analytics: Rc<AnalyticsLoader<L>>) -> Self {
        let state = match store.load() {
            Some(record) => {
                if record.analytics {
                    analytics.ensure_loaded();
                }
                ConsentState::Decided(record)
            }
            None => ConsentState::Undecided,
        };
        info!(
            "Consent manager started, banner visible: {}, analytics loaded: {}",
            state.shows_banner(),
            analytics.is_loaded()
        );
        Self {
            store,
            analytics,
            state,
        }
    }

    pub fn state(&self) -> &ConsentState {
        &self.state
    }

    /// The toggles to prefill the settings dialog with.
    pub fn choices(&self) -> ConsentChoices {
        self.state
            .record()
            .map(ConsentRecord::choices)
            .unwrap_or_default()
    }

    pub fn accept_all(&mut self) {
        self.decide(ConsentChoices::ALL);
    }

    pub fn reject_all(&mut self) {
        self.decide(ConsentChoices::NONE);
    }

    pub fn save_custom(&mut self, choices: ConsentChoices) {
        self.decide(choices);
    }

    pub fn revoke(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!("Could not clear consent decision: {}", e);
        }
        info!("Consent revoked");
        self.state = ConsentState::Undecided;
    }

    fn decide(&mut self, choices: ConsentChoices) {
        let record = ConsentRecord::new(choices, Utc::now());
        // A failed write still applies for this page load.
        if let Err(e) = self.store.save(&record) {
            warn!("Could not persist consent decision: {}", e);
        }
        if record.analytics {
            self.analytics.ensure_loaded();
        }
        info!(
            "Consent decided: necessary={} analytics={} advertising={}",
            record.necessary(),
            record.analytics,
            record.advertising
        );
        self.state = ConsentState::Decided(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::testing::{MemoryStorage, RecordingScripts};

    type Manager = ConsentManager<MemoryStorage, RecordingScripts>;

    /// A fresh page load over the same storage: new store, new once-guard.
    fn load_page(storage: &MemoryStorage) -> (Manager, Rc<AnalyticsLoader<RecordingScripts>>) {
        let analytics = Rc::new(AnalyticsLoader::new(RecordingScripts::default(), Some("G-TEST123")));
        let store = Rc::new(ConsentStore::new(storage.clone()));
        (ConsentManager::start(store, analytics.clone()), analytics)
    }

    fn injections(analytics: &AnalyticsLoader<RecordingScripts>) -> usize {
        analytics.scripts.external.borrow().len()
    }

    #[test]
    fn first_visit_shows_banner() {
        let storage = MemoryStorage::default();
        let (manager, analytics) = load_page(&storage);
        assert!(manager.state().shows_banner());
        assert_eq!(injections(&analytics), 0);
    }

    #[test]
    fn accept_all_persists_and_loads_analytics_once_per_page() {
        let storage = MemoryStorage::default();
        let (mut manager, analytics) = load_page(&storage);
        manager.accept_all();
        manager.accept_all();
        assert!(!manager.state().shows_banner());
        assert_eq!(injections(&analytics), 1);

        let (reloaded, analytics) = load_page(&storage);
        assert!(!reloaded.state().shows_banner());
        assert_eq!(injections(&analytics), 1);
        assert!(analytics.is_loaded());
        let record = reloaded.state().record().unwrap();
        assert!(record.necessary() && record.analytics && record.advertising);
    }

    #[test]
    fn reject_all_persists_without_analytics() {
        let storage = MemoryStorage::default();
        let (mut manager, analytics) = load_page(&storage);
        manager.reject_all();
        assert_eq!(injections(&analytics), 0);

        let (reloaded, analytics) = load_page(&storage);
        assert!(!reloaded.state().shows_banner());
        assert_eq!(injections(&analytics), 0);
        assert_eq!(reloaded.choices(), ConsentChoices::NONE);
    }

    #[test]
    fn revoke_brings_the_banner_back_after_reload() {
        let storage = MemoryStorage::default();
        let (mut manager, _) = load_page(&storage);
        manager.accept_all();
        manager.revoke();
        assert!(manager.state().shows_banner());
        assert_eq!(storage.raw(config::CONSENT_STORAGE_KEY), None);

        let (reloaded, analytics) = load_page(&storage);
        assert!(reloaded.state().shows_banner());
        assert_eq!(injections(&analytics), 0);
    }

    #[test]
    fn save_custom_keeps_necessary_forced_on() {
        let storage = MemoryStorage::default();
        let (mut manager, analytics) = load_page(&storage);
        manager.save_custom(ConsentChoices {
            analytics: false,
            advertising: true,
        });
        assert_eq!(injections(&analytics), 0);

        let raw = storage.raw(config::CONSENT_STORAGE_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["necessary"], true);
        assert_eq!(value["analytics"], false);
        assert_eq!(value["advertising"], true);
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn save_custom_with_analytics_loads_it_once_per_page() {
        let storage = MemoryStorage::default();
        let (mut manager, analytics) = load_page(&storage);
        manager.save_custom(ConsentChoices {
            analytics: true,
            advertising: false,
        });
        assert!(!manager.state().shows_banner());
        assert_eq!(injections(&analytics), 1);

        let (reloaded, analytics) = load_page(&storage);
        assert!(!reloaded.state().shows_banner());
        assert_eq!(injections(&analytics), 1);
        assert_eq!(
            reloaded.choices(),
            ConsentChoices {
                analytics: true,
                advertising: false,
            }
        );
    }

    #[test]
    fn stored_record_from_the_old_banner_is_read() {
        let storage = MemoryStorage::with_entry(
            config::CONSENT_STORAGE_KEY,
            r#"{"necessary":false,"analytics":true,"advertising":false,"timestamp":"2024-05-01T10:00:00.000Z"}"#,
        );
        let (manager, analytics) = load_page(&storage);
        let record = manager.state().record().unwrap();
        assert!(record.necessary());
        assert!(record.analytics);
        assert_eq!(injections(&analytics), 1);
    }

    #[test]
    fn legacy_plain_strings_are_migrated() {
        let storage = MemoryStorage::with_entry(config::CONSENT_STORAGE_KEY, "accepted");
        let (manager, analytics) = load_page(&storage);
        assert_eq!(manager.choices(), ConsentChoices::ALL);
        assert_eq!(injections(&analytics), 1);
        let rewritten = storage.raw(config::CONSENT_STORAGE_KEY).unwrap();
        assert!(rewritten.contains("\"timestamp\""));

        let storage = MemoryStorage::with_entry(config::CONSENT_STORAGE_KEY, "declined");
        let (manager, analytics) = load_page(&storage);
        assert_eq!(manager.choices(), ConsentChoices::NONE);
        assert!(!manager.state().shows_banner());
        assert_eq!(injections(&analytics), 0);
    }

    #[test]
    fn malformed_values_count_as_undecided() {
        for raw in ["{}", "not json", "[1,2]", ""] {
            let storage = MemoryStorage::with_entry(config::CONSENT_STORAGE_KEY, raw);
            let (manager, _) = load_page(&storage);
            assert!(manager.state().shows_banner(), "value {:?}", raw);
        }
    }

    #[test]
    fn broken_storage_degrades_to_undecided() {
        let storage = MemoryStorage::default();
        storage.break_storage();
        let (mut manager, analytics) = load_page(&storage);
        assert!(manager.state().shows_banner());

        // The decision still applies for this page load.
        manager.accept_all();
        assert!(!manager.state().shows_banner());
        assert_eq!(injections(&analytics), 1);

        let (reloaded, _) = load_page(&storage);
        assert!(reloaded.state().shows_banner());
    }

    #[test]
    fn analytics_without_measurement_id_is_a_no_op() {
        let loader = AnalyticsLoader::new(RecordingScripts::default(), None);
        assert!(!loader.ensure_loaded());
        assert!(!loader.is_loaded());
        assert!(loader.scripts.external.borrow().is_empty());
    }

    #[test]
    fn analytics_tag_carries_the_measurement_id() {
        let loader = AnalyticsLoader::new(RecordingScripts::default(), Some("G-ABC"));
        assert!(loader.ensure_loaded());
        assert!(!loader.ensure_loaded());
        assert_eq!(
            loader.scripts.external.borrow().as_slice(),
            ["https://www.googletagmanager.com/gtag/js?id=G-ABC"]
        );
        let inline = loader.scripts.inline.borrow();
        assert_eq!(inline.len(), 1);
        assert!(inline[0].contains("gtag('config', \"G-ABC\")"));
    }
}
