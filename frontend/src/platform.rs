//! Thin capability traits over the browser APIs the site touches, plus their
//! `web-sys` / `gloo-net` implementations.
//!
//! Everything above this module talks to `Storage`, `HttpClient`,
//! `ScriptLoader` and `Navigator` only, so the state machines can be driven
//! natively in tests.

use gloo_net::http::Request;
use thiserror::Error;
use wasm_bindgen::JsValue;
use web_sys::{window, UrlSearchParams};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("failed to read `{0}`")]
    Read(String),
    #[error("failed to write `{0}`")]
    Write(String),
}

/// Key/value string storage (`localStorage`, `sessionStorage`).
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("could not build request: {0}")]
    Request(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("could not read response body: {0}")]
    Body(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[allow(async_fn_in_trait)]
pub trait HttpClient {
    /// POSTs an already url-encoded form body and reads the response as text.
    async fn post_form(&self, url: &str, body: &str) -> Result<HttpResponse, TransportError>;
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("no document to inject into")]
    NoDocument,
    #[error("dom error: {0}")]
    Dom(String),
}

pub trait ScriptLoader {
    fn inject_external(&self, src: &str) -> Result<(), ScriptError>;
    fn inject_inline(&self, code: &str) -> Result<(), ScriptError>;
}

pub trait Navigator {
    /// Leaves the site in the current browsing context.
    fn redirect(&self, url: &str);
    /// Opens `url` in a new tab without giving it a handle back to us.
    fn open_external(&self, url: &str);
}

fn js_error(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Local,
    Session,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserStorage {
    kind: StorageKind,
}

impl BrowserStorage {
    pub fn local() -> Self {
        Self { kind: StorageKind::Local }
    }

    pub fn session() -> Self {
        Self { kind: StorageKind::Session }
    }

    fn backend(&self) -> Result<web_sys::Storage, StorageError> {
        let window = window().ok_or(StorageError::Unavailable)?;
        let storage = match self.kind {
            StorageKind::Local => window.local_storage(),
            StorageKind::Session => window.session_storage(),
        };
        storage
            .map_err(|_| StorageError::Unavailable)?
            .ok_or(StorageError::Unavailable)
    }
}

impl Storage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.backend()?
            .get_item(key)
            .map_err(|_| StorageError::Read(key.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.backend()?
            .set_item(key, value)
            .map_err(|_| StorageError::Write(key.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.backend()?
            .remove_item(key)
            .map_err(|_| StorageError::Write(key.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserHttp;

impl HttpClient for BrowserHttp {
    async fn post_form(&self, url: &str, body: &str) -> Result<HttpResponse, TransportError> {
        // URLSearchParams as the body lets fetch pick the urlencoded content type itself.
        let params = UrlSearchParams::new_with_str(body)
            .map_err(|e| TransportError::Request(js_error(e)))?;
        let response = Request::post(url)
            .body(params)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserScripts;

impl BrowserScripts {
    fn append_script(&self, configure: impl FnOnce(&web_sys::Element) -> Result<(), JsValue>) -> Result<(), ScriptError> {
        let document = window()
            .and_then(|w| w.document())
            .ok_or(ScriptError::NoDocument)?;
        let head = document.head().ok_or(ScriptError::NoDocument)?;
        let script = document
            .create_element("script")
            .map_err(|e| ScriptError::Dom(js_error(e)))?;
        configure(&script).map_err(|e| ScriptError::Dom(js_error(e)))?;
        head.append_child(&script)
            .map_err(|e| ScriptError::Dom(js_error(e)))?;
        Ok(())
    }
}

impl ScriptLoader for BrowserScripts {
    fn inject_external(&self, src: &str) -> Result<(), ScriptError> {
        self.append_script(|script| {
            script.set_attribute("async", "")?;
            script.set_attribute("src", src)
        })
    }

    fn inject_inline(&self, code: &str) -> Result<(), ScriptError> {
        self.append_script(|script| {
            script.set_text_content(Some(code));
            Ok(())
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn redirect(&self, url: &str) {
        if let Some(window) = window() {
            if let Err(e) = window.location().set_href(url) {
                log::warn!("Redirect to {} failed: {}", url, js_error(e));
            }
        }
    }

    fn open_external(&self, url: &str) {
        if let Some(window) = window() {
            if let Err(e) = window.open_with_url_and_target_and_features(url, "_blank", "noopener,noreferrer") {
                log::warn!("Opening {} failed: {}", url, js_error(e));
            }
        }
    }
}

/// In-memory stand-ins for the browser capabilities.
#[cfg(test)]
pub mod testing {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;

    /// Clones share the same entries, so a clone survives a simulated reload.
    #[derive(Debug, Clone, Default)]
    pub struct MemoryStorage {
        entries: Rc<RefCell<HashMap<String, String>>>,
        broken: Rc<Cell<bool>>,
    }

    impl MemoryStorage {
        pub fn with_entry(key: &str, value: &str) -> Self {
            let storage = Self::default();
            storage
                .entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            storage
        }

        /// Every subsequent call fails, like a browser with storage disabled.
        pub fn break_storage(&self) {
            self.broken.set(true);
        }

        pub fn raw(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }
    }

    impl Storage for MemoryStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            if self.broken.get() {
                return Err(StorageError::Unavailable);
            }
            Ok(self.entries.borrow().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.broken.get() {
                return Err(StorageError::Write(key.to_string()));
            }
            self.entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            if self.broken.get() {
                return Err(StorageError::Write(key.to_string()));
            }
            self.entries.borrow_mut().remove(key);
            Ok(())
        }
    }

    /// Replies with a canned response (or a network failure) and records every request.
    #[derive(Debug, Default)]
    pub struct RecordingHttp {
        reply: Option<HttpResponse>,
        pub requests: RefCell<Vec<(String, String)>>,
    }

    impl RecordingHttp {
        pub fn replying(status: u16, body: &str) -> Self {
            Self {
                reply: Some(HttpResponse {
                    status,
                    body: body.to_string(),
                }),
                requests: RefCell::default(),
            }
        }

        pub fn unreachable() -> Self {
            Self::default()
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    impl HttpClient for RecordingHttp {
        async fn post_form(&self, url: &str, body: &str) -> Result<HttpResponse, TransportError> {
            self.requests
                .borrow_mut()
                .push((url.to_string(), body.to_string()));
            self.reply
                .clone()
                .ok_or_else(|| TransportError::Network("connection refused".to_string()))
        }
    }

    #[derive(Debug, Default)]
    pub struct RecordingScripts {
        pub external: RefCell<Vec<String>>,
        pub inline: RefCell<Vec<String>>,
    }

    impl ScriptLoader for RecordingScripts {
        fn inject_external(&self, src: &str) -> Result<(), ScriptError> {
            self.external.borrow_mut().push(src.to_string());
            Ok(())
        }

        fn inject_inline(&self, code: &str) -> Result<(), ScriptError> {
            self.inline.borrow_mut().push(code.to_string());
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    pub struct RecordingNavigator {
        pub redirects: RefCell<Vec<String>>,
        pub opened: RefCell<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn redirect(&self, url: &str) {
            self.redirects.borrow_mut().push(url.to_string());
        }

        fn open_external(&self, url: &str) {
            self.opened.borrow_mut().push(url.to_string());
        }
    }
}
