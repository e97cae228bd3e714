//! Shared test harness: recording navigator and inspectable storage.

use handshake_engine::{AuthEngine, AuthResult, BackendConfig, FormSubmission, Navigator};
use session_storage::{MemoryStorage, SessionStorage, SessionStore, StorageResult};
use std::sync::{Arc, Mutex};
use url::Url;

/// A navigation performed through the harness navigator.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    /// Visible URL rewritten in place, no reload.
    Rewrite(Url),
    /// Full-page navigation.
    Navigate(Url),
    /// Full-page form POST.
    Form(FormSubmission),
}

struct NavState {
    current: Mutex<Url>,
    events: Mutex<Vec<NavEvent>>,
}

/// Navigator that records every navigation instead of performing it.
#[derive(Clone)]
pub struct RecordingNavigator {
    state: Arc<NavState>,
}

impl RecordingNavigator {
    pub fn at(page_url: &str) -> Self {
        Self {
            state: Arc::new(NavState {
                current: Mutex::new(Url::parse(page_url).expect("invalid page url")),
                events: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn current(&self) -> Url {
        self.state.current.lock().unwrap().clone()
    }

    pub fn events(&self) -> Vec<NavEvent> {
        self.state.events.lock().unwrap().clone()
    }

    pub fn navigations(&self) -> Vec<Url> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                NavEvent::Navigate(url) => Some(url),
                _ => None,
            })
            .collect()
    }

    pub fn forms(&self) -> Vec<FormSubmission> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                NavEvent::Form(form) => Some(form),
                _ => None,
            })
            .collect()
    }
}

impl Navigator for RecordingNavigator {
    fn current_url(&self) -> AuthResult<Url> {
        Ok(self.current())
    }

    fn rewrite_url(&self, url: &Url) -> AuthResult<()> {
        *self.state.current.lock().unwrap() = url.clone();
        self.state
            .events
            .lock()
            .unwrap()
            .push(NavEvent::Rewrite(url.clone()));
        Ok(())
    }

    fn navigate(&self, url: &Url) -> AuthResult<()> {
        self.state
            .events
            .lock()
            .unwrap()
            .push(NavEvent::Navigate(url.clone()));
        Ok(())
    }

    fn submit_form(&self, form: &FormSubmission) -> AuthResult<()> {
        self.state
            .events
            .lock()
            .unwrap()
            .push(NavEvent::Form(form.clone()));
        Ok(())
    }
}

/// Memory storage that stays inspectable after the engine takes ownership.
#[derive(Clone, Default)]
pub struct SharedStorage {
    inner: Arc<MemoryStorage>,
}

impl SharedStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for SharedStorage {
    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.inner.set(key, value)
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.get(key)
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        self.inner.delete(key)
    }
}

pub struct Harness {
    pub engine: AuthEngine,
    pub storage: SharedStorage,
    pub navigator: RecordingNavigator,
}

impl Harness {
    /// Both storage keys, for pair-invariant assertions.
    pub fn stored_pair(&self) -> (Option<String>, Option<String>) {
        (
            self.inner_get("ihp_jwt"),
            self.inner_get("ihp_user_id"),
        )
    }

    /// Asserts the pair invariant: both keys present or both absent.
    pub fn assert_pair_invariant(&self) {
        let (jwt, user_id) = self.stored_pair();
        assert_eq!(
            jwt.is_some(),
            user_id.is_some(),
            "storage must hold both keys or neither, got jwt={:?} user_id={:?}",
            jwt,
            user_id
        );
    }

    fn inner_get(&self, key: &str) -> Option<String> {
        self.storage.get(key).unwrap()
    }
}

/// Build an engine pointed at `backend_url` with the page loaded at
/// `page_url`.
pub fn harness(backend_url: &str, page_url: &str) -> Harness {
    let storage = SharedStorage::new();
    let navigator = RecordingNavigator::at(page_url);
    let engine = AuthEngine::new(
        BackendConfig::new(backend_url),
        SessionStore::new(Box::new(storage.clone())),
        Box::new(navigator.clone()),
    );
    Harness {
        engine,
        storage,
        navigator,
    }
}

/// Seed a pre-existing session pair directly into storage.
pub fn seed_session(harness: &Harness, jwt: &str, user_id: &str) {
    harness.storage.set("ihp_jwt", jwt).unwrap();
    harness.storage.set("ihp_user_id", user_id).unwrap();
}
