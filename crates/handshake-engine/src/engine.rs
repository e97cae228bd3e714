//! The auth handshake engine: bootstrap, logout, login redirect.

use crate::fsm::{SessionInput, SessionMachine, SessionPhase};
use crate::guard::LivenessWatcher;
use crate::redirect::split_exchange_credentials;
use crate::{AuthResult, BackendClient, BackendConfig, FormSubmission, Navigator};
use async_trait::async_trait;
use session_storage::SessionStore;
use std::sync::{Arc, Mutex};

/// Collaborator contract: a query interface returning a single record by
/// field match. Used to load the current user's full record once
/// authenticated; the engine never reimplements the data layer.
#[async_trait]
pub trait UserQuery: Send + Sync {
    /// Fetch the single record whose `field` equals `value`, if any.
    async fn fetch_one(&self, field: &str, value: &str) -> AuthResult<Option<serde_json::Value>>;
}

/// Options for [`AuthEngine::logout`].
#[derive(Debug, Clone, Default)]
pub struct LogoutOptions {
    /// Where the backend should redirect after deleting the session.
    pub redirect: Option<String>,
}

/// Outcome of the bootstrap sequence.
///
/// When authenticated, the bootstrap also hands back the liveness watcher;
/// wiring it to the real-time transport's close events is the caller's job,
/// so the composition stays visible instead of happening as a hidden side
/// effect inside `init_auth`.
pub struct Bootstrap {
    user_id: Option<String>,
    watcher: Option<LivenessWatcher>,
}

impl Bootstrap {
    fn authenticated(user_id: String, watcher: LivenessWatcher) -> Self {
        Self {
            user_id: Some(user_id),
            watcher: Some(watcher),
        }
    }

    fn anonymous() -> Self {
        Self {
            user_id: None,
            watcher: None,
        }
    }

    /// The adopted identity, if any.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Whether the bootstrap ended authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// Take the liveness watcher to attach to the transport's close events.
    pub fn take_watcher(&mut self) -> Option<LivenessWatcher> {
        self.watcher.take()
    }
}

struct EngineInner {
    config: BackendConfig,
    client: BackendClient,
    store: SessionStore,
    navigator: Box<dyn Navigator>,
    user_query: Option<Box<dyn UserQuery>>,
    lifecycle: Mutex<SessionMachine>,
    current_user_id: Mutex<Option<String>>,
}

/// The session-state object owned by the application shell.
///
/// Cheap to clone; all clones share the same lifecycle state, identity
/// cache and storage.
#[derive(Clone)]
pub struct AuthEngine {
    inner: Arc<EngineInner>,
}

impl AuthEngine {
    /// Create an engine without a user-record query collaborator.
    pub fn new(config: BackendConfig, store: SessionStore, navigator: Box<dyn Navigator>) -> Self {
        Self::with_parts(config, store, navigator, None)
    }

    /// Create an engine, optionally wiring the user-record query collaborator.
    pub fn with_parts(
        config: BackendConfig,
        store: SessionStore,
        navigator: Box<dyn Navigator>,
        user_query: Option<Box<dyn UserQuery>>,
    ) -> Self {
        let client = BackendClient::new(config.clone());
        Self {
            inner: Arc::new(EngineInner {
                config,
                client,
                store,
                navigator,
                user_query,
                lifecycle: Mutex::new(SessionMachine::new()),
                current_user_id: Mutex::new(None),
            }),
        }
    }

    /// Run the bootstrap sequence.
    ///
    /// Safe to call repeatedly: once authenticated, repeat calls return the
    /// cached identity without issuing another exchange or touching storage.
    /// Errors never escape; any bootstrap failure clears both storage keys
    /// and the result is anonymous.
    pub async fn init_auth(&self) -> Bootstrap {
        if let Some(user_id) = self.current_user_id() {
            return Bootstrap::authenticated(user_id, LivenessWatcher::new(self.clone()));
        }

        match self.try_bootstrap().await {
            Ok(Some(user_id)) => {
                tracing::info!(user_id = %user_id, "Adopted stored session");
                Bootstrap::authenticated(user_id, LivenessWatcher::new(self.clone()))
            }
            Ok(None) => Bootstrap::anonymous(),
            Err(err) => {
                // A session token left behind by an unrelated deployment of
                // this client would otherwise bounce between us and the
                // backend forever: backend rejects the token, redirects
                // here, we find a token and redirect back.
                tracing::warn!(error = %err, "Bootstrap failed, clearing stored session");
                if let Err(err) = self.inner.store.clear_session() {
                    tracing::error!(error = %err, "Failed to clear stored session");
                }
                self.note_anonymous();
                Bootstrap::anonymous()
            }
        }
    }

    async fn try_bootstrap(&self) -> AuthResult<Option<String>> {
        self.handle_redirect_back().await?;

        if self.inner.store.has_session()? {
            match self.inner.store.user_id()? {
                Some(user_id) => {
                    self.adopt_session(user_id.clone());
                    return Ok(Some(user_id));
                }
                None => {
                    // A token without an identity is foreign state.
                    tracing::warn!("Stored session token has no identity, clearing");
                    self.inner.store.clear_session()?;
                }
            }
        }

        self.note_anonymous();
        Ok(None)
    }

    /// Consume one-time exchange credentials from the current page URL.
    ///
    /// The visible URL is rewritten before the exchange call goes out; the
    /// exchange can take seconds in the worst case and must not delay the
    /// cleanup. Returns whether credentials were found and processed.
    pub async fn handle_redirect_back(&self) -> AuthResult<bool> {
        let current = self.inner.navigator.current_url()?;
        let Some((credentials, cleaned)) = split_exchange_credentials(&current) else {
            return Ok(false);
        };

        tracing::debug!("Exchange credentials found in page URL");
        self.inner.navigator.rewrite_url(&cleaned)?;

        let jwt = self
            .inner
            .client
            .fetch_jwt(&credentials.user_id, &credentials.access_token)
            .await?;
        self.inner.store.set_session(&jwt, &credentials.user_id)?;

        Ok(true)
    }

    /// Probe session validity after a suspicious transport close.
    ///
    /// If the backend no longer accepts the stored token (or no token is
    /// stored), wipe the session and force a fresh login redirect. A
    /// successful probe means the disconnect was transient; nothing happens.
    pub async fn handle_potential_invalid_jwt(&self) -> AuthResult<()> {
        let jwt = self.inner.store.jwt()?;

        if let Some(jwt) = jwt {
            if self.inner.client.probe_session(&jwt).await? {
                tracing::debug!("Session probe succeeded, keeping stored token");
                return Ok(());
            }
        }

        tracing::info!("Stored session token is invalid, forcing a fresh login");
        self.inner.store.clear_session()?;
        self.invalidate_session();
        self.login_with_redirect()
    }

    /// Navigate to the backend's session-creation endpoint, carrying the
    /// current page URL as the redirect target. Terminal.
    pub fn login_with_redirect(&self) -> AuthResult<()> {
        let current = self.inner.navigator.current_url()?;
        let mut target = self.inner.config.endpoint_url("/NewSession")?;
        target
            .query_pairs_mut()
            .append_pair("redirectBack", current.as_str());

        tracing::info!("Redirecting to backend login");
        self.inner.navigator.navigate(&target)
    }

    /// Clear the session and submit the logout form to the backend.
    ///
    /// A storage failure is logged but does not stop the navigation; the
    /// backend-side session is deleted either way.
    pub fn logout(&self, options: LogoutOptions) -> AuthResult<()> {
        if let Err(err) = self.inner.store.clear_session() {
            tracing::error!(error = %err, "Failed to clear stored session during logout");
        }
        self.note_logged_out();

        let mut fields = vec![("_method".to_string(), "DELETE".to_string())];
        if let Some(redirect) = options.redirect {
            fields.push(("redirectBack".to_string(), redirect));
        }

        let form = FormSubmission {
            action: self.inner.config.endpoint("/DeleteSession"),
            fields,
        };

        tracing::info!("Submitting logout form to backend");
        self.inner.navigator.submit_form(&form)
    }

    /// Bootstrap, then force a login redirect when anonymous.
    pub async fn ensure_is_user(&self) -> AuthResult<Bootstrap> {
        let bootstrap = self.init_auth().await;
        if !bootstrap.is_authenticated() {
            self.login_with_redirect()?;
        }
        Ok(bootstrap)
    }

    /// The cached identity, if authenticated.
    pub fn current_user_id(&self) -> Option<String> {
        self.inner.current_user_id.lock().unwrap().clone()
    }

    /// Load the current user's full record through the query collaborator.
    ///
    /// Resolves to `None` when anonymous or when no collaborator is wired.
    pub async fn current_user(&self) -> AuthResult<Option<serde_json::Value>> {
        let Some(user_id) = self.current_user_id() else {
            return Ok(None);
        };

        match &self.inner.user_query {
            Some(query) => query.fetch_one("id", &user_id).await,
            None => {
                tracing::debug!("No user query collaborator wired, returning no record");
                Ok(None)
            }
        }
    }

    /// Observable lifecycle phase.
    pub fn session_phase(&self) -> SessionPhase {
        SessionPhase::from(self.inner.lifecycle.lock().unwrap().state())
    }

    fn adopt_session(&self, user_id: String) {
        *self.inner.current_user_id.lock().unwrap() = Some(user_id);
        self.transition(SessionInput::SessionAdopted);
    }

    fn note_anonymous(&self) {
        *self.inner.current_user_id.lock().unwrap() = None;
        self.transition(SessionInput::NoSession);
    }

    fn invalidate_session(&self) {
        *self.inner.current_user_id.lock().unwrap() = None;
        self.transition(SessionInput::SessionInvalidated);
    }

    fn note_logged_out(&self) {
        *self.inner.current_user_id.lock().unwrap() = None;
        self.transition(SessionInput::LoggedOut);
    }

    fn transition(&self, input: SessionInput) {
        let mut lifecycle = self.inner.lifecycle.lock().unwrap();
        if lifecycle.consume(&input).is_err() {
            tracing::debug!(input = ?input, state = ?lifecycle.state(), "Lifecycle input ignored");
        }
    }
}
