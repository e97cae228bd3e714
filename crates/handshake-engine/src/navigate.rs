//! Navigation seam between the engine and the host environment.

use crate::AuthResult;
use url::Url;

/// A method-override form POST performed as a full-page navigation.
///
/// The logout endpoint expects DELETE semantics delivered through a POST
/// with a hidden `_method` field; no response is ever read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    /// Absolute URL the form posts to.
    pub action: String,
    /// Hidden fields, submitted in order.
    pub fields: Vec<(String, String)>,
}

/// The host environment's page URL and navigation affordances.
///
/// In a browser-like host this maps onto `location`, `history.pushState`
/// and form submission; natively it is whatever the shell does for
/// deep links and external navigations.
pub trait Navigator: Send + Sync {
    /// The current full page URL, including its query string.
    fn current_url(&self) -> AuthResult<Url>;

    /// Replace the visible URL without reloading the page.
    fn rewrite_url(&self, url: &Url) -> AuthResult<()>;

    /// Perform a full-page navigation. Terminal: the page unloads.
    fn navigate(&self, url: &Url) -> AuthResult<()>;

    /// Submit a form as a full-page POST navigation. Terminal.
    fn submit_form(&self, form: &FormSubmission) -> AuthResult<()>;
}
