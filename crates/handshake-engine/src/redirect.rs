//! Inbound redirect handling: one-time exchange credentials in the page URL.

use url::Url;

/// The transient (userId, accessToken) pair delivered via redirect.
///
/// Consumed exactly once; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeCredentials {
    pub user_id: String,
    pub access_token: String,
}

/// Extract exchange credentials from a page URL.
///
/// Returns the credentials plus the URL with the `userId` and `accessToken`
/// parameters removed, preserving every other query parameter and their
/// order. The first occurrence of each credential parameter wins; all
/// occurrences are stripped. Returns `None` unless both parameters are
/// present.
pub(crate) fn split_exchange_credentials(url: &Url) -> Option<(ExchangeCredentials, Url)> {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let user_id = pairs.iter().find(|(k, _)| k == "userId")?.1.clone();
    let access_token = pairs.iter().find(|(k, _)| k == "accessToken")?.1.clone();

    let remaining: Vec<&(String, String)> = pairs
        .iter()
        .filter(|(k, _)| k != "userId" && k != "accessToken")
        .collect();

    let mut cleaned = url.clone();
    if remaining.is_empty() {
        cleaned.set_query(None);
    } else {
        let mut query = cleaned.query_pairs_mut();
        query.clear();
        for (k, v) in remaining {
            query.append_pair(k, v);
        }
        drop(query);
    }

    Some((
        ExchangeCredentials {
            user_id,
            access_token,
        },
        cleaned,
    ))
}
