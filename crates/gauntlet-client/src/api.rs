pub mod submit;
pub mod subscribe;

use url::Url;

use crate::error::{ClientError, Result};

/// Resolves `path` below the server url, keeping any path prefix the url carries.
pub(crate) fn endpoint_url(server_url: &Url, path: &str) -> Result<Url> {
    let mut base = server_url.clone();
    if !base.path().ends_with('/') {
        let prefixed = format!("{}/", base.path());
        base.set_path(&prefixed);
    }
    base.join(path.trim_start_matches('/'))
        .map_err(|e| ClientError::ServerUrlParsingError(e.to_string()))
}

/// Rewrites an `http(s)` server url to the matching websocket scheme.
pub(crate) fn websocket_url(server_url: &Url, path: &str) -> Result<Url> {
    let mut url = endpoint_url(server_url, path)?;

    let new_scheme = match url.scheme() {
        "http" => "ws",
        "https" => "wss",
        other => other,
    }
    .to_string();
    url.set_scheme(&new_scheme).map_err(|_| {
        ClientError::ServerSubscriptionError("Invalid WebSocket scheme".to_string())
    })?;
    Ok(url)
}
