//! Shared request/response plumbing.

use reqwest::{Response, Url};
use serde::de::DeserializeOwned;

use hindsight_core::decision::model::Acknowledgement;

use crate::error::{ClientError, ClientResult};

/// Build a `reqwest` client. No timeout: calls wait for the server.
pub(crate) fn build_client() -> ClientResult<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("hindsight/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Join path segments onto a base URL, escaping each segment.
pub(crate) fn endpoint(base: &str, segments: &[&str]) -> ClientResult<Url> {
    let mut url = Url::parse(base).map_err(|e| ClientError::config(format!("{base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| ClientError::config(format!("{base} cannot be a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Decode a JSON body, turning non-2xx statuses into [`ClientError::Http`].
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ClientError::from_response(status.as_u16(), &body));
    }
    Ok(serde_json::from_str(&body)?)
}

/// Like [`read_json`] but tolerates an empty or message-less body.
pub(crate) async fn read_ack(response: Response) -> ClientResult<Acknowledgement> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ClientError::from_response(status.as_u16(), &body));
    }
    if body.trim().is_empty() {
        return Ok(Acknowledgement::default());
    }
    Ok(serde_json::from_str(&body)?)
}
