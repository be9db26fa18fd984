//! # HTTP adapter: bearer injection and the 401 choke point
//!
//! Every service wrapper goes through [`HttpClient`]. It attaches
//! `Authorization: Bearer <token>` when the session holds a token, and
//! inspects every response before the caller sees it:
//!
//! - **401** → the session is invalidated (token cleared, subscribers
//!   fired) and the call resolves to [`ApiError::Unauthorized`]. This fires
//!   regardless of which component issued the request, so stale-credential
//!   handling lives in exactly one place.
//! - **other non-2xx** → the `{ "detail": ... }` body is surfaced verbatim
//!   when present, else the caller's per-operation fallback message.
//! - **transport failure** → [`ApiError::Network`].
//!
//! No explicit timeout is configured; the transport's own default applies.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::session::SessionStore;

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: String,
}

/// Shared HTTP client bound to a session. Cheap to clone.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    session: SessionStore,
}

impl HttpClient {
    pub fn new(session: SessionStore) -> Self {
        Self {
            client: reqwest::Client::new(),
            session,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        fallback: &str,
    ) -> ApiResult<T> {
        let request = self.client.get(url).query(query);
        let response = self.send(request, fallback).await?;
        decode(response).await
    }

    /// GET returning the raw JSON value; used where the response shape is
    /// handled defensively by the caller.
    pub async fn get_value(&self, url: &str, fallback: &str) -> ApiResult<Value> {
        let request = self.client.get(url);
        let response = self.send(request, fallback).await?;
        decode(response).await
    }

    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        url: &str,
        body: &B,
        fallback: &str,
    ) -> ApiResult<T> {
        let request = self.client.post(url).json(body);
        let response = self.send(request, fallback).await?;
        decode(response).await
    }

    /// POST with no request body (e.g. the favorite toggle).
    pub async fn post_empty<T: DeserializeOwned>(&self, url: &str, fallback: &str) -> ApiResult<T> {
        let request = self.client.post(url);
        let response = self.send(request, fallback).await?;
        decode(response).await
    }

    pub async fn put_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        url: &str,
        body: &B,
        fallback: &str,
    ) -> ApiResult<T> {
        let request = self.client.put(url).json(body);
        let response = self.send(request, fallback).await?;
        decode(response).await
    }

    /// DELETE; the success body (usually 204) is ignored.
    pub async fn delete(&self, url: &str, fallback: &str) -> ApiResult<()> {
        let request = self.client.delete(url);
        self.send(request, fallback).await?;
        Ok(())
    }

    /// Attach the bearer token, issue the request and run the response
    /// interceptor. Returns the response only when the status is 2xx.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        fallback: &str,
    ) -> ApiResult<reqwest::Response> {
        let request = match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|err| {
            tracing::error!("request failed: {err}");
            ApiError::Network
        })?;

        let status = response.status();
        if let Some(err) = self.intercept_status(status) {
            return Err(err);
        }
        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .map(|body| body.detail)
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| fallback.to_string());
            tracing::warn!(status = %status, "request rejected: {detail}");
            return Err(ApiError::remote(detail));
        }
        Ok(response)
    }

    /// The global authorization interceptor: a 401 clears the session and
    /// notifies subscribers before any call site sees the error.
    fn intercept_status(&self, status: reqwest::StatusCode) -> Option<ApiError> {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::info!("authorization denied, invalidating session");
            self.session.invalidate();
            return Some(ApiError::Unauthorized);
        }
        None
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
    response.json::<T>().await.map_err(|err| {
        tracing::error!("response decode failed: {err}");
        ApiError::Network
    })
}
