//! Shared HTTP client for the storefront backend.

use std::time::Instant;

use reqwest::{Client, Method, RequestBuilder, Response, header, multipart::Form};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{
    config::AppConfig,
    error::{AppError, AppResult},
    response::error_message,
    session::SessionStore,
};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Which credentials go on a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth<'a> {
    /// The stored access token, when one exists.
    Session,
    /// An explicit token, used before the session has been written.
    Token(&'a str),
    /// No `Authorization` header. Login and signup only.
    Anonymous,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: &AppConfig, session: SessionStore) -> AppResult<Self> {
        let base_url = config.api_base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(AppError::Config("API base URL is empty".into()));
        }
        let http = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, auth: Auth<'_>) -> AppResult<T> {
        let response = self.send(self.request(Method::GET, path), auth).await?;
        decode(response).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q, auth: Auth<'_>) -> AppResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, path).query(query);
        let response = self.send(builder, auth).await?;
        decode(response).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B, auth: Auth<'_>) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).json(body);
        let response = self.send(builder, auth).await?;
        decode(response).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B, auth: Auth<'_>) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::PUT, path).json(body);
        let response = self.send(builder, auth).await?;
        decode(response).await
    }

    /// DELETE, discarding whatever body the server returns.
    pub async fn delete(&self, path: &str, auth: Auth<'_>) -> AppResult<()> {
        self.send(self.request(Method::DELETE, path), auth).await?;
        Ok(())
    }

    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
        auth: Auth<'_>,
    ) -> AppResult<T> {
        let builder = self.request(Method::POST, path).multipart(form);
        let response = self.send(builder, auth).await?;
        decode(response).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        self.http
            .request(method, url)
            .header(header::ACCEPT, "application/json")
    }

    async fn send(&self, builder: RequestBuilder, auth: Auth<'_>) -> AppResult<Response> {
        let builder = match auth {
            Auth::Session => match self.session.access_token().await {
                Some(token) => builder.bearer_auth(token),
                None => builder,
            },
            Auth::Token(token) => builder.bearer_auth(token),
            Auth::Anonymous => builder,
        };

        let request_id = Uuid::new_v4().to_string();
        let request = builder
            .header(REQUEST_ID_HEADER, request_id.as_str())
            .build()?;
        let method = request.method().clone();
        let url = request.url().path().to_string();
        tracing::debug!(
            request_id = %request_id,
            method = %method,
            uri = %url,
            "request started"
        );

        let started = Instant::now();
        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                let err = AppError::from(err);
                tracing::warn!(
                    request_id = %request_id,
                    method = %method,
                    uri = %url,
                    error = %err,
                    "request failed"
                );
                return Err(err);
            }
        };

        let status = response.status();
        tracing::debug!(
            request_id = %request_id,
            status = %status,
            ms = %started.elapsed().as_millis(),
            "request finished"
        );
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        tracing::warn!(
            request_id = %request_id,
            status = %status,
            message = %message,
            "request rejected"
        );
        Err(match status.as_u16() {
            401 => AppError::Unauthorized(message),
            403 => AppError::Forbidden(message),
            code => AppError::Server {
                status: code,
                message,
            },
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| AppError::Decode(e.to_string()))
}
