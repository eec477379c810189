use super::{QueryParams, TrelloClient};
use crate::error::TrelloError;

use std::time::Duration;

use backoff::{ExponentialBackoff, backoff::Backoff};
use log::{debug, trace, warn};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tokio::time::sleep as TokioSleep;

/// Retry policy for transient Trello failures (429, 502-504, timeouts).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum retries per request; 0 disables retrying.
    pub max_retries: u32,
    /// Initial retry delay.
    pub initial_interval: Duration,
    /// Maximum retry delay.
    pub max_interval: Duration,
    /// Give up once this much time has passed since the first attempt.
    pub max_elapsed: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_interval: Duration::from_millis(200),
            max_interval: Duration::from_secs(2),
            max_elapsed: Duration::from_secs(10),
        }
    }
}

impl RetryConfig {
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    fn to_backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            current_interval: self.initial_interval,
            initial_interval: self.initial_interval,
            max_interval: self.max_interval,
            max_elapsed_time: Some(self.max_elapsed),
            ..Default::default()
        }
    }
}

impl TrelloClient {
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        page: &str,
        params: QueryParams,
    ) -> Result<T, TrelloError> {
        self.send_json(Method::GET, page, params).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        page: &str,
        params: QueryParams,
    ) -> Result<T, TrelloError> {
        self.send_json(Method::POST, page, params).await
    }

    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        page: &str,
        params: QueryParams,
    ) -> Result<T, TrelloError> {
        self.send_json(Method::PUT, page, params).await
    }

    /// DELETE; Trello's response body (`{"_value": null}`) is ignored.
    pub(crate) async fn delete(&self, page: &str) -> Result<(), TrelloError> {
        self.send(Method::DELETE, page, &QueryParams::new()).await?;
        Ok(())
    }

    /// Send a request and decode the JSON body.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        page: &str,
        params: QueryParams,
    ) -> Result<T, TrelloError> {
        let body = self.send(method, page, &params).await?;
        let value = serde_json::from_str(&body)?;
        Ok(value)
    }

    /// Send a request with retry, returning the raw response body.
    async fn send(
        &self,
        method: Method,
        page: &str,
        params: &QueryParams,
    ) -> Result<String, TrelloError> {
        let url = self.make_url(page, params)?;
        let retry = &self.inner.retry;
        let mut backoff = retry.to_backoff();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            debug!("{method} {page} (attempt {attempt})");

            let error = match self.send_once(method.clone(), url.clone()).await {
                Ok(body) => return Ok(body),
                Err(error) if error.is_retryable() && attempt <= retry.max_retries => error,
                Err(error) => return Err(error),
            };

            match backoff.next_backoff() {
                Some(delay) => {
                    warn!(
                        "{method} {page} failed ({}), retrying after {delay:?}",
                        error.error_category()
                    );
                    TokioSleep(delay).await;
                }
                None => {
                    warn!("{method} {page} failed, retry budget exhausted");
                    return Err(error);
                }
            }
        }
    }

    async fn send_once(&self, method: Method, url: url::Url) -> Result<String, TrelloError> {
        let response = self.inner.http.request(method, url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TrelloError::from_http_response(status.as_u16(), body));
        }

        trace!("Response HTTP {} ({} bytes)", status.as_u16(), body.len());
        Ok(body)
    }
}
