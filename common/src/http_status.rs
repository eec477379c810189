//! Status classification for Trello responses.

/// HTTP status code returned by the Trello API.
///
/// Kept as a number so retry and not-found decisions never parse messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HttpStatusCode(pub u16);

impl HttpStatusCode {
    pub const BAD_REQUEST: HttpStatusCode = HttpStatusCode(400);
    pub const UNAUTHORIZED: HttpStatusCode = HttpStatusCode(401);
    pub const NOT_FOUND: HttpStatusCode = HttpStatusCode(404);
    pub const TOO_MANY_REQUESTS: HttpStatusCode = HttpStatusCode(429);

    /// 4xx client errors (not retryable, except 429).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }

    /// 5xx server errors.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0)
    }

    /// Transient failures: Trello rate limiting and gateway hiccups.
    pub fn is_retryable(&self) -> bool {
        matches!(self.0, 429 | 502 | 503 | 504)
    }

    /// Trello answers 400 "invalid id" for malformed ids and 404 for missing ones.
    pub fn is_missing_resource(&self) -> bool {
        matches!(self.0, 400 | 404)
    }

    /// Rejected credentials.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.0, 400 | 401)
    }
}

impl From<u16> for HttpStatusCode {
    fn from(code: u16) -> Self {
        HttpStatusCode(code)
    }
}

impl std::fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
