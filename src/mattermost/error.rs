use std::fmt;

/// Sum type representing every possible unexceptional fail state of the
/// API client.
#[derive(Debug)]
pub enum MatError {
    /// The configured API version is not one we can talk to.
    Version(String),
    /// The server rejected the login credentials.
    Login(String),
    /// The request never completed: DNS, connect, timeout.
    RequestFailed(reqwest::Error),
    /// The response body was not JSON, or an error body had no `message`.
    NonJsonResponse,
    /// The server reported an application error.
    Api(String),
    /// A 200 body that parsed as JSON but not as the expected record.
    Decode(serde_json::Error),
    /// A request body that is neither a JSON object nor an array.
    InvalidBody,
}

impl From<reqwest::Error> for MatError {
    fn from(e: reqwest::Error) -> Self {
        MatError::RequestFailed(e)
    }
}

impl fmt::Display for MatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            MatError::Version(v) => format!("Invalid API version number: {}", v),
            MatError::Login(e) => format!("Login rejected: {}", e),
            MatError::RequestFailed(e) => format!("API request failed: {:?}", e),
            MatError::NonJsonResponse => "API returned a non-JSON response".into(),
            MatError::Api(e) => format!("API returned error: {}", e),
            MatError::Decode(e) => format!("Unexpected API response shape: {}", e),
            MatError::InvalidBody => "Request body must be an object or array".into(),
        };

        write!(f, "{}", x)
    }
}
