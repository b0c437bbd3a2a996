//! The request plumbing shared by every Mattermost endpoint.

use super::auth::{to_auth_header_val, AccessToken};
use super::error::MatError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Every call is a single attempt bounded by this timeout. There is no
/// retry and no backoff.
const TIMEOUT: Duration = Duration::from_secs(20);

/// The API version requested in configuration, either as a bare number or
/// as a string such as `"4"` or `"v4"`.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum VersionSpec {
    Number(u64),
    Text(String),
}

/// A version string is a single digit with an optional leading `v`.
static VERSION_RE: Lazy<Regex> = Lazy::new(|| Regex::new("^v?([0-9])$").unwrap());

impl VersionSpec {
    /// Resolve to the `/api/vN` path prefix. Only versions 3 and 4 exist
    /// on the servers we talk to.
    pub(super) fn base_path(&self) -> Result<&'static str, MatError> {
        let n = match self {
            VersionSpec::Number(n) => *n,
            VersionSpec::Text(s) => VERSION_RE
                .captures(s)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse().ok())
                .ok_or_else(|| MatError::Version(s.clone()))?,
        };

        match n {
            3 => Ok("/api/v3"),
            4 => Ok("/api/v4"),
            _ => Err(MatError::Version(n.to_string())),
        }
    }
}

/// <https://api.mattermost.com/#tag/authentication>
#[derive(Serialize)]
struct LoginRequest<'a> {
    login_id: &'a str,
    password: &'a str,
}

/// The shape of every Mattermost error body.
#[derive(Deserialize)]
struct ServerError {
    message: String,
}

/// An authenticated Mattermost session.
///
/// Construction via [Client::connect] performs the login; a value of this
/// type always holds a usable bearer token. The underlying
/// [reqwest::Client] keeps its own connection pool.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    base: String,
    token: AccessToken,
}

impl Client {
    /// Log in against `url` and return a client holding the session token.
    ///
    /// A single trailing slash on `url` is dropped. Fails with
    /// [MatError::Version] on an unusable version spec,
    /// [MatError::Login] when the server rejects the credentials or omits
    /// the `token` response header, and [MatError::NonJsonResponse] when a
    /// rejection body cannot be parsed.
    pub async fn connect(
        url: &str,
        login: &str,
        password: &str,
        version: &VersionSpec,
    ) -> Result<Self, MatError> {
        let base = format!("{}{}", url.strip_suffix('/').unwrap_or(url), version.base_path()?);

        let http = reqwest::Client::builder().timeout(TIMEOUT).build()?;

        let res = http
            .post(format!("{}/users/login", base))
            .json(&LoginRequest {
                login_id: login,
                password,
            })
            .send()
            .await?;

        let status = res.status();
        let token = res
            .headers()
            .get("token")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let text = res.text().await?;

        if status != reqwest::StatusCode::OK {
            let err: ServerError =
                serde_json::from_str(&text).map_err(|_| MatError::NonJsonResponse)?;
            return Err(MatError::Login(err.message));
        }

        let token = token.ok_or_else(|| MatError::Login("no token header in response".into()))?;

        Ok(Client {
            http,
            base,
            token: AccessToken(token),
        })
    }

    /// GET `path` and parse the 200 response body into `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, MatError> {
        let res = self.request(reqwest::Method::GET, path).send().await?;

        decode(res).await
    }

    /// POST `body` to `path` and parse the 200 response body into `T`.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, MatError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let body = validated(body)?;
        let res = self
            .request(reqwest::Method::POST, path)
            .json(&body)
            .send()
            .await?;

        decode(res).await
    }

    /// PUT `body` to `path` and parse the 200 response body into `T`.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, MatError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let body = validated(body)?;
        let res = self
            .request(reqwest::Method::PUT, path)
            .json(&body)
            .send()
            .await?;

        decode(res).await
    }

    /// DELETE `path` and parse the 200 response body into `T`.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, MatError> {
        let res = self.request(reqwest::Method::DELETE, path).send().await?;

        decode(res).await
    }

    /// Build an authenticated request, normalising `path` to start with a
    /// slash.
    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let path = path.strip_prefix('/').unwrap_or(path);

        self.http
            .request(method, format!("{}/{}", self.base, path))
            .header(
                reqwest::header::AUTHORIZATION,
                to_auth_header_val(&self.token),
            )
    }
}

/// Serialize a request body, rejecting anything that is not a JSON object
/// or array before any I/O happens.
fn validated<B: Serialize>(body: &B) -> Result<serde_json::Value, MatError> {
    let value = serde_json::to_value(body).map_err(MatError::Decode)?;

    if value.is_object() || value.is_array() {
        Ok(value)
    } else {
        Err(MatError::InvalidBody)
    }
}

/// Turn a raw response into the typed payload, mapping non-200 statuses to
/// the server's `message` and unparsable bodies to [MatError::NonJsonResponse].
async fn decode<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, MatError> {
    let status = res.status();
    let text = res.text().await?;

    if status != reqwest::StatusCode::OK {
        let err: ServerError =
            serde_json::from_str(&text).map_err(|_| MatError::NonJsonResponse)?;
        return Err(MatError::Api(err.message));
    }

    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|_| MatError::NonJsonResponse)?;

    serde_json::from_value(value).map_err(MatError::Decode)
}
