//! Helpers around Mattermost's use of OAuth Bearer Authentication.

/// A newtype wrapper around the session token returned by a successful
/// login. Held by the client for its whole lifetime; there is no refresh.
#[derive(Clone, Debug)]
pub struct AccessToken(pub String);

/// Convert a session token to a `Bearer` `Authorization` header value.
///
/// ```
/// use scrumbot::mattermost::auth::{to_auth_header_val, AccessToken};
///
/// let token = AccessToken("abc123".into());
/// assert_eq!(to_auth_header_val(&token), "Bearer abc123");
/// ```
pub fn to_auth_header_val(t: &AccessToken) -> String {
    format!("Bearer {}", t.0)
}
