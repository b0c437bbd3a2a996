//! The authenticated account.

use super::{api::Client, error::MatError};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The `/users/me` record, trimmed to the id the broadcaster posts as.
#[derive(Deserialize)]
pub struct Me {
    pub id: UserId,
}

impl Client {
    /// Who the session is logged in as.
    pub async fn me(&self) -> Result<Me, MatError> {
        self.get("/users/me").await
    }
}
