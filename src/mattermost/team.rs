//! Teams and the channels that hang off them.

use super::{api::Client, error::MatError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Teams are the tenant grouping of the chat service; every channel
/// belongs to exactly one.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamId(pub String);

/// Format without the surrounding newtype wrapper.
impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Channels are referred to by their underlying ID everywhere; names can
/// change, IDs can't.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub String);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The metadata we care about per team in the `/teams/all` response. The
/// server sends plenty more fields; they are ignored.
#[derive(Deserialize)]
pub struct Team {
    pub id: TeamId,
}

/// The metadata we care about per channel in a team's channel listing.
#[derive(Deserialize)]
pub struct Channel {
    pub id: ChannelId,
}

impl Client {
    /// Every team the authenticated account is a member of.
    pub async fn teams(&self) -> Result<Vec<Team>, MatError> {
        self.get("/teams/all").await
    }

    /// Every channel in `team` visible to the authenticated account.
    pub async fn channels(&self, team: &TeamId) -> Result<Vec<Channel>, MatError> {
        self.get(&format!("/teams/{}/channels/", team)).await
    }
}
