//! Create posts in channels.

use super::team::{ChannelId, TeamId};
use super::user::UserId;
use super::{api::Client, error::MatError};
use serde::{Deserialize, Serialize};

/// <https://api.mattermost.com/#tag/posts>
#[derive(Serialize)]
struct PostRequest<'a> {
    user_id: &'a UserId,
    channel_id: &'a ChannelId,
    message: &'a str,
}

/// The created post. Only the id is checked, to make sure the server
/// actually echoed a post back.
#[derive(Deserialize)]
struct PostResponse {
    #[allow(dead_code)]
    id: String,
}

impl Client {
    /// Post `message` as `user` into `channel` of `team`.
    pub async fn create_post(
        &self,
        user: &UserId,
        team: &TeamId,
        channel: &ChannelId,
        message: &str,
    ) -> Result<(), MatError> {
        let path = format!("/teams/{}/channels/{}/posts/create", team, channel);

        let _: PostResponse = self
            .post(
                &path,
                &PostRequest {
                    user_id: user,
                    channel_id: channel,
                    message,
                },
            )
            .await?;

        Ok(())
    }
}
