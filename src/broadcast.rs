//! Broadcast: post the daily scrum prompt to every registered channel.

use crate::error::Failure;
use crate::mattermost::api::Client;
use crate::registry::Registry;
use std::path::Path;
use tracing::info;

/// The fixed prompt posted verbatim to every channel in the registry.
pub const SCRUM_MESSAGE: &str = "@all \n\
    1)What did you do yesterday that helped the development team meet the sprint goal? \n\
    2)What will you do today to help the development team meet the sprint goal? \n\
    3)Do you see any impediment that prevents you or the development team from meeting the sprint goal? \n";

/// Post the scrum prompt to every channel in the registry at `path`.
///
/// The registry is read-only here. Posting is fail-fast: the first error
/// from any post aborts the remaining loop, with no record of which posts
/// already went out.
pub async fn run(client: &Client, path: &Path) -> Result<(), Failure> {
    let registry = Registry::load(path)?;
    let me = client.me().await?;

    for (channel, team) in registry.iter() {
        client
            .create_post(&me.id, team, channel, SCRUM_MESSAGE)
            .await?;
        info!("Posted scrum prompt to channel {}", channel);
    }

    info!("Posted to {} channel(s)", registry.len());

    Ok(())
}
