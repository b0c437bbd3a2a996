//! Discovery: record every channel the account can see into the registry.

use crate::error::Failure;
use crate::mattermost::api::Client;
use crate::registry::{ConflictPolicy, Registry};
use std::path::Path;
use tracing::info;

/// Walk every team and every channel visible to the authenticated account
/// and merge the unknown pairs into the registry at `path`.
///
/// The registry is persisted exactly once, after the full walk; any
/// failure before that point leaves the on-disk file untouched. Running
/// twice against an unchanged remote is a no-op the second time.
pub async fn run(client: &Client, path: &Path, policy: ConflictPolicy) -> Result<(), Failure> {
    let mut registry = Registry::load(path)?;

    let mut added = 0;
    for team in client.teams().await? {
        for channel in client.channels(&team.id).await? {
            if !registry.contains(&team.id, &channel.id) {
                registry.add(team.id.clone(), channel.id, policy)?;
                added += 1;
            }
        }
    }

    registry.save(path)?;
    info!("Recorded {} new channel(s), {} total", added, registry.len());

    Ok(())
}
