//! The persisted channel→team mapping that scrum broadcasts target.
//!
//! The registry is loaded fully into memory at the start of a run, mutated
//! in place, and written back as a whole file at the end. The persisted
//! form is a JSON object keyed by channel id, keys sorted, 4-space indent.
//! The file is not locked; concurrent runs can race.

use crate::mattermost::team::{ChannelId, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{fmt, fs, io};
use tracing::warn;

/// What to do when discovery finds a channel already registered under a
/// different team.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Re-assign the channel to the new team, with a warning.
    #[default]
    Overwrite,
    /// Refuse and abort the run.
    Reject,
}

/// Sum type representing every possible unexceptional fail state of the
/// registry.
#[derive(Debug)]
pub enum RegistryError {
    /// No registry file at the given path.
    NotFound(PathBuf),
    /// The file exists but does not hold a JSON object of strings.
    Malformed(serde_json::Error),
    /// Any other filesystem failure while reading or writing.
    Io(io::Error),
    /// A channel moved teams and the policy is [ConflictPolicy::Reject].
    Conflict {
        channel: ChannelId,
        held: TeamId,
        incoming: TeamId,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            RegistryError::NotFound(p) => format!("Registry file not found: {}", p.display()),
            RegistryError::Malformed(e) => format!("Registry file is malformed: {}", e),
            RegistryError::Io(e) => format!("Registry file unreadable: {}", e),
            RegistryError::Conflict {
                channel,
                held,
                incoming,
            } => format!(
                "Channel {} is registered to team {} but now belongs to {}",
                channel, held, incoming
            ),
        };

        write!(f, "{}", x)
    }
}

/// The channel→team mapping. A [BTreeMap] keeps the persisted keys sorted
/// without an extra pass.
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry(BTreeMap<ChannelId, TeamId>);

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Parse the registry file at `path`.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => RegistryError::NotFound(path.to_owned()),
            _ => RegistryError::Io(e),
        })?;

        serde_json::from_str(&text).map_err(RegistryError::Malformed)
    }

    /// True iff exactly this pair is present. A channel registered under a
    /// different team counts as not found; the merge decides what to do
    /// with it via [Registry::add].
    pub fn contains(&self, team: &TeamId, channel: &ChannelId) -> bool {
        self.0.get(channel) == Some(team)
    }

    /// Register `channel` under `team`. A re-assignment from another team
    /// is resolved per `policy`.
    pub fn add(
        &mut self,
        team: TeamId,
        channel: ChannelId,
        policy: ConflictPolicy,
    ) -> Result<(), RegistryError> {
        if let Some(held) = self.0.get(&channel) {
            if *held != team {
                match policy {
                    ConflictPolicy::Reject => {
                        return Err(RegistryError::Conflict {
                            held: held.clone(),
                            incoming: team,
                            channel,
                        });
                    }
                    ConflictPolicy::Overwrite => {
                        warn!("Channel {} moved from team {} to {}", channel, held, team);
                    }
                }
            }
        }

        self.0.insert(channel, team);

        Ok(())
    }

    /// Every registered pair, in channel id order.
    pub fn iter(&self) -> impl Iterator<Item = (&ChannelId, &TeamId)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overwrite the file at `path` in full with the sorted, 4-space
    /// indented form. No partial-write protection.
    pub fn save(&self, path: &Path) -> Result<(), RegistryError> {
        let mut buf = Vec::new();
        let indent = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, indent);

        self.serialize(&mut ser).map_err(RegistryError::Malformed)?;

        fs::write(path, buf).map_err(RegistryError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    fn team(s: &str) -> TeamId {
        TeamId(s.to_owned())
    }

    fn chan(s: &str) -> ChannelId {
        ChannelId(s.to_owned())
    }

    #[test]
    fn test_contains_exact_pair_only() {
        let mut reg = Registry::new();
        reg.add(team("T1"), chan("C1"), ConflictPolicy::Overwrite)
            .unwrap();

        assert!(reg.contains(&team("T1"), &chan("C1")));
        assert!(!reg.contains(&team("T2"), &chan("C1")));
        assert!(!reg.contains(&team("T1"), &chan("C2")));
    }

    #[test]
    fn test_overwrite_reassigns() {
        let mut reg = Registry::new();
        reg.add(team("T1"), chan("C1"), ConflictPolicy::Overwrite)
            .unwrap();
        reg.add(team("T2"), chan("C1"), ConflictPolicy::Overwrite)
            .unwrap();

        assert!(reg.contains(&team("T2"), &chan("C1")));
        assert!(!reg.contains(&team("T1"), &chan("C1")));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_reject_refuses_reassignment() {
        let mut reg = Registry::new();
        reg.add(team("T1"), chan("C1"), ConflictPolicy::Reject)
            .unwrap();

        // Same pair again is fine under either policy.
        reg.add(team("T1"), chan("C1"), ConflictPolicy::Reject)
            .unwrap();

        let err = reg
            .add(team("T2"), chan("C1"), ConflictPolicy::Reject)
            .unwrap_err();

        assert!(matches!(
            err,
            RegistryError::Conflict { ref held, ref incoming, .. }
                if held.0 == "T1" && incoming.0 == "T2"
        ));
        assert!(reg.contains(&team("T1"), &chan("C1")));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let err = Registry::load(&dir.path().join("absent.json")).unwrap_err();

        assert!(matches!(err, RegistryError::NotFound(_)));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");

        std::fs::write(&path, "not json at all").unwrap();
        assert!(matches!(
            Registry::load(&path).unwrap_err(),
            RegistryError::Malformed(_)
        ));

        // Valid JSON of the wrong shape is just as malformed.
        std::fs::write(&path, r#"["C1", "T1"]"#).unwrap();
        assert!(matches!(
            Registry::load(&path).unwrap_err(),
            RegistryError::Malformed(_)
        ));
    }

    #[test]
    fn test_save_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reg.json");

        let mut reg = Registry::new();
        reg.add(team("T1"), chan("C2"), ConflictPolicy::Overwrite)
            .unwrap();
        reg.add(team("T1"), chan("C1"), ConflictPolicy::Overwrite)
            .unwrap();
        reg.save(&path).unwrap();

        // Keys sorted, 4-space indent.
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{\n    \"C1\": \"T1\",\n    \"C2\": \"T1\"\n}"
        );
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reg.json");

        let mut reg = Registry::new();
        reg.add(team("T1"), chan("C1"), ConflictPolicy::Overwrite)
            .unwrap();
        reg.add(team("T2"), chan("C2"), ConflictPolicy::Overwrite)
            .unwrap();
        reg.save(&path).unwrap();

        assert_eq!(Registry::load(&path).unwrap(), reg);
    }

    quickcheck! {
        /// However pairs arrive, `contains` reflects the last team written
        /// for each channel and nothing else.
        fn prop_contains_last_write(pairs: Vec<(String, String)>) -> bool {
            let mut reg = Registry::new();
            for (t, c) in &pairs {
                reg.add(team(t), chan(c), ConflictPolicy::Overwrite).unwrap();
            }

            pairs.iter().all(|(t, c)| {
                let last = pairs
                    .iter()
                    .rev()
                    .find(|(_, c2)| c2 == c)
                    .map(|(t2, _)| t2)
                    .unwrap();
                reg.contains(&team(t), &chan(c)) == (t == last)
            })
        }
    }
}
