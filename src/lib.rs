//! A pair of small Mattermost automations sharing one API client.
//!
//! The `discover` binary records every channel the bot account can see into
//! a JSON registry; the `broadcast` binary posts the daily scrum prompt to
//! every channel in that registry. See [mattermost::api::Client] and
//! [registry::Registry] for the two pieces everything else sits on.

pub mod broadcast;
pub mod config;
pub mod error;
pub mod mattermost;
pub mod registry;
pub mod sync;
