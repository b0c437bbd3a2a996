//! A thin client for the Mattermost REST API.
//!
//! The client logs in once at construction time and attaches the resulting
//! bearer token to every subsequent call. Requests are single-attempt with
//! a fixed timeout; every failure propagates to the caller.
//!
//! See [api::Client].

pub mod api;
pub mod auth;
pub mod error;
pub mod post;
pub mod team;
pub mod user;
