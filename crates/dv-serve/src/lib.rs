//! Sync orchestration for Deltaview.
//!
//! This crate hosts the server side of the sync protocol: a pull endpoint
//! that validates the client's claimed state, fetches the authoritative
//! client view from the account's backend, commits it to the client's log,
//! and answers with the patch bringing the client up to date.
//!
//! The upstream fetch is deliberately non-fatal: when the account backend
//! is down (or not configured), a pull re-serves the last known state
//! rather than failing, so clients always converge on something
//! well-defined.

pub mod accounts;
pub mod client_view;
pub mod config;
pub mod error;
pub mod inject;
pub mod pull;
pub mod router;
pub mod server;
pub mod state;

pub use accounts::{Account, AccountRegistry};
pub use client_view::{
    ClientViewFetch, ClientViewRequest, ClientViewResponse, FetchError, FetchResult,
    HttpClientViewFetcher,
};
pub use config::ServerConfig;
pub use error::{ServeError, ServeResult};
pub use pull::{PullRequest, PullResponse};
pub use router::build_router;
pub use server::SyncServer;
pub use state::AppState;
