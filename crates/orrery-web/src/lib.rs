//! Server side of the orrery explorer.
//!
//! The only component that holds the text-generation credential. Browsers
//! and the CLI talk to `/api/ask`; the server adds the key and forwards the
//! prompt upstream.

pub mod client;
pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod upstream;
