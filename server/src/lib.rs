//! # NoEmoji Server
//!
//! WebSocket front end for the session token authority. Each text frame is a
//! JSON request naming an operation; the reply is the JSON-encoded result,
//! the text of an error, or nothing for an unknown operation.

pub mod connection;
pub mod handlers;
pub mod protocol;
pub mod router;
pub mod server;
pub mod state;
pub mod telemetry;

pub use protocol::{ProtocolError, Reply, Request};
pub use router::{dispatch, Operation};
pub use server::serve;
pub use state::AppState;
