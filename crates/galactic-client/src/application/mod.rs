//! Application layer for galactic-client: which messages to send and how to
//! show what comes back.

pub mod render;
pub mod samples;

pub use render::{parse_hex, render, RenderError, Rendered};
