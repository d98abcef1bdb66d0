//! Control-Channel Bridge Core
//!
//! State machines and routing logic for the CDC control channel.
//! Everything in here drives hardware through the capability traits in
//! [`port`], so the whole core runs on the host under test.

pub mod coding;
pub mod dispatch;
pub mod port;
pub mod pulse;
