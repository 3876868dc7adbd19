//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: in-memory client and mortgage store
//! - **dns**: MX lookups through `hickory-resolver`
//! - **smtp**: recipient probe over a raw SMTP dialogue
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod dns;
pub mod persistence;
pub mod smtp;
