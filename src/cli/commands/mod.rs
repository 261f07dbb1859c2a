//! One module per subcommand.

#[cfg(feature = "audit-log")]
pub mod audit_cmd;
pub mod backup;
pub mod completions;
pub mod decrypt;
