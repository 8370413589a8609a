//! Logging facilities for Horizon ObjList.
//!
//! Horizon ObjList uses the `tracing` crate for instrumentation. No subscriber
//! is installed by the library; install one in your application to see logs:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_objlist=debug")
//!     .init();
//! ```
//!
//! Role registry warnings (blacklisted or unknown role names) are emitted at
//! `warn` level on [`targets::ROLES`]; every mutation bracket is traced at
//! `trace` level on [`targets::MODEL`].

/// Span names used throughout Horizon ObjList for tracing.
pub mod span_names {
    /// Batch mutation span (bulk insert, clear).
    pub const BATCH: &str = "horizon_objlist::batch";
    /// Deferred deletion drain span.
    pub const DEFERRED: &str = "horizon_objlist::deferred";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_objlist_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_objlist_core::signal";
    /// Role registry construction target.
    pub const ROLES: &str = "horizon_objlist::roles";
    /// List model mutation target.
    pub const MODEL: &str = "horizon_objlist::model";
    /// Change-propagation bridge target.
    pub const BRIDGE: &str = "horizon_objlist::bridge";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to time bulk operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "horizon_objlist::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_share_prefix() {
        for target in [targets::ROLES, targets::MODEL, targets::BRIDGE] {
            assert!(target.starts_with("horizon_objlist::"));
        }
        assert!(targets::SIGNAL.starts_with(targets::CORE));
    }

    #[test]
    fn test_perf_span_without_subscriber() {
        let span = PerfSpan::new(span_names::BATCH);
        drop(span);
    }
}
