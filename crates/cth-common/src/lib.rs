//! Shared vocabulary of the closed type hierarchy suppressor.
//!
//! - [`span`]: byte-offset spans and on-demand line/column lookup
//! - [`diagnostic`]: reported diagnostics, suppression descriptors and the
//!   suppression decisions handed back to the host

pub mod diagnostic;
pub mod span;

pub use diagnostic::{Diagnostic, FileId, Location, Suppression, SuppressionDescriptor};
pub use span::{LineIndex, Span};
