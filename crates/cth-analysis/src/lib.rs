//! Suppression of non-exhaustive switch diagnostics over closed type
//! hierarchies.
//!
//! A compiler warns when a switch does not handle every value of its input
//! type, but it cannot know that an abstract type with only private
//! constructors and sealed nested subtypes has no other instances. This
//! crate proves such switches exhaustive and suppresses the warning.
//!
//! - [`hierarchy`]: decides whether a type is a closed hierarchy and lists
//!   its leaves
//! - [`pattern`]: decides whether one case covers a leaf (or `null`)
//!   without restriction
//! - [`nullability`]: when `null` needs its own case
//! - [`suppress`]: the switch expression and switch statement suppressors
//! - [`batch`]: parallel, cancellable evaluation of reported diagnostics
//! - [`report`]: human-readable rendering of suppressions
//!
//! All host data is read through [`cth_host::Host`]. Nothing here fails:
//! anything that cannot be resolved leaves the diagnostic in place.

pub mod batch;
pub mod hierarchy;
pub mod nullability;
pub mod options;
pub mod pattern;
pub mod report;
pub mod suppress;

pub use batch::{report_suppressions, CancellationToken, Cancelled};
pub use hierarchy::{classify, ClosedHierarchy};
pub use pattern::{covers_null, covers_without_restriction};
pub use report::render_suppression;
pub use suppress::{
    all_descriptors, default_suppressors, DiagnosticSuppressor, SwitchExpressionSuppressor,
    SwitchStatementSuppressor, JUSTIFICATION, SUPPRESSION_ID,
};
