//! Diagnostic suppressors for non-exhaustive switches over closed
//! hierarchies.
//!
//! Each suppressor walks one diagnostic through the same steps: find the
//! switch it was reported on, resolve the governing type, classify that type
//! as a closed hierarchy, decide whether `null` needs a case, and check that
//! every leaf (and `null`, if needed) is covered by some unguarded case. The
//! first step that fails ends the walk without a suppression.

mod expression;
mod statement;

pub use expression::SwitchExpressionSuppressor;
pub use statement::SwitchStatementSuppressor;

use cth_common::{Diagnostic, Suppression, SuppressionDescriptor};
use cth_host::Host;

/// Identifier of every suppression reported here.
pub const SUPPRESSION_ID: &str = "CTH001";

pub const JUSTIFICATION: &str =
    "every possible type of closed type hierarchy was matched without restrictions";

/// Something that can prove a reported diagnostic to be a false positive.
pub trait DiagnosticSuppressor: Send + Sync {
    /// One descriptor per diagnostic id this suppressor handles.
    fn supported_suppressions(&self) -> &'static [SuppressionDescriptor];

    /// A suppression for `diagnostic`, or `None` to leave it reported.
    fn suppress(&self, host: &dyn Host, diagnostic: &Diagnostic) -> Option<Suppression>;

    /// The descriptor handling `diagnostic_id`, if any.
    fn descriptor_for(&self, diagnostic_id: &str) -> Option<SuppressionDescriptor> {
        self.supported_suppressions()
            .iter()
            .find(|descriptor| descriptor.suppressed_diagnostic_id == diagnostic_id)
            .copied()
    }
}

/// Both suppressors, reading the record option from configuration.
pub fn default_suppressors() -> Vec<Box<dyn DiagnosticSuppressor>> {
    vec![
        Box::new(SwitchExpressionSuppressor::new()),
        Box::new(SwitchStatementSuppressor::new()),
    ]
}

/// Every descriptor of every default suppressor.
pub fn all_descriptors() -> Vec<SuppressionDescriptor> {
    default_suppressors()
        .iter()
        .flat_map(|suppressor| suppressor.supported_suppressions().iter().copied())
        .collect()
}
