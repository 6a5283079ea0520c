use cth_common::{Diagnostic, Suppression, SuppressionDescriptor};
use cth_host::Host;
use tracing::{debug, instrument};

use super::{DiagnosticSuppressor, JUSTIFICATION, SUPPRESSION_ID};
use crate::hierarchy::classify;
use crate::nullability::switch_expression_requires_null_case;
use crate::options::record_hierarchies_allowed;
use crate::pattern::{covers_null, covers_without_restriction};

static DESCRIPTORS: [SuppressionDescriptor; 2] = [
    SuppressionDescriptor::new(SUPPRESSION_ID, "CS8509", JUSTIFICATION),
    SuppressionDescriptor::new(SUPPRESSION_ID, "IDE0072", JUSTIFICATION),
];

/// Suppresses "switch expression does not handle all possible values"
/// (`CS8509`, `IDE0072`).
#[derive(Clone, Copy, Debug, Default)]
pub struct SwitchExpressionSuppressor {
    force_record_hierarchies: bool,
}

impl SwitchExpressionSuppressor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow record hierarchies regardless of the per-file option.
    pub fn with_record_hierarchies(mut self) -> Self {
        self.force_record_hierarchies = true;
        self
    }
}

impl DiagnosticSuppressor for SwitchExpressionSuppressor {
    fn supported_suppressions(&self) -> &'static [SuppressionDescriptor] {
        &DESCRIPTORS
    }

    #[instrument(level = "debug", skip_all, fields(id = %diagnostic.id, span = ?diagnostic.location.span))]
    fn suppress(&self, host: &dyn Host, diagnostic: &Diagnostic) -> Option<Suppression> {
        let descriptor = self.descriptor_for(&diagnostic.id)?;

        let Some(switch) = host.switch_expression_at(&diagnostic.location) else {
            debug!("no switch expression at diagnostic location");
            return None;
        };

        let info = host.type_info(switch.governing.node);
        let Some(governing) = info.ty else {
            debug!("governing expression has no named type");
            return None;
        };

        let allow_records = self.force_record_hierarchies
            || record_hierarchies_allowed(host, diagnostic.location.file);
        let Some(hierarchy) = classify(host, governing, allow_records) else {
            debug!(ty = host.type_name(governing), "not a closed hierarchy");
            return None;
        };

        let requires_null = switch_expression_requires_null_case(info.nullability, || {
            host.symbol_info(switch.governing.node)
        });
        if requires_null && !switch.arms.iter().any(covers_null) {
            debug!("null is not handled");
            return None;
        }

        let uncovered = hierarchy.leaves.iter().find(|&&leaf| {
            !switch
                .arms
                .iter()
                .any(|arm| covers_without_restriction(host, arm, leaf))
        });
        if let Some(&leaf) = uncovered {
            debug!(leaf = host.type_name(leaf), "leaf is not covered without restriction");
            return None;
        }

        Some(Suppression::new(descriptor, diagnostic))
    }
}
