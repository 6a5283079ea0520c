use cth_common::{Diagnostic, Suppression, SuppressionDescriptor};
use cth_host::syntax::{ConstantValue, SwitchLabel, SwitchSection};
use cth_host::{Host, SemanticModel, TypeId, TypeQueries};
use tracing::{debug, instrument};

use super::{DiagnosticSuppressor, JUSTIFICATION, SUPPRESSION_ID};
use crate::hierarchy::classify;
use crate::nullability::switch_statement_requires_null_case;
use crate::options::record_hierarchies_allowed;
use crate::pattern::{covers_null, covers_without_restriction, named_type};

static DESCRIPTORS: [SuppressionDescriptor; 1] =
    [SuppressionDescriptor::new(SUPPRESSION_ID, "IDE0010", JUSTIFICATION)];

/// Suppresses "populate switch" (`IDE0010`) on switch statements.
#[derive(Clone, Copy, Debug, Default)]
pub struct SwitchStatementSuppressor {
    force_record_hierarchies: bool,
}

impl SwitchStatementSuppressor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow record hierarchies regardless of the per-file option.
    pub fn with_record_hierarchies(mut self) -> Self {
        self.force_record_hierarchies = true;
        self
    }
}

impl DiagnosticSuppressor for SwitchStatementSuppressor {
    fn supported_suppressions(&self) -> &'static [SuppressionDescriptor] {
        &DESCRIPTORS
    }

    #[instrument(level = "debug", skip_all, fields(id = %diagnostic.id, span = ?diagnostic.location.span))]
    fn suppress(&self, host: &dyn Host, diagnostic: &Diagnostic) -> Option<Suppression> {
        let descriptor = self.descriptor_for(&diagnostic.id)?;

        let Some(switch) = host.switch_statement_at(&diagnostic.location) else {
            debug!("no switch statement at diagnostic location");
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

        if switch_statement_requires_null_case(info.nullability)
            && !switch.sections.iter().any(section_covers_null)
        {
            debug!("null is not handled");
            return None;
        }

        let uncovered = hierarchy.leaves.iter().find(|&&leaf| {
            !switch
                .sections
                .iter()
                .any(|section| section_covers(host, section, leaf))
        });
        if let Some(&leaf) = uncovered {
            debug!(leaf = host.type_name(leaf), "leaf is not covered without restriction");
            return None;
        }

        Some(Suppression::new(descriptor, diagnostic))
    }
}

fn section_covers_null(section: &SwitchSection) -> bool {
    section.labels.iter().any(|label| match label {
        SwitchLabel::Case { value, .. } => *value == ConstantValue::Null,
        SwitchLabel::Pattern(case) => covers_null(case),
        SwitchLabel::Default { .. } => false,
    })
}

fn section_covers<H>(host: &H, section: &SwitchSection, leaf: TypeId) -> bool
where
    H: TypeQueries + SemanticModel + ?Sized,
{
    section.labels.iter().any(|label| match label {
        // `case Root.Leaf1:` names the type as a constant.
        SwitchLabel::Case {
            value: ConstantValue::Name(node),
            ..
        } => named_type(host, *node).is_some_and(|ty| host.has_implicit_conversion(leaf, ty)),
        SwitchLabel::Case { .. } => false,
        SwitchLabel::Pattern(case) => covers_without_restriction(host, case, leaf),
        SwitchLabel::Default { .. } => false,
    })
}
