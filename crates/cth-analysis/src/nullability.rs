//! Whether a switch must handle `null` separately.
//!
//! The two switch forms deliberately use different rules; see
//! [`switch_expression_requires_null_case`] and
//! [`switch_statement_requires_null_case`].

use cth_host::{NullableAnnotation, NullableFlowState, Nullability, Symbol};

/// Rule for switch expressions.
///
/// Not required when the governing expression is annotated and proven
/// non-null by flow analysis, or explicitly non-nullable. When no annotation
/// information exists at all (which happens for a deconstructed switch
/// result), the declared annotation of the parameter or local being switched
/// on decides. `symbol` is only consulted in that case.
pub fn switch_expression_requires_null_case(
    nullability: Nullability,
    symbol: impl FnOnce() -> Option<Symbol>,
) -> bool {
    match (nullability.annotation, nullability.flow_state) {
        (NullableAnnotation::Annotated, NullableFlowState::NotNull) => false,
        (NullableAnnotation::NotAnnotated, _) => false,
        (NullableAnnotation::None, _) => !matches!(
            symbol(),
            Some(
                Symbol::Parameter {
                    annotation: NullableAnnotation::NotAnnotated
                } | Symbol::Local {
                    annotation: NullableAnnotation::NotAnnotated
                }
            )
        ),
        _ => true,
    }
}

/// Rule for switch statements: required when the value may be null or no
/// annotation information exists. There is no symbol fallback.
pub fn switch_statement_requires_null_case(nullability: Nullability) -> bool {
    matches!(
        (nullability.annotation, nullability.flow_state),
        (NullableAnnotation::Annotated, NullableFlowState::MaybeNull) | (NullableAnnotation::None, _)
    )
}
