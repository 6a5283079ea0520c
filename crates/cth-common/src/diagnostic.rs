//! Diagnostics reported by the host and the suppressions handed back.
//!
//! The suppressor never creates diagnostics of its own. It receives the
//! host's reported diagnostics, and for each one it has proven to be a false
//! positive it emits a [`Suppression`] tying a [`SuppressionDescriptor`] to
//! the originating [`Diagnostic`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::span::Span;

/// Index of a source file within one host compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileId(pub u32);

/// A position in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file: FileId,
    pub span: Span,
}

impl Location {
    pub fn new(file: FileId, span: Span) -> Self {
        Self { file, span }
    }
}

/// A diagnostic the host has reported and which may be suppressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Host diagnostic identifier, e.g. `CS8509`.
    pub id: String,
    pub location: Location,
    #[serde(default)]
    pub message: String,
}

impl Diagnostic {
    pub fn new(id: impl Into<String>, location: Location, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            location,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{}: {}", self.id, self.message)
        }
    }
}

/// Declares that a suppressor may suppress one host diagnostic id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SuppressionDescriptor {
    /// Identifier of the suppression itself, e.g. `CTH001`.
    pub id: &'static str,
    /// The host diagnostic this descriptor suppresses.
    pub suppressed_diagnostic_id: &'static str,
    pub justification: &'static str,
}

impl SuppressionDescriptor {
    pub const fn new(
        id: &'static str,
        suppressed_diagnostic_id: &'static str,
        justification: &'static str,
    ) -> Self {
        Self {
            id,
            suppressed_diagnostic_id,
            justification,
        }
    }
}

impl fmt::Display for SuppressionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} suppresses {}: {}",
            self.id, self.suppressed_diagnostic_id, self.justification
        )
    }
}

/// A decision to hide one reported diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suppression {
    pub descriptor: SuppressionDescriptor,
    pub diagnostic: Diagnostic,
}

impl Suppression {
    pub fn new(descriptor: SuppressionDescriptor, diagnostic: &Diagnostic) -> Self {
        debug_assert_eq!(descriptor.suppressed_diagnostic_id, diagnostic.id);
        Self {
            descriptor,
            diagnostic: diagnostic.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTOR: SuppressionDescriptor =
        SuppressionDescriptor::new("CTH001", "CS8509", "all cases handled");

    fn diagnostic(id: &str) -> Diagnostic {
        Diagnostic::new(id, Location::new(FileId(0), Span::new(4, 10)), "")
    }

    #[test]
    fn diagnostic_display_omits_empty_message() {
        assert_eq!(diagnostic("CS8509").to_string(), "CS8509");
        let with_message = Diagnostic::new(
            "IDE0072",
            Location::new(FileId(1), Span::new(0, 1)),
            "Populate switch",
        );
        assert_eq!(with_message.to_string(), "IDE0072: Populate switch");
    }

    #[test]
    fn descriptor_display() {
        assert_eq!(
            DESCRIPTOR.to_string(),
            "CTH001 suppresses CS8509: all cases handled"
        );
    }

    #[test]
    fn suppression_serializes_descriptor_and_diagnostic() {
        let suppression = Suppression::new(DESCRIPTOR, &diagnostic("CS8509"));
        let value = serde_json::to_value(&suppression).unwrap();
        assert_eq!(value["descriptor"]["id"], "CTH001");
        assert_eq!(value["descriptor"]["suppressed_diagnostic_id"], "CS8509");
        assert_eq!(value["diagnostic"]["location"]["span"]["start"], 4);
        assert_eq!(value["diagnostic"]["location"]["file"], 0);
    }
}
