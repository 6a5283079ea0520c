//! Host side of the closed type hierarchy suppressor.
//!
//! The suppressor consumes a compiler's symbol table, syntax and semantic
//! model only through read-only queries. This crate defines that interface
//! and ships an in-memory implementation loaded from a JSON snapshot.
//!
//! # Architecture
//!
//! - [`host`]: the query traits ([`TypeQueries`], [`SemanticModel`],
//!   [`SyntaxQueries`], [`OptionsProvider`]) and their union [`Host`]
//! - [`ty`]: type handles, constructors and nullability
//! - [`symbol`]: what a syntax node binds to
//! - [`syntax`]: switch constructs and the tagged [`Pattern`] enum
//! - [`snapshot`]: the JSON schema of an exported compilation
//! - [`memory`]: [`MemoryHost`], the snapshot-backed host
//! - [`config`]: TOML analyzer configuration
//! - [`error`]: snapshot and configuration loading errors

pub mod config;
pub mod error;
pub mod host;
pub mod memory;
pub mod snapshot;
pub mod symbol;
pub mod syntax;
pub mod ty;

pub use config::AnalyzerConfig;
pub use error::{ConfigError, SnapshotError};
pub use host::{
    Host, OptionsProvider, SemanticModel, SyntaxQueries, TypeQueries, RECORD_CLONE_METHOD,
};
pub use memory::{MemoryHost, SourceFile};
pub use symbol::{DeconstructMethod, Symbol};
pub use syntax::{MatchCase, NodeId, Pattern, SwitchExpression, SwitchStatement};
pub use ty::{Accessibility, Constructor, NullableAnnotation, NullableFlowState, Nullability, TypeId, TypeInfo};
