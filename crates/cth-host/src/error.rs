use std::fmt;
use std::path::PathBuf;

/// Failure to load a compilation snapshot into a [`MemoryHost`](crate::MemoryHost).
#[derive(Debug)]
pub enum SnapshotError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    /// Two type declarations resolve to the same qualified name.
    DuplicateType(String),
    /// A declaration names a base type, interface, constructor parameter or
    /// receiver that is not declared anywhere.
    UnknownType { name: String, referenced_by: String },
    /// A diagnostic refers to a file the snapshot does not contain.
    UnknownFile(String),
    /// A type's base chain leads back to the type itself.
    CyclicBase { name: String },
    /// A span whose start lies after its end.
    InvertedSpan { file: String, start: u32, end: u32 },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read {}: {}", path.display(), source),
            Self::Parse(err) => write!(f, "failed to parse snapshot: {err}"),
            Self::DuplicateType(name) => write!(f, "type `{name}` is declared more than once"),
            Self::UnknownType { name, referenced_by } => {
                write!(f, "unknown type `{name}` referenced by `{referenced_by}`")
            }
            Self::UnknownFile(path) => write!(f, "diagnostic refers to unknown file `{path}`"),
            Self::CyclicBase { name } => write!(f, "base type chain of `{name}` is cyclic"),
            Self::InvertedSpan { file, start, end } => {
                write!(f, "span {start}..{end} in `{file}` ends before it starts")
            }
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Failure to load an analyzer configuration file.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read {}: {}", path.display(), source),
            Self::Parse(err) => write!(f, "failed to parse analyzer config: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}
