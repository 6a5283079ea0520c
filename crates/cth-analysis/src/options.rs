//! Per-file analyzer options.

use cth_common::FileId;
use cth_host::OptionsProvider;

/// Enables the protected record copy constructor on hierarchy roots.
pub const RECORD_HIERARCHIES_OPTION: &str = "dotnet_diagnostic.CTH001.suppress_on_record_hierarchies";

/// Whether record hierarchies are enabled for `file`. Absent or unparsable
/// values mean `false`.
pub fn record_hierarchies_allowed<H>(host: &H, file: FileId) -> bool
where
    H: OptionsProvider + ?Sized,
{
    host.option(file, RECORD_HIERARCHIES_OPTION)
        .and_then(parse_bool)
        .unwrap_or(false)
}

/// `true`/`false`, ignoring case and surrounding whitespace.
fn parse_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
