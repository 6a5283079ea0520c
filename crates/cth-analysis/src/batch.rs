//! Parallel evaluation of a batch of reported diagnostics.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cth_common::{Diagnostic, Suppression};
use cth_host::Host;
use rayon::prelude::*;
use tracing::debug;

use crate::suppress::DiagnosticSuppressor;

/// A cloneable flag that asks a running batch to stop.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The batch was cancelled before it completed. No suppressions from it are
/// reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("suppression analysis was cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// Run every suppressor over every diagnostic, in parallel.
///
/// Diagnostics are independent of each other; the first suppressor that
/// suppresses a diagnostic wins. Suppressions come back in diagnostic order.
pub fn report_suppressions(
    host: &dyn Host,
    suppressors: &[Box<dyn DiagnosticSuppressor>],
    diagnostics: &[Diagnostic],
    token: &CancellationToken,
) -> Result<Vec<Suppression>, Cancelled> {
    let decisions = diagnostics
        .par_iter()
        .map(|diagnostic| {
            if token.is_cancelled() {
                return Err(Cancelled);
            }
            Ok(suppressors
                .iter()
                .find_map(|suppressor| suppressor.suppress(host, diagnostic)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if token.is_cancelled() {
        return Err(Cancelled);
    }

    let suppressions: Vec<Suppression> = decisions.into_iter().flatten().collect();
    debug!(
        diagnostics = diagnostics.len(),
        suppressed = suppressions.len(),
        "batch complete"
    );
    Ok(suppressions)
}
