//! Writers command implementation.

use crate::cli::args::WritersArgs;
use crate::core::analytics::recommendations;
use crate::core::models::{WriterReport, WritersPayload};
use crate::core::session::Session;
use crate::error::{Result, SimError};
use crate::render::{self, RenderOptions};

/// Execute the writers command.
///
/// # Errors
///
/// Import failures, `WriterNotFound` for an unknown `--writer`, and
/// render failures.
pub fn execute(args: &WritersArgs, opts: &RenderOptions) -> Result<()> {
    let mut session = Session::default();
    let skipped = session.import_path(&args.csv)?;

    let mut writers: Vec<WriterReport> = recommendations(&session.statistics())
        .iter()
        .map(WriterReport::from)
        .collect();
    if let Some(name) = &args.writer {
        writers.retain(|w| &w.writer == name);
        if writers.is_empty() {
            return Err(SimError::WriterNotFound(name.clone()));
        }
    }
    tracing::debug!(writers = writers.len(), "Classified writers");

    let payload = WritersPayload {
        source: args.csv.display().to_string(),
        skipped_rows: skipped,
        writers,
    };
    let output = render::render_writers(&payload, opts)?;
    render::emit(&output)
}
