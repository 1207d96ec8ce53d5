//! Models command implementation.

use crate::core::models::ModelInfo;
use crate::core::pricing::ModelKind;
use crate::error::Result;
use crate::render::{self, RenderOptions};

/// Execute the models command.
///
/// # Errors
///
/// Render failures.
pub fn execute(opts: &RenderOptions) -> Result<()> {
    let models: Vec<ModelInfo> = ModelKind::ALL.iter().copied().map(ModelInfo::from).collect();
    let output = render::render_models(&models, opts)?;
    render::emit(&output)
}
