//! Run the configured steps in order: icon, bind, pack.

use std::path::PathBuf;

use crate::config::PipelineConfig;
use crate::converter::{PackResult, pack};
use crate::error::Result;
use crate::icon::copy_icon;
use crate::materials::{BindOutput, fix_material_bindings};

/// What each enabled step produced.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    /// Icon path written and bytes copied.
    pub icon: Option<(PathBuf, u64)>,
    pub bind: Option<BindOutput>,
    pub pack: Option<PackResult>,
}

impl PipelineReport {
    /// Warnings from every step, in run order.
    pub fn warnings(&self) -> impl Iterator<Item = &String> {
        let bind = self.bind.iter().flat_map(|b| b.result.warnings.iter());
        let pack = self.pack.iter().flat_map(|p| p.warnings.iter());
        bind.chain(pack)
    }
}

/// Execute every enabled step. The first fatal error stops the run.
///
/// # Errors
/// Returns the first error raised by any step.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineReport> {
    config.validate()?;
    let mut report = PipelineReport::default();

    if config.icon.enabled {
        report.icon = Some(copy_icon(&config.icon.source, &config.icon.destination)?);
    }

    if config.bind.enabled {
        report.bind = Some(fix_material_bindings(&config.bind_options())?);
    }

    if config.pack.enabled {
        report.pack = Some(pack(&config.pack_options())?);
    }

    Ok(report)
}
