//! One filter run: load → clean → filter → project → write.

use std::fmt;
use std::path::PathBuf;

use anyhow::anyhow;

use crate::config::PipelineConfig;
use crate::data::{cleaner, filter, loader, projector, writer};
use crate::error::{FilterError, Result};

/// Where a run currently is.  Stages only move forward; any error ends the
/// run in [`PipelineStage::Failed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Loaded,
    Cleaned,
    Filtered,
    Projected,
    Written,
    Done,
    Failed(String),
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::Idle => write!(f, "idle"),
            PipelineStage::Loaded => write!(f, "loaded"),
            PipelineStage::Cleaned => write!(f, "cleaned"),
            PipelineStage::Filtered => write!(f, "filtered"),
            PipelineStage::Projected => write!(f, "projected"),
            PipelineStage::Written => write!(f, "written"),
            PipelineStage::Done => write!(f, "done"),
            PipelineStage::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub destination: PathBuf,
    pub matched_rows: usize,
}

pub struct FilterPipeline {
    config: PipelineConfig,
    stage: PipelineStage,
}

impl FilterPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            stage: PipelineStage::Idle,
        }
    }

    pub fn stage(&self) -> &PipelineStage {
        &self.stage
    }

    /// Execute the run.  A pipeline runs once; build a new one for the next run.
    pub fn run(&mut self) -> Result<RunReport> {
        if self.stage != PipelineStage::Idle {
            return Err(anyhow!("pipeline already ran (stage: {})", self.stage).into());
        }

        match self.execute() {
            Ok(report) => {
                self.advance(PipelineStage::Done);
                Ok(report)
            }
            Err(e) => {
                log::error!("Filter run failed after the {} stage: {e}", self.stage);
                self.stage = PipelineStage::Failed(e.to_string());
                Err(e)
            }
        }
    }

    fn execute(&mut self) -> Result<RunReport> {
        let config = self.config.clone();
        let settings = &config.settings;

        let source = config
            .source_path
            .as_deref()
            .ok_or_else(|| FilterError::SourceUnavailable {
                path: None,
                reason: "no source file selected".to_string(),
            })?;
        let spec = config.filter.as_ref().ok_or(FilterError::MissingFilter)?;

        let raw = loader::load_table(source)?;
        self.advance(PipelineStage::Loaded);

        let table = cleaner::clean(&raw, &settings.header_marker);
        self.advance(PipelineStage::Cleaned);

        let matched = filter::filter_rows(table.rows, &table.header, spec, &settings.cell_date_format)?;
        self.advance(PipelineStage::Filtered);

        let output = projector::project(&matched, &table.header, config.effective_output_columns())?;
        self.advance(PipelineStage::Projected);

        let destination = config.destination.resolve()?;
        writer::write_table(&output, &destination, &settings.output_date_format)?;
        self.advance(PipelineStage::Written);

        Ok(RunReport {
            destination,
            matched_rows: output.len(),
        })
    }

    fn advance(&mut self, next: PipelineStage) {
        log::debug!("Pipeline {} -> {}", self.stage, next);
        self.stage = next;
    }
}
