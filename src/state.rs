use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use excel_filter::{
    Destination, FilterError, FilterKind, FilterPipeline, FilterValue, PipelineConfig,
    TableSettings,
};

// ---------------------------------------------------------------------------
// Notices shown in message boxes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    fn warning(title: &str, message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Warning,
            title: title.to_string(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The form contents, independent of rendering.  Every run builds a fresh
/// [`PipelineConfig`] from it, so nothing carries over between runs.
pub struct AppState {
    pub settings: TableSettings,

    /// Selected source table (None until the user picks a file).
    pub source_path: Option<PathBuf>,

    /// Save target chosen in the save dialog.
    pub destination: Destination,

    pub filter_column: String,
    pub filter_kind: FilterKind,

    /// Value text for text and integer filters.
    pub filter_text: String,

    /// Value for date filters.
    pub filter_date: NaiveDate,

    /// Output column names, one per line.
    pub output_columns: String,

    /// Status line shown in the top bar.
    pub status: String,
}

impl AppState {
    pub fn new(settings: TableSettings) -> Self {
        let output_columns = settings.default_output_columns.join("\n");
        Self {
            settings,
            source_path: None,
            destination: Destination::default(),
            filter_column: String::new(),
            filter_kind: FilterKind::Text,
            filter_text: String::new(),
            filter_date: chrono::Local::now().date_naive(),
            output_columns,
            status: "Waiting for a file".to_string(),
        }
    }

    pub fn set_source(&mut self, path: PathBuf) {
        self.status = format!("File loaded: {}", path.display());
        self.source_path = Some(path);
    }

    /// Remember the save target, adding `.xlsx` when no extension was typed.
    pub fn set_save_target(&mut self, path: &Path) {
        let path = if path.extension().is_none() {
            path.with_extension("xlsx")
        } else {
            path.to_path_buf()
        };
        self.status = format!("Save to {}", path.display());
        self.destination = Destination::from_full_path(&path);
    }

    fn filter_value(&self) -> Result<FilterValue, FilterError> {
        match self.filter_kind {
            FilterKind::Date => Ok(FilterValue::Date(self.filter_date)),
            kind => {
                if self.filter_text.trim().is_empty() {
                    return Err(FilterError::MissingFilter);
                }
                FilterValue::parse(kind, &self.filter_text, &self.settings.cell_date_format)
            }
        }
    }

    /// Validate the form and turn it into a run configuration.
    pub fn build_config(&self) -> Result<PipelineConfig, FilterError> {
        let source = self
            .source_path
            .clone()
            .ok_or_else(|| FilterError::SourceUnavailable {
                path: None,
                reason: "select a file first".to_string(),
            })?;
        if self.filter_column.trim().is_empty() {
            return Err(FilterError::MissingFilter);
        }
        let value = self.filter_value()?;

        let output_columns: Vec<&str> = self
            .output_columns
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        Ok(PipelineConfig::builder()
            .settings(self.settings.clone())
            .set_source_path(source)
            .set_destination(
                self.destination.directory.clone(),
                self.destination.file_name.clone(),
            )
            .set_filter(self.filter_column.trim(), value)
            .set_output_columns(output_columns)
            .build())
    }

    /// Run the filter with the current form and describe the outcome.
    pub fn start_processing(&mut self) -> Notice {
        let config = match self.build_config() {
            Ok(config) => config,
            Err(e) => return Notice::warning("Error", e.to_string()),
        };

        match FilterPipeline::new(config.clone()).run() {
            Ok(report) => {
                if let Some(spec) = &config.filter {
                    self.status = format!("Filtering by: {} = {}", spec.column, spec.value);
                }
                Notice {
                    level: NoticeLevel::Info,
                    title: "Done".to_string(),
                    message: format!(
                        "File processed successfully: {} rows saved to {}",
                        report.matched_rows,
                        report.destination.display()
                    ),
                }
            }
            Err(e) if e.is_filter_error() => Notice::warning("Filter error", e.to_string()),
            Err(e) => Notice::warning("Error", format!("{e:#}")),
        }
    }
}
