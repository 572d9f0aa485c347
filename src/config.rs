//! Settings that describe the source table layout, and the immutable
//! configuration of a single filter run.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::data::model::{FilterSpec, FilterValue};
use crate::data::writer::resolve_destination;

/// Environment variable naming a JSON settings file.
pub const SETTINGS_ENV: &str = "EXCEL_FILTER_SETTINGS";

/// Layout of the tables this tool reads and writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    /// Text of the cell that marks the header row ("row number" column).
    pub header_marker: String,

    /// Output columns used when a run does not choose its own.
    pub default_output_columns: Vec<String>,

    /// chrono format for reading date filter values and text date cells.
    pub cell_date_format: String,

    /// Excel number format applied to date cells in the output file.
    pub output_date_format: String,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            header_marker: "№ п/п".to_string(),
            default_output_columns: ["ФИО", "Должность", "Отдел", "Дата найма", "Зарплата"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            cell_date_format: "%d.%m.%Y".to_string(),
            output_date_format: "dd.mm.yyyy".to_string(),
        }
    }
}

impl TableSettings {
    /// Read settings from a JSON file.  Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        serde_json::from_str(&text).context("parsing settings JSON")
    }

    /// Settings from the file named by [`SETTINGS_ENV`], or the defaults.
    pub fn from_env() -> Self {
        match std::env::var_os(SETTINGS_ENV) {
            Some(path) => Self::load_or_default(Path::new(&path)),
            None => Self::default(),
        }
    }

    /// Settings from `path`; a missing or malformed file logs a warning and
    /// falls back to the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::from_json_file(path) {
            Ok(settings) => {
                log::info!("Loaded table settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default table settings: {e:#}");
                Self::default()
            }
        }
    }
}

/// Where the output file is saved: a directory and a file name, either of
/// which may be unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Destination {
    pub directory: Option<PathBuf>,
    pub file_name: Option<String>,
}

impl Destination {
    pub fn new(directory: Option<PathBuf>, file_name: Option<String>) -> Self {
        Self {
            directory,
            file_name,
        }
    }

    /// Split a full save path (as returned by a save dialog) into its parts.
    pub fn from_full_path(path: &Path) -> Self {
        Self {
            directory: path.parent().map(Path::to_path_buf),
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned()),
        }
    }

    pub fn resolve(&self) -> crate::Result<PathBuf> {
        resolve_destination(self.directory.as_deref(), self.file_name.as_deref())
    }
}

/// Everything one run needs.  Built once with [`PipelineConfigBuilder`] and
/// handed whole to a fresh pipeline.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub source_path: Option<PathBuf>,
    pub destination: Destination,
    pub filter: Option<FilterSpec>,
    pub output_columns: Option<Vec<String>>,
    pub settings: TableSettings,
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Chosen output columns, or the settings' defaults.
    pub fn effective_output_columns(&self) -> &[String] {
        self.output_columns
            .as_deref()
            .unwrap_or(&self.settings.default_output_columns)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn set_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.source_path = Some(path.into());
        self
    }

    pub fn set_destination(
        mut self,
        directory: Option<impl Into<PathBuf>>,
        file_name: Option<impl Into<String>>,
    ) -> Self {
        self.config.destination = Destination::new(
            directory.map(Into::into),
            file_name.map(Into::into),
        );
        self
    }

    pub fn set_filter(mut self, column: impl Into<String>, value: FilterValue) -> Self {
        self.config.filter = Some(FilterSpec::new(column, value));
        self
    }

    /// An empty list means "use the defaults".
    pub fn set_output_columns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        self.config.output_columns = (!names.is_empty()).then_some(names);
        self
    }

    pub fn settings(mut self, settings: TableSettings) -> Self {
        self.config.settings = settings;
        self
    }

    pub fn build(self) -> PipelineConfig {
        self.config
    }
}
