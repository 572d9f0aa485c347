//! Spreadsheet filter core: load a table, locate its header row by a marker
//! cell, keep the rows whose column matches a value, project the selected
//! columns and save them to a bordered `.xlsx` file.

pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;

pub use config::{Destination, PipelineConfig, PipelineConfigBuilder, TableSettings};
pub use data::model::{CellValue, FilterKind, FilterSpec, FilterValue};
pub use error::{FilterError, Result};
pub use pipeline::{FilterPipeline, PipelineStage, RunReport};
