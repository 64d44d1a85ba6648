//! Entry point tying ingestion, cleaning and the pipeline together.

use std::path::Path;

use crate::cleaning;
use crate::error::Result;
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::pipeline::PipelineState;
use crate::table::Table;

/// Configuration for ingestion.
#[derive(Debug, Clone)]
pub struct PrepConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Canonicalize and coerce the table before the pipeline starts.
    pub clean_on_ingest: bool,
    /// Rows shown by [`SurveyPrep::preview`].
    pub preview_rows: usize,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            clean_on_ingest: true,
            preview_rows: 5,
        }
    }
}

/// Turns uploaded survey files into pipeline states.
///
/// ```no_run
/// use surveyprep::SurveyPrep;
///
/// let prep = SurveyPrep::new();
/// let (state, source) = prep.ingest_file("survey.csv").unwrap();
/// println!("{} rows from {}", state.table.row_count(), source.hash);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SurveyPrep {
    config: PrepConfig,
    parser: Parser,
}

impl SurveyPrep {
    pub fn new() -> Self {
        Self::with_config(PrepConfig::default())
    }

    pub fn with_config(config: PrepConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self { config, parser }
    }

    pub fn config(&self) -> &PrepConfig {
        &self.config
    }

    /// Ingest raw upload bytes into a fresh pipeline state.
    pub fn ingest(&self, bytes: &[u8]) -> Result<(PipelineState, SourceMetadata)> {
        let (data, source) = self.parser.parse_bytes(bytes)?;
        Ok((self.start(data.into_table()?), source))
    }

    /// Ingest a file from disk.
    pub fn ingest_file(&self, path: impl AsRef<Path>) -> Result<(PipelineState, SourceMetadata)> {
        let (data, source) = self.parser.parse_file(path)?;
        Ok((self.start(data.into_table()?), source))
    }

    /// The first rows of `table`, for display.
    pub fn preview(&self, table: &Table) -> Table {
        let rows: Vec<usize> = (0..table.row_count().min(self.config.preview_rows)).collect();
        table.take_rows(&rows)
    }

    fn start(&self, table: Table) -> PipelineState {
        tracing::info!(
            rows = table.row_count(),
            columns = table.column_count(),
            clean = self.config.clean_on_ingest,
            "ingested survey table"
        );
        let table = if self.config.clean_on_ingest {
            cleaning::clean(table)
        } else {
            table
        };
        PipelineState::new(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrepError;
    use crate::table::{ColumnType, Value};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SURVEY: &str = "Timestamp,Age,Gender,Country,self_employed\n\
        2014-08-27 11:29:31,37,Female,United States,\n\
        2014-08-27 11:29:37,44,M,United States,No\n\
        2014-08-27 11:29:44,-1726,male,Canada,Yes\n";

    #[test]
    fn test_ingest_cleans() {
        let (state, source) = SurveyPrep::new().ingest(SURVEY.as_bytes()).unwrap();
        assert_eq!(source.row_count, 3);
        let table = &state.table;
        assert_eq!(table.get(1, "Gender"), Some(&Value::text("Male")));
        assert_eq!(table.get(2, "Gender"), Some(&Value::text("Male")));
        assert_eq!(table.get(2, "Age"), Some(&Value::Missing));
        assert_eq!(table.get(0, "Timestamp"), Some(&Value::Int(2014)));
        assert_eq!(table.column("Gender").unwrap().kind, ColumnType::Categorical);
    }

    #[test]
    fn test_ingest_without_cleaning() {
        let prep = SurveyPrep::with_config(PrepConfig {
            clean_on_ingest: false,
            ..PrepConfig::default()
        });
        let (state, _) = prep.ingest(SURVEY.as_bytes()).unwrap();
        assert_eq!(state.table.get(1, "Gender"), Some(&Value::text("M")));
        assert_eq!(state.table.get(2, "Age"), Some(&Value::Int(-1726)));
    }

    #[test]
    fn test_ingest_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SURVEY.as_bytes()).unwrap();
        let (state, source) = SurveyPrep::new().ingest_file(file.path()).unwrap();
        assert_eq!(state.table.row_count(), 3);
        assert!(source.path.is_some());
    }

    #[test]
    fn test_empty_upload_fails() {
        let result = SurveyPrep::new().ingest(b"");
        assert!(matches!(result, Err(PrepError::Ingestion(_))));
    }

    #[test]
    fn test_preview() {
        let prep = SurveyPrep::with_config(PrepConfig {
            preview_rows: 2,
            ..PrepConfig::default()
        });
        let (state, _) = prep.ingest(SURVEY.as_bytes()).unwrap();
        assert_eq!(prep.preview(&state.table).row_count(), 2);
    }
}
