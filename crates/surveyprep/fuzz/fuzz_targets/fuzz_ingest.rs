//! Fuzz target for ingestion.
//!
//! Arbitrary bytes must either ingest into a consistent table or fail with
//! an error. Never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use surveyprep::{ParserConfig, PrepConfig, SurveyPrep};

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    for parser in [ParserConfig::default(), ParserConfig::auto_detect()] {
        let prep = SurveyPrep::with_config(PrepConfig {
            parser,
            ..PrepConfig::default()
        });
        if let Ok((state, source)) = prep.ingest(data) {
            assert_eq!(state.table.row_count(), source.row_count);
            assert_eq!(state.table.column_count(), source.column_count);
            let _ = state.export_csv();
        }
    }
});
