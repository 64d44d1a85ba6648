//! Fuzz target for the operation boundary.
//!
//! Any JSON operation applied to a cleaned table must come back as a status;
//! a failed operation must leave the table as it was.

#![no_main]

use libfuzzer_sys::fuzz_target;
use surveyprep::SurveyPrep;

const SURVEY: &str = "Timestamp,Age,Gender,Country,no_employees,Sick_Leave_Days\n\
    2014-08-27 11:29:31,37,Female,United States,6-25,3\n\
    2014-08-27 11:29:37,44,M,USA,More than 1000,\n\
    2014-08-27 11:29:44,-1726,queer,Canada,5-Jan,7\n";

fuzz_target!(|data: &[u8]| {
    let Ok(operation) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    let Ok((state, _)) = SurveyPrep::new().ingest(SURVEY.as_bytes()) else {
        return;
    };

    let before = state.table.clone();
    let after = state.apply_json(operation);
    if after.status.is_error() {
        assert_eq!(after.table, before);
    }
});
