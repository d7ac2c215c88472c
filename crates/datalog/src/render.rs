use datalog_eval::QueryResult;
use std::fmt::Write;

/// Render query results as text, one `name(t1, t2).` line per answer
pub fn render_results(results: &[QueryResult]) -> String {
    let mut out = String::new();
    for result in results {
        // Writing into a String cannot fail.
        let _ = write!(out, "{result}");
    }
    out
}
