// Resume analysis: substring skill matching, role scoring, and the analyze endpoint.
// The analyzer is pure; all persistence goes through logbook.

pub mod analyzer;
pub mod handlers;
