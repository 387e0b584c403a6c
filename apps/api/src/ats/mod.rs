// ATS compatibility scoring: pure scorer, report diffing, and the stateless HTTP endpoints.

pub mod diff;
pub mod handlers;
pub mod scorer;
