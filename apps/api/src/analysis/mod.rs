// Job description analysis against the user's profile.
// The analyzer is a trait object so a semantic backend can replace the keyword one.

pub mod handlers;
pub mod job_analyzer;
