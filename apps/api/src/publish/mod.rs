// Publishing: pushes completed research jobs to WordPress and records the
// resulting pages, singly or in a rate-limited bulk loop.

pub mod handlers;
pub mod limiter;
pub mod workflow;
