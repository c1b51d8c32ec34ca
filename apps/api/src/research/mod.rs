// Research jobs: one job turns a (city, page type) pair into generated,
// SEO-enriched page content persisted on the job row.

pub mod handlers;
pub mod workflow;
