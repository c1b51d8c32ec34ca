// SEO primitives: URL slugs, schema.org structured-data fragments, and
// meta-tag builders. Everything here is a pure string transformation.

pub mod schema;
pub mod slug;
