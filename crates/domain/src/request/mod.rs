//! Request target types: resource path templates and query parameters.

mod path;
mod query;

pub use path::ResourcePath;
pub use query::QueryParams;
