// doc constants
pub const DOC_ID: &str = "_id";

// path constants
pub const FIELD_SEPARATOR: char = '.';
pub const POSITIONAL_MARKER: &str = "$";

// engine constants
pub const SEDIMENT_VERSION: &str = env!("CARGO_PKG_VERSION");
