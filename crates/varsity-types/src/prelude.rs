pub use crate::error::{Error, VsResult};
pub use crate::types::{now, Patch, Timestamp};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
