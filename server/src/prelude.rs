pub use crate::core::app::App;
pub use varsity_types::error::{Error, VsResult};
pub use varsity_types::types::{now, ApiResponse, Patch, Timestamp};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
