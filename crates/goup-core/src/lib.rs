//! Core building blocks shared by the goup crates: the error taxonomy,
//! filesystem locations and the Go release version model.

pub mod core {
    pub mod error;
    pub mod error_help;
    pub mod path;
    pub mod version;

    pub use error::{GoupError, GoupResult};
}

pub use crate::core::error::{GoupError, GoupResult};
pub use crate::core::error_help::{format_error_with_help, ErrorHelp};
pub use crate::core::version::{ParsedVersion, PreRelease};
