pub mod extractor;
pub mod installer;

pub use extractor::{ArchiveExtractor, ExtractSummary};
pub use installer::{InstallOutcome, ToolchainInstaller};
