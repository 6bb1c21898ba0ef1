//! Domain logic - pure release rules independent of files and git

pub mod commit;
pub mod prerelease;
pub mod project;
pub mod tag;
pub mod version;

pub use commit::ParsedCommit;
pub use prerelease::{Channel, PreRelease};
pub use project::Project;
pub use tag::TagPattern;
pub use version::{bump_version_string, BumpKind, Version};
