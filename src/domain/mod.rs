//! Domain logic - pure rules over already-fetched repository data

pub mod changelog;
pub mod tag;

pub use changelog::{classify_line, Category, Changelog, MARKERS};
pub use tag::{release_tag_name, tag_source_segment, RepositoryMode};
