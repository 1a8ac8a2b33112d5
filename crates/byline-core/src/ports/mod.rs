//! Ports - trait definitions the infrastructure must implement.

mod repository;

pub use repository::{AuthorRepository, Page, PostRepository, DEFAULT_PAGE_LIMIT};
