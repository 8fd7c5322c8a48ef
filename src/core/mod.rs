/*!
# Core Module

Error types and file helpers shared by the registration pipeline,
the index generator and the validator.
*/

pub mod errors;
pub mod fs_utils;

pub use errors::{CatalogError, CatalogResult, IssueCollector, IssueLevel, ValidationIssue};
pub use fs_utils::{read_html_file, write_atomic};
