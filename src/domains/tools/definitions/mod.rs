//! Tool definitions module.
//!
//! One file per Semantic Scholar tool. Each exposes its params struct, a
//! `to_tool()` metadata builder and a blocking `execute()`.

pub mod common;
pub mod get_authors;
pub mod get_citation;
pub mod get_paper;
pub mod search_paper;

pub use common::ToolExample;
pub use get_authors::{GetAuthorsParams, GetAuthorsTool};
pub use get_citation::{GetCitationParams, GetCitationTool};
pub use get_paper::{GetPaperParams, GetPaperTool};
pub use search_paper::{SearchPaperParams, SearchPaperTool};
