//! Page rendering
//!
//! Every function here is a pure mapping from query data (plus an explicit
//! `now` for the footer) to HTML. Nothing reads the filesystem or the clock.

pub mod detail;
pub mod listing;
pub mod pages;
pub mod seo;
pub mod shell;
pub mod summary;

pub use detail::Banner;
pub use listing::post_summaries;
pub use pages::PageRenderer;
pub use seo::SeoTags;
pub use shell::Shell;
pub use summary::PostSummary;
