//! Configuration module

mod site;

pub use site::AttributionConfig;
pub use site::SiteConfig;
