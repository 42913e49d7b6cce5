pub mod site_content;

pub use site_content::{Field, Package, PartialSiteContent, Scenario, SiteContent};
