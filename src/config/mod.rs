//! Configuration module

mod settings;
mod site;

pub use settings::{Settings, SETTINGS_FILE};
pub use site::{parse_sections, SiteConfig};
