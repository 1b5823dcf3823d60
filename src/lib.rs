pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod label;
pub mod page;
pub mod schema;
pub mod scrape;
pub mod stealth;

pub use browser::FormBrowser;
pub use config::{BrowserConfig, Interaction, ScrapeConfig};
pub use error::{Error, Result};
pub use extract::extract_fields;
pub use page::Page;
pub use schema::{FieldOption, FieldTag, FormField, FormSchema};
pub use scrape::{build_schema, scrape};
