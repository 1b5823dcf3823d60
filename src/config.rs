use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::browser::FormBrowser;
use crate::error::{Error, Result};

/// Form scraped when no URL is given.
pub const DEFAULT_URL: &str = "https://udyamregistration.gov.in/UdyamRegistration.aspx";

/// Schema file written when no output path is given, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "form_schema.json";

/// Length of the fixed interaction pause the scraper historically used.
pub const DEFAULT_INTERACTION_PAUSE: Duration = Duration::from_secs(120);

#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub headless: bool,
    pub stealth: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub chrome_path: Option<String>,
    /// Default timeout for navigation and readiness polling (default: 30s).
    pub default_timeout: Duration,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: false,
            stealth: true,
            viewport_width: 1920,
            viewport_height: 1080,
            chrome_path: None,
            default_timeout: Duration::from_secs(30),
        }
    }
}

pub struct BrowserBuilder {
    config: BrowserConfig,
}

impl BrowserBuilder {
    pub fn new() -> Self {
        Self {
            config: BrowserConfig::default(),
        }
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    pub fn stealth(mut self, stealth: bool) -> Self {
        self.config.stealth = stealth;
        self
    }

    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self
    }

    pub fn chrome_path(mut self, path: impl Into<String>) -> Self {
        self.config.chrome_path = Some(path.into());
        self
    }

    /// Set the default timeout for navigation and readiness polling.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.default_timeout = timeout;
        self
    }

    pub fn build_config(self) -> BrowserConfig {
        self.config
    }

    pub async fn build(self) -> Result<FormBrowser> {
        FormBrowser::launch(self.build_config()).await
    }
}

impl Default for BrowserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// What to wait for between "page is interactive" and capturing the DOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Capture as soon as the page is ready.
    None,
    /// Block until the user presses Enter on stdin.
    Prompt,
    /// Sleep for a fixed duration.
    Fixed(Duration),
}

impl FromStr for Interaction {
    type Err = Error;

    /// Accepts `none`, `prompt`, or a number of seconds.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "prompt" | "enter" => Ok(Self::Prompt),
            other => other
                .parse::<u64>()
                .map(|secs| Self::Fixed(Duration::from_secs(secs)))
                .map_err(|_| {
                    Error::InvalidConfig(format!(
                        "interaction must be `none`, `prompt` or seconds, got `{s}`"
                    ))
                }),
        }
    }
}

/// Everything a single scrape run needs.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub url: String,
    pub output: PathBuf,
    /// CSS selector that must match before the page counts as ready.
    pub ready_selector: Option<String>,
    pub interaction: Interaction,
    pub browser: BrowserConfig,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            ready_selector: None,
            interaction: Interaction::Prompt,
            browser: BrowserConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_udyam_form() {
        let config = ScrapeConfig::default();
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.output, PathBuf::from("form_schema.json"));
        assert_eq!(config.interaction, Interaction::Prompt);
        assert!(config.ready_selector.is_none());
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = BrowserBuilder::new()
            .headless(true)
            .stealth(false)
            .viewport(800, 600)
            .chrome_path("/usr/bin/chromium")
            .timeout(Duration::from_secs(5))
            .build_config();
        assert!(config.headless);
        assert!(!config.stealth);
        assert_eq!((config.viewport_width, config.viewport_height), (800, 600));
        assert_eq!(config.chrome_path.as_deref(), Some("/usr/bin/chromium"));
        assert_eq!(config.default_timeout, Duration::from_secs(5));
    }

    #[test]
    fn interaction_parses_keywords_and_seconds() {
        assert_eq!("none".parse::<Interaction>().unwrap(), Interaction::None);
        assert_eq!("Prompt".parse::<Interaction>().unwrap(), Interaction::Prompt);
        assert_eq!(
            "120".parse::<Interaction>().unwrap(),
            Interaction::Fixed(DEFAULT_INTERACTION_PAUSE)
        );
        assert!(matches!(
            "soon".parse::<Interaction>(),
            Err(Error::InvalidConfig(_))
        ));
    }
}
