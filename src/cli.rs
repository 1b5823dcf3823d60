use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{BrowserBuilder, Interaction, ScrapeConfig, DEFAULT_OUTPUT, DEFAULT_URL};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

/// Every flag is optional; a bare invocation scrapes the default form.
#[derive(Parser, Debug)]
#[command(
    name = "form-schema",
    version,
    about = "Scrape a rendered web form into a JSON schema of its fields"
)]
pub struct Cli {
    /// Page containing the form
    #[arg(long, default_value = DEFAULT_URL)]
    pub url: String,

    /// Where to write the schema (overwritten if it exists)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Run Chrome without a window
    #[arg(long)]
    pub headless: bool,

    /// CSS selector that must be present before the page counts as ready
    #[arg(long)]
    pub ready_selector: Option<String>,

    /// Seconds to wait for navigation and readiness
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// What to wait for before capturing: none, prompt, or a number of seconds
    #[arg(long, default_value = "prompt", value_parser = parse_interaction)]
    pub interaction: Interaction,

    /// Path to the Chrome/Chromium executable (auto-detected by default)
    #[arg(long)]
    pub chrome_path: Option<String>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn into_config(self) -> ScrapeConfig {
        let mut browser = BrowserBuilder::new()
            .headless(self.headless)
            .timeout(Duration::from_secs(self.timeout));
        if let Some(path) = self.chrome_path {
            browser = browser.chrome_path(path);
        }

        ScrapeConfig {
            url: self.url,
            output: self.output,
            ready_selector: self.ready_selector,
            interaction: self.interaction,
            browser: browser.build_config(),
        }
    }

    /// Default log directive for the crate, raised by `-v`.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "form_schema=info",
            1 => "form_schema=debug",
            _ => "form_schema=trace",
        }
    }
}

fn parse_interaction(s: &str) -> Result<Interaction, String> {
    s.parse().map_err(|e: crate::error::Error| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_uses_defaults() {
        let cli = Cli::try_parse_from(["form-schema"]).unwrap();
        assert_eq!(cli.log_directive(), "form_schema=info");
        let config = cli.into_config();
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(config.interaction, Interaction::Prompt);
        assert!(!config.browser.headless);
        assert_eq!(config.browser.default_timeout, Duration::from_secs(30));
    }

    #[test]
    fn flags_map_onto_config() {
        let cli = Cli::try_parse_from([
            "form-schema",
            "--url",
            "https://example.gov.in/apply",
            "-o",
            "out.json",
            "--headless",
            "--ready-selector",
            "#ctl00_ContentPlaceHolder1_txtadharno",
            "--timeout",
            "5",
            "--interaction",
            "none",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.log_directive(), "form_schema=trace");
        let config = cli.into_config();
        assert_eq!(config.url, "https://example.gov.in/apply");
        assert_eq!(config.output, PathBuf::from("out.json"));
        assert!(config.browser.headless);
        assert_eq!(
            config.ready_selector.as_deref(),
            Some("#ctl00_ContentPlaceHolder1_txtadharno")
        );
        assert_eq!(config.browser.default_timeout, Duration::from_secs(5));
        assert_eq!(config.interaction, Interaction::None);
    }

    #[test]
    fn interaction_accepts_seconds_and_rejects_garbage() {
        let cli = Cli::try_parse_from(["form-schema", "--interaction", "120"]).unwrap();
        assert_eq!(cli.interaction, Interaction::Fixed(Duration::from_secs(120)));
        assert!(Cli::try_parse_from(["form-schema", "--interaction", "later"]).is_err());
    }
}
