use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::browser::FormBrowser;
use crate::config::{Interaction, ScrapeConfig};
use crate::error::Result;
use crate::extract::extract_fields;
use crate::page::Page;
use crate::schema::FormSchema;

/// Load the configured page, extract its fields and write the schema file.
///
/// The browser is closed whether or not capturing succeeds; the capture
/// error, if any, takes precedence over a failure to close.
pub async fn scrape(config: &ScrapeConfig) -> Result<FormSchema> {
    let browser = FormBrowser::launch(config.browser.clone()).await?;

    let captured = capture_html(&browser, config).await;
    if let Err(e) = browser.close().await {
        warn!(error = %e, "failed to close browser cleanly");
    }
    let html = captured?;

    let schema = FormSchema::new(config.url.as_str(), extract_fields(&html));
    schema.write_to(&config.output)?;
    info!(
        fields = schema.fields.len(),
        output = %config.output.display(),
        "schema written"
    );
    Ok(schema)
}

/// Assemble a schema from an already captured page.
pub fn build_schema(source: &str, html: &str, fetched_at: &str) -> FormSchema {
    FormSchema::with_timestamp(source, fetched_at, extract_fields(html))
}

async fn capture_html(browser: &FormBrowser, config: &ScrapeConfig) -> Result<String> {
    info!(url = %config.url, "loading page");
    let page = browser.new_page(&config.url).await?;

    page.wait_until_ready(config.ready_selector.as_deref()).await?;
    info!("page is interactive");

    wait_for_interaction(&page, config.interaction).await?;
    page.html().await
}

async fn wait_for_interaction(page: &Page, interaction: Interaction) -> Result<()> {
    match interaction {
        Interaction::None => {}
        Interaction::Fixed(pause) => {
            info!(secs = pause.as_secs(), "pausing for manual interaction");
            tokio::time::sleep(pause).await;
        }
        Interaction::Prompt => {
            let title = title_or_empty(page.title().await);
            println!("Interact with \"{title}\" in the browser, then press Enter to capture it.");
            let mut line = String::new();
            BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
        }
    }
    Ok(())
}

/// The prompt only uses the title as a hint, so a failed lookup is logged
/// and replaced with an empty string.
fn title_or_empty(title: Result<String>) -> String {
    match title {
        Ok(title) => title,
        Err(e) => {
            debug!(error = %e, "could not read page title");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn build_schema_wraps_fields_with_source_and_timestamp() {
        let schema = build_schema(
            "https://udyamregistration.gov.in/UdyamRegistration.aspx",
            r#"<input name="a"><input name="b">"#,
            "2026-01-01T00:00:00+05:30",
        );
        assert_eq!(
            schema.source,
            "https://udyamregistration.gov.in/UdyamRegistration.aspx"
        );
        assert_eq!(schema.fetched_at, "2026-01-01T00:00:00+05:30");
        assert_eq!(schema.fields.len(), 2);
    }

    #[test]
    fn title_lookup_failure_falls_back_to_empty() {
        assert_eq!(title_or_empty(Ok("Udyam Registration".to_string())), "Udyam Registration");
        assert_eq!(
            title_or_empty(Err(Error::JsError("Execution context was destroyed".into()))),
            ""
        );
    }
}
