//! Real-browser tests. They need a local Chrome/Chromium:
//! `cargo test --test integration -- --ignored`

use std::time::Duration;

use form_schema::{scrape, FormBrowser, Interaction, ScrapeConfig};

const FORM_PAGE: &str = "data:text/html;charset=utf-8,\
    <html><head><title>Test Form</title></head><body>\
    <label for='pan'>PAN</label><input id='pan' name='pan' maxlength='10' required>\
    <select name='state'><option value='GA'>Goa</option></select>\
    </body></html>";

#[tokio::test]
#[ignore]
async fn test_launch_and_capture_html() {
    let browser = FormBrowser::builder()
        .headless(true)
        .build()
        .await
        .expect("Failed to launch browser");

    let page = browser
        .new_page(FORM_PAGE)
        .await
        .expect("Failed to open page");

    page.wait_until_ready(Some("input")).await.expect("Page never became ready");

    let title = page.title().await.expect("Failed to get title");
    assert_eq!(title, "Test Form");

    let html = page.html().await.expect("Failed to get HTML");
    assert!(html.contains("name=\"pan\""), "HTML was: {html}");

    browser.close().await.expect("Failed to close browser");
}

#[tokio::test]
#[ignore]
async fn test_wait_until_ready_times_out_on_missing_marker() {
    let browser = FormBrowser::builder()
        .headless(true)
        .timeout(Duration::from_secs(1))
        .build()
        .await
        .expect("Failed to launch browser");

    let page = browser
        .new_page(FORM_PAGE)
        .await
        .expect("Failed to open page");

    let result = page.wait_until_ready(Some(".never-rendered")).await;
    assert!(matches!(result, Err(form_schema::Error::Timeout(_))));

    browser.close().await.expect("Failed to close browser");
}

#[tokio::test]
#[ignore]
async fn test_scrape_writes_schema() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ScrapeConfig {
        url: FORM_PAGE.to_string(),
        output: dir.path().join("form_schema.json"),
        ready_selector: Some("select".to_string()),
        interaction: Interaction::None,
        ..ScrapeConfig::default()
    };
    config.browser.headless = true;

    let schema = scrape(&config).await.expect("Scrape failed");
    assert_eq!(schema.source, FORM_PAGE);
    assert_eq!(schema.fields.len(), 2);
    assert_eq!(schema.fields[0].label.as_deref(), Some("PAN"));
    assert!(schema.fields[0].required);
    assert_eq!(schema.fields[1].options.as_ref().map(Vec::len), Some(1));

    let on_disk = form_schema::FormSchema::read_from(&config.output).unwrap();
    assert_eq!(on_disk, schema);
}

#[tokio::test]
#[ignore]
async fn test_scrape_closes_browser_when_page_never_ready() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ScrapeConfig {
        url: FORM_PAGE.to_string(),
        output: dir.path().join("form_schema.json"),
        ready_selector: Some(".never-rendered".to_string()),
        interaction: Interaction::None,
        ..ScrapeConfig::default()
    };
    config.browser.headless = true;
    config.browser.default_timeout = Duration::from_secs(1);

    let result = tokio::time::timeout(Duration::from_secs(30), scrape(&config))
        .await
        .expect("Scrape hung instead of closing the browser");

    assert!(
        matches!(result, Err(form_schema::Error::Timeout(_))),
        "Expected a timeout, got: {result:?}"
    );
    assert!(!config.output.exists(), "Schema written despite failed capture");
}
