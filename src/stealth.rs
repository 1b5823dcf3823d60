use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::page::Page as CrPage;

use crate::error::{Error, Result};

/// Key-only launch flags that hide the automation banner.
/// chromiumoxide adds the `--` prefix, so keys must NOT include it.
pub fn stealth_key_args() -> Vec<&'static str> {
    vec!["disable-infobars", "no-first-run", "disable-default-apps"]
}

/// Key-value launch flags, passed as `--key=value`.
pub fn stealth_kv_args() -> Vec<(&'static str, &'static str)> {
    vec![("disable-blink-features", "AutomationControlled")]
}

/// Hide `navigator.webdriver` before any site script runs.
///
/// Some government portals refuse to render their forms when they detect an
/// automated browser.
pub async fn apply_stealth(page: &CrPage) -> Result<()> {
    let params = AddScriptToEvaluateOnNewDocumentParams::new(WEBDRIVER_JS);
    page.execute(params)
        .await
        .map_err(|e| Error::JsError(format!("Failed to inject stealth script: {e}")))?;
    Ok(())
}

static WEBDRIVER_JS: &str = r#"
Object.defineProperty(Navigator.prototype, 'webdriver', {
    get: () => false,
    configurable: true,
    enumerable: true,
});
"#;
