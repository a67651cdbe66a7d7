//! WebAssembly bindings for DirectLink
//!
//! The extension background script registers a blocking request listener
//! filtered by [`subscription_urls`] and returns the result of
//! [`analyze_url`] from it.

use wasm_bindgen::prelude::*;
use dl_core::{
    builtin_registry,
    host::normalize_host,
    resolve,
    subscriptions,
    types::Request,
};

mod console;

/// Install the console logger. `level` is one of `error`, `warn`, `info`,
/// `debug`, `trace` or `off` (default `warn`).
#[wasm_bindgen]
pub fn init_logging(level: Option<String>) -> Result<(), JsValue> {
    let filter = console::level_filter(level.as_deref())
        .map_err(|e| JsValue::from_str(&e))?;
    console::install(filter)
        .map_err(|e| JsValue::from_str(&format!("Failed to install logger: {}", e)))
}

/// Resolve an intercepted request URL.
///
/// Returns `{ redirectUrl }` when the URL is a known redirector, `undefined`
/// otherwise. Throws if the URL cannot be parsed.
#[wasm_bindgen]
pub fn analyze_url(url: &str) -> Result<JsValue, JsValue> {
    let redirect = resolve(&Request::new(url))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    match redirect {
        Some(redirect) => {
            let js_result = js_sys::Object::new();
            let _ = js_sys::Reflect::set(
                &js_result,
                &"redirectUrl".into(),
                &JsValue::from_str(&redirect.redirect_url),
            );
            Ok(js_result.into())
        }
        None => Ok(JsValue::UNDEFINED),
    }
}

/// Match patterns to pass as the listener's `urls` filter.
#[wasm_bindgen]
pub fn subscription_urls() -> js_sys::Array {
    subscriptions()
        .iter()
        .map(|pattern| JsValue::from_str(pattern))
        .collect()
}

/// Registry key for a host, after subdomain folding.
#[wasm_bindgen]
pub fn subdomain(host: &str) -> String {
    normalize_host(host).into_owned()
}

/// Registry view: `{ [host]: [path, ...] }` in registration order.
#[wasm_bindgen]
pub fn sites() -> JsValue {
    let result = js_sys::Object::new();
    for site in builtin_registry().sites() {
        let paths = js_sys::Array::new();
        for rule in site.rules() {
            paths.push(&JsValue::from_str(rule.path()));
        }
        let _ = js_sys::Reflect::set(&result, &JsValue::from_str(site.host()), &paths);
    }
    result.into()
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_analyze_url_redirects() {
        let result = analyze_url("https://l.facebook.com/l.php?u=https%3A%2F%2Fexample.com").unwrap();
        let redirect = js_sys::Reflect::get(&result, &"redirectUrl".into()).unwrap();
        assert_eq!(redirect.as_string().as_deref(), Some("https://example.com"));
    }

    #[wasm_bindgen_test]
    fn test_analyze_url_no_match() {
        let result = analyze_url("https://unknownsite.example/foo?url=https://example.com").unwrap();
        assert!(result.is_undefined());
    }

    #[wasm_bindgen_test]
    fn test_analyze_url_throws_on_garbage() {
        assert!(analyze_url("not a url").is_err());
    }

    #[wasm_bindgen_test]
    fn test_subscription_urls() {
        let urls = subscription_urls();
        assert_eq!(urls.length() as usize, subscriptions().len());
        assert_eq!(urls.get(0).as_string().as_deref(), Some("*://*.curseforge.com/linkout*"));
    }

    #[wasm_bindgen_test]
    fn test_sites_lists_paths() {
        let view = sites();
        let paths = js_sys::Reflect::get(&view, &"www.google.com".into()).unwrap();
        assert_eq!(js_sys::Array::from(&paths).length(), 2);
    }
}
