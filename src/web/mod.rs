//! Browser backends over `web-sys`.
//!
//! Only compiled for `wasm32`. Everything else in the crate reaches the
//! browser through the types exported here.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlDocument, HtmlInputElement};

use crate::config::{ThemeConfig, ThemeTarget, CONFIG_ELEMENT_ID};
use crate::controller::ThemePreferenceController;
use crate::cookie::CookieStore;
use crate::document::{ColorSchemeQuery, ThemeDocument};
use crate::error::{Result, ThemeError};

mod lifecycle;

pub use lifecycle::{install, install_from_page, installed, toggle_dark_mode};

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

pub type BrowserController =
    ThemePreferenceController<BrowserDocument, BrowserCookies, BrowserColorScheme>;

fn js_err(e: JsValue) -> ThemeError {
    ThemeError::Dom(format!("{:?}", e))
}

fn document() -> Result<Document> {
    web_sys::window()
        .ok_or(ThemeError::Unavailable("window"))?
        .document()
        .ok_or(ThemeError::Unavailable("document"))
}

/// Class list of `<html>` or `<body>` plus the page's toggle switches.
pub struct BrowserDocument {
    document: Document,
    target: ThemeTarget,
}

impl BrowserDocument {
    pub fn new(target: ThemeTarget) -> Result<Self> {
        Ok(Self {
            document: document()?,
            target,
        })
    }

    fn target_element(&self) -> Result<Element> {
        let element = match self.target {
            ThemeTarget::Root => self.document.document_element(),
            ThemeTarget::Body => self.document.body().map(Element::from),
        };
        element.ok_or(ThemeError::Unavailable("theme target element"))
    }
}

impl ThemeDocument for BrowserDocument {
    fn has_class(&self, class: &str) -> Result<bool> {
        Ok(self.target_element()?.class_list().contains(class))
    }

    fn add_class(&mut self, class: &str) -> Result<()> {
        self.target_element()?
            .class_list()
            .add_1(class)
            .map_err(js_err)
    }

    fn remove_class(&mut self, class: &str) -> Result<()> {
        self.target_element()?
            .class_list()
            .remove_1(class)
            .map_err(js_err)
    }

    fn check_all(&mut self, selector: &str) -> Result<usize> {
        let nodes = self
            .document
            .query_selector_all(selector)
            .map_err(js_err)?;

        let mut count = 0;
        for i in 0..nodes.length() {
            let Some(node) = nodes.item(i) else {
                continue;
            };
            match node.dyn_into::<HtmlInputElement>() {
                Ok(input) => input.set_checked(true),
                // Non-input controls (custom switches) get the property set directly
                Err(node) => {
                    js_sys::Reflect::set(&node, &JsValue::from_str("checked"), &JsValue::TRUE)
                        .map_err(js_err)?;
                }
            }
            count += 1;
        }
        Ok(count)
    }
}

/// `document.cookie`
pub struct BrowserCookies {
    document: HtmlDocument,
}

impl BrowserCookies {
    pub fn new() -> Result<Self> {
        let document = document()?
            .dyn_into::<HtmlDocument>()
            .map_err(|_| ThemeError::Unavailable("HTML document"))?;
        Ok(Self { document })
    }
}

impl CookieStore for BrowserCookies {
    fn read(&self) -> Result<String> {
        self.document.cookie().map_err(js_err)
    }

    fn write(&mut self, assignment: &str) -> Result<()> {
        self.document.set_cookie(assignment).map_err(js_err)
    }
}

/// `window.matchMedia("(prefers-color-scheme: dark)")`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserColorScheme;

impl ColorSchemeQuery for BrowserColorScheme {
    fn prefers_dark(&self) -> Option<bool> {
        web_sys::window()?
            .match_media(DARK_SCHEME_QUERY)
            .ok()
            .flatten()
            .map(|mql| mql.matches())
    }
}

/// Build a controller over the live page.
pub fn browser_controller(config: ThemeConfig) -> Result<BrowserController> {
    Ok(ThemePreferenceController::with_config(
        BrowserDocument::new(config.target)?,
        BrowserCookies::new()?,
        BrowserColorScheme,
        config,
    ))
}

/// Read configuration from `<script id="darkmode-config" type="application/json">`.
///
/// Falls back to defaults when the element is missing or malformed.
pub fn load_page_config() -> ThemeConfig {
    let text = document()
        .ok()
        .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());

    match text {
        Some(json) => ThemeConfig::from_json(&json).unwrap_or_else(|e| {
            tracing::warn!("Ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
            ThemeConfig::default()
        }),
        None => ThemeConfig::default(),
    }
}
