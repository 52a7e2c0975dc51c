use portfolio_core::constants::{LOCALE_QUERY_PARAM, LOCALE_STORAGE_KEY};
use portfolio_core::motion::Rect;
use portfolio_core::{Locale, ScrollMetrics, SectionId, SectionLayout};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Storage, Window};

/// Read the window scroll metrics in one go.
pub fn scroll_metrics(window: &Window, document: &Document) -> ScrollMetrics {
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let viewport_height = viewport_size(window).1;
    let document_height = document
        .document_element()
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(0.0);
    ScrollMetrics {
        scroll_y,
        viewport_height,
        document_height,
    }
}

/// `(innerWidth, innerHeight)`, zero when unavailable.
pub fn viewport_size(window: &Window) -> (f64, f64) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w, h)
}

/// Section offsets read live from the document.
pub struct DomSections<'a>(pub &'a Document);

impl SectionLayout for DomSections<'_> {
    fn section_top(&self, id: SectionId) -> Option<f64> {
        let el = self.0.get_element_by_id(id.as_str())?;
        let el: HtmlElement = el.dyn_into().ok()?;
        Some(el.offset_top() as f64)
    }
}

pub fn element_rect(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect {
        left: r.left(),
        top: r.top(),
        width: r.width(),
        height: r.height(),
    }
}

fn local_storage(window: &Window) -> Option<Storage> {
    match window.local_storage() {
        Ok(s) => s,
        Err(e) => {
            log::warn!("localStorage unavailable: {:?}", e);
            None
        }
    }
}

/// Startup locale: `?lang=` override, then the stored flag, then Japanese.
pub fn initial_locale(window: &Window) -> Locale {
    let search = window.location().search().ok();
    let stored =
        local_storage(window).and_then(|s| s.get_item(LOCALE_STORAGE_KEY).ok().flatten());
    resolve_locale(search.as_deref(), stored.as_deref())
}

fn resolve_locale(search: Option<&str>, stored: Option<&str>) -> Locale {
    search
        .and_then(|q| get_query_param(q, LOCALE_QUERY_PARAM))
        .and_then(|v| Locale::parse(&v))
        .unwrap_or_else(|| Locale::from_stored(stored))
}

pub fn persist_locale(window: &Window, locale: Locale) {
    if let Some(storage) = local_storage(window)
        && let Err(e) = storage.set_item(LOCALE_STORAGE_KEY, locale.as_str())
    {
        log::warn!("failed to persist locale: {:?}", e);
    }
}

/// Simple query string parser used at start-up.
pub fn get_query_param(search: &str, key: &str) -> Option<String> {
    let s = search.trim_start_matches('?');
    for pair in s.split('&') {
        let mut it = pair.splitn(2, '=');
        let k = it.next()?;
        let v = it.next().unwrap_or("");
        if k == key {
            return Some(url_decode(v));
        }
    }
    None
}

fn url_decode(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_encoding::percent_decode_str(&s)
        .decode_utf8_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_param_lookup() {
        assert_eq!(get_query_param("?lang=en", "lang").as_deref(), Some("en"));
        assert_eq!(get_query_param("?a=1&lang=jp", "lang").as_deref(), Some("jp"));
        assert_eq!(get_query_param("?a=1", "lang"), None);
        assert_eq!(get_query_param("", "lang"), None);
        assert_eq!(get_query_param("?lang=", "lang").as_deref(), Some(""));
        assert_eq!(get_query_param("?lang", "lang").as_deref(), Some(""));
    }

    #[test]
    fn query_values_are_decoded() {
        assert_eq!(get_query_param("?q=a%20b", "q").as_deref(), Some("a b"));
        assert_eq!(get_query_param("?q=a+b", "q").as_deref(), Some("a b"));
        assert_eq!(get_query_param("?q=%E6%97%A5", "q").as_deref(), Some("日"));
    }

    #[test]
    fn query_override_beats_stored_flag() {
        assert_eq!(resolve_locale(Some("?lang=en"), Some("jp")), Locale::En);
        assert_eq!(resolve_locale(Some("?a=1&lang=jp"), Some("en")), Locale::Jp);
    }

    #[test]
    fn bad_or_missing_override_falls_back_to_storage() {
        assert_eq!(resolve_locale(Some("?lang=EN"), Some("en")), Locale::En);
        assert_eq!(resolve_locale(Some("?lang="), None), Locale::Jp);
        assert_eq!(resolve_locale(Some("?other=1"), Some("en")), Locale::En);
        assert_eq!(resolve_locale(None, Some("fr")), Locale::Jp);
        assert_eq!(resolve_locale(None, None), Locale::Jp);
    }
}
