use web_sys::{Element, HtmlElement};

// Small DOM write helpers. Failures are ignored: a missing style or class
// list only means the element is not rendered the way we wanted.

pub fn set_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

pub fn set_transform(el: &HtmlElement, css: &str) {
    let _ = el.style().set_property("transform", css);
}

pub fn clear_transform(el: &HtmlElement) {
    let _ = el.style().remove_property("transform");
}

pub fn translate(x: f64, y: f64) -> String {
    format!("translate3d({x:.2}px, {y:.2}px, 0)")
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

/// Escape text for interpolation into `innerHTML`.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
