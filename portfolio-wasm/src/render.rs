//! DOM writes. Every function re-derives its output from the engine, so the
//! order in which they run does not matter.

use portfolio_core::scroll::progress_ring_offset;
use portfolio_core::{Locale, PickSurface, ScrollState, WorkItem};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::state::State;
use crate::style::{escape_html, set_class, set_text};

fn by_id(doc: &Document, id: &str) -> Option<Element> {
    doc.get_element_by_id(id)
}

fn each_matching(doc: &Document, selector: &str, mut f: impl FnMut(&Element)) {
    let Ok(list) = doc.query_selector_all(selector) else {
        return;
    };
    for i in 0..list.length() {
        if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            f(&el);
        }
    }
}

pub fn render_all(state: &State) {
    render_locale(state);
    render_selection(state);
    render_scroll(state, state.engine.scroll_state());
    render_copy_button(state);
}

pub fn render_scroll(state: &State, scroll: ScrollState) {
    let doc = &state.document;
    each_matching(doc, ".site-header", |el| {
        set_class(el, "is-compact", scroll.header_compact)
    });
    let nav = state.engine.nav_highlight();
    for (key, on) in [
        ("works", nav.works),
        ("about", nav.about),
        ("contact", nav.contact),
    ] {
        each_matching(doc, &format!("[data-nav=\"{key}\"]"), |el| {
            set_class(el, "is-active", on)
        });
    }
    if let Some(ring) = by_id(doc, "progressRingValue") {
        let offset = progress_ring_offset(scroll.scroll_progress);
        let _ = ring.set_attribute("stroke-dashoffset", &format!("{offset:.3}"));
    }
}

pub fn render_locale(state: &State) {
    let doc = &state.document;
    let locale = state.engine.locale();
    let copy = state.engine.copy();

    if let Some(root) = doc.document_element() {
        let _ = root.set_attribute("lang", locale.pick("ja", "en"));
        set_class(&root, "locale-jp", locale == Locale::Jp);
    }
    each_matching(doc, "[data-i18n]", |el| {
        if let Some(key) = el.get_attribute("data-i18n") {
            match copy.text(&key, locale) {
                Some(text) => set_text(el, text),
                None => log::warn!("unknown copy key `{}`", key),
            }
        }
    });
    each_matching(doc, "[data-locale]", |el| {
        let on = el.get_attribute("data-locale").as_deref() == Some(locale.as_str());
        set_class(el, "is-active", on);
        let _ = el.set_attribute("aria-pressed", if on { "true" } else { "false" });
    });

    if let Some(el) = by_id(doc, "craftList") {
        let html: String = copy
            .craft
            .iter()
            .map(|c| {
                format!(
                    "<article class=\"surface-card card-interactive\"><p class=\"text-jp\">{}</p></article>",
                    escape_html(c.get(locale))
                )
            })
            .collect();
        el.set_inner_html(&html);
    }
    if let Some(el) = by_id(doc, "aboutKeywords") {
        let html: String = copy
            .about
            .keywords
            .iter()
            .map(|k| format!("<span class=\"about-keyword\">{}</span>", escape_html(k)))
            .collect();
        el.set_inner_html(&html);
    }
    if let Some(el) = by_id(doc, "contactMeta") {
        let html: String = copy
            .contact
            .small_meta
            .iter()
            .map(|line| format!("<p>{}</p>", escape_html(line)))
            .collect();
        el.set_inner_html(&html);
    }
}

fn chip_html(
    state: &State,
    tag: &str,
    surface: PickSurface,
    class: &str,
    active_class: &str,
) -> String {
    let active = if state.engine.is_highlighted(tag) {
        active_class
    } else {
        ""
    };
    let tag = escape_html(tag);
    let surface = surface.as_attr();
    format!(
        "<button type=\"button\" class=\"{class} {active}\" data-tag=\"{tag}\" data-surface=\"{surface}\">{tag}</button>"
    )
}

fn links_html(work: &WorkItem) -> String {
    work.display_links()
        .iter()
        .map(|l| {
            format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noreferrer\" class=\"work-link\">{}</a>",
                escape_html(&l.url),
                escape_html(&l.label)
            )
        })
        .collect()
}

fn work_card_html(state: &State, work: &WorkItem) -> String {
    let locale = state.engine.locale();
    let ui = &state.engine.copy().ui;
    let bullets: String = work
        .bullets
        .iter()
        .map(|b| format!("<li>{}</li>", escape_html(b)))
        .collect();
    let chips: String = work
        .stack
        .iter()
        .map(|t| chip_html(state, t, PickSurface::WorkCard, "chip", "chip-active"))
        .collect();
    format!(
        "<article class=\"surface-card card-interactive work-card\" data-work-id=\"{id}\">\
<p class=\"work-label\">{label}</p><h3>{name}</h3>\
<div class=\"work-kv\"><p><span>{outcome_h}</span> {outcome}</p><p><span>{role_h}</span> {role}</p></div>\
<p class=\"work-summary\">{summary}</p><ul>{bullets}</ul>\
<div class=\"work-chips\">{chips}</div><div class=\"work-links\">{links}</div></article>",
        id = escape_html(&work.id),
        label = escape_html(work.label(locale)),
        name = escape_html(&work.name),
        outcome_h = escape_html(&ui.outcome),
        outcome = escape_html(&work.outcome),
        role_h = escape_html(&ui.role),
        role = escape_html(&work.role),
        summary = escape_html(&work.summary),
        links = links_html(work),
    )
}

/// Everything that depends on the selected tag.
pub fn render_selection(state: &State) {
    let doc = &state.document;
    let engine = &state.engine;
    let copy = engine.copy();

    if let Some(el) = by_id(doc, "stackChips") {
        let all_active = if engine.selected().is_none() {
            "chip-active"
        } else {
            ""
        };
        let mut html = format!(
            "<button type=\"button\" class=\"chip {all_active}\" data-all-chip>{}</button>",
            escape_html(&copy.ui.all)
        );
        for tag in engine.available_stacks() {
            html.push_str(&chip_html(state, tag, PickSurface::FilterChip, "chip", "chip-active"));
        }
        el.set_inner_html(&html);
    }

    let works = engine.filtered_works();
    if let Some(el) = by_id(doc, "worksList") {
        let html: String = works.iter().map(|w| work_card_html(state, w)).collect();
        el.set_inner_html(&html);
    }
    if let Some(el) = by_id(doc, "worksEmpty") {
        if works.is_empty() {
            set_text(&el, &copy.ui.no_match);
        } else {
            set_text(&el, "");
        }
    }

    if let Some(el) = by_id(doc, "skillGroups") {
        let mut html = String::new();
        for (i, group) in copy.skills.iter().enumerate() {
            let pills: String = group
                .items
                .iter()
                .map(|s| {
                    let chip =
                        chip_html(state, s, PickSurface::SkillList, "skill-pill", "is-selected");
                    format!("<li>{chip}</li>")
                })
                .collect();
            let dim = if engine.skill_group_dimmed(i) {
                "is-dimmed"
            } else {
                ""
            };
            html.push_str(&format!(
                "<article class=\"surface-card card-interactive skill-group {dim}\" data-skill-group=\"{i}\"><h3>{}</h3><ul>{pills}</ul></article>",
                escape_html(&group.title)
            ));
        }
        el.set_inner_html(&html);
    }

    if let Some(el) = by_id(doc, "sphereNodes") {
        let html: String = engine
            .sphere_skills()
            .into_iter()
            .map(|s| chip_html(state, s, PickSurface::SkillSphere, "sphere-node", "is-selected"))
            .collect();
        el.set_inner_html(&html);
    }

    render_caption(state);
    render_drawer(state);
}

pub fn render_caption(state: &State) {
    if let Some(el) = by_id(&state.document, "sphereCaption") {
        set_text(&el, state.engine.sphere_caption());
    }
}

pub fn render_skill_hover(state: &State) {
    each_matching(&state.document, "[data-skill-group]", |el| {
        let dimmed = el
            .get_attribute("data-skill-group")
            .and_then(|v| v.parse::<usize>().ok())
            .is_some_and(|i| state.engine.skill_group_dimmed(i));
        set_class(el, "is-dimmed", dimmed);
    });
}

pub fn render_drawer(state: &State) {
    let Some(el) = by_id(&state.document, "workDrawer") else {
        return;
    };
    let Some(work) = state.engine.drawer_work() else {
        set_class(&el, "is-open", false);
        el.set_inner_html("");
        return;
    };
    let locale = state.engine.locale();
    let ui = &state.engine.copy().ui;
    let preview = match &work.preview_image {
        Some(src) => format!(
            "<div class=\"work-drawer-preview\"><img src=\"{}\" alt=\"{}\"></div>",
            escape_html(src),
            escape_html(
                &work
                    .preview_alt
                    .clone()
                    .unwrap_or_else(|| format!("{} preview", work.name))
            )
        ),
        None => String::new(),
    };
    let details: String = work
        .details
        .iter()
        .map(|d| format!("<li>{}</li>", escape_html(d)))
        .collect();
    let chips: String = work
        .stack
        .iter()
        .map(|t| chip_html(state, t, PickSurface::Drawer, "chip", "chip-active"))
        .collect();
    let html = format!(
        "<button type=\"button\" class=\"work-drawer-backdrop\" data-drawer-close aria-label=\"Close case drawer\"></button>\
<aside class=\"work-drawer-panel\"><div class=\"drawer-head\"><div><p>{label}</p><h3>{name}</h3></div>\
<button type=\"button\" class=\"drawer-close-btn\" data-drawer-close>{close}</button></div>{preview}\
<div class=\"drawer-kv-grid\"><div><p>{outcome_h}</p><p>{outcome}</p></div><div><p>{role_h}</p><p>{role}</p></div></div>\
<p>{summary}</p><ul>{details}</ul><div class=\"drawer-chips\">{chips}</div><div class=\"drawer-links\">{links}</div></aside>",
        label = escape_html(work.label(locale)),
        name = escape_html(&work.name),
        close = escape_html(&ui.close),
        outcome_h = escape_html(&ui.outcome),
        outcome = escape_html(&work.outcome),
        role_h = escape_html(&ui.role),
        role = escape_html(&work.role),
        summary = escape_html(&work.summary),
        links = links_html(work),
    );
    el.set_inner_html(&html);
    set_class(&el, "is-open", true);
}

pub fn render_copy_button(state: &State) {
    if let Some(el) = by_id(&state.document, "copyEmail") {
        set_text(&el, state.engine.copy_button_label());
    }
}
