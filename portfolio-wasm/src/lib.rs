use std::cell::RefCell;
use std::rc::Rc;

use portfolio_core::motion::{hero_parallax, hero_video_scale, magnetic_offset, Spring};
use portfolio_core::{Catalog, Effect, Event, Locale, PickSurface, PortfolioEngine, SectionId};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, HtmlElement, KeyboardEvent, MouseEvent,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, ScrollToOptions, Window,
};

mod render;
mod state;
mod style;
mod utils;

use crate::state::{Magnetic, MotionState, STATE, State};
use crate::style::{clear_transform, set_transform, translate};
use crate::utils::{DomSections, element_rect, scroll_metrics, viewport_size};

type Shared = Rc<RefCell<State>>;

fn with_state(f: impl FnOnce(&Shared)) {
    let st = STATE.with(|st| st.borrow().clone());
    if let Some(st) = st {
        f(&st);
    }
}

fn closest(el: &Element, selector: &str) -> Option<Element> {
    el.closest(selector).ok().flatten()
}

fn event_element(e: &web_sys::Event) -> Option<Element> {
    e.target().and_then(|t| t.dyn_into::<Element>().ok())
}

/// Run one event through the engine and carry out its effects.
fn dispatch(state: &Shared, event: Event) {
    let effects = state.borrow_mut().engine.dispatch(event);
    for effect in effects {
        match effect {
            Effect::ScrollIntoView(id) => scroll_into_view(&state.borrow().document, id),
            Effect::PersistLocale(locale) => utils::persist_locale(&state.borrow().window, locale),
            Effect::ScheduleCopyAckReset {
                generation,
                after_ms,
            } => schedule_copy_ack_reset(&state.borrow().window, generation, after_ms),
        }
    }
}

fn scroll_into_view(document: &Document, id: SectionId) {
    if let Some(el) = document.get_element_by_id(id.as_str()) {
        let opts = ScrollIntoViewOptions::new();
        opts.set_behavior(ScrollBehavior::Smooth);
        opts.set_block(ScrollLogicalPosition::Start);
        el.scroll_into_view_with_scroll_into_view_options(&opts);
    }
}

fn scroll_to_top(window: &Window) {
    let opts = ScrollToOptions::new();
    opts.set_top(0.0);
    opts.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&opts);
}

fn schedule_copy_ack_reset(window: &Window, generation: u32, after_ms: u32) {
    let cb = Closure::once_into_js(move || {
        with_state(|st| {
            dispatch(st, Event::CopyAckExpired(generation));
            render::render_copy_button(&st.borrow());
        });
    });
    let timeout = i32::try_from(after_ms).unwrap_or(i32::MAX);
    if let Err(e) =
        window.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), timeout)
    {
        log::warn!("failed to schedule copy acknowledgement reset: {:?}", e);
    }
}

async fn write_clipboard(window: &Window, text: &str) -> Result<(), JsValue> {
    let navigator = window.navigator();
    let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(JsValue::from_str("clipboard API not available"));
    }
    let write: js_sys::Function =
        js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))?.dyn_into()?;
    let promise: js_sys::Promise = write.call1(&clipboard, &JsValue::from_str(text))?.dyn_into()?;
    wasm_bindgen_futures::JsFuture::from(promise).await?;
    Ok(())
}

// Fire-and-forget; a failed write only means no acknowledgement is shown.
fn copy_email(state: &Shared, address: String) {
    let window = state.borrow().window.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let event = match write_clipboard(&window, &address).await {
            Ok(()) => Event::EmailCopied,
            Err(e) => {
                log::warn!("clipboard write failed: {:?}", e);
                Event::EmailCopyFailed
            }
        };
        with_state(|st| {
            dispatch(st, event);
            render::render_copy_button(&st.borrow());
        });
    });
}

/// Sample the scroll position; also run once at mount.
fn on_scroll(state: &Shared) {
    let mut s = state.borrow_mut();
    let s = &mut *s;
    let metrics = scroll_metrics(&s.window, &s.document);
    let scroll = s.engine.scroll(&metrics, &DomSections(&s.document));
    if !s.reduced_motion {
        let m = &mut s.motion;
        m.video_scale
            .set_target(hero_video_scale(metrics.scroll_y, metrics.viewport_height));
        m.orb = m.orb.with_scroll(metrics.scroll_y, metrics.viewport_height);
        m.orb_rotate_z.set_target(m.orb.rotate_z);
        m.orb_scale.set_target(m.orb.scale);
    }
    render::render_scroll(s, scroll);
}

fn on_click(state: &Shared, e: &web_sys::Event) {
    let Some(target) = event_element(e) else {
        return;
    };
    if let Some(el) = closest(&target, "[data-locale]") {
        if let Some(locale) = el.get_attribute("data-locale").as_deref().and_then(Locale::parse) {
            dispatch(state, Event::LocaleChanged(locale));
            render::render_all(&state.borrow());
        }
        return;
    }
    if closest(&target, "[data-all-chip]").is_some() {
        dispatch(state, Event::AllChipClicked);
        render::render_selection(&state.borrow());
        return;
    }
    if let Some(el) = closest(&target, "[data-tag]") {
        let surface = el
            .get_attribute("data-surface")
            .as_deref()
            .and_then(PickSurface::from_attr)
            .unwrap_or(PickSurface::FilterChip);
        if let Some(tag) = el.get_attribute("data-tag") {
            dispatch(state, Event::TagPicked { tag, surface });
            render::render_selection(&state.borrow());
        }
        return;
    }
    if closest(&target, "[data-drawer-close]").is_some() {
        dispatch(state, Event::DrawerClosed);
        render::render_drawer(&state.borrow());
        return;
    }
    if closest(&target, "a").is_some() {
        return;
    }
    if let Some(el) = closest(&target, "[data-work-id]") {
        if let Some(id) = el.get_attribute("data-work-id") {
            dispatch(state, Event::DrawerOpened(id));
            render::render_drawer(&state.borrow());
        }
        return;
    }
    if let Some(el) = closest(&target, "#copyEmail") {
        match el.get_attribute("data-email") {
            Some(address) => copy_email(state, address),
            None => dispatch(state, Event::EmailCopyFailed),
        }
        return;
    }
    if closest(&target, "[data-back-to-top]").is_some() {
        scroll_to_top(&state.borrow().window);
    }
}

fn on_hover(state: &Shared, e: &web_sys::Event) {
    let target = event_element(e);
    let group = target
        .as_ref()
        .and_then(|t| closest(t, "[data-skill-group]"))
        .and_then(|el| el.get_attribute("data-skill-group"))
        .and_then(|v| v.parse::<usize>().ok());
    let sphere_selector = format!("[data-surface=\"{}\"]", PickSurface::SkillSphere.as_attr());
    let sphere_skill = target
        .as_ref()
        .and_then(|t| closest(t, &sphere_selector))
        .and_then(|el| el.get_attribute("data-tag"));
    dispatch(state, Event::SkillGroupHovered(group));
    dispatch(state, Event::SphereSkillHovered(sphere_skill));
    let s = state.borrow();
    render::render_skill_hover(&s);
    render::render_caption(&s);
}

fn attach_ui(state: Shared) -> Result<(), JsValue> {
    let (window, document) = {
        let s = state.borrow();
        (s.window.clone(), s.document.clone())
    };

    // Scroll tracking (passive)
    {
        let st = state.clone();
        let onscroll = Closure::<dyn FnMut()>::wrap(Box::new(move || on_scroll(&st)));
        let opts = AddEventListenerOptions::new();
        opts.set_passive(true);
        window.add_event_listener_with_callback_and_add_event_listener_options(
            "scroll",
            onscroll.as_ref().unchecked_ref(),
            &opts,
        )?;
        onscroll.forget();
    }

    // Clicks are delegated from the document so re-rendered chips need no rewiring
    {
        let st = state.clone();
        let onclick =
            Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |e| on_click(&st, &e)));
        document.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let st = state.clone();
        let onover =
            Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |e| on_hover(&st, &e)));
        document.add_event_listener_with_callback("mouseover", onover.as_ref().unchecked_ref())?;
        onover.forget();
    }

    // Escape closes the case drawer
    {
        let st = state.clone();
        let onkey = Closure::<dyn FnMut(KeyboardEvent)>::wrap(Box::new(move |e: KeyboardEvent| {
            dispatch(&st, Event::KeyPressed(e.key()));
            render::render_drawer(&st.borrow());
        }));
        window.add_event_listener_with_callback("keydown", onkey.as_ref().unchecked_ref())?;
        onkey.forget();
    }

    if state.borrow().reduced_motion {
        return Ok(());
    }

    // Orb follows the pointer across the whole window
    {
        let st = state.clone();
        let onmove = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            let mut s = st.borrow_mut();
            let viewport = viewport_size(&s.window);
            let m = &mut s.motion;
            m.orb = m
                .orb
                .with_pointer((e.client_x() as f64, e.client_y() as f64), viewport);
            m.orb_x.set_target(m.orb.x);
            m.orb_y.set_target(m.orb.y);
            m.orb_rotate_x.set_target(m.orb.rotate_x);
            m.orb_rotate_y.set_target(m.orb.rotate_y);
        }));
        window.add_event_listener_with_callback("mousemove", onmove.as_ref().unchecked_ref())?;
        onmove.forget();
    }

    // Hero video parallax
    if let Some(hero) = document.get_element_by_id(SectionId::Hero.as_str()) {
        let st = state.clone();
        let hero_el = hero.clone();
        let onmove = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            let rect = element_rect(&hero_el);
            let (x, y) = hero_parallax((e.client_x() as f64, e.client_y() as f64), &rect);
            let mut s = st.borrow_mut();
            s.motion.video_x.set_target(x);
            s.motion.video_y.set_target(y);
        }));
        hero.add_event_listener_with_callback("mousemove", onmove.as_ref().unchecked_ref())?;
        onmove.forget();

        let st = state.clone();
        let onleave = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let mut s = st.borrow_mut();
            s.motion.video_x.set_target(0.0);
            s.motion.video_y.set_target(0.0);
        }));
        hero.add_event_listener_with_callback("mouseleave", onleave.as_ref().unchecked_ref())?;
        onleave.forget();
    }

    attach_magnetic(state, &document)
}

fn attach_magnetic(state: Shared, document: &Document) -> Result<(), JsValue> {
    let list = document.query_selector_all("[data-magnetic]")?;
    for i in 0..list.length() {
        let Some(el) = list.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        let idx = {
            let mut s = state.borrow_mut();
            s.motion.magnetic.push(Magnetic::new(el.clone()));
            s.motion.magnetic.len() - 1
        };

        let st = state.clone();
        let el_for_move = el.clone();
        let onmove = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            let rect = element_rect(&el_for_move);
            let (x, y) = magnetic_offset((e.client_x() as f64, e.client_y() as f64), &rect);
            if let Some(m) = st.borrow_mut().motion.magnetic.get_mut(idx) {
                m.x.set_target(x);
                m.y.set_target(y);
            }
        }));
        el.add_event_listener_with_callback("mousemove", onmove.as_ref().unchecked_ref())?;
        onmove.forget();

        let st = state.clone();
        let onleave = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            if let Some(m) = st.borrow_mut().motion.magnetic.get_mut(idx) {
                m.x.set_target(0.0);
                m.y.set_target(0.0);
            }
        }));
        el.add_event_listener_with_callback("mouseleave", onleave.as_ref().unchecked_ref())?;
        onleave.forget();
    }
    Ok(())
}

fn query_html(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn any_moving(springs: &[&Spring]) -> bool {
    springs.iter().any(|s| !s.is_at_rest())
}

/// Advance every spring by one frame and write the transforms that moved.
fn step_motion(state: &mut State, ts: f64) {
    let dt = state
        .motion
        .last_frame_ts
        .map(|prev| (ts - prev) / 1000.0)
        .unwrap_or(0.0);
    state.motion.last_frame_ts = Some(ts);
    let m: &mut MotionState = &mut state.motion;

    if any_moving(&[&m.video_x, &m.video_y, &m.video_scale]) {
        let x = m.video_x.step(dt);
        let y = m.video_y.step(dt);
        let scale = m.video_scale.step(dt);
        if let Some(el) = query_html(&state.document, ".hero-video") {
            set_transform(&el, &format!("{} scale({scale:.4})", translate(x, y)));
        }
    }

    if any_moving(&[
        &m.orb_x,
        &m.orb_y,
        &m.orb_rotate_x,
        &m.orb_rotate_y,
        &m.orb_rotate_z,
        &m.orb_scale,
    ]) {
        let x = m.orb_x.step(dt);
        let y = m.orb_y.step(dt);
        let rx = m.orb_rotate_x.step(dt);
        let ry = m.orb_rotate_y.step(dt);
        let rz = m.orb_rotate_z.step(dt);
        let scale = m.orb_scale.step(dt);
        if let Some(el) = query_html(&state.document, ".orb-shell") {
            set_transform(
                &el,
                &format!(
                    "{} rotateX({rx:.3}deg) rotateY({ry:.3}deg) rotateZ({rz:.3}deg) scale({scale:.4})",
                    translate(x, y)
                ),
            );
        }
    }

    for mag in m.magnetic.iter_mut() {
        if any_moving(&[&mag.x, &mag.y]) {
            let x = mag.x.step(dt);
            let y = mag.y.step(dt);
            set_transform(&mag.el, &translate(x, y));
        }
    }
}

fn start_animation(state: Shared) {
    type RafClosure = Closure<dyn FnMut(f64)>;
    let f: Rc<RefCell<Option<RafClosure>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        step_motion(&mut state.borrow_mut(), ts);
        if let Some(window) = web_sys::window()
            && let Some(cb) = f.borrow().as_ref()
        {
            let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(window) = web_sys::window()
        && let Some(cb) = g.borrow().as_ref()
    {
        let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .is_some_and(|mq| mq.matches())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let catalog = Catalog::bundled().map_err(|e| JsValue::from_str(&e.to_string()))?;

    let locale = utils::initial_locale(&window);
    utils::persist_locale(&window, locale);
    let reduced_motion = prefers_reduced_motion(&window);
    log::info!("portfolio starting (locale={locale}, reduced_motion={reduced_motion})");

    if reduced_motion {
        for selector in [".hero-video", ".orb-shell"] {
            if let Some(el) = query_html(&document, selector) {
                clear_transform(&el);
            }
        }
    }

    let state = Rc::new(RefCell::new(State {
        window,
        document,
        engine: PortfolioEngine::new(catalog, locale),
        motion: MotionState::default(),
        reduced_motion,
    }));
    STATE.with(|st| st.replace(Some(state.clone())));

    attach_ui(state.clone())?;
    render::render_all(&state.borrow());
    on_scroll(&state);
    if !reduced_motion {
        start_animation(state);
    }
    Ok(())
}
