//! Browser wiring: canvas backdrop, animation frame loop, timer pump and input
//! listeners around one [`Session`].
//!
//! Page contract (all optional except the canvas):
//! - `#cyberGrid` canvas for the backdrop
//! - `#launchMission`, `#muteToggle`, `#puzzleSubmit`, `#puzzleInput`, `#digitStage`
//! - any number of `.mission-card[data-mission]` and `.zone[data-info]`
//! - the elements listed in [`DomSurface`]
//!
//! Neither loop can be stopped once started; they live as long as the page.
use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, EventTarget, HtmlCanvasElement, Window, window};

use crate::config::GameConfig;
use crate::log::console_log;
use crate::render::{self, GridStyle, RenderState};
use crate::rng::OsRandom;
use crate::session::Session;

mod audio;
mod dom_surface;

pub use dom_surface::DomSurface;

/// How often due timer tasks are run.
const PUMP_INTERVAL_MS: i32 = 50;

struct Backdrop {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    state: RenderState,
}

thread_local! {
    static SESSION: RefCell<Option<Session<DomSurface>>> = RefCell::new(None);
    static BACKDROP: RefCell<Option<Backdrop>> = RefCell::new(None);
}

pub(crate) fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Run `f` against the live session, if the game has been started.
pub(crate) fn with_session<R>(f: impl FnOnce(&mut Session<DomSurface>) -> R) -> Option<R> {
    SESSION.with(|cell| cell.borrow_mut().as_mut().map(f))
}

pub(crate) fn is_running() -> bool {
    SESSION.with(|cell| cell.borrow().is_some())
}

pub(crate) fn start(config: GameConfig) -> Result<(), JsValue> {
    if is_running() {
        return Err(JsValue::from_str("cyber grid already running"));
    }
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas: HtmlCanvasElement = doc
        .get_element_by_id("cyberGrid")
        .ok_or_else(|| JsValue::from_str("canvas #cyberGrid not found"))?
        .dyn_into()?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2D context not available"))?
        .dyn_into()?;

    let mut backdrop = Backdrop {
        canvas,
        ctx,
        state: RenderState::new(GridStyle::from(&config), 0.0, 0.0),
    };
    fit_to_window(&win, &mut backdrop)?;
    BACKDROP.with(|b| b.replace(Some(backdrop)));

    let now = performance_now();
    let session = Session::new(
        &config,
        Box::new(OsRandom::new(now)),
        DomSurface::from_document(&doc),
        now,
    );
    SESSION.with(|s| s.replace(Some(session)));

    install_listeners(&win, &doc)?;
    start_frame_loop();
    start_timer_pump(&win)?;
    console_log!("cyber grid online ({config:?})");
    Ok(())
}

/// Match the canvas backing store to the viewport at device pixel ratio.
fn fit_to_window(win: &Window, bd: &mut Backdrop) -> Result<(), JsValue> {
    let width = win.inner_width()?.as_f64().unwrap_or(0.0);
    let height = win.inner_height()?.as_f64().unwrap_or(0.0);
    let dpr = win.device_pixel_ratio().max(1.0);
    bd.canvas.set_width((width * dpr).floor() as u32);
    bd.canvas.set_height((height * dpr).floor() as u32);
    let style = bd.canvas.style();
    style.set_property("width", &format!("{width}px"))?;
    style.set_property("height", &format!("{height}px"))?;
    bd.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    bd.state.resize(width, height);
    Ok(())
}

fn listen(target: &EventTarget, event: &str, handler: impl FnMut(web_sys::Event) + 'static) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Listen on an element by id; a missing element just means no listener.
fn listen_id(doc: &Document, id: &str, event: &str, handler: impl FnMut(web_sys::Event) + 'static) -> Result<(), JsValue> {
    match doc.get_element_by_id(id) {
        Some(el) => listen(&el, event, handler),
        None => {
            console_log!("#{id} missing, {event} not wired");
            Ok(())
        }
    }
}

/// Listen on every element matching `selector`, handing the handler the
/// element's `attr` value at event time.
fn listen_all(
    doc: &Document,
    selector: &str,
    event: &str,
    attr: &'static str,
    handler: fn(&mut Session<DomSurface>, &str),
) -> Result<(), JsValue> {
    let nodes = doc.query_selector_all(selector)?;
    for i in 0..nodes.length() {
        let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let source = el.clone();
        listen(&el, event, move |_| {
            let value = source.get_attribute(attr).unwrap_or_default();
            with_session(|s| handler(s, &value));
        })?;
    }
    Ok(())
}

fn submit_current_answer() {
    with_session(|s| {
        let raw = s.surface().answer_text();
        s.submit_answer(&raw);
    });
}

fn install_listeners(win: &Window, doc: &Document) -> Result<(), JsValue> {
    listen_id(doc, "puzzleSubmit", "click", |_| submit_current_answer())?;
    listen_id(doc, "puzzleInput", "keydown", |evt| {
        let enter = evt
            .dyn_ref::<web_sys::KeyboardEvent>()
            .is_some_and(|k| k.key() == "Enter");
        if enter {
            submit_current_answer();
        }
    })?;
    listen_id(doc, "launchMission", "click", |_| {
        with_session(|s| s.launch_mission());
    })?;
    listen_id(doc, "muteToggle", "click", |_| {
        with_session(|s| s.toggle_sound());
    })?;
    listen_id(doc, "digitStage", "mouseenter", |_| {
        with_session(|s| s.mascot_hover());
    })?;
    listen_id(doc, "digitStage", "mouseleave", |_| {
        with_session(|s| s.mascot_leave());
    })?;
    listen_id(doc, "digitStage", "click", |_| {
        with_session(|s| s.mascot_click());
    })?;
    listen_all(doc, ".mission-card", "mouseenter", "data-mission", Session::mission_card_hover)?;
    listen_all(doc, ".zone", "mouseenter", "data-info", Session::zone_hover)?;

    let resize_win = win.clone();
    listen(win, "resize", move |_| {
        BACKDROP.with(|cell| {
            if let Some(bd) = cell.borrow_mut().as_mut() {
                let _ = fit_to_window(&resize_win, bd);
            }
        });
    })?;
    // audio may only start after a gesture
    listen(win, "pointerdown", |_| {
        with_session(|s| s.surface_mut().warm_up_audio());
    })?;
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        BACKDROP.with(|cell| {
            if let Some(bd) = cell.borrow_mut().as_mut() {
                let _ = render::paint(&mut bd.state, &bd.ctx, ts);
            }
        });
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

fn start_timer_pump(win: &Window) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move || {
        let now = performance_now();
        with_session(|s| s.advance_to(now));
    }) as Box<dyn FnMut()>);
    win.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        PUMP_INTERVAL_MS,
    )?;
    closure.forget();
    Ok(())
}
