use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlCanvasElement, MouseEvent, PageTransitionEvent, Window};

use crate::config::{EmailConfig, MotionConfig};
use crate::error::MountError;

use super::contact::ContactView;
use super::cursor::{self, CursorView};
use super::dom;
use super::relay::EmailJsRelay;
use super::render::{FrameLoop, InkBackground};
use super::sections::{self, SharedSection};
use super::toaster::{SharedToaster, ToasterView};

/// Longest step fed to the animations, seconds. Background tabs resume
/// without jumping through whole timelines.
const MAX_FRAME_DT: f64 = 0.1;

struct Mounted {
    frame: FrameLoop,
    background: Option<Rc<RefCell<InkBackground>>>,
    cursor: Rc<RefCell<CursorView>>,
    sections: Vec<SharedSection>,
    toaster: SharedToaster,
    listeners: Vec<EventListener>,
}

thread_local! {
    static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
}

/// Build the page under `root` and start the frame loop.
pub fn mount(window: Window, document: Document, canvas: HtmlCanvasElement, root: Element) -> Result<(), JsValue> {
    let reduced_motion = dom::prefers_reduced_motion(&window);
    let config = MotionConfig::default();
    log::info!("mounting portfolio (reduced motion: {reduced_motion})");

    // The page stays usable without the shader.
    let background = match InkBackground::new(canvas) {
        Ok(bg) => Some(Rc::new(RefCell::new(bg))),
        Err(err) => {
            log::warn!("ink background disabled: {err:?}");
            None
        }
    };

    let body: Element = document.body().ok_or(MountError::MissingElement("body".into()))?.into();
    let built = sections::build(&document, &root, &config, reduced_motion)?;
    let mut listeners = built.listeners;

    let (toaster, close_listener) = ToasterView::mount(&document, &body)?;
    listeners.push(close_listener);

    let relay = Rc::new(EmailJsRelay::new(EmailConfig::from_build_env()));
    listeners.extend(ContactView::attach(built.contact, relay, toaster.clone()));

    let cursor = CursorView::mount(&document, &body)?;
    listeners.extend(cursor::watch_interactive(&root, &cursor)?);

    // Scroll and resize only mark state; the frame loop does the work.
    let scroll_dirty = Rc::new(Cell::new(true));
    let resized = Rc::new(Cell::new(false));
    {
        let dirty = scroll_dirty.clone();
        listeners.push(EventListener::new(&window, "scroll", move |_| dirty.set(true)));
        let (dirty, resized) = (scroll_dirty.clone(), resized.clone());
        listeners.push(EventListener::new(&window, "resize", move |_| {
            dirty.set(true);
            resized.set(true);
        }));
    }
    {
        let (cursor, background) = (cursor.clone(), background.clone());
        listeners.push(EventListener::new(&window, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else { return };
            let (x, y) = (event.client_x() as f64, event.client_y() as f64);
            cursor.borrow_mut().pointer_moved(x, y);
            if let Some(bg) = &background {
                bg.borrow_mut().pointer(x, y);
            }
        }));
    }
    listeners.push(EventListener::new(&window, "pagehide", |event| {
        let persisted = event.dyn_ref::<PageTransitionEvent>().is_some_and(|e| e.persisted());
        if !persisted {
            unmount();
        }
    }));

    let frame = {
        let sections = built.sections.clone();
        let (cursor, background) = (cursor.clone(), background.clone());
        let win = window.clone();
        let mut started: Option<f64> = None;
        let mut last: Option<f64> = None;
        FrameLoop::start(move |now| {
            let start = *started.get_or_insert(now);
            let dt = last.map_or(0.0, |prev| ((now - prev) / 1000.0).clamp(0.0, MAX_FRAME_DT));
            last = Some(now);
            let elapsed = (now - start) / 1000.0;

            if resized.replace(false) {
                if let Some(bg) = &background {
                    bg.borrow_mut().resize();
                }
            }
            if scroll_dirty.replace(false) {
                let (_, vh) = dom::viewport(&win);
                for section in &sections {
                    section.borrow_mut().on_scroll(vh);
                }
            }
            for section in &sections {
                section.borrow_mut().tick(dt, elapsed);
            }
            cursor.borrow_mut().frame(dt);
            if let Some(bg) = &background {
                bg.borrow_mut().frame(now);
            }
        })?
    };

    MOUNTED.with(|slot| {
        *slot.borrow_mut() = Some(Mounted {
            frame,
            background,
            cursor,
            sections: built.sections,
            toaster,
            listeners,
        })
    });
    Ok(())
}

/// Stop everything started by [`mount`]. Safe to call more than once.
pub fn unmount() {
    let Some(mounted) = MOUNTED.with(|slot| slot.borrow_mut().take()) else {
        return;
    };
    mounted.frame.stop();
    for section in &mounted.sections {
        section.borrow_mut().teardown();
    }
    mounted.toaster.borrow_mut().unmount();
    mounted.cursor.borrow().unmount();
    if let Some(bg) = &mounted.background {
        bg.borrow().release();
    }
    log::info!("portfolio unmounted");

    // This can run inside one of the listeners being dropped.
    Timeout::new(0, move || drop(mounted)).forget();
}
