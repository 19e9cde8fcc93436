use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, NodeList, Window,
};

use crate::error::{FxError, Result};

pub fn browser_window() -> Result<Window> {
    window().ok_or(FxError::NoDocument)
}

pub fn document() -> Result<Document> {
    browser_window()?.document().ok_or(FxError::NoDocument)
}

pub fn query(document: &Document, selector: &str) -> Result<Element> {
    document
        .query_selector(selector)?
        .ok_or_else(|| FxError::MissingElement(selector.to_string()))
}

pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    Ok(elements(&document.query_selector_all(selector)?))
}

pub fn query_all_in(root: &Element, selector: &str) -> Result<Vec<Element>> {
    Ok(elements(&root.query_selector_all(selector)?))
}

fn elements(nodes: &NodeList) -> Vec<Element> {
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Inline style on an HTML element; other elements are left alone.
pub fn set_style(element: &Element, property: &str, value: &str) -> Result<()> {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        element.style().set_property(property, value)?;
    }
    Ok(())
}

/// Appends a `<style>` block to `<head>` unless one with `id` already exists.
pub fn install_style(document: &Document, id: &str, css: &str) -> Result<()> {
    if document.get_element_by_id(id).is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| FxError::MissingElement("head".to_string()))?;
    let style = document.create_element("style")?;
    style.set_id(id);
    style.set_text_content(Some(css));
    head.append_child(&style)?;
    Ok(())
}

pub fn viewport_size() -> (f64, f64) {
    let Ok(win) = browser_window() else {
        return (1280.0, 720.0);
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

pub fn now_ms() -> f64 {
    browser_window()
        .ok()
        .and_then(|win| win.performance())
        .map(|performance| performance.now())
        .unwrap_or(0.0)
}

pub fn media_matches(query: &str) -> bool {
    browser_window()
        .ok()
        .and_then(|win| win.match_media(query).ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// DOM event subscription, removed again when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;

        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    pub fn passive<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;

        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Intersection observer that reports each target once and then stops watching it.
pub struct OnceObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl OnceObserver {
    pub fn new<F>(
        targets: Vec<Element>,
        threshold: f64,
        root_margin: &str,
        mut on_visible: F,
    ) -> Result<Self>
    where
        F: FnMut(usize, &Element) + 'static,
    {
        if targets.is_empty() {
            return Err(FxError::Empty);
        }

        let watched = targets.clone();
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if !entry.is_intersecting() {
                        continue;
                    }

                    let target = entry.target();
                    observer.unobserve(&target);
                    if let Some(index) = watched.iter().position(|candidate| *candidate == target) {
                        on_visible(index, &target);
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        init.set_root_margin(root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        for target in &targets {
            observer.observe(target);
        }

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for OnceObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` loop. The tick returns false to stop scheduling frames.
pub struct AnimationLoop {
    pending: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl AnimationLoop {
    pub fn start<F>(mut tick: F) -> Result<Self>
    where
        F: FnMut(f64) -> bool + 'static,
    {
        let pending = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let pending_for_cb = Rc::clone(&pending);
        let callback_for_cb = Rc::clone(&callback);
        *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |now: f64| {
            pending_for_cb.set(None);
            if !tick(now) {
                return;
            }

            let next = callback_for_cb
                .borrow()
                .as_ref()
                .and_then(|cb| request_frame(cb).ok());
            pending_for_cb.set(next);
        }));

        let frame_loop = Self { pending, callback };
        frame_loop.resume()?;
        Ok(frame_loop)
    }

    /// Schedules the next frame unless one is already pending.
    pub fn resume(&self) -> Result<()> {
        if self.pending.get().is_some() {
            return Ok(());
        }

        if let Some(cb) = self.callback.borrow().as_ref() {
            self.pending.set(Some(request_frame(cb)?));
        }
        Ok(())
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if let (Some(handle), Ok(win)) = (self.pending.take(), browser_window()) {
            let _ = win.cancel_animation_frame(handle);
        }
        self.callback.borrow_mut().take();
    }
}

fn request_frame(callback: &Closure<dyn FnMut(f64)>) -> Result<i32> {
    Ok(browser_window()?.request_animation_frame(callback.as_ref().unchecked_ref())?)
}
