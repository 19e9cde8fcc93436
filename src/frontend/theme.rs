use std::{cell::RefCell, rc::Rc};

use js_sys::{Function, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, MediaQueryListEvent, Storage};

use super::dom::{browser_window, document, media_matches, Listener};
use crate::{
    error::{FxError, Result},
    theme::{PreferenceStore, Theme, ThemeMachine, LIGHT_SCHEME_QUERY, THEME_ATTRIBUTE},
};

const TOGGLE_ID: &str = "theme-toggle";
const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

fn local_storage() -> Result<Storage> {
    browser_window()?
        .local_storage()?
        .ok_or(FxError::StorageUnavailable)
}

/// `window.localStorage`; every access can throw when storage is disabled.
pub struct LocalStore;

impl PreferenceStore for LocalStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(local_storage()?.get_item(key)?)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        local_storage()?.set_item(key, value)?;
        Ok(())
    }
}

fn apply_theme(theme: Theme, toggle: Option<&Element>) {
    if let Ok(document) = document() {
        if let Some(root) = document.document_element() {
            let _ = match theme.root_marker() {
                Some(marker) => root.set_attribute(THEME_ATTRIBUTE, marker),
                None => root.remove_attribute(THEME_ATTRIBUTE),
            };
        }
    }

    let Some(toggle) = toggle else {
        return;
    };

    if let Ok(Some(icon)) = toggle.query_selector("i") {
        icon.set_class_name(theme.icon_class());
    }
    let _ = toggle.set_attribute("aria-pressed", &theme.pressed().to_string());
    let _ = toggle.set_attribute("title", &theme.toggle_title());
}

fn apply_theme_with_transition(theme: Theme, toggle: Option<Element>) {
    if media_matches(REDUCED_MOTION_QUERY) {
        apply_theme(theme, toggle.as_ref());
        return;
    }

    let Ok(document) = document() else {
        apply_theme(theme, toggle.as_ref());
        return;
    };

    let document_js: JsValue = document.into();
    let Ok(start_view_transition) =
        Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
    else {
        apply_theme(theme, toggle.as_ref());
        return;
    };

    let Some(start_view_transition) = start_view_transition.dyn_ref::<Function>() else {
        apply_theme(theme, toggle.as_ref());
        return;
    };

    let fallback_toggle = toggle.clone();
    let callback = Closure::once_into_js(move || {
        apply_theme(theme, toggle.as_ref());
    });

    if start_view_transition.call1(&document_js, &callback).is_err() {
        apply_theme(theme, fallback_toggle.as_ref());
    }
}

/// Applies the resolved theme on init and wires the toggle button and system scheme.
pub struct ThemeController {
    _machine: Rc<RefCell<ThemeMachine<LocalStore>>>,
    _system: Option<Listener>,
    _click: Option<Listener>,
}

impl ThemeController {
    pub fn init(document: &Document) -> Result<Self> {
        let toggle = document.get_element_by_id(TOGGLE_ID);
        let media = browser_window()?
            .match_media(LIGHT_SCHEME_QUERY)
            .ok()
            .flatten();
        let prefers_light = media.as_ref().is_some_and(|mq| mq.matches());

        let machine = ThemeMachine::init(LocalStore, prefers_light);
        apply_theme(machine.current(), toggle.as_ref());
        tracing::debug!(theme = machine.current().as_str(), "theme applied");
        let machine = Rc::new(RefCell::new(machine));

        let system = media
            .map(|mq| {
                let machine = Rc::clone(&machine);
                let toggle = toggle.clone();
                Listener::new(&mq, "change", move |event| {
                    let Some(event) = event.dyn_ref::<MediaQueryListEvent>() else {
                        return;
                    };
                    if let Some(theme) = machine.borrow_mut().system_changed(event.matches()) {
                        apply_theme(theme, toggle.as_ref());
                    }
                })
            })
            .transpose()?;

        let click = toggle
            .as_ref()
            .map(|button| {
                let machine = Rc::clone(&machine);
                let toggle = toggle.clone();
                Listener::new(button, "click", move |_| {
                    let next = machine.borrow_mut().toggle();
                    apply_theme_with_transition(next, toggle.clone());
                })
            })
            .transpose()?;

        Ok(Self {
            _machine: machine,
            _system: system,
            _click: click,
        })
    }
}
