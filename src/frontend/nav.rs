use std::{cell::Cell, rc::Rc};

use web_sys::{Document, Element};

use super::dom::{browser_window, query, query_all, set_style, Listener};
use crate::{
    error::Result,
    nav::{navbar_shadow, NavMenu, ACTIVE_CLASS, MENU_OPEN_CLASS},
};

const HAMBURGER_SELECTOR: &str = ".hamburger";
const NAV_MENU_SELECTOR: &str = ".nav-menu";
const NAV_LINK_SELECTOR: &str = ".nav-link";
const NAVBAR_SELECTOR: &str = ".navbar";

#[derive(Clone)]
struct NavElements {
    hamburger: Element,
    menu: Element,
    body: Option<Element>,
}

impl NavElements {
    fn render(&self, state: NavMenu) {
        let open = state.is_open();
        let _ = self.hamburger.class_list().toggle_with_force(ACTIVE_CLASS, open);
        let _ = self.menu.class_list().toggle_with_force(ACTIVE_CLASS, open);
        if let Some(body) = &self.body {
            let _ = body.class_list().toggle_with_force(MENU_OPEN_CLASS, open);
        }
    }
}

/// Hamburger menu: the button flips it, any nav link closes it.
pub struct NavToggle {
    _listeners: Vec<Listener>,
}

impl NavToggle {
    pub fn init(document: &Document) -> Result<Self> {
        let elements = NavElements {
            hamburger: query(document, HAMBURGER_SELECTOR)?,
            menu: query(document, NAV_MENU_SELECTOR)?,
            body: document.body().map(Element::from),
        };

        let initial = if elements.hamburger.class_list().contains(ACTIVE_CLASS) {
            NavMenu::Open
        } else {
            NavMenu::Closed
        };
        let state = Rc::new(Cell::new(initial));

        let mut listeners = Vec::new();
        {
            let state = Rc::clone(&state);
            let hamburger = elements.hamburger.clone();
            let elements = elements.clone();
            listeners.push(Listener::new(&hamburger, "click", move |_| {
                let next = state.get().toggled();
                state.set(next);
                elements.render(next);
            })?);
        }

        for link in query_all(document, NAV_LINK_SELECTOR)? {
            let state = Rc::clone(&state);
            let elements = elements.clone();
            listeners.push(Listener::new(&link, "click", move |_| {
                let next = state.get().link_followed();
                state.set(next);
                elements.render(next);
            })?);
        }

        Ok(Self {
            _listeners: listeners,
        })
    }
}

/// Drops a shadow under the navbar once the page is scrolled.
pub struct NavbarShadow {
    _scroll: Listener,
}

impl NavbarShadow {
    pub fn init(document: &Document, threshold: f64) -> Result<Self> {
        let navbar = query(document, NAVBAR_SELECTOR)?;
        let win = browser_window()?;

        let scroll = Listener::passive(&win.clone(), "scroll", move |_| {
            let scroll_y = win.scroll_y().unwrap_or(0.0);
            let _ = set_style(&navbar, "box-shadow", navbar_shadow(scroll_y, threshold));
        })?;

        Ok(Self { _scroll: scroll })
    }
}
