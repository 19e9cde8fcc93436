mod counter;
mod dom;
mod dots;
mod form;
mod nav;
mod reveal;
mod scroll;
mod theme;
mod typing;

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, PageTransitionEvent};
use yew::AppHandle;

use self::{
    counter::CounterController,
    dom::{browser_window, document, Listener},
    dots::{DotsBackground, DotsBackgroundProps},
    form::ContactForm,
    nav::{NavToggle, NavbarShadow},
    reveal::RevealController,
    scroll::SmoothScroll,
    theme::ThemeController,
    typing::TypingController,
};
use crate::{
    config::{DotsConfig, FxConfig, CONFIG_ELEMENT_ID},
    error::{FxError, Result},
};

const DOTS_HOST_ID: &str = "dots-bg-host";

thread_local! {
    static EFFECTS: RefCell<Option<Effects>> = const { RefCell::new(None) };
    static LIFECYCLE: RefCell<Vec<Listener>> = const { RefCell::new(Vec::new()) };
}

fn enabled<T>(feature: &'static str, result: Result<T>) -> Option<T> {
    match result {
        Ok(controller) => Some(controller),
        Err(error) if error.is_missing_markup() => {
            tracing::debug!(feature, %error, "effect not initialised");
            None
        }
        Err(error) => {
            tracing::warn!(feature, %error, "effect failed to initialise");
            None
        }
    }
}

/// Floating dots rendered by yew into a host prepended to `<body>`.
struct DotsMount {
    host: Element,
    app: AppHandle<DotsBackground>,
}

impl DotsMount {
    fn init(document: &Document, config: &DotsConfig) -> Result<Self> {
        if !config.enabled {
            return Err(FxError::Empty);
        }

        let body = document
            .body()
            .ok_or_else(|| FxError::MissingElement("body".to_string()))?;
        let host = document.create_element("div")?;
        host.set_id(DOTS_HOST_ID);
        body.prepend_with_node_1(&host)?;

        let app = yew::Renderer::<DotsBackground>::with_root_and_props(
            host.clone(),
            DotsBackgroundProps {
                config: config.clone(),
            },
        )
        .render();

        Ok(Self { host, app })
    }

    fn unmount(self) {
        self.app.destroy();
        self.host.remove();
    }
}

/// Every effect controller for the current page, alive until `teardown`.
pub struct Effects {
    theme: Option<ThemeController>,
    nav: Option<NavToggle>,
    navbar: Option<NavbarShadow>,
    smooth_scroll: Option<SmoothScroll>,
    reveals: Vec<RevealController>,
    typing: Option<TypingController>,
    counters: Option<CounterController>,
    dots: Option<DotsMount>,
    contact_form: Option<ContactForm>,
}

impl Effects {
    pub fn init(document: &Document, config: &FxConfig) -> Self {
        Self {
            theme: enabled("theme", ThemeController::init(document)),
            dots: enabled("dots", DotsMount::init(document, &config.dots)),
            nav: enabled("nav", NavToggle::init(document)),
            navbar: enabled(
                "navbar-shadow",
                NavbarShadow::init(document, config.scroll.navbar_shadow_after),
            ),
            smooth_scroll: enabled(
                "smooth-scroll",
                SmoothScroll::init(document, config.scroll.header_offset),
            ),
            reveals: config
                .reveal
                .iter()
                .filter_map(|group| enabled("reveal", RevealController::init(document, group)))
                .collect(),
            typing: enabled("typing", TypingController::init(document, &config.typing)),
            counters: enabled(
                "counters",
                CounterController::init(document, &config.counters),
            ),
            contact_form: enabled("contact-form", ContactForm::init(document)),
        }
    }

    pub fn teardown(self) {
        let pending_reveals: usize = self.reveals.iter().map(RevealController::pending).sum();
        let counters_started = self
            .counters
            .as_ref()
            .map_or(0, CounterController::started);
        tracing::debug!(pending_reveals, counters_started, "tearing down page effects");

        if let Some(dots) = self.dots {
            dots.unmount();
        }
        drop(self.theme);
        drop(self.nav);
        drop(self.navbar);
        drop(self.smooth_scroll);
        drop(self.reveals);
        drop(self.typing);
        drop(self.counters);
        drop(self.contact_form);
    }
}

fn load_config(document: &Document) -> FxConfig {
    let page = document
        .body()
        .and_then(|body| body.get_attribute("data-page"));
    let raw_json = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content());

    FxConfig::resolve(page.as_deref(), raw_json.as_deref())
}

fn start() {
    let Ok(document) = document() else {
        tracing::warn!("no document, page effects disabled");
        return;
    };

    let config = load_config(&document);
    let effects = Effects::init(&document, &config);
    tracing::info!(page = config.page.as_str(), "page effects initialised");

    if let Some(previous) = EFFECTS.with(|slot| slot.borrow_mut().replace(effects)) {
        previous.teardown();
    }
}

fn stop() {
    if let Some(effects) = EFFECTS.with(|slot| slot.borrow_mut().take()) {
        effects.teardown();
    }
}

/// A page frozen into the back/forward cache keeps its effects and resumes as it was.
fn entering_bfcache(event: &Event) -> bool {
    event
        .dyn_ref::<PageTransitionEvent>()
        .is_some_and(PageTransitionEvent::persisted)
}

/// Tears down on `pagehide` unless the page is only being cached.
fn watch_lifecycle() -> Result<()> {
    let win = browser_window()?;
    let hide = Listener::new(&win, "pagehide", |event| {
        if entering_bfcache(&event) {
            tracing::debug!("page cached, effects kept");
        } else {
            stop();
        }
    })?;

    LIFECYCLE.with(|listeners| listeners.borrow_mut().push(hide));
    Ok(())
}

pub fn run() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    start();
    if let Err(error) = watch_lifecycle() {
        tracing::warn!(%error, "page lifecycle listeners not installed");
    }
}
