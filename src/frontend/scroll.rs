use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollToOptions};

use super::dom::{browser_window, query_all, Listener};
use crate::{
    error::{FxError, Result},
    scroll::{fragment_id, scroll_target, ANCHOR_SELECTOR},
};

fn smooth_scroll_to(top: f64) -> Result<()> {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    browser_window()?.scroll_to_with_scroll_to_options(&options);
    Ok(())
}

/// In-page anchor links scroll smoothly to their target, clear of the fixed header.
pub struct SmoothScroll {
    _listeners: Vec<Listener>,
}

impl SmoothScroll {
    pub fn init(document: &Document, header_offset: f64) -> Result<Self> {
        let anchors = query_all(document, ANCHOR_SELECTOR)?;
        if anchors.is_empty() {
            return Err(FxError::MissingElement(ANCHOR_SELECTOR.to_string()));
        }

        let listeners = anchors
            .iter()
            .map(|anchor| {
                let document = document.clone();
                let href = anchor.get_attribute("href").unwrap_or_default();
                Listener::new(anchor, "click", move |event| {
                    let Some(target) = fragment_id(&href)
                        .and_then(|id| document.get_element_by_id(id))
                        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
                    else {
                        return;
                    };

                    event.prevent_default();
                    let top = scroll_target(f64::from(target.offset_top()), header_offset);
                    if let Err(error) = smooth_scroll_to(top) {
                        tracing::debug!(%error, "smooth scroll failed");
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            _listeners: listeners,
        })
    }
}
