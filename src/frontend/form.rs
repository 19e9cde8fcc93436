use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlButtonElement};

use super::dom::{query, query_all_in, set_style, Listener};
use crate::{
    error::Result,
    form::{
        FieldFocus, FIELD_LIFT_TRANSITION, FIELD_SELECTOR, FORM_SELECTOR, SENDING_LABEL_HTML,
        SUBMIT_SELECTOR,
    },
};

/// Contact form: sending state on submit and a small lift on focused fields.
pub struct ContactForm {
    _listeners: Vec<Listener>,
}

impl ContactForm {
    pub fn init(document: &Document) -> Result<Self> {
        let form = query(document, FORM_SELECTOR)?;
        let mut listeners = Vec::new();

        {
            let submit_form = form.clone();
            listeners.push(Listener::new(&form, "submit", move |_| {
                let Ok(Some(button)) = submit_form.query_selector(SUBMIT_SELECTOR) else {
                    return;
                };
                button.set_inner_html(SENDING_LABEL_HTML);
                if let Some(button) = button.dyn_ref::<HtmlButtonElement>() {
                    button.set_disabled(true);
                }
            })?);
        }

        for field in query_all_in(&form, FIELD_SELECTOR)? {
            let Some(wrapper) = field.parent_element() else {
                continue;
            };

            for (event, focus) in [("focus", FieldFocus::Focused), ("blur", FieldFocus::Blurred)] {
                let wrapper = wrapper.clone();
                listeners.push(Listener::new(&field, event, move |_| {
                    let _ = set_style(&wrapper, "transform", focus.wrapper_transform());
                    if focus == FieldFocus::Focused {
                        let _ = set_style(&wrapper, "transition", FIELD_LIFT_TRANSITION);
                    }
                })?);
            }
        }

        Ok(Self {
            _listeners: listeners,
        })
    }
}
