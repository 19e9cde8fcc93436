use std::{cell::Cell, rc::Rc};

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::Document;

use super::dom::query;
use crate::{config::TypingConfig, error::Result, typing::TypingMachine};

const TYPING_SELECTOR: &str = ".typing-text";

/// Drives the typing machine on `.typing-text` until dropped.
pub struct TypingController {
    stopped: Rc<Cell<bool>>,
}

impl TypingController {
    pub fn init(document: &Document, config: &TypingConfig) -> Result<Self> {
        let element = query(document, TYPING_SELECTOR)?;
        let mut machine = TypingMachine::new(config)?;
        let stopped = Rc::new(Cell::new(false));

        element.set_text_content(Some(&machine.visible_text()));

        let stopped_for_task = Rc::clone(&stopped);
        spawn_local(async move {
            let mut delay_ms = machine.initial_delay_ms();
            loop {
                TimeoutFuture::new(delay_ms).await;
                if stopped_for_task.get() {
                    break;
                }

                let frame = machine.step();
                element.set_text_content(Some(&frame.text));
                delay_ms = frame.delay_ms;
            }
        });

        Ok(Self { stopped })
    }
}

impl Drop for TypingController {
    fn drop(&mut self) {
        self.stopped.set(true);
    }
}
