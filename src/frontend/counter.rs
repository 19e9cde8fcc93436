use std::{cell::RefCell, rc::Rc};

use web_sys::{Document, Element};

use super::dom::{now_ms, query_all, AnimationLoop, OnceObserver};
use crate::{
    config::CounterConfig,
    counter::{
        already_counted, parse_start, parse_target, CounterAnimation, COUNTED_ATTRIBUTE,
        TARGET_ATTRIBUTE,
    },
    error::{FxError, Result},
};

const STAT_SELECTOR: &str = ".stat-num";

fn start_counter(element: &Element, config: &CounterConfig) -> Result<AnimationLoop> {
    let target = parse_target(element.get_attribute(TARGET_ATTRIBUTE).as_deref())?;
    let start = parse_start(&element.text_content().unwrap_or_default());
    let animation = CounterAnimation::new(start, target, config, now_ms());

    let first = animation.frame(now_ms());
    element.set_text_content(Some(&first.value.to_string()));

    element.set_attribute(COUNTED_ATTRIBUTE, "")?;

    let element = element.clone();
    AnimationLoop::start(move |now| {
        let frame = animation.frame(now);
        element.set_text_content(Some(&frame.value.to_string()));
        !frame.done
    })
}

/// Counts each `.stat-num` up to its `data-target` the first time it is half visible.
/// Counters that already ran carry `data-counted` and are left as they are.
pub struct CounterController {
    running: Rc<RefCell<Vec<AnimationLoop>>>,
    _observer: OnceObserver,
}

impl CounterController {
    pub fn init(document: &Document, config: &CounterConfig) -> Result<Self> {
        let counters: Vec<Element> = query_all(document, STAT_SELECTOR)?
            .into_iter()
            .filter(|element| {
                !already_counted(element.get_attribute(COUNTED_ATTRIBUTE).as_deref())
            })
            .collect();
        if counters.is_empty() {
            return Err(FxError::MissingElement(STAT_SELECTOR.to_string()));
        }

        let running = Rc::new(RefCell::new(Vec::new()));
        let observer = {
            let running = Rc::clone(&running);
            let config = config.clone();
            OnceObserver::new(counters, config.threshold, "0px", move |_, element| {
                match start_counter(element, &config) {
                    Ok(frame_loop) => running.borrow_mut().push(frame_loop),
                    Err(error) => tracing::debug!(%error, "stat counter skipped"),
                }
            })?
        };

        Ok(Self {
            running,
            _observer: observer,
        })
    }

    pub fn started(&self) -> usize {
        self.running.borrow().len()
    }
}
