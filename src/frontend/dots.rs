use std::{cell::RefCell, f64::consts::TAU, rc::Rc};

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};
use yew::prelude::*;

use super::dom::{browser_window, document, viewport_size, AnimationLoop, Listener};
use crate::{
    config::DotsConfig,
    dots::{DotField, CANVAS_ID},
    error::{FxError, Result},
    theme::THEME_ATTRIBUTE,
};

fn light_theme_active(document: &Document) -> bool {
    document
        .document_element()
        .and_then(|root| root.get_attribute(THEME_ATTRIBUTE))
        .as_deref()
        == Some("light")
}

fn fit_canvas(canvas: &HtmlCanvasElement, width: f64, height: f64) {
    canvas.set_width(width.max(0.0) as u32);
    canvas.set_height(height.max(0.0) as u32);
}

fn draw(context: &CanvasRenderingContext2d, field: &DotField, light: bool) {
    context.clear_rect(0.0, 0.0, field.width(), field.height());

    for dot in field.dots() {
        context.begin_path();
        if context.arc(dot.x, dot.y, dot.radius, 0.0, TAU).is_err() {
            continue;
        }
        context.set_fill_style_str(&dot.fill_style(light));
        context.fill();
    }
}

/// Running animation bound to one canvas; dropping it stops the loop and listeners.
struct DotsScene {
    _frames: Rc<AnimationLoop>,
    _resize: Listener,
    _visibility: Option<Listener>,
}

impl DotsScene {
    fn start(canvas: HtmlCanvasElement, config: DotsConfig) -> Result<Self> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| FxError::MissingElement("canvas 2d context".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FxError::Js("unexpected canvas context type".to_string()))?;
        let document = document()?;
        let pause_when_hidden = config.pause_when_hidden;

        let (width, height) = viewport_size();
        fit_canvas(&canvas, width, height);
        let field = Rc::new(RefCell::new(DotField::new(
            config,
            width,
            height,
            js_sys::Math::random,
        )));

        let frames = {
            let field = Rc::clone(&field);
            let document = document.clone();
            Rc::new(AnimationLoop::start(move |_now| {
                if pause_when_hidden && document.hidden() {
                    return false;
                }

                let mut field = field.borrow_mut();
                field.step();
                draw(&context, &field, light_theme_active(&document));
                true
            })?)
        };

        let resize = {
            let field = Rc::clone(&field);
            Listener::new(&browser_window()?, "resize", move |_| {
                let (width, height) = viewport_size();
                fit_canvas(&canvas, width, height);
                field.borrow_mut().resize(width, height, js_sys::Math::random);
            })?
        };

        let visibility = if pause_when_hidden {
            let frames = Rc::clone(&frames);
            let watched = document.clone();
            Some(Listener::new(&document, "visibilitychange", move |_| {
                if !watched.hidden() {
                    if let Err(error) = frames.resume() {
                        tracing::debug!(%error, "dots background did not resume");
                    }
                }
            })?)
        } else {
            None
        };

        tracing::debug!(width, height, pause_when_hidden, "dots background started");

        Ok(Self {
            _frames: frames,
            _resize: resize,
            _visibility: visibility,
        })
    }
}

#[derive(Properties, PartialEq)]
pub struct DotsBackgroundProps {
    pub config: DotsConfig,
}

#[function_component(DotsBackground)]
pub fn dots_background(props: &DotsBackgroundProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(props.config.clone(), move |config| {
            let scene = canvas_ref
                .cast::<HtmlCanvasElement>()
                .ok_or_else(|| FxError::MissingElement(format!("#{CANVAS_ID}")))
                .and_then(|canvas| DotsScene::start(canvas, config.clone()))
                .map_err(|error| tracing::warn!(%error, "dots background disabled"))
                .ok();

            move || drop(scene)
        });
    }

    html! {
        <canvas id={CANVAS_ID} ref={canvas_ref} aria-hidden="true" />
    }
}
