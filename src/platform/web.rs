//! Browser host
//!
//! Binds an [`Arcade`] to a canvas: listeners are attached once when the
//! handle is built, frames come from `requestAnimationFrame`, and every
//! [`Effects`] value returned by the state machine is carried out here.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, KeyboardEvent, PointerEvent, Window};

use crate::arcade::{Arcade, ArcadePhase, Effects, Input};
use crate::config::GameConfig;
use crate::renderer::CanvasPainter;
use crate::scheduler::FrameTicket;

/// Canvas attribute holding optional JSON tuning
const CONFIG_ATTRIBUTE: &str = "data-config";

struct WebHost {
    arcade: Arcade,
    painter: CanvasPainter,
    score_label: Option<Element>,
    window: Window,
}

impl WebHost {
    fn update_score_label(&self) {
        if let Some(label) = &self.score_label {
            label.set_text_content(Some(&self.arcade.score().to_string()));
        }
    }
}

type SharedHost = Rc<RefCell<WebHost>>;

/// Game handle exported to the page
#[wasm_bindgen]
pub struct ArcadeHandle {
    host: SharedHost,
}

#[wasm_bindgen]
impl ArcadeHandle {
    /// Bind to `<canvas id=canvas_id>`; `score_label_id` names an element
    /// whose text tracks the score
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, score_label_id: Option<String>) -> Result<ArcadeHandle, JsValue> {
        init_logging();

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element #{canvas_id}")))?
            .dyn_into()
            .map_err(|_| JsValue::from_str(&format!("#{canvas_id} is not a canvas")))?;

        let config = match canvas.get_attribute(CONFIG_ATTRIBUTE) {
            Some(json) => GameConfig::from_json(&json),
            None => Ok(GameConfig::default()),
        }
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        canvas.set_width(config.surface_width as u32);
        canvas.set_height(config.surface_height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("2d context unavailable"))?;
        let painter = CanvasPainter::new(
            ctx,
            config.surface_width as f64,
            config.surface_height as f64,
        );

        let score_label = score_label_id.and_then(|id| document.get_element_by_id(&id));
        if score_label.is_none() {
            log::debug!("No score label bound");
        }

        let seed = js_sys::Date::now() as u64;
        let arcade = Arcade::new(config, seed).map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Arcade ready on #{} (seed {})", canvas_id, seed);

        let host = Rc::new(RefCell::new(WebHost {
            arcade,
            painter,
            score_label,
            window,
        }));
        attach_listeners(&canvas, &host)?;

        Ok(ArcadeHandle { host })
    }

    pub fn open(&self) {
        dispatch(&self.host, Input::Open);
    }

    pub fn close(&self) {
        dispatch(&self.host, Input::Close);
    }

    pub fn impulse(&self) {
        dispatch(&self.host, Input::Impulse);
    }

    #[wasm_bindgen(js_name = restartOrImpulse)]
    pub fn restart_or_impulse(&self) {
        dispatch(&self.host, Input::RestartOrImpulse);
    }

    pub fn score(&self) -> u32 {
        self.host.borrow().arcade.score()
    }
}

fn init_logging() {
    console_error_panic_hook::set_once();
    // A second handle on the same page finds the logger already installed
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Feed one input to the state machine and carry out the effects
fn dispatch(host: &SharedHost, input: Input) {
    let effects = host.borrow_mut().arcade.handle(input);
    apply(host, effects);
}

fn apply(host: &SharedHost, effects: Effects) {
    {
        let h = host.borrow();
        if let Some(id) = effects.cancel_frame {
            if let Err(e) = h.window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {:?}", e);
            }
        }
        if effects.clear_surface {
            h.painter.clear();
        }
        h.update_score_label();
    }

    if let Some(ticket) = effects.request_frame {
        request_frame(host, ticket);
    }
}

fn request_frame(host: &SharedHost, ticket: FrameTicket) {
    let callback = {
        let host = host.clone();
        Closure::once_into_js(move |_time: f64| run_frame(&host, ticket))
    };
    let window = host.borrow().window.clone();
    match window.request_animation_frame(callback.unchecked_ref()) {
        Ok(id) => host.borrow_mut().arcade.bind_frame(ticket, id),
        Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
    }
}

fn run_frame(host: &SharedHost, ticket: FrameTicket) {
    let next = {
        let mut h = host.borrow_mut();
        let Some(output) = h.arcade.on_frame(ticket) else {
            return;
        };
        if let Err(e) = h.painter.paint(&output.frame) {
            log::warn!("Paint error: {:?}", e);
        }
        h.update_score_label();
        output.next
    };

    if let Some(next) = next {
        request_frame(host, next);
    }
}

fn attach_listeners(canvas: &HtmlCanvasElement, host: &SharedHost) -> Result<(), JsValue> {
    // Pointer down on the surface: impulse, or restart after game over
    {
        let host = host.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            event.prevent_default();
            dispatch(&host, Input::RestartOrImpulse);
        });
        canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Space anywhere on the page while the game is open
    {
        let window = host.borrow().window.clone();
        let host = host.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if event.code() != "Space" {
                return;
            }
            if host.borrow().arcade.phase() == ArcadePhase::Idle {
                return;
            }
            event.prevent_default();
            dispatch(&host, Input::Impulse);
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}
