//! Pointer and wheel listeners feeding the orbit controls.

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Event, HtmlCanvasElement, PointerEvent, WheelEvent};

use crate::controls::{OrbitInput, PointerButton};
use crate::error::Result;
use crate::{Update, UpdateSender};

pub fn attach(canvas: &HtmlCanvasElement, updates: UpdateSender) -> Result<()> {
    let down = {
        let canvas = canvas.clone();
        let updates = updates.clone();
        Closure::wrap(Box::new(move |event: PointerEvent| {
            let Some(button) = PointerButton::from_dom(event.button()) else {
                return;
            };
            // keep receiving moves while the pointer leaves the canvas
            canvas.set_pointer_capture(event.pointer_id()).ok();
            updates.send(Update::Orbit(OrbitInput::PointerDown {
                button,
                x: event.offset_x() as f32,
                y: event.offset_y() as f32,
            }));
        }) as Box<dyn FnMut(PointerEvent)>)
    };
    canvas.add_event_listener_with_callback("pointerdown", down.as_ref().unchecked_ref())?;
    down.forget();

    let moved = {
        let updates = updates.clone();
        Closure::wrap(Box::new(move |event: PointerEvent| {
            if event.buttons() == 0 {
                return;
            }
            updates.send(Update::Orbit(OrbitInput::PointerMove {
                x: event.offset_x() as f32,
                y: event.offset_y() as f32,
            }));
        }) as Box<dyn FnMut(PointerEvent)>)
    };
    canvas.add_event_listener_with_callback("pointermove", moved.as_ref().unchecked_ref())?;
    moved.forget();

    let up = {
        let updates = updates.clone();
        Closure::wrap(Box::new(move |_event: PointerEvent| {
            updates.send(Update::Orbit(OrbitInput::PointerUp));
        }) as Box<dyn FnMut(PointerEvent)>)
    };
    for name in ["pointerup", "pointercancel"] {
        canvas.add_event_listener_with_callback(name, up.as_ref().unchecked_ref())?;
    }
    up.forget();

    let wheel = Closure::wrap(Box::new(move |event: WheelEvent| {
        event.prevent_default();
        updates.send(Update::Orbit(OrbitInput::Wheel {
            delta_y: event.delta_y() as f32,
        }));
    }) as Box<dyn FnMut(WheelEvent)>);
    canvas.add_event_listener_with_callback("wheel", wheel.as_ref().unchecked_ref())?;
    wheel.forget();

    // right-drag pans; keep the browser menu out of the way
    let context_menu = Closure::wrap(Box::new(|event: Event| event.prevent_default()) as Box<dyn FnMut(Event)>);
    canvas.add_event_listener_with_callback("contextmenu", context_menu.as_ref().unchecked_ref())?;
    context_menu.forget();

    Ok(())
}
