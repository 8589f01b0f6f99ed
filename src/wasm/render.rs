use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{HtmlCanvasElement, Window};

use super::gl::GlRenderer;
use crate::clock::FrameClock;
use crate::error::{DemoError, Result};
use crate::viewport::Viewport;
use crate::{Demo, Update, UpdateSender};

/// Hooks up resizing and starts the animation loop. The loop owns the demo
/// and renderer; it never terminates.
pub fn start(window: Window, canvas: HtmlCanvasElement, mut demo: Demo, renderer: GlRenderer) -> Result<()> {
    // Resize canvas to fit window
    let updates = demo.updates();
    report_size(&window, &updates);
    let resize_closure = {
        let window = window.clone();
        Closure::wrap(Box::new(move || report_size(&window, &updates)) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    let performance = window
        .performance()
        .ok_or(DemoError::MissingElement("performance"))?;
    let mut clock = FrameClock::new();

    // Animation loop
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let loop_window = window.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let delta = clock.tick(performance.now());
        let frame = demo.advance(delta);
        if let Some(viewport) = frame.resized {
            resize_canvas(&canvas, &viewport);
        }

        if let Err(err) = renderer.draw(demo.scene(), &frame) {
            log::error!("draw failed: {err}");
        }

        // schedule next
        if let Some(next) = f.borrow().as_ref() {
            if let Err(err) = loop_window.request_animation_frame(next.as_ref().unchecked_ref()) {
                log::error!("could not schedule next frame: {:?}", err);
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(first) = g.borrow().as_ref() {
        window.request_animation_frame(first.as_ref().unchecked_ref())?;
    }

    Ok(())
}

fn report_size(window: &Window, updates: &UpdateSender) {
    let width = window.inner_width().ok().and_then(|v| v.as_f64());
    let height = window.inner_height().ok().and_then(|v| v.as_f64());
    if let (Some(width), Some(height)) = (width, height) {
        updates.send(Update::Resize {
            width: width as u32,
            height: height as u32,
            device_pixel_ratio: window.device_pixel_ratio(),
        });
    }
}

/// Drawing buffer at `size * pixel ratio`, CSS box at the logical size.
fn resize_canvas(canvas: &HtmlCanvasElement, viewport: &Viewport) {
    let (buffer_width, buffer_height) = viewport.drawing_buffer_size();
    canvas.set_width(buffer_width);
    canvas.set_height(buffer_height);

    let style = canvas.style();
    let applied = style
        .set_property("width", &format!("{}px", viewport.width))
        .and_then(|_| style.set_property("height", &format!("{}px", viewport.height)));
    if let Err(err) = applied {
        log::warn!("could not size canvas: {:?}", err);
    }
}
