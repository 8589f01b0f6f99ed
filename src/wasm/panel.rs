//! DOM debug panel: one range input per frequency axis and a texture
//! selector. Controls only enqueue updates; the render loop applies them.

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement};

use crate::config::DemoConfig;
use crate::error::{DemoError, Result};
use crate::params::{panel_controls, ControlKind, ControlSpec, FrequencyAxis};
use crate::uniforms::Uniforms;
use crate::{Update, UpdateSender};

pub fn build(document: &Document, config: &DemoConfig, uniforms: &Uniforms, updates: UpdateSender) -> Result<()> {
    let body = document.body().ok_or(DemoError::MissingElement("body"))?;
    let panel = document.create_element("div")?;
    panel.set_class_name("debug-panel");

    for spec in panel_controls(config) {
        let row = document.create_element("label")?;
        row.set_class_name("debug-row");
        let caption = document.create_element("span")?;
        caption.set_text_content(Some(spec.label));
        row.append_child(&caption)?;

        let (control, event) = match &spec.kind {
            ControlKind::Slider { slider, axis } => {
                let input: HtmlInputElement = document
                    .create_element("input")?
                    .dyn_into()
                    .map_err(|_| DemoError::MissingElement("input"))?;
                input.set_type("range");
                input.set_min(&slider.min.to_string());
                input.set_max(&slider.max.to_string());
                input.set_step(&slider.step.to_string());
                let initial = match axis {
                    FrequencyAxis::X => uniforms.frequency.x,
                    FrequencyAxis::Y => uniforms.frequency.y,
                };
                input.set_value(&initial.to_string());
                (Element::from(input), "input")
            }
            ControlKind::Select { options } => {
                let select = document.create_element("select")?;
                for option in options {
                    let item = document.create_element("option")?;
                    item.set_attribute("value", option.label())?;
                    item.set_text_content(Some(option.label()));
                    if *option == uniforms.texture {
                        item.set_attribute("selected", "")?;
                    }
                    select.append_child(&item)?;
                }
                (select, "change")
            }
        };

        listen(&control, event, spec, updates.clone())?;
        row.append_child(&control)?;
        panel.append_child(&row)?;
    }

    body.append_child(&panel)?;
    Ok(())
}

fn listen(control: &Element, event: &str, spec: ControlSpec, updates: UpdateSender) -> Result<()> {
    let closure = {
        let control = control.clone();
        Closure::wrap(Box::new(move || {
            let raw = current_value(&control);
            match spec.parse(&raw) {
                Some(update) => updates.send(Update::Param(update)),
                None => log::warn!("{}: ignoring value {raw:?}", spec.label),
            }
        }) as Box<dyn FnMut()>)
    };
    control.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn current_value(control: &Element) -> String {
    if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = control.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else {
        String::new()
    }
}
