//! Debug panel model: the tunable shader parameters and how raw control
//! values map onto them.

use crate::config::DemoConfig;
use crate::textures::FlagTexture;

/// Numeric range control, mirroring an `<input type="range">`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Slider {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    /// Clamps `value` into range and snaps it to the nearest step.
    ///
    /// Decimal steps such as `0.01` are not exact in binary, so when `1 / step`
    /// is within rounding of an integer the snap divides by that integer. The
    /// result is then the f32 nearest the on-step decimal, i.e. what parsing
    /// that decimal yields.
    pub fn quantize(&self, value: f32) -> f32 {
        let value = if value.is_nan() { self.min } else { value };
        let clamped = value.clamp(self.min, self.max) as f64;
        if self.step <= 0.0 {
            return clamped as f32;
        }
        let min = self.min as f64;
        let per_unit = self.steps_per_unit();
        let steps = ((clamped - min) * per_unit).round();
        let base = snap_whole(min * per_unit);
        let snapped = (base + steps) / per_unit;
        (snapped as f32).clamp(self.min, self.max)
    }

    fn steps_per_unit(&self) -> f64 {
        snap_whole(1.0 / self.step as f64)
    }
}

/// Rounds `x` to the nearest integer when it is only off by f32 noise.
fn snap_whole(x: f64) -> f64 {
    let whole = x.round();
    if (x - whole).abs() <= whole.abs().max(1.0) * 1e-6 {
        whole
    } else {
        x
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyAxis {
    X,
    Y,
}

/// A change requested by the debug panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamUpdate {
    Frequency(FrequencyAxis, f32),
    Texture(FlagTexture),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    Slider { slider: Slider, axis: FrequencyAxis },
    Select { options: Vec<FlagTexture> },
}

/// One row of the debug panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSpec {
    pub label: &'static str,
    pub kind: ControlKind,
}

impl ControlSpec {
    /// Interprets the raw string value a DOM control reports.
    ///
    /// Returns `None` for values the control could not have produced.
    pub fn parse(&self, raw: &str) -> Option<ParamUpdate> {
        match &self.kind {
            ControlKind::Slider { slider, axis } => {
                let value: f32 = raw.trim().parse().ok()?;
                Some(ParamUpdate::Frequency(*axis, slider.quantize(value)))
            }
            ControlKind::Select { options } => FlagTexture::from_label(raw)
                .filter(|t| options.contains(t))
                .map(ParamUpdate::Texture),
        }
    }
}

/// The panel rows in display order.
pub fn panel_controls(config: &DemoConfig) -> Vec<ControlSpec> {
    vec![
        ControlSpec {
            label: "Frequency X",
            kind: ControlKind::Slider {
                slider: config.frequency_slider,
                axis: FrequencyAxis::X,
            },
        },
        ControlSpec {
            label: "Frequency Y",
            kind: ControlKind::Slider {
                slider: config.frequency_slider,
                axis: FrequencyAxis::Y,
            },
        },
        ControlSpec {
            label: "Texture",
            kind: ControlKind::Select {
                options: FlagTexture::ALL.to_vec(),
            },
        },
    ]
}
