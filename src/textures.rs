//! The set of flag textures the demo can show.

use std::fmt;

/// One of the three flag bitmaps shipped under `static/textures/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagTexture {
    Norway,
    France,
    British,
}

impl FlagTexture {
    /// Panel order.
    pub const ALL: [FlagTexture; 3] = [FlagTexture::Norway, FlagTexture::France, FlagTexture::British];

    /// Label shown in the debug panel's texture selector.
    pub fn label(self) -> &'static str {
        match self {
            FlagTexture::Norway => "Norway",
            FlagTexture::France => "France",
            FlagTexture::British => "British",
        }
    }

    /// Path relative to the page root.
    pub fn path(self) -> &'static str {
        match self {
            FlagTexture::Norway => "textures/flag-norway.png",
            FlagTexture::France => "textures/flag-french.png",
            FlagTexture::British => "textures/flag-british.png",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

impl fmt::Display for FlagTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
