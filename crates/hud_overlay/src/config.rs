//! Overlay configuration.
//!
//! Built-in presets cover every fader and bar; a TOML file can replace any
//! of them. Loaded once at startup, never touched in the frame loop.
//!
//! ```toml
//! [faders.black]
//! speed = 255.0
//!
//! [bars.health]
//! x = 25.0
//! y = 25.0
//! max_value = 1000.0
//! warn_value = 333.0
//! colors.base_main = [255, 50, 50, 200]
//! ```
//!
//! A table given in the file is laid over its preset: fields it names are
//! replaced, everything else keeps the preset's value. Nested tables such as
//! `colors` merge the same way.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::bar::{BarColorSlot, BarId, ProgressBar};
use crate::error::{OverlayError, OverlayResult};
use crate::fader::{Corner, Fader, FaderId};
use crate::style::{BlendMode, Color};
use crate::text::TextLine;

/// Complete overlay configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Fader presets.
    pub faders: FadersConfig,
    /// Bar presets.
    pub bars: BarsConfig,
    /// Crosshair settings.
    pub crosshair: CrosshairConfig,
    /// Text line settings.
    pub text: TextConfig,
}

impl OverlayConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::ConfigParse`] if the text is not valid TOML or
    /// does not fit the schema.
    pub fn from_toml_str(text: &str) -> OverlayResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::ConfigIo`] if the file cannot be read and
    /// [`OverlayError::ConfigParse`] if it cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> OverlayResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| OverlayError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded overlay config from {}", path.display());
        Ok(config)
    }
}

/// Look of a fader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaderPreset {
    /// Color on all four corners.
    pub color: [u8; 3],
    /// Per-corner colors (top-left, top-right, bottom-left, bottom-right);
    /// overrides `color`.
    pub corners: Option<[[u8; 3]; 4]>,
    /// Blending mode.
    pub blend: BlendMode,
    /// Maximum alpha (0-255).
    pub max_alpha: u8,
    /// Alpha units per second.
    pub speed: f32,
    /// Return to idle once the bound is reached.
    pub autoreset: bool,
}

impl FaderPreset {
    /// Builds a fader with this look.
    #[must_use]
    pub fn build(&self) -> Fader {
        let mut fader = Fader::new();
        self.apply(&mut fader);
        fader
    }

    /// Applies this look to an existing fader without engaging it.
    pub fn apply(&self, fader: &mut Fader) {
        let [r, g, b] = self.color;
        fader.set_color(r, g, b, None);
        if let Some(corners) = self.corners {
            let order = [Corner::TopLeft, Corner::TopRight, Corner::BottomLeft, Corner::BottomRight];
            for (corner, [r, g, b]) in order.into_iter().zip(corners) {
                fader.set_color(r, g, b, Some(corner));
            }
        }
        fader.set_blending_mode(self.blend);
        fader.set_alpha(self.max_alpha);
        fader.set_speed(self.speed);
        fader.set_autoreset(self.autoreset);
    }

    fn black() -> Self {
        Self {
            speed: 510.0,
            ..Self::default()
        }
    }

    fn colored() -> Self {
        Self {
            blend: BlendMode::Multiply,
            speed: 1020.0,
            autoreset: true,
            ..Self::default()
        }
    }

    fn sun() -> Self {
        Self {
            color: [255, 240, 200],
            blend: BlendMode::Additive,
            max_alpha: 200,
            speed: 400.0,
            ..Self::default()
        }
    }

    fn death() -> Self {
        Self {
            corners: Some([[120, 0, 0], [120, 0, 0], [0, 0, 0], [0, 0, 0]]),
            speed: 85.0,
            ..Self::default()
        }
    }
}

impl Default for FaderPreset {
    fn default() -> Self {
        Self {
            color: [0, 0, 0],
            corners: None,
            blend: BlendMode::Alpha,
            max_alpha: Fader::FULL_ALPHA,
            speed: Fader::DEFAULT_SPEED,
            autoreset: false,
        }
    }
}

/// One preset per fader.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FadersConfig {
    /// Level transition fader.
    pub black: FaderPreset,
    /// Effect fader.
    pub colored: FaderPreset,
    /// Sun glare fader.
    pub sun: FaderPreset,
    /// Death screen fader.
    pub death: FaderPreset,
}

impl FadersConfig {
    /// Preset for `id`.
    #[must_use]
    pub fn get(&self, id: FaderId) -> &FaderPreset {
        match id {
            FaderId::Black => &self.black,
            FaderId::Colored => &self.colored,
            FaderId::Sun => &self.sun,
            FaderId::Death => &self.death,
        }
    }
}

impl<'de> Deserialize<'de> for FadersConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Tables {
            black: Option<toml::Table>,
            colored: Option<toml::Table>,
            sun: Option<toml::Table>,
            death: Option<toml::Table>,
        }

        let tables = Tables::deserialize(deserializer)?;
        Ok(Self {
            black: merge_preset::<_, D::Error>(FaderPreset::black(), tables.black)?,
            colored: merge_preset::<_, D::Error>(FaderPreset::colored(), tables.colored)?,
            sun: merge_preset::<_, D::Error>(FaderPreset::sun(), tables.sun)?,
            death: merge_preset::<_, D::Error>(FaderPreset::death(), tables.death)?,
        })
    }
}

impl Default for FadersConfig {
    fn default() -> Self {
        Self {
            black: FaderPreset::black(),
            colored: FaderPreset::colored(),
            sun: FaderPreset::sun(),
            death: FaderPreset::death(),
        }
    }
}

/// The eight bar color slots as `[r, g, b, a]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarColors {
    /// Fill, empty end.
    pub base_main: [u8; 4],
    /// Fill, full end.
    pub base_fade: [u8; 4],
    /// Alternate fill, empty end.
    pub alt_main: [u8; 4],
    /// Alternate fill, full end.
    pub alt_fade: [u8; 4],
    /// Background, first stop.
    pub back_main: [u8; 4],
    /// Background, second stop.
    pub back_fade: [u8; 4],
    /// Border, first stop.
    pub border_main: [u8; 4],
    /// Border, second stop.
    pub border_fade: [u8; 4],
}

impl BarColors {
    fn slots(&self) -> [(BarColorSlot, [u8; 4]); BarColorSlot::COUNT] {
        [
            (BarColorSlot::BaseMain, self.base_main),
            (BarColorSlot::BaseFade, self.base_fade),
            (BarColorSlot::AltMain, self.alt_main),
            (BarColorSlot::AltFade, self.alt_fade),
            (BarColorSlot::BackMain, self.back_main),
            (BarColorSlot::BackFade, self.back_fade),
            (BarColorSlot::BorderMain, self.border_main),
            (BarColorSlot::BorderFade, self.border_fade),
        ]
    }
}

impl Default for BarColors {
    fn default() -> Self {
        Self {
            base_main: [255, 50, 50, 200],
            base_fade: [100, 255, 50, 200],
            alt_main: [255, 180, 0, 255],
            alt_fade: [255, 255, 0, 255],
            back_main: [0, 0, 0, 160],
            back_fade: [60, 60, 60, 130],
            border_main: [200, 200, 200, 50],
            border_fade: [80, 80, 80, 100],
        }
    }
}

/// Full setup of a bar. Geometry is in metering units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarPreset {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Outer width.
    pub width: f32,
    /// Outer height.
    pub height: f32,
    /// Border thickness.
    pub border: f32,
    /// Color slots.
    pub colors: BarColors,
    /// Fill blending mode.
    pub base_blend: BlendMode,
    /// Background blending mode.
    pub back_blend: BlendMode,
    /// Border blending mode.
    pub border_blend: BlendMode,
    /// Maximum value.
    pub max_value: f32,
    /// Warning threshold.
    pub warn_value: f32,
    /// Blink phase length in milliseconds (0 disables).
    pub blink_ms: u32,
    /// Draw the pseudo-3D rim.
    pub extrude: bool,
    /// Rim opacity.
    pub extrude_depth: u8,
    /// Show on value change and hide after a delay.
    pub autoshow: bool,
    /// Time on screen after a change, milliseconds.
    pub autoshow_delay_ms: u32,
    /// Fade out instead of vanishing.
    pub autoshow_fade: bool,
    /// Fade-out length, milliseconds.
    pub autoshow_fade_ms: u32,
    /// Initially visible.
    pub visible: bool,
    /// Start in the alternate color state.
    pub alternate: bool,
    /// Fill from the far end.
    pub invert: bool,
    /// Vertical layout.
    pub vertical: bool,
}

impl BarPreset {
    /// Builds a bar with this setup.
    #[must_use]
    pub fn build(&self) -> ProgressBar {
        let mut bar = ProgressBar::new();
        self.apply(&mut bar);
        bar
    }

    /// Applies this setup to an existing bar.
    pub fn apply(&self, bar: &mut ProgressBar) {
        bar.visible = self.visible;
        bar.alternate = self.alternate;
        bar.invert = self.invert;
        bar.vertical = self.vertical;

        bar.set_dimensions(self.x, self.y, self.width, self.height, self.border);
        for (slot, [r, g, b, a]) in self.colors.slots() {
            bar.set_color(slot, r, g, b, a);
        }
        bar.set_blending_modes(self.base_blend, self.back_blend, self.border_blend);
        bar.set_values(self.max_value, self.warn_value);
        bar.set_blink(self.blink_ms);
        bar.set_extrude(self.extrude, self.extrude_depth);
        bar.set_autoshow(
            self.autoshow,
            self.autoshow_delay_ms,
            self.autoshow_fade,
            self.autoshow_fade_ms,
        );
    }

    fn health() -> Self {
        Self {
            max_value: 1000.0,
            warn_value: 333.0,
            ..Self::status()
        }
    }

    fn air() -> Self {
        Self {
            x: 795.0,
            colors: BarColors {
                base_main: [0, 50, 255, 200],
                base_fade: [190, 190, 255, 200],
                alt_main: [255, 0, 0, 255],
                alt_fade: [0, 255, 0, 255],
                ..BarColors::default()
            },
            max_value: 1800.0,
            warn_value: 600.0,
            ..Self::status()
        }
    }

    fn sprint() -> Self {
        Self {
            x: 795.0,
            y: 50.0,
            colors: BarColors {
                base_main: [255, 100, 50, 200],
                base_fade: [255, 200, 0, 200],
                ..BarColors::default()
            },
            max_value: 120.0,
            warn_value: 0.0,
            autoshow_delay_ms: 500,
            autoshow_fade_ms: 300,
            ..Self::status()
        }
    }

    fn freeze() -> Self {
        Self {
            x: 795.0,
            y: 75.0,
            colors: BarColors {
                base_main: [0, 200, 255, 255],
                base_fade: [190, 190, 255, 255],
                ..BarColors::default()
            },
            max_value: 60.0,
            warn_value: 20.0,
            blink_ms: 200,
            autoshow_delay_ms: 500,
            autoshow_fade_ms: 300,
            ..Self::status()
        }
    }

    fn loading() -> Self {
        Self {
            x: 100.0,
            y: 930.0,
            width: 800.0,
            height: 25.0,
            colors: BarColors {
                base_main: [255, 225, 127, 230],
                base_fade: [255, 187, 136, 230],
                back_main: [30, 30, 30, 100],
                back_fade: [60, 60, 60, 100],
                border_main: [200, 200, 200, 80],
                border_fade: [80, 80, 80, 80],
                ..BarColors::default()
            },
            max_value: 1000.0,
            warn_value: 0.0,
            blink_ms: 0,
            extrude: true,
            extrude_depth: 70,
            visible: true,
            ..Self::default()
        }
    }

    /// Shared setup of the in-game status bars.
    fn status() -> Self {
        Self {
            blink_ms: 300,
            extrude: true,
            extrude_depth: 100,
            autoshow: true,
            autoshow_delay_ms: 5000,
            autoshow_fade: true,
            autoshow_fade_ms: 1000,
            ..Self::default()
        }
    }
}

impl Default for BarPreset {
    fn default() -> Self {
        Self {
            x: 25.0,
            y: 25.0,
            width: 180.0,
            height: 15.0,
            border: 3.0,
            colors: BarColors::default(),
            base_blend: BlendMode::Alpha,
            back_blend: BlendMode::Alpha,
            border_blend: BlendMode::Alpha,
            max_value: 100.0,
            warn_value: 0.0,
            blink_ms: 300,
            extrude: false,
            extrude_depth: 0,
            autoshow: false,
            autoshow_delay_ms: 0,
            autoshow_fade: false,
            autoshow_fade_ms: 0,
            visible: false,
            alternate: false,
            invert: false,
            vertical: false,
        }
    }
}

/// One preset per bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarsConfig {
    /// Health bar.
    pub health: BarPreset,
    /// Air bar.
    pub air: BarPreset,
    /// Sprint bar.
    pub sprint: BarPreset,
    /// Freeze bar.
    pub freeze: BarPreset,
    /// Loading bar.
    pub loading: BarPreset,
}

impl BarsConfig {
    /// Preset for `id`.
    #[must_use]
    pub fn get(&self, id: BarId) -> &BarPreset {
        match id {
            BarId::Health => &self.health,
            BarId::Air => &self.air,
            BarId::Sprint => &self.sprint,
            BarId::Freeze => &self.freeze,
            BarId::Loading => &self.loading,
        }
    }
}

impl<'de> Deserialize<'de> for BarsConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Tables {
            health: Option<toml::Table>,
            air: Option<toml::Table>,
            sprint: Option<toml::Table>,
            freeze: Option<toml::Table>,
            loading: Option<toml::Table>,
        }

        let tables = Tables::deserialize(deserializer)?;
        Ok(Self {
            health: merge_preset::<_, D::Error>(BarPreset::health(), tables.health)?,
            air: merge_preset::<_, D::Error>(BarPreset::air(), tables.air)?,
            sprint: merge_preset::<_, D::Error>(BarPreset::sprint(), tables.sprint)?,
            freeze: merge_preset::<_, D::Error>(BarPreset::freeze(), tables.freeze)?,
            loading: merge_preset::<_, D::Error>(BarPreset::loading(), tables.loading)?,
        })
    }
}

impl Default for BarsConfig {
    fn default() -> Self {
        Self {
            health: BarPreset::health(),
            air: BarPreset::air(),
            sprint: BarPreset::sprint(),
            freeze: BarPreset::freeze(),
            loading: BarPreset::loading(),
        }
    }
}

/// Lays `overrides` over `preset` and reads the result back.
fn merge_preset<T, E>(preset: T, overrides: Option<toml::Table>) -> Result<T, E>
where
    T: Serialize + DeserializeOwned,
    E: serde::de::Error,
{
    let Some(overrides) = overrides else {
        return Ok(preset);
    };
    let toml::Value::Table(mut base) = toml::Value::try_from(preset).map_err(E::custom)? else {
        return Err(E::custom("preset is not a table"));
    };
    merge_tables(&mut base, overrides);
    toml::Value::Table(base).try_into().map_err(E::custom)
}

fn merge_tables(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        match value {
            toml::Value::Table(nested) if matches!(base.get(&key), Some(toml::Value::Table(_))) => {
                if let Some(toml::Value::Table(inner)) = base.get_mut(&key) {
                    merge_tables(inner, nested);
                }
            }
            value => {
                base.insert(key, value);
            }
        }
    }
}

/// Crosshair settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrosshairConfig {
    /// Draw the crosshair during [`crate::Overlay::render`].
    pub enabled: bool,
    /// Arm length from the centre, pixels.
    pub size: f32,
    /// Stroke thickness, pixels.
    pub thickness: f32,
    /// Stroke color.
    pub color: [u8; 4],
    /// Blending mode.
    pub blend: BlendMode,
}

impl CrosshairConfig {
    /// Stroke color.
    #[must_use]
    pub fn color(&self) -> Color {
        Color::from_array8(self.color)
    }
}

impl Default for CrosshairConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            size: 5.0,
            thickness: 1.0,
            color: [255, 0, 0, 255],
            blend: BlendMode::Alpha,
        }
    }
}

/// Text line settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Background margin given to temporary lines.
    pub rect_border: f32,
    /// Temporary lines available per frame.
    pub temp_lines: usize,
    /// Buffer size of each temporary line, bytes.
    pub temp_line_capacity: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            rect_border: TextLine::DEFAULT_RECT_BORDER,
            temp_lines: 256,
            temp_line_capacity: 128,
        }
    }
}
