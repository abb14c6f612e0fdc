//! # HUD Overlay
//!
//! The heads-up layer drawn on top of the 3D scene:
//! - Full-screen faders for level transitions, flashes, glare and death
//! - Resolution-independent status bars (health, air, sprint, freeze, loading)
//! - On-screen text lines, registered or one-frame
//! - Crosshair
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     OVERLAY FRAME                         │
//! ├──────────────────────────────────────────────────────────┤
//! │  (screen, dt) → Bars → Faders → Text → Crosshair          │
//! │                   ↓       ↓       ↓        ↓              │
//! │              OverlayRenderer (engine's 2D backend)        │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! Time only moves through the `dt` handed to [`Overlay::render`]. The same
//! sequence of `(dt, screen, values)` always produces the same draw calls.
//!
//! ## Example
//!
//! ```rust
//! use hud_overlay::{BarId, CommandRecorder, FadeDirection, FaderId, Overlay, ScreenSize};
//!
//! let mut overlay = Overlay::default();
//! let mut renderer = CommandRecorder::new();
//!
//! overlay.engage(FaderId::Black, FadeDirection::Out);
//! overlay.set_bar_value(BarId::Health, 750.0);
//! overlay.render(ScreenSize::new(1920, 1080), 0.016, &mut renderer);
//!
//! assert!(overlay.is_fading(FaderId::Black));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod bar;
pub mod config;
pub mod error;
pub mod fader;
pub mod layout;
pub mod overlay;
pub mod render;
pub mod style;
pub mod text;

pub use bar::{BarColorSlot, BarFrame, BarId, ProgressBar};
pub use config::{BarPreset, FaderPreset, OverlayConfig};
pub use error::{OverlayError, OverlayResult};
pub use fader::{Corner, FadeDirection, Fader, FaderId};
pub use layout::{Rect, ScreenSize, METERING_RESOLUTION};
pub use overlay::Overlay;
pub use render::{draw_rect, CommandRecorder, OverlayRenderer, OverlayVertex, RenderCommand, TextExtent};
pub use style::{BlendMode, Color, CornerColors};
pub use text::{LineHandle, TextLine, TextLineRegistry};
