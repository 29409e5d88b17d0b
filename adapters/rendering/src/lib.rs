#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Geo Quiz adapters.

use anyhow::Result as AnyResult;
use geo_quiz_core::{FeatureId, FeatureState, SessionSummary};
use glam::Vec2;
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color carrying the provided alpha channel.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Quantizes the RGB channels back into bytes.
    #[must_use]
    pub fn to_rgb_u8(self) -> [u8; 3] {
        [
            quantize_channel(self.red),
            quantize_channel(self.green),
            quantize_channel(self.blue),
        ]
    }
}

fn quantize_channel(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

/// Fill class resolved from a feature's highlight state.
///
/// The classes mirror the map style's paint expression: answer fills win over
/// the hover fill, and everything else falls back to the base fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeatureFill {
    /// Fallback fill for features without highlight.
    Base,
    /// Fill for the feature currently under the pointer.
    Highlight,
    /// Fill for correctly answered features.
    Correct,
    /// Fill for revealed or flashing wrong answers.
    Incorrect,
}

impl FeatureFill {
    /// Resolves the fill class for a feature highlight state.
    ///
    /// A reverting feature keeps the incorrect fill until its flash expires.
    #[must_use]
    pub const fn for_state(state: FeatureState) -> Self {
        match state {
            FeatureState::Neutral => Self::Base,
            FeatureState::Hovered => Self::Highlight,
            FeatureState::Correct => Self::Correct,
            FeatureState::Incorrect | FeatureState::Reverting => Self::Incorrect,
        }
    }

    /// Opaque palette color assigned to the fill class.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Base => Color::from_rgb_u8(0x00, 0x00, 0x00),
            Self::Highlight => Color::from_rgb_u8(0xff, 0xff, 0xff),
            Self::Correct => Color::from_rgb_u8(0x04, 0xff, 0x86),
            Self::Incorrect => Color::from_rgb_u8(0xe5, 0x1b, 0x0e),
        }
    }

    /// Short lowercase label used by text adapters.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Highlight => "highlight",
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Cursor position expressed in map units, if the cursor is over the map.
    pub cursor_world_space: Option<Vec2>,
    /// Feature under the cursor resolved by the adapter's hit test.
    pub hovered_feature: Option<FeatureId>,
    /// Whether the adapter detected a pick confirmation on this frame.
    pub pick_action: bool,
}

/// Describes the map viewport and the stroke drawn around features.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapPresentation {
    /// Point the camera is centered on, expressed as longitude and latitude.
    pub center: Vec2,
    /// Camera zoom level.
    pub zoom: f32,
    /// Opacity applied to every feature fill.
    pub fill_opacity: f32,
    /// Color used when stroking feature borders.
    pub border_color: Color,
    /// Width of the feature border stroke.
    pub border_width: f32,
}

impl MapPresentation {
    /// Smallest zoom level accepted by the viewport.
    pub const MIN_ZOOM: f32 = 0.0;

    /// Largest zoom level accepted by the viewport.
    pub const MAX_ZOOM: f32 = 22.0;

    /// Opacity applied to feature fills unless a backend overrides it.
    pub const DEFAULT_FILL_OPACITY: f32 = 0.5;

    /// Stroke width applied to feature borders unless overridden.
    pub const DEFAULT_BORDER_WIDTH: f32 = 2.0;

    /// Default stroke color drawn around features.
    pub const DEFAULT_BORDER_COLOR: Color = Color::from_rgb_u8(0xec, 0xa4, 0x00);

    /// Creates a new map descriptor.
    ///
    /// Returns an error when the zoom lies outside the supported range or the
    /// fill opacity is not a valid alpha value.
    pub fn new(
        center: Vec2,
        zoom: f32,
        fill_opacity: f32,
        border_color: Color,
        border_width: f32,
    ) -> Result<Self, RenderingError> {
        if !zoom.is_finite() || !(Self::MIN_ZOOM..=Self::MAX_ZOOM).contains(&zoom) {
            return Err(RenderingError::InvalidZoom { zoom });
        }
        if !fill_opacity.is_finite() || !(0.0..=1.0).contains(&fill_opacity) {
            return Err(RenderingError::InvalidFillOpacity { fill_opacity });
        }

        Ok(Self {
            center,
            zoom,
            fill_opacity,
            border_color,
            border_width,
        })
    }

    /// Fill color for the class with the map's opacity applied.
    #[must_use]
    pub fn fill_color(&self, fill: FeatureFill) -> Color {
        fill.color().with_alpha(self.fill_opacity)
    }
}

/// Immutable snapshot describing a feature drawn on the map.
#[derive(Clone, Debug, PartialEq)]
pub struct FeaturePresentation {
    /// Identifier of the feature within the catalog.
    pub feature: FeatureId,
    /// Display name of the feature.
    pub name: String,
    /// Fill class resolved for the feature's current highlight state.
    pub fill: FeatureFill,
}

impl FeaturePresentation {
    /// Creates a new feature presentation descriptor.
    #[must_use]
    pub fn new<T>(feature: FeatureId, name: T, fill: FeatureFill) -> Self
    where
        T: Into<String>,
    {
        Self {
            feature,
            name: name.into(),
            fill,
        }
    }
}

/// Score and clock readout displayed while a session runs.
#[derive(Clone, Debug, PartialEq)]
pub struct HudPresentation {
    /// Name of the objective the player should pick next.
    pub objective: Option<String>,
    /// Number of objectives answered correctly so far.
    pub correct_count: u32,
    /// Total number of objectives dealt for the session.
    pub total_objectives: u32,
    /// Time elapsed on the session clock.
    pub elapsed: Duration,
}

impl HudPresentation {
    /// Creates a new HUD descriptor.
    #[must_use]
    pub fn new(
        objective: Option<String>,
        correct_count: u32,
        total_objectives: u32,
        elapsed: Duration,
    ) -> Self {
        Self {
            objective,
            correct_count,
            total_objectives,
            elapsed,
        }
    }

    /// Score readout formatted as `correct/total`.
    #[must_use]
    pub fn score_text(&self) -> String {
        format!("{}/{}", self.correct_count, self.total_objectives)
    }

    /// Clock readout formatted as minutes, seconds and centiseconds.
    #[must_use]
    pub fn clock_text(&self) -> String {
        let millis = self.elapsed.as_millis();
        let minutes = (millis / 60_000) % 60;
        let seconds = (millis / 1_000) % 60;
        let centis = (millis / 10) % 100;
        format!("{minutes:02}:{seconds:02}:{centis:02}")
    }
}

/// Scene description combining the map viewport, features and HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Map viewport and stroke configuration.
    pub map: MapPresentation,
    /// Features currently drawn on the map.
    pub features: Vec<FeaturePresentation>,
    /// Score and clock readout.
    pub hud: HudPresentation,
    /// Final score, present once the session has completed.
    pub summary: Option<SessionSummary>,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        map: MapPresentation,
        features: Vec<FeaturePresentation>,
        hud: HudPresentation,
        summary: Option<SessionSummary>,
    ) -> Self {
        Self {
            map,
            features,
            hud,
            summary,
        }
    }

    /// Looks up the presentation of a feature by identifier.
    #[must_use]
    pub fn feature(&self, feature: FeatureId) -> Option<&FeaturePresentation> {
        self.features.iter().find(|entry| entry.feature == feature)
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Geo Quiz scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame delta,
    /// per-frame input captured by the adapter, and may mutate the scene before
    /// it is rendered, allowing adapters to animate session snapshots
    /// deterministically.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Zoom levels outside the supported range cannot be presented.
    InvalidZoom {
        /// Provided zoom level that failed validation.
        zoom: f32,
    },
    /// Fill opacity must be a valid alpha value.
    InvalidFillOpacity {
        /// Provided opacity that failed validation.
        fill_opacity: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidZoom { zoom } => {
                write!(
                    f,
                    "zoom must lie within {}..={} (received {zoom})",
                    MapPresentation::MIN_ZOOM,
                    MapPresentation::MAX_ZOOM
                )
            }
            Self::InvalidFillOpacity { fill_opacity } => {
                write!(
                    f,
                    "fill opacity must lie within 0.0..=1.0 (received {fill_opacity})"
                )
            }
        }
    }
}

impl Error for RenderingError {}
