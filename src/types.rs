use serde::{Serialize, Deserialize};
use std::fmt;
use crate::scene::NodeId;

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum NodeKind {
    Frame,
    Ellipse,
    Vector,
    Component,
    ComponentSet,
    Instance,
}

/// Arc definition of an ellipse, angles in radians measured clockwise from +x.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct ArcData {
    pub starting_angle: f64,
    pub ending_angle: f64,
    pub inner_radius: f64, // fraction of the outer radius
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f64, // 0.0 to 1.0
    pub color: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Gradient {
    pub is_radial: bool,
    pub x1: f64, pub y1: f64, // Start point (or center for radial)
    pub x2: f64, pub y2: f64, // End point (or radius point for radial)
    pub stops: Vec<GradientStop>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Paint {
    Solid { color: String, opacity: f64 },
    Gradient(Gradient),
}

impl Paint {
    pub fn solid(color: &str) -> Self {
        Paint::Solid { color: color.to_string(), opacity: 1.0 }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub enum EffectType {
    DropShadow,
    InnerShadow,
    LayerBlur,
    BackgroundBlur,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LayerEffect {
    pub effect_type: EffectType,
    pub enabled: bool,
    pub color: String,
    pub opacity: f64,
    pub blur: f64,
    pub x: f64,
    pub y: f64,
    pub spread: f64,
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    #[default]
    PassThrough,
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendMode {
    /// CSS `mix-blend-mode` keyword, `None` when the mode composites normally.
    pub fn css(&self) -> Option<&'static str> {
        Some(match self {
            BlendMode::PassThrough | BlendMode::Normal => return None,
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
            BlendMode::Overlay => "overlay",
            BlendMode::Darken => "darken",
            BlendMode::Lighten => "lighten",
            BlendMode::ColorDodge => "color-dodge",
            BlendMode::ColorBurn => "color-burn",
            BlendMode::HardLight => "hard-light",
            BlendMode::SoftLight => "soft-light",
            BlendMode::Difference => "difference",
            BlendMode::Exclusion => "exclusion",
            BlendMode::Hue => "hue",
            BlendMode::Saturation => "saturation",
            BlendMode::Color => "color",
            BlendMode::Luminosity => "luminosity",
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrokeJoin { #[default] Miter, Bevel, Round }

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrokeCap { #[default] None, Round, Square }

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrokeAlign { Inside, #[default] Center, Outside }

/// A cosmetic property of a node, addressable on its own.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum StyleAttribute {
    Opacity,
    BlendMode,
    IsMask,
    Effects,
    EffectStyleId,
    CornerRadius,
    CornerSmoothing,
    Fills,
    FillStyleId,
    Strokes,
    StrokeStyleId,
    StrokeWeight,
    StrokeJoin,
    StrokeAlign,
    StrokeCap,
    StrokeMiterLimit,
    DashPattern,
}

impl StyleAttribute {
    /// Attributes carried from an old radial's variants to its replacement. Stroke weight is
    /// left to the new geometry.
    pub const MIGRATED: [StyleAttribute; 16] = [
        StyleAttribute::Opacity,
        StyleAttribute::BlendMode,
        StyleAttribute::IsMask,
        StyleAttribute::Effects,
        StyleAttribute::EffectStyleId,
        StyleAttribute::CornerRadius,
        StyleAttribute::CornerSmoothing,
        StyleAttribute::Fills,
        StyleAttribute::FillStyleId,
        StyleAttribute::Strokes,
        StyleAttribute::StrokeStyleId,
        StyleAttribute::StrokeJoin,
        StyleAttribute::StrokeAlign,
        StyleAttribute::StrokeCap,
        StyleAttribute::StrokeMiterLimit,
        StyleAttribute::DashPattern,
    ];
}

impl fmt::Display for StyleAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StyleAttribute::Opacity => "opacity",
            StyleAttribute::BlendMode => "blend mode",
            StyleAttribute::IsMask => "mask flag",
            StyleAttribute::Effects => "effects",
            StyleAttribute::EffectStyleId => "effect style",
            StyleAttribute::CornerRadius => "corner radius",
            StyleAttribute::CornerSmoothing => "corner smoothing",
            StyleAttribute::Fills => "fills",
            StyleAttribute::FillStyleId => "fill style",
            StyleAttribute::Strokes => "strokes",
            StyleAttribute::StrokeStyleId => "stroke style",
            StyleAttribute::StrokeWeight => "stroke weight",
            StyleAttribute::StrokeJoin => "stroke join",
            StyleAttribute::StrokeAlign => "stroke align",
            StyleAttribute::StrokeCap => "stroke cap",
            StyleAttribute::StrokeMiterLimit => "stroke miter limit",
            StyleAttribute::DashPattern => "dash pattern",
        };
        f.write_str(name)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum StyleValue {
    Opacity(f64),
    BlendMode(BlendMode),
    IsMask(bool),
    Effects(Vec<LayerEffect>),
    EffectStyleId(Option<String>),
    CornerRadius(f64),
    CornerSmoothing(f64),
    Fills(Vec<Paint>),
    FillStyleId(Option<String>),
    Strokes(Vec<Paint>),
    StrokeStyleId(Option<String>),
    StrokeWeight(f64),
    StrokeJoin(StrokeJoin),
    StrokeAlign(StrokeAlign),
    StrokeCap(StrokeCap),
    StrokeMiterLimit(f64),
    DashPattern(Vec<f64>),
}

impl StyleValue {
    pub fn attribute(&self) -> StyleAttribute {
        match self {
            StyleValue::Opacity(_) => StyleAttribute::Opacity,
            StyleValue::BlendMode(_) => StyleAttribute::BlendMode,
            StyleValue::IsMask(_) => StyleAttribute::IsMask,
            StyleValue::Effects(_) => StyleAttribute::Effects,
            StyleValue::EffectStyleId(_) => StyleAttribute::EffectStyleId,
            StyleValue::CornerRadius(_) => StyleAttribute::CornerRadius,
            StyleValue::CornerSmoothing(_) => StyleAttribute::CornerSmoothing,
            StyleValue::Fills(_) => StyleAttribute::Fills,
            StyleValue::FillStyleId(_) => StyleAttribute::FillStyleId,
            StyleValue::Strokes(_) => StyleAttribute::Strokes,
            StyleValue::StrokeStyleId(_) => StyleAttribute::StrokeStyleId,
            StyleValue::StrokeWeight(_) => StyleAttribute::StrokeWeight,
            StyleValue::StrokeJoin(_) => StyleAttribute::StrokeJoin,
            StyleValue::StrokeAlign(_) => StyleAttribute::StrokeAlign,
            StyleValue::StrokeCap(_) => StyleAttribute::StrokeCap,
            StyleValue::StrokeMiterLimit(_) => StyleAttribute::StrokeMiterLimit,
            StyleValue::DashPattern(_) => StyleAttribute::DashPattern,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum LayoutMode {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// Auto layout of a frame. Laid-out frames hug their children on both axes.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug, Default)]
pub struct AutoLayout {
    pub mode: LayoutMode,
    pub item_spacing: f64,
    pub padding: f64,
}

impl AutoLayout {
    pub fn horizontal(item_spacing: f64) -> Self {
        AutoLayout { mode: LayoutMode::Horizontal, item_spacing, padding: 0.0 }
    }

    pub fn vertical(item_spacing: f64, padding: f64) -> Self {
        AutoLayout { mode: LayoutMode::Vertical, item_spacing, padding }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Trigger { OnClick, OnHover, OnPress }

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Easing { Linear, EaseIn, EaseOut, EaseInAndOut }

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum TransitionKind { Dissolve, SmartAnimate }

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct Transition {
    pub kind: TransitionKind,
    pub easing: Easing,
    pub duration: f64, // seconds
}

/// Prototype interaction: swap the node for `destination` when `trigger` fires.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct Reaction {
    pub trigger: Trigger,
    pub destination: NodeId,
    pub transition: Transition,
}
