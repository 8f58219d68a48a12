// src/data_analysis/color_mapping.rs

use plotters::style::RGBColor;

/// How counts above the saturation count are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientPolicy {
    /// Cells at or above the saturation count are fully blue.
    #[default]
    Clamped,
    /// The gradient keeps extrapolating past blue; red and green go
    /// negative once the count exceeds the saturation count.
    Extrapolated,
}

/// Linear RGBA color, one per heatmap cell, ready for texture upload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl HeatColor {
    pub const WHITE: HeatColor = HeatColor { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLUE: HeatColor = HeatColor { r: 0.0, g: 0.0, b: 1.0, a: 1.0 };

    /// Unclamped linear interpolation from `self` towards `other`.
    pub fn lerp(self, other: HeatColor, t: f32) -> HeatColor {
        HeatColor {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Saturating conversion to 8-bit RGB for image export.
    pub fn to_rgb8(self) -> RGBColor {
        let channel = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        RGBColor(channel(self.r), channel(self.g), channel(self.b))
    }
}

/// Maps a visit count onto the white-to-blue gradient.
pub fn heat_color(count: u32, saturation_count: u32, policy: GradientPolicy) -> HeatColor {
    let t = count as f32 / saturation_count.max(1) as f32;
    let t = match policy {
        GradientPolicy::Clamped => t.min(1.0),
        GradientPolicy::Extrapolated => t,
    };
    HeatColor::WHITE.lerp(HeatColor::BLUE, t)
}
