use serde::{Deserialize, Serialize};

/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_rgb_u32(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as f32 / 255.0,
            g: ((rgb >> 8) & 0xff) as f32 / 255.0,
            b: (rgb & 0xff) as f32 / 255.0,
        }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::from_rgb_u32)
    }

    /// The cyan accent shared by the sphere and the particles (`#22d3ee`).
    pub fn accent() -> Self {
        Self::from_rgb_u32(0x22d3ee)
    }

    pub fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::accent()
    }
}

/// Geometry a node references. The host owns the actual vertex data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// UV sphere with `segments` width and height subdivisions.
    Sphere { radius: f32, segments: u32 },
}

impl Geometry {
    pub fn sphere(radius: f32, segments: u32) -> Self {
        Geometry::Sphere { radius, segments }
    }

    pub fn radius(&self) -> f32 {
        match *self {
            Geometry::Sphere { radius, .. } => radius,
        }
    }

    pub fn segments(&self) -> u32 {
        match *self {
            Geometry::Sphere { segments, .. } => segments,
        }
    }
}

/// Standard lit material descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub emissive: Color,
    /// Multiplier on `emissive` (0.0 = no glow).
    pub emissive_intensity: f32,
    /// Render edges only.
    pub wireframe: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::accent(),
            emissive: Color::new(0.0, 0.0, 0.0),
            emissive_intensity: 0.0,
            wireframe: false,
        }
    }
}

impl Material {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn with_emissive(mut self, emissive: Color, intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }

    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accent_matches_hex() {
        let c = Color::from_hex("#22d3ee").unwrap();
        assert_eq!(c, Color::accent());
        assert!((c.r - 34.0 / 255.0).abs() < 1e-6);
        assert!((c.g - 211.0 / 255.0).abs() < 1e-6);
        assert!((c.b - 238.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn bad_hex_rejected() {
        assert!(Color::from_hex("#22d3e").is_none());
        assert!(Color::from_hex("zzzzzz").is_none());
    }

    #[test]
    fn material_builder() {
        let m = Material::new(Color::accent())
            .with_emissive(Color::accent(), 0.4)
            .with_wireframe(true);
        assert!(m.wireframe);
        assert_eq!(m.emissive_intensity, 0.4);
    }
}
