use crate::foundation::error::{SceneError, SceneResult};

pub use kurbo::Point;

/// 0-based day offset from the dataset epoch.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct DateIndex(pub usize);

/// Pixel dimensions of the equirectangular raster markers are projected onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Raster {
    /// Width in pixels (spans longitude -180..180).
    pub width: u32,
    /// Height in pixels (spans latitude -90..90).
    pub height: u32,
}

impl Raster {
    /// Create a validated raster with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> SceneResult<Self> {
        if width == 0 || height == 0 {
            return Err(SceneError::validation("raster width/height must be > 0"));
        }
        Ok(Self { width, height })
    }
}

/// A named (or anonymous) point on the globe.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Location {
    /// Country or region name, when the source table carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Latitude in degrees, `[-90, 90]`.
    pub lat: f64,
    /// Longitude in degrees, `[-180, 180]`.
    pub lon: f64,
}

impl Location {
    /// Anonymous location.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { id: None, lat, lon }
    }

    /// Location carrying a name.
    pub fn named(id: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            id: Some(id.into()),
            lat,
            lon,
        }
    }

    /// `(0, 0)` is how the source tables spell "no coordinates".
    pub fn is_no_data(&self) -> bool {
        self.lat == 0.0 && self.lon == 0.0
    }
}

/// Straight RGB color with channels in `[0, 1]`.
///
/// Deserializes from `"#RRGGBB"`, `[r, g, b]` or `{ "r": .., "g": .., "b": .. }`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Rgb {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Rgb {
    /// Pure red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    /// Pure green.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    /// Black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    /// White.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Build a color from channels in `[0, 1]`.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Return `true` when every channel lies in `[0, 1]`.
    pub fn is_normalized(self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }

    /// Quantize to 8-bit channels.
    pub fn to_rgb8(self) -> [u8; 3] {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [to_u8(self.r), to_u8(self.g), to_u8(self.b)]
    }
}

impl<'de> serde::Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Obj { r: f64, g: f64, b: f64 },
            Arr(Vec<f64>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Obj { r, g, b } => Ok(Self::new(r, g, b)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::new(*r, *g, *b)),
                _ => Err(serde::de::Error::custom(
                    "rgb array must have len 3 ([r,g,b])",
                )),
            },
        }
    }
}

fn parse_hex(s: &str) -> Result<Rgb, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if s.len() != 6 || !s.is_ascii() {
        return Err("hex color must be #RRGGBB (case-insensitive)".to_owned());
    }

    fn channel(pair: &str) -> Result<f64, String> {
        u8::from_str_radix(pair, 16)
            .map(|v| f64::from(v) / 255.0)
            .map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    Ok(Rgb::new(
        channel(&s[0..2])?,
        channel(&s[2..4])?,
        channel(&s[4..6])?,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
