//! Continuous colour scales for scatter colouring and the heatmap

use plotters::style::RGBColor;

/// A colour scale sampled by linear interpolation between anchor stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScale {
    Viridis,
    Plasma,
    /// Diverging blue-white-red, centred at 0.5
    CoolWarm,
}

const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

const PLASMA: [(u8, u8, u8); 5] = [
    (13, 8, 135),
    (126, 3, 168),
    (204, 71, 120),
    (248, 149, 64),
    (240, 249, 33),
];

const COOLWARM: [(u8, u8, u8); 5] = [
    (59, 76, 192),
    (141, 176, 254),
    (221, 221, 221),
    (244, 154, 123),
    (180, 4, 38),
];

/// Colour used for undefined values (NaN)
pub const MISSING: RGBColor = RGBColor(200, 200, 200);

impl ColorScale {
    fn stops(&self) -> &'static [(u8, u8, u8)] {
        match self {
            ColorScale::Viridis => &VIRIDIS,
            ColorScale::Plasma => &PLASMA,
            ColorScale::CoolWarm => &COOLWARM,
        }
    }

    /// Colour at position `t` in [0, 1]
    pub fn at(&self, t: f64) -> RGBColor {
        if t.is_nan() {
            return MISSING;
        }
        let stops = self.stops();
        let scaled = t.clamp(0.0, 1.0) * (stops.len() - 1) as f64;
        let index = (scaled.floor() as usize).min(stops.len() - 2);
        let fraction = scaled - index as f64;

        let (r0, g0, b0) = stops[index];
        let (r1, g1, b1) = stops[index + 1];
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * fraction).round() as u8;
        RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
    }

    /// Colour for `value` normalised over `[min, max]`
    pub fn normalized(&self, value: f64, min: f64, max: f64) -> RGBColor {
        if max <= min {
            return self.at(0.5);
        }
        self.at((value - min) / (max - min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_endpoints() {
        assert_eq!(ColorScale::Viridis.at(0.0), RGBColor(68, 1, 84));
        assert_eq!(ColorScale::Viridis.at(1.0), RGBColor(253, 231, 37));
        assert_eq!(ColorScale::CoolWarm.at(0.5), RGBColor(221, 221, 221));
        assert_eq!(ColorScale::Plasma.at(f64::NAN), MISSING);
    }

    #[test]
    fn test_normalized_degenerate_range() {
        let mid = ColorScale::CoolWarm.normalized(3.0, 3.0, 3.0);
        assert_eq!(mid, ColorScale::CoolWarm.at(0.5));
        assert_eq!(
            ColorScale::CoolWarm.normalized(-1.0, -1.0, 1.0),
            RGBColor(59, 76, 192)
        );
    }
}
