//! All-sky map projections.
//!
//! Forward transforms from `(lon, lat)` in radians to plane coordinates.
//! The set matches the geographic projections offered by common plotting
//! libraries: Mollweide, Hammer, Aitoff, Lambert azimuthal equal-area and a
//! plain rectilinear (plate carrée) plot.

use std::f64::consts::{FRAC_PI_2, PI, SQRT_2};
use std::fmt;
use std::str::FromStr;

use crate::tiling::SkyPoint;

/// Newton iterations for the Mollweide auxiliary angle.
const MOLLWEIDE_MAX_ITERATIONS: usize = 50;
const MOLLWEIDE_TOLERANCE: f64 = 1e-12;

/// Error for an unrecognised projection name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown projection '{0}': expected one of mollweide, hammer, aitoff, lambert, rectilinear")]
pub struct UnknownProjection(pub String);

/// Supported map projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Projection {
    /// Equal-area pseudocylindrical projection with an elliptical outline.
    #[default]
    Mollweide,
    /// Hammer-Aitoff equal-area projection.
    Hammer,
    /// Aitoff azimuthal-derived projection.
    Aitoff,
    /// Lambert azimuthal equal-area, centred on (0, 0).
    Lambert,
    /// Longitude and latitude used directly as x and y.
    Rectilinear,
}

impl Projection {
    /// All projections, in display order.
    pub const ALL: [Projection; 5] = [
        Projection::Mollweide,
        Projection::Hammer,
        Projection::Aitoff,
        Projection::Lambert,
        Projection::Rectilinear,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Projection::Mollweide => "mollweide",
            Projection::Hammer => "hammer",
            Projection::Aitoff => "aitoff",
            Projection::Lambert => "lambert",
            Projection::Rectilinear => "rectilinear",
        }
    }

    /// Half extents `(x, y)` of the projected sphere.
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            Projection::Mollweide | Projection::Hammer => (2.0 * SQRT_2, SQRT_2),
            Projection::Aitoff | Projection::Rectilinear => (PI, FRAC_PI_2),
            Projection::Lambert => (2.0, 2.0),
        }
    }

    /// Project a point onto the plane.
    ///
    /// Returns `None` where the projection is singular (the antipode of the
    /// Lambert centre).
    pub fn project(&self, point: SkyPoint) -> Option<(f64, f64)> {
        let SkyPoint { lon, lat } = point;
        match self {
            Projection::Mollweide => {
                let theta = mollweide_theta(lat);
                Some((
                    2.0 * SQRT_2 / PI * lon * theta.cos(),
                    SQRT_2 * theta.sin(),
                ))
            }
            Projection::Hammer => {
                let half = lon / 2.0;
                let denom = (1.0 + lat.cos() * half.cos()).sqrt();
                if denom <= f64::EPSILON {
                    return None;
                }
                Some((
                    2.0 * SQRT_2 * lat.cos() * half.sin() / denom,
                    SQRT_2 * lat.sin() / denom,
                ))
            }
            Projection::Aitoff => {
                let half = lon / 2.0;
                let alpha = (lat.cos() * half.cos()).clamp(-1.0, 1.0).acos();
                let sinc = if alpha.abs() < 1e-12 {
                    1.0
                } else {
                    alpha.sin() / alpha
                };
                if sinc <= f64::EPSILON {
                    return None;
                }
                Some((2.0 * lat.cos() * half.sin() / sinc, lat.sin() / sinc))
            }
            Projection::Lambert => {
                let cos_c = lat.cos() * lon.cos();
                if 1.0 + cos_c <= 1e-12 {
                    return None;
                }
                let k = (2.0 / (1.0 + cos_c)).sqrt();
                Some((k * lat.cos() * lon.sin(), k * lat.sin()))
            }
            Projection::Rectilinear => Some((lon, lat)),
        }
    }

    /// Whether longitudes past ±π fold back onto the opposite side of the
    /// map. For the other projections they run off the edge and are clipped.
    pub fn wraps_longitude(&self) -> bool {
        matches!(self, Projection::Lambert)
    }

    /// Outline of the projected sphere as a closed ring.
    ///
    /// Traced along the ±180° meridians for the pseudocylindrical
    /// projections, a circle of radius 2 for Lambert, and the axis limits
    /// `[-π, π] × [-π/2, π/2]` for rectilinear.
    pub fn boundary(&self, segments: usize) -> Vec<(f64, f64)> {
        let n = segments.max(8);
        let mut ring = Vec::with_capacity(2 * n + 1);
        match self {
            Projection::Lambert => {
                for i in 0..n {
                    let t = 2.0 * PI * i as f64 / n as f64;
                    ring.push((2.0 * t.cos(), 2.0 * t.sin()));
                }
            }
            Projection::Rectilinear => {
                ring.extend([(-PI, -FRAC_PI_2), (PI, -FRAC_PI_2), (PI, FRAC_PI_2), (-PI, FRAC_PI_2)]);
            }
            Projection::Mollweide | Projection::Hammer | Projection::Aitoff => {
                // East edge south to north, then west edge north to south
                for i in 0..=n {
                    let lat = -FRAC_PI_2 + PI * i as f64 / n as f64;
                    if let Some(p) = self.project(SkyPoint::new(PI, lat)) {
                        ring.push(p);
                    }
                }
                for i in 0..=n {
                    let lat = FRAC_PI_2 - PI * i as f64 / n as f64;
                    if let Some(p) = self.project(SkyPoint::new(-PI, lat)) {
                        ring.push(p);
                    }
                }
            }
        }
        if let Some(first) = ring.first().copied() {
            ring.push(first);
        }
        ring
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Projection {
    type Err = UnknownProjection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mollweide" => Ok(Projection::Mollweide),
            "hammer" => Ok(Projection::Hammer),
            "aitoff" => Ok(Projection::Aitoff),
            "lambert" => Ok(Projection::Lambert),
            "rectilinear" | "none" => Ok(Projection::Rectilinear),
            _ => Err(UnknownProjection(s.to_string())),
        }
    }
}

/// Solve `2θ + sin 2θ = π sin φ` for the Mollweide auxiliary angle.
fn mollweide_theta(lat: f64) -> f64 {
    if (lat.abs() - FRAC_PI_2).abs() < 1e-12 {
        return lat.signum() * FRAC_PI_2;
    }

    let target = PI * lat.sin();
    let mut two_theta = 2.0 * lat;
    for _ in 0..MOLLWEIDE_MAX_ITERATIONS {
        let f = two_theta + two_theta.sin() - target;
        let df = 1.0 + two_theta.cos();
        if df.abs() < f64::EPSILON {
            break;
        }
        let delta = f / df;
        two_theta -= delta;
        if delta.abs() < MOLLWEIDE_TOLERANCE {
            break;
        }
    }
    two_theta / 2.0
}
