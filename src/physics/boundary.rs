//! Geometric classification of mesh points into the physically meaningful
//! faces of a strip sensor.
//!
//! Two field regimes are covered. The electric field pins the strips at
//! `y = 0` and the back plane at `y = depth`. The weighting field uses the
//! depletion width in place of the device depth.
//!
//! The weighting back plane only checks `y`: it ignores the on-boundary flag
//! and the lateral range. Its electric counterpart checks all three.

use super::geometry::{BOUNDARY_EPS, DomainBounds, StripGeometry};
use nalgebra::Point2;

/// A labelled face of the sensor, each carrying its own geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundaryRegion {
    CentralStrip(StripGeometry),
    NeighbourStrip(StripGeometry),
    BackPlane(DomainBounds),
    CentralStripWeighting {
        strips: StripGeometry,
        depletion_width: f64,
    },
    NeighbourStripWeighting {
        strips: StripGeometry,
        depletion_width: f64,
    },
    BackPlaneWeighting(DomainBounds),
}

impl BoundaryRegion {
    /// Whether `x` belongs to this region.
    ///
    /// `on_boundary` is the mesher's flag for points on the outer boundary.
    pub fn classify(&self, x: &Point2<f64>, on_boundary: bool) -> bool {
        match self {
            Self::CentralStrip(strips) => {
                on_front_face(x) && on_boundary && strips.window_contains(strips.index(), x.x)
            }
            Self::NeighbourStrip(strips) => {
                on_front_face(x) && on_boundary && any_neighbour_contains(strips, x.x)
            }
            Self::BackPlane(bounds) => {
                beyond(x.y, bounds.depth) && on_boundary && laterally_within(bounds, x.x)
            }
            Self::CentralStripWeighting {
                strips,
                depletion_width,
            } => {
                below(x.y, *depletion_width)
                    && on_boundary
                    && strips.window_contains(strips.index(), x.x)
            }
            Self::NeighbourStripWeighting {
                strips,
                depletion_width,
            } => below(x.y, *depletion_width) && on_boundary && any_neighbour_contains(strips, x.x),
            Self::BackPlaneWeighting(bounds) => beyond(x.y, bounds.depth),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CentralStrip(_) => "central strip",
            Self::NeighbourStrip(_) => "neighbour strip",
            Self::BackPlane(_) => "back plane",
            Self::CentralStripWeighting { .. } => "central strip (weighting)",
            Self::NeighbourStripWeighting { .. } => "neighbour strip (weighting)",
            Self::BackPlaneWeighting(_) => "back plane (weighting)",
        }
    }
}

#[inline]
fn on_front_face(x: &Point2<f64>) -> bool {
    x.y < BOUNDARY_EPS
}

#[inline]
fn beyond(y: f64, level: f64) -> bool {
    y > level - BOUNDARY_EPS * level
}

#[inline]
fn below(y: f64, level: f64) -> bool {
    y < level - BOUNDARY_EPS * level
}

/// Closed lateral window widened by a tolerance scaled to the coordinate
/// magnitude, so both end vertices are kept.
#[inline]
fn laterally_within(bounds: &DomainBounds, x: f64) -> bool {
    let tol = BOUNDARY_EPS * bounds.x_min.abs().max(bounds.x_max.abs()).max(1.0);
    x >= bounds.x_min - tol && x <= bounds.x_max + tol
}

// Windows never reach past their own pitch cell, so only the cell under `x`
// and its two neighbours can hold it.
fn any_neighbour_contains(strips: &StripGeometry, x: f64) -> bool {
    let cell = (x / strips.pitch()).floor();
    if !cell.is_finite() {
        return false;
    }
    let cell = cell as i64;
    let count = i64::from(strips.strip_count());
    let central = i64::from(strips.index());
    (cell.saturating_sub(1)..=cell.saturating_add(1))
        .filter(|&slot| (0..count).contains(&slot) && slot != central)
        .any(|slot| strips.window_contains(slot as u32, x))
}

/// Identifies the right lateral face with the left one.
///
/// The left face (`x = 0`) is the target domain; `map` sends points on the
/// right face onto it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeriodicLateral {
    pub bounds: DomainBounds,
}

impl PeriodicLateral {
    pub fn new(bounds: DomainBounds) -> Self {
        Self { bounds }
    }

    pub fn inside(&self, x: &Point2<f64>, _on_boundary: bool) -> bool {
        x.x.abs() < BOUNDARY_EPS
    }

    pub fn map(&self, x: &Point2<f64>) -> Point2<f64> {
        Point2::new(x.x - self.bounds.x_max, x.y)
    }
}
