//! Cross-section properties for frame elements
//!
//! Axes follow the element's local frame: `iz` governs bending in the local
//! x-y plane (deflection along local y), `iy` governs bending in the local
//! x-z plane.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Cross-section properties
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Cross-sectional area in m²
    pub a: f64,
    /// Moment of inertia about local y-axis in m⁴
    pub iy: f64,
    /// Moment of inertia about local z-axis in m⁴
    pub iz: f64,
    /// Torsional constant in m⁴
    pub j: f64,
}

impl Section {
    /// Create a new section with basic properties
    pub fn new(a: f64, iy: f64, iz: f64, j: f64) -> Self {
        Self { a, iy, iz, j }
    }

    /// Rectangular section. `width` is measured along local z, `depth` along
    /// local y (the orientation vector).
    pub fn rectangular(width: f64, depth: f64) -> Self {
        let a = width * depth;
        let iz = width * depth.powi(3) / 12.0;
        let iy = depth * width.powi(3) / 12.0;

        // Saint-Venant approximation for a solid rectangle
        let (long, short) = if width > depth { (width, depth) } else { (depth, width) };
        let j = long * short.powi(3) / 3.0 * (1.0 - 0.63 * short / long);

        Self { a, iy, iz, j }
    }

    /// Solid circular section
    pub fn circular(diameter: f64) -> Self {
        let r = diameter / 2.0;
        let i = PI * r.powi(4) / 4.0;
        Self {
            a: PI * r.powi(2),
            iy: i,
            iz: i,
            j: 2.0 * i,
        }
    }

    /// Hollow circular (pipe) section
    pub fn pipe(outer_diameter: f64, wall_thickness: f64) -> Self {
        let r_o = outer_diameter / 2.0;
        let r_i = r_o - wall_thickness;
        let i = PI * (r_o.powi(4) - r_i.powi(4)) / 4.0;
        Self {
            a: PI * (r_o.powi(2) - r_i.powi(2)),
            iy: i,
            iz: i,
            j: 2.0 * i,
        }
    }
}
