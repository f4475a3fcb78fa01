//! Material properties

use serde::{Deserialize, Serialize};

/// Linear elastic material for frame elements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Modulus of elasticity (Young's modulus) in Pa
    pub e: f64,
    /// Shear modulus in Pa
    pub g: f64,
}

impl Material {
    /// Create a new material from E and G
    pub fn new(e: f64, g: f64) -> Self {
        Self { e, g }
    }

    /// Create an isotropic material from E and Poisson's ratio
    /// G is calculated as E / (2 * (1 + nu))
    pub fn isotropic(e: f64, nu: f64) -> Self {
        Self::new(e, e / (2.0 * (1.0 + nu)))
    }

    /// Structural steel
    pub fn steel() -> Self {
        Self::new(200e9, 77e9)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::steel()
    }
}
