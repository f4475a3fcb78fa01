//! Element stiffness properties

use serde::{Deserialize, Serialize};

use super::{Material, Section};
use crate::math::Vec3;

/// Stiffness properties of one beam element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementProperty {
    /// Axial stiffness E·A
    #[serde(rename = "EA")]
    pub ea: f64,
    /// Bending stiffness about local y, E·Iy
    #[serde(rename = "EIy")]
    pub eiy: f64,
    /// Bending stiffness about local z, E·Iz
    #[serde(rename = "EIz")]
    pub eiz: f64,
    /// Torsional stiffness G·J
    #[serde(rename = "GJ")]
    pub gj: f64,
    /// Reference vector for the local y axis. Must not be parallel to the element.
    pub normal_vec: [f64; 3],
}

impl ElementProperty {
    /// Create from precomputed stiffness products
    pub fn new(ea: f64, eiy: f64, eiz: f64, gj: f64, normal_vec: [f64; 3]) -> Self {
        Self {
            ea,
            eiy,
            eiz,
            gj,
            normal_vec,
        }
    }

    /// Create from a material and a cross-section
    pub fn from_section(material: &Material, section: &Section, normal_vec: [f64; 3]) -> Self {
        Self::new(
            material.e * section.a,
            material.e * section.iy,
            material.e * section.iz,
            material.g * section.j,
            normal_vec,
        )
    }

    /// Orientation vector as a nalgebra vector
    pub fn normal(&self) -> Vec3 {
        Vec3::from(self.normal_vec)
    }
}
