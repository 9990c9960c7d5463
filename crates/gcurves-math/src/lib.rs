pub mod aabb;

pub use glam::{DVec3, DVec4};
pub use aabb::Aabb3;

pub type Point3 = DVec3;
pub type Vector3 = DVec3;
/// Homogeneous point: position scaled by weight in xyz, weight in w.
pub type Homo4 = DVec4;
