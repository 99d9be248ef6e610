//! Inertia tensor calculation for box colliders

use glam::{DMat3, DQuat, DVec3};

/// Body-local inertia tensor.
///
/// With box extents this is the solid-cuboid tensor. Without them the tensor
/// falls back to `mass / 6` on the diagonal.
pub fn local_inertia_tensor(mass: f64, half_extents: Option<DVec3>) -> DMat3 {
    match half_extents {
        Some(extents) => cuboid_inertia(mass, extents),
        None => DMat3::from_diagonal(DVec3::splat(mass / 6.0)),
    }
}

/// Diagonal solid-cuboid tensor from half-extents: `I_xx = m (y² + z²) / 12`
/// and so on, with `x`, `y`, `z` the full edge lengths
pub fn cuboid_inertia(mass: f64, half_extents: DVec3) -> DMat3 {
    let DVec3 { x, y, z } = half_extents * 2.0;
    let factor = mass / 12.0;

    DMat3::from_diagonal(DVec3::new(
        factor * (y * y + z * z),
        factor * (x * x + z * z),
        factor * (x * x + y * y),
    ))
}

/// Orient a local tensor into world space.
///
/// This is a single left-multiplication `R * I`, not the similarity transform
/// `R * I * Rᵀ`. The two agree only for the identity orientation or an
/// isotropic tensor.
pub fn world_inertia_tensor(local: DMat3, orientation: DQuat) -> DMat3 {
    DMat3::from_quat(orientation) * local
}

/// Invert a tensor, `None` when it is singular or not finite
pub fn try_inverse(tensor: DMat3) -> Option<DMat3> {
    let det = tensor.determinant();
    if !det.is_finite() || det.abs() < f64::EPSILON {
        return None;
    }
    let inverse = tensor.inverse();
    inverse.is_finite().then_some(inverse)
}
