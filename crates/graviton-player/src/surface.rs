//! Floor classification and contact-plane projection.

use glam::Vec3;

/// Returns `true` when `contact_normal` is within `max_angle_degrees` of
/// `floor_normal`. The comparison is strict: a contact exactly at the limit
/// is a wall.
pub fn is_floor(contact_normal: Vec3, floor_normal: Vec3, max_angle_degrees: f32) -> bool {
    let cos = contact_normal
        .normalize_or_zero()
        .dot(floor_normal.normalize_or_zero())
        .clamp(-1.0, 1.0);
    cos.acos().to_degrees() < max_angle_degrees
}

/// Removes the component of `v` along `normal`.
///
/// A degenerate normal leaves `v` unchanged.
pub fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    let len_sq = normal.length_squared();
    if len_sq < f32::EPSILON {
        return v;
    }
    v - normal * (v.dot(normal) / len_sq)
}
