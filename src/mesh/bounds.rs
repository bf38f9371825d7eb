//! Axis-aligned bounds and size normalization

use crate::rasterizer::Vec3;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(point1: Vec3, point2: Vec3) -> Self {
        Self {
            min: point1.min(point2),
            max: point1.max(point2),
        }
    }

    /// Smallest box containing every point, or None for an empty slice
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        Some(points.iter().fold(Self::new(first, first), |b, p| Self {
            min: b.min.min(*p),
            max: b.max.max(*p),
        }))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Full extent along each axis (max - min)
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn max_dimension(&self) -> f32 {
        self.size().max_element()
    }
}

/// Transform applied by `normalize_to_size`: `p' = (p - center) * scale`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    pub center: Vec3,
    pub scale: f32,
}

/// Center points on the origin and scale them uniformly so the largest
/// bounding-box extent equals `target_size`. Flat or point-like input
/// (zero extent) is centered but left unscaled.
pub fn normalize_to_size(points: &mut [Vec3], target_size: f32) -> Option<Normalization> {
    let bounds = Aabb::from_points(points)?;
    let center = bounds.center();
    let max_dim = bounds.max_dimension();
    let scale = if max_dim > f32::EPSILON && max_dim.is_finite() {
        target_size / max_dim
    } else {
        1.0
    };

    for p in points.iter_mut() {
        *p = (*p - center) * scale;
    }

    Some(Normalization { center, scale })
}
