use crate::stl::MeshGeometry;
use glam::Vec3;
use thiserror::Error;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Smallest box containing every point, or `None` for no points.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bb = Aabb {
            min: first,
            max: first,
        };
        for p in iter {
            bb.min = bb.min.min(p);
            bb.max = bb.max.max(p);
        }
        Some(bb)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn max_dimension(&self) -> f32 {
        self.size().max_element()
    }

    /// Box enclosing this one after an affine transform.
    pub fn transformed(&self, m: &glam::Mat4) -> Aabb {
        let corners = (0..8).map(|i| {
            let p = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            m.transform_point3(p)
        });
        // Eight corners are always present.
        Aabb::from_points(corners).unwrap_or(*self)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FitError {
    #[error("geometry has no vertices")]
    NoVertices,
    #[error("geometry bounding box is degenerate (largest dimension {0})")]
    Degenerate(f32),
}

/// Outcome of fitting a geometry into a target size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelFit {
    /// Translation already applied to the vertices.
    pub recentre: Vec3,
    /// Uniform scale for the mesh node.
    pub scale: f32,
}

/// Move the geometry's box centre to the origin and compute the uniform
/// scale that makes the largest box dimension equal `target_size`.
pub fn fit_to_size(geometry: &mut MeshGeometry, target_size: f32) -> Result<ModelFit, FitError> {
    let bb = Aabb::from_points(geometry.positions()).ok_or(FitError::NoVertices)?;
    let max_dim = bb.max_dimension();
    if !max_dim.is_finite() || max_dim <= f32::EPSILON {
        return Err(FitError::Degenerate(max_dim));
    }
    let recentre = -bb.center();
    geometry.translate(recentre);
    Ok(ModelFit {
        recentre,
        scale: target_size / max_dim,
    })
}
