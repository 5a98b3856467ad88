use glam::Vec3;
use rand::Rng;

/// Appearance of one point cloud.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarStyle {
    pub color: [f32; 3],
    pub size: f32,
    pub opacity: f32,
    /// World-space size when true, pixel size otherwise.
    pub size_attenuation: bool,
}

/// Static point cloud uniformly sampled in a cube centred on the origin.
#[derive(Clone, Debug)]
pub struct StarField {
    pub positions: Vec<[f32; 3]>,
    pub style: StarStyle,
}

impl StarField {
    /// `extent` is the full cube side; coordinates land in `[-extent/2, extent/2)`.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        count: usize,
        extent: f32,
        style: StarStyle,
    ) -> Self {
        let positions = (0..count)
            .map(|_| {
                let v = Vec3::new(
                    rng.gen::<f32>() - 0.5,
                    rng.gen::<f32>() - 0.5,
                    rng.gen::<f32>() - 0.5,
                ) * extent;
                v.to_array()
            })
            .collect();
        Self { positions, style }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
