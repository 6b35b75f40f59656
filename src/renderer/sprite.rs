//! Sprite instances for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

use super::SpriteRenderer;
use crate::sim::Sprite;

/// Particles are drawn as fixed-size quads
pub const PARTICLE_SCALE: f32 = 10.0;

/// Unit quad vertex: position and texture coordinate share the same range
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl QuadVertex {
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            position: [x, y],
            uv: [x, y],
        }
    }
}

/// Two triangles covering (0,0)..(1,1)
pub const QUAD_VERTICES: [QuadVertex; 6] = [
    QuadVertex::new(0.0, 1.0),
    QuadVertex::new(1.0, 0.0),
    QuadVertex::new(0.0, 0.0),
    QuadVertex::new(0.0, 1.0),
    QuadVertex::new(1.0, 1.0),
    QuadVertex::new(1.0, 0.0),
];

/// Per-sprite GPU data (must match shader)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

/// One recorded draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub sprite: Sprite,
    pub instance: SpriteInstance,
    /// Particles blend additively
    pub additive: bool,
}

/// Orthographic projection with the origin at the top-left and y pointing down
pub fn projection(width: f32, height: f32) -> Mat4 {
    Mat4::orthographic_rh_gl(0.0, width, height, 0.0, -1.0, 1.0)
}

/// Model matrix placing the unit quad at `position` with `size`,
/// rotated by `rotation` degrees around its centre
pub fn model_matrix(position: Vec2, size: Vec2, rotation: f32) -> Mat4 {
    let half = (size * 0.5).extend(0.0);
    Mat4::from_translation(position.extend(0.0))
        * Mat4::from_translation(half)
        * Mat4::from_quat(Quat::from_rotation_z(rotation.to_radians()))
        * Mat4::from_translation(-half)
        * Mat4::from_scale(size.extend(1.0))
}

/// Records draws in submission order so a backend can upload them in one go
#[derive(Debug, Default, Clone)]
pub struct SpriteBatch {
    draws: Vec<SpriteDraw>,
}

impl SpriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.draws.clear();
    }

    pub fn draws(&self) -> &[SpriteDraw] {
        &self.draws
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    /// Instance data for a single sprite handle, in submission order
    pub fn instances_for(&self, sprite: Sprite) -> Vec<SpriteInstance> {
        self.draws
            .iter()
            .filter(|d| d.sprite == sprite)
            .map(|d| d.instance)
            .collect()
    }

    /// Raw instance bytes for upload, in submission order
    pub fn instance_bytes(&self) -> Vec<u8> {
        let instances: Vec<SpriteInstance> = self.draws.iter().map(|d| d.instance).collect();
        bytemuck::cast_slice(&instances).to_vec()
    }
}

impl SpriteRenderer for SpriteBatch {
    fn draw_sprite(&mut self, sprite: Sprite, position: Vec2, size: Vec2, rotation: f32, color: Vec3) {
        self.draws.push(SpriteDraw {
            sprite,
            instance: SpriteInstance {
                model: model_matrix(position, size, rotation).to_cols_array_2d(),
                color: color.extend(1.0).to_array(),
            },
            additive: false,
        });
    }

    fn draw_particle(&mut self, position: Vec2, color: Vec4) {
        self.draws.push(SpriteDraw {
            sprite: Sprite::Particle,
            instance: SpriteInstance {
                model: model_matrix(position, Vec2::splat(PARTICLE_SCALE), 0.0).to_cols_array_2d(),
                color: color.to_array(),
            },
            additive: true,
        });
    }
}
