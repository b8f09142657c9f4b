use std::rc::Rc;

use crate::gpu::{GpuError, Program, Texture};

/// Texture slots a material can sample from; `u_textures[0..4]` in the shader.
pub const MAX_MATERIAL_TEXTURES: usize = 4;

/// Surface description pushed to the program before a shape is drawn.
///
/// The base colour comes from the ambient/diffuse/specular terms. When textures
/// are present they are averaged and mixed over the diffuse colour by
/// `texture_blend` (0 = colour only, 1 = texture only).
#[derive(Clone, Debug)]
pub struct Material {
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
    texture_blend: f32,
    textures: Vec<Rc<Texture>>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: [0.1, 0.1, 0.1],
            diffuse: [0.8, 0.8, 0.8],
            specular: [0.5, 0.5, 0.5],
            shininess: 32.0,
            texture_blend: 0.0,
            textures: Vec::new(),
        }
    }
}

impl Material {
    pub fn coloured(colour: [f32; 3]) -> Self {
        Self {
            ambient: colour.map(|c| c * 0.1),
            diffuse: colour,
            ..Default::default()
        }
    }

    /// A material sampling `texture` only.
    pub fn textured(texture: Rc<Texture>) -> Self {
        Self {
            diffuse: [1.0, 1.0, 1.0],
            texture_blend: 1.0,
            textures: vec![texture],
            ..Default::default()
        }
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_texture_blend(mut self, blend: f32) -> Self {
        self.set_texture_blend(blend);
        self
    }

    pub fn set_texture_blend(&mut self, blend: f32) {
        self.texture_blend = blend.clamp(0.0, 1.0);
    }

    pub fn texture_blend(&self) -> f32 {
        self.texture_blend
    }

    pub fn add_texture(&mut self, texture: Rc<Texture>) -> Result<(), GpuError> {
        if self.textures.len() >= MAX_MATERIAL_TEXTURES {
            return Err(GpuError::TooManyTextures {
                max: MAX_MATERIAL_TEXTURES,
            });
        }
        self.textures.push(texture);
        Ok(())
    }

    pub fn textures(&self) -> &[Rc<Texture>] {
        &self.textures
    }

    /// Write the material into `program`'s uniform table and bind its textures
    /// to units `0..n`. The program must be bound.
    pub fn apply(&self, program: &Program) {
        program.set_vec3("u_material.ambient", self.ambient);
        program.set_vec3("u_material.diffuse", self.diffuse);
        program.set_vec3("u_material.specular", self.specular);
        program.set_f32("u_material.shininess", self.shininess);
        program.set_f32("u_material.texture_blend", self.texture_blend);
        program.set_i32("u_material.texture_count", self.textures.len() as i32);
        for (unit, texture) in self.textures.iter().enumerate() {
            texture.bind(unit as u32);
            program.set_i32(&format!("u_textures[{unit}]"), unit as i32);
        }
    }
}
