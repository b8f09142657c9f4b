//! The integration object: camera, lights and shapes grouped by program.
//!
//! [`Scene`] is the CPU-side truth about what is on screen. Once per frame
//! [`Scene::render`] walks its program groups in insertion order and brings the
//! GPU uniform state in line with it:
//!
//! 1. bind the group's program (once per group)
//! 2. push view, projection and eye position
//! 3. push the light arrays (lit groups only)
//! 4. per shape: push transform and material, then draw

use crate::{
    camera::{Camera, Projection},
    data_structures::{
        light::{Light, upload_lights},
        shape::Shape,
    },
    gpu::Program,
    render::Renderer,
};

/// How a program group consumes scene state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Full material and light upload.
    Lit,
    /// Only `u_model` and `u_colour` (the material's diffuse colour).
    Unlit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId {
    program: ProgramId,
    index: usize,
}

impl ShapeId {
    pub fn program(&self) -> ProgramId {
        self.program
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightId(usize);

#[derive(Debug)]
struct RenderGroup {
    program: Program,
    shading: Shading,
    shapes: Vec<Shape>,
}

#[derive(Debug)]
pub struct Scene {
    pub camera: Camera,
    pub projection: Projection,
    lights: Vec<Light>,
    groups: Vec<RenderGroup>,
}

impl Scene {
    pub fn new(camera: Camera, projection: Projection) -> Self {
        Self {
            camera,
            projection,
            lights: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Register a program. Groups render in the order they were added.
    pub fn add_program(&mut self, program: Program, shading: Shading) -> ProgramId {
        self.groups.push(RenderGroup {
            program,
            shading,
            shapes: Vec::new(),
        });
        ProgramId(self.groups.len() - 1)
    }

    /// # Panics
    ///
    /// If the id was not returned by this scene's [`Scene::add_program`].
    pub fn program(&self, id: ProgramId) -> &Program {
        &self.groups[id.0].program
    }

    /// # Panics
    ///
    /// If the id was not returned by this scene's [`Scene::add_program`].
    pub fn add_shape(&mut self, program: ProgramId, shape: Shape) -> ShapeId {
        let shapes = &mut self.groups[program.0].shapes;
        shapes.push(shape);
        ShapeId {
            program,
            index: shapes.len() - 1,
        }
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.groups.get(id.program.0)?.shapes.get(id.index)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.groups.get_mut(id.program.0)?.shapes.get_mut(id.index)
    }

    /// # Panics
    ///
    /// If the id was not returned by this scene's [`Scene::add_program`].
    pub fn shapes(&self, program: ProgramId) -> &[Shape] {
        &self.groups[program.0].shapes
    }

    pub fn shape_count(&self) -> usize {
        self.groups.iter().map(|g| g.shapes.len()).sum()
    }

    pub fn add_light(&mut self, light: Light) -> LightId {
        self.lights.push(light);
        LightId(self.lights.len() - 1)
    }

    pub fn light(&self, id: LightId) -> Option<&Light> {
        self.lights.get(id.0)
    }

    pub fn light_mut(&mut self, id: LightId) -> Option<&mut Light> {
        self.lights.get_mut(id.0)
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Synchronise uniforms and issue every draw call of the frame.
    pub fn render(&self, renderer: &mut Renderer) {
        let view = self.camera.view_matrix();
        let projection = self.projection.matrix();

        for group in self.groups.iter().filter(|g| !g.shapes.is_empty()) {
            let program = &group.program;
            program.bind();
            program.set_mat4("u_view", view);
            program.set_mat4("u_projection", projection);
            if group.shading == Shading::Lit {
                program.set_vec3("u_view_pos", self.camera.position);
                upload_lights(program, &self.lights);
            }

            for shape in &group.shapes {
                match group.shading {
                    Shading::Lit => shape.apply_uniforms(program),
                    Shading::Unlit => {
                        program.set_mat4("u_model", shape.transform.to_matrix());
                        program.set_vec3("u_colour", shape.material.diffuse);
                    }
                }
                renderer.record(shape.draw());
            }
        }
    }
}
