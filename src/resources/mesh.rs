//! Wavefront OBJ/MTL loading through `tobj`.
//!
//! Faces are triangulated and positions, normals and texture coordinates are
//! unified under a single index so every OBJ object maps onto one indexed
//! [`Mesh`]. Objects without normals get smooth normals computed from their
//! faces.

use std::{
    collections::HashMap,
    io::{BufReader, Cursor},
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;

use crate::{
    data_structures::{material::Material, mesh::Mesh, shape::Shape, vertex::Vertex},
    gpu::{Gpu, Texture, TextureOptions},
};

use super::Assets;

/// Surface properties read from an MTL file, before any texture is uploaded.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjMaterial {
    pub name: String,
    pub ambient: Option<[f32; 3]>,
    pub diffuse: Option<[f32; 3]>,
    pub specular: Option<[f32; 3]>,
    pub shininess: Option<f32>,
    pub diffuse_texture: Option<String>,
}

impl ObjMaterial {
    /// Build a [`Material`], keeping defaults for everything the MTL left out.
    pub fn to_material(&self, diffuse_texture: Option<Rc<Texture>>) -> Material {
        let defaults = Material::default();
        let mut material = match diffuse_texture {
            Some(texture) => Material::textured(texture),
            None => defaults.clone(),
        };
        material.ambient = self.ambient.unwrap_or(defaults.ambient);
        material.diffuse = self.diffuse.unwrap_or(material.diffuse);
        material.specular = self.specular.unwrap_or(defaults.specular);
        // MTL allows Ns = 0, which turns the specular term into a constant.
        material.shininess = self.shininess.filter(|s| *s > 0.0).unwrap_or(defaults.shininess);
        material
    }
}

impl From<tobj::Material> for ObjMaterial {
    fn from(m: tobj::Material) -> Self {
        Self {
            name: m.name,
            ambient: m.ambient,
            diffuse: m.diffuse,
            specular: m.specular,
            shininess: m.shininess,
            diffuse_texture: m.diffuse_texture,
        }
    }
}

/// Everything one OBJ file describes.
#[derive(Clone, Debug, Default)]
pub struct ObjScene {
    pub meshes: Vec<Mesh>,
    pub materials: Vec<ObjMaterial>,
}

impl ObjScene {
    pub fn material(&self, name: &str) -> Option<&ObjMaterial> {
        self.materials.iter().find(|m| m.name == name)
    }
}

/// Parse OBJ text. `load_mtl` is asked for the text of each `mtllib` the file
/// references; returning `None` leaves the objects without materials.
pub fn parse_obj(
    obj_text: &str,
    load_mtl: impl Fn(&Path) -> Option<String>,
) -> anyhow::Result<ObjScene> {
    let mut obj_reader = BufReader::new(Cursor::new(obj_text));
    let (models, obj_materials) = tobj::load_obj_buf(
        &mut obj_reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |p| match load_mtl(p) {
            Some(text) => tobj::load_mtl_buf(&mut BufReader::new(Cursor::new(text))),
            None => Err(tobj::LoadError::OpenFileFailed),
        },
    )
    .context("malformed OBJ data")?;

    let materials: Vec<ObjMaterial> = match obj_materials {
        Ok(materials) => materials.into_iter().map(ObjMaterial::from).collect(),
        Err(e) => {
            log::warn!("OBJ materials could not be loaded ({}), using defaults", e);
            Vec::new()
        }
    };

    let meshes = models
        .into_iter()
        .filter(|m| !m.mesh.positions.is_empty())
        .map(|m| {
            let vertex_count = m.mesh.positions.len() / 3;
            let has_normals = m.mesh.normals.len() >= vertex_count * 3;
            let vertices = (0..vertex_count)
                .map(|i| Vertex {
                    position: [
                        m.mesh.positions[i * 3],
                        m.mesh.positions[i * 3 + 1],
                        m.mesh.positions[i * 3 + 2],
                    ],
                    normal: [
                        m.mesh.normals.get(i * 3).map_or(0.0, |f| *f),
                        m.mesh.normals.get(i * 3 + 1).map_or(0.0, |f| *f),
                        m.mesh.normals.get(i * 3 + 2).map_or(0.0, |f| *f),
                    ],
                    tex_coords: [
                        m.mesh.texcoords.get(i * 2).map_or(0.0, |f| *f),
                        m.mesh.texcoords.get(i * 2 + 1).map_or(0.0, |f| *f),
                    ],
                })
                .collect::<Vec<_>>();

            let mut mesh = Mesh::new(m.name, vertices, Some(m.mesh.indices));
            if !has_normals {
                mesh.compute_smooth_normals();
            }
            match m.mesh.material_id.and_then(|id| materials.get(id)) {
                Some(material) => mesh.with_material(material.name.clone()),
                None => mesh,
            }
        })
        .collect();

    Ok(ObjScene { meshes, materials })
}

impl Assets {
    /// Read and parse an OBJ file; `mtllib` paths resolve next to it.
    pub fn load_obj(&self, file_name: impl AsRef<Path>) -> anyhow::Result<ObjScene> {
        let file_name = file_name.as_ref();
        let obj_text = self.load_string(file_name)?;
        let directory = file_name.parent().map(Path::to_path_buf).unwrap_or_default();
        let scene = parse_obj(&obj_text, |mtl| match self.load_string(directory.join(mtl)) {
            Ok(text) => Some(text),
            Err(e) => {
                log::warn!("{:#}", e);
                None
            }
        })
        .with_context(|| format!("could not parse {}", file_name.display()))?;
        log::info!(
            "loaded {} ({} meshes, {} materials)",
            file_name.display(),
            scene.meshes.len(),
            scene.materials.len()
        );
        Ok(scene)
    }

    /// Load an OBJ file into ready-to-draw shapes, one per object. Textures
    /// referenced by several materials are uploaded once and shared.
    pub fn load_shapes(&self, gpu: &Gpu, file_name: impl AsRef<Path>) -> anyhow::Result<Vec<Shape>> {
        let file_name = file_name.as_ref();
        let scene = self.load_obj(file_name)?;
        let directory: PathBuf = file_name.parent().map(Path::to_path_buf).unwrap_or_default();
        let mut textures: HashMap<String, Rc<Texture>> = HashMap::new();

        let mut shapes = Vec::with_capacity(scene.meshes.len());
        for mesh in scene.meshes.iter() {
            let material = match mesh.material().and_then(|name| scene.material(name)) {
                Some(obj_material) => {
                    let texture = match &obj_material.diffuse_texture {
                        Some(texture_name) => Some(match textures.get(texture_name) {
                            Some(texture) => texture.clone(),
                            None => {
                                let texture = Rc::new(self.load_texture(
                                    gpu,
                                    directory.join(texture_name),
                                    TextureOptions::default(),
                                )?);
                                textures.insert(texture_name.clone(), texture.clone());
                                texture
                            }
                        }),
                        None => None,
                    };
                    obj_material.to_material(texture)
                }
                None => Material::default(),
            };
            shapes.push(Shape::new(gpu, mesh.clone(), material)?);
        }
        Ok(shapes)
    }
}
