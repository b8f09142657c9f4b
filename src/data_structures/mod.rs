//! Scene data: geometry, placement, surfaces and lights.
//!
//! - `vertex` is the POD vertex format and its attribute layout
//! - `mesh` holds immutable CPU geometry and primitive constructors
//! - `transform` turns translation/rotation/scale into model and normal matrices
//! - `material` holds surface colours, shininess and up to four textures
//! - `light` holds the directional/point/spot variants and their uniform upload
//! - `shape` ties a mesh, transform and material to a vertex array on the GPU

pub mod light;
pub mod material;
pub mod mesh;
pub mod shape;
pub mod transform;
pub mod vertex;
