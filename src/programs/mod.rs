//! Built-in shader programs.
//!
//! - `phong` is the lit, textured Blinn-Phong program every scene shape uses by default
//! - `light` draws light markers unlit in the light's colour
//!
//! Both consume the [`Vertex`](crate::data_structures::vertex::Vertex) layout.

pub mod light;
pub mod phong;
