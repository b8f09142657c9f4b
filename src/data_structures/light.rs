//! Light sources and their upload into a program's light arrays.
//!
//! All three kinds share one colour triple. They differ in where the light
//! comes from:
//!
//! - [`Light::Directional`] lights everything from one direction (the sun)
//! - [`Light::Point`] radiates from a position and fades with distance
//! - [`Light::Spot`] is a point light restricted to a cone
//!
//! Programs receive one array per kind (`u_dir_lights`, `u_point_lights`,
//! `u_spot_lights`) plus a count each, capped at [`MAX_LIGHTS_PER_KIND`].

use cgmath::{Deg, InnerSpace, Point3, Vector3};

use crate::gpu::Program;

pub const MAX_LIGHTS_PER_KIND: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightColour {
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
}

impl LightColour {
    /// Derive the usual ambient/diffuse/specular split from a single colour.
    pub fn from_rgb(rgb: [f32; 3]) -> Self {
        Self {
            ambient: rgb.map(|c| c * 0.1),
            diffuse: rgb,
            specular: [1.0, 1.0, 1.0],
        }
    }
}

impl Default for LightColour {
    fn default() -> Self {
        Self::from_rgb([1.0, 1.0, 1.0])
    }
}

/// `1 / (constant + linear * d + quadratic * d^2)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Attenuation {
    /// Coefficients that fall off to roughly nothing around `range` units.
    pub fn for_range(range: f32) -> Self {
        let range = range.max(1.0);
        Self {
            constant: 1.0,
            linear: 4.5 / range,
            quadratic: 75.0 / (range * range),
        }
    }

    pub fn at(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

impl Default for Attenuation {
    fn default() -> Self {
        Self::for_range(50.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vector3<f32>,
    pub colour: LightColour,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Point3<f32>,
    pub colour: LightColour,
    pub attenuation: Attenuation,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotLight {
    pub position: Point3<f32>,
    pub direction: Vector3<f32>,
    pub colour: LightColour,
    pub attenuation: Attenuation,
    /// Full intensity inside this half-angle.
    pub cutoff: Deg<f32>,
    /// Zero intensity outside this half-angle.
    pub outer_cutoff: Deg<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    Directional(DirectionalLight),
    Point(PointLight),
    Spot(SpotLight),
}

impl Light {
    pub fn directional(direction: impl Into<Vector3<f32>>, colour: LightColour) -> Self {
        Light::Directional(DirectionalLight {
            direction: direction.into(),
            colour,
        })
    }

    pub fn point(position: impl Into<Point3<f32>>, colour: LightColour) -> Self {
        Light::Point(PointLight {
            position: position.into(),
            colour,
            attenuation: Attenuation::default(),
        })
    }

    pub fn spot(
        position: impl Into<Point3<f32>>,
        direction: impl Into<Vector3<f32>>,
        colour: LightColour,
        cutoff: Deg<f32>,
        outer_cutoff: Deg<f32>,
    ) -> Self {
        // An inner cone wider than the outer one would divide by a negative epsilon.
        let outer_cutoff = if outer_cutoff < cutoff { cutoff } else { outer_cutoff };
        Light::Spot(SpotLight {
            position: position.into(),
            direction: direction.into(),
            colour,
            attenuation: Attenuation::default(),
            cutoff,
            outer_cutoff,
        })
    }

    pub fn colour(&self) -> &LightColour {
        match self {
            Light::Directional(light) => &light.colour,
            Light::Point(light) => &light.colour,
            Light::Spot(light) => &light.colour,
        }
    }

    pub fn colour_mut(&mut self) -> &mut LightColour {
        match self {
            Light::Directional(light) => &mut light.colour,
            Light::Point(light) => &mut light.colour,
            Light::Spot(light) => &mut light.colour,
        }
    }

    /// World position for lights that have one.
    pub fn position(&self) -> Option<Point3<f32>> {
        match self {
            Light::Directional(_) => None,
            Light::Point(light) => Some(light.position),
            Light::Spot(light) => Some(light.position),
        }
    }

    pub fn set_position(&mut self, position: impl Into<Point3<f32>>) {
        match self {
            Light::Directional(_) => (),
            Light::Point(light) => light.position = position.into(),
            Light::Spot(light) => light.position = position.into(),
        }
    }

    pub fn set_direction(&mut self, direction: impl Into<Vector3<f32>>) {
        match self {
            Light::Directional(light) => light.direction = direction.into(),
            Light::Point(_) => (),
            Light::Spot(light) => light.direction = direction.into(),
        }
    }
}

fn normalized(direction: Vector3<f32>) -> [f32; 3] {
    if direction.magnitude2() > f32::EPSILON {
        direction.normalize().into()
    } else {
        [0.0, -1.0, 0.0]
    }
}

fn upload_colour(program: &Program, prefix: &str, colour: &LightColour) {
    program.set_vec3(&format!("{prefix}.ambient"), colour.ambient);
    program.set_vec3(&format!("{prefix}.diffuse"), colour.diffuse);
    program.set_vec3(&format!("{prefix}.specular"), colour.specular);
}

fn upload_attenuation(program: &Program, prefix: &str, attenuation: &Attenuation) {
    program.set_f32(&format!("{prefix}.constant"), attenuation.constant);
    program.set_f32(&format!("{prefix}.linear"), attenuation.linear);
    program.set_f32(&format!("{prefix}.quadratic"), attenuation.quadratic);
}

/// Write `lights` into the light arrays of the bound `program`.
///
/// Lights beyond [`MAX_LIGHTS_PER_KIND`] of one kind are skipped.
pub fn upload_lights<'a>(program: &Program, lights: impl IntoIterator<Item = &'a Light>) {
    let mut directional = 0usize;
    let mut point = 0usize;
    let mut spot = 0usize;
    let mut skipped = 0usize;

    for light in lights {
        match light {
            Light::Directional(light) if directional < MAX_LIGHTS_PER_KIND => {
                let prefix = format!("u_dir_lights[{directional}]");
                program.set_vec3(&format!("{prefix}.direction"), normalized(light.direction));
                upload_colour(program, &prefix, &light.colour);
                directional += 1;
            }
            Light::Point(light) if point < MAX_LIGHTS_PER_KIND => {
                let prefix = format!("u_point_lights[{point}]");
                program.set_vec3(&format!("{prefix}.position"), light.position);
                upload_colour(program, &prefix, &light.colour);
                upload_attenuation(program, &prefix, &light.attenuation);
                point += 1;
            }
            Light::Spot(light) if spot < MAX_LIGHTS_PER_KIND => {
                let prefix = format!("u_spot_lights[{spot}]");
                program.set_vec3(&format!("{prefix}.position"), light.position);
                program.set_vec3(&format!("{prefix}.direction"), normalized(light.direction));
                program.set_f32(&format!("{prefix}.cutoff"), cgmath::Angle::cos(light.cutoff));
                program.set_f32(
                    &format!("{prefix}.outer_cutoff"),
                    cgmath::Angle::cos(light.outer_cutoff),
                );
                upload_colour(program, &prefix, &light.colour);
                upload_attenuation(program, &prefix, &light.attenuation);
                spot += 1;
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        log::debug!(
            "{} light(s) skipped, programs hold at most {} of each kind",
            skipped,
            MAX_LIGHTS_PER_KIND
        );
    }
    program.set_i32("u_num_dir_lights", directional as i32);
    program.set_i32("u_num_point_lights", point as i32);
    program.set_i32("u_num_spot_lights", spot as i32);
}
