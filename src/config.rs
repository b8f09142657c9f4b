//! Runtime configuration.
//!
//! [`Config::default`] describes the demo setup. [`Config::from_env`] applies
//! `GLINT_*` overrides on top of it so the binary can be tweaked without a
//! rebuild.

use std::path::PathBuf;

use anyhow::{Context as _, anyhow};

pub const ENV_ASSET_DIR: &str = "GLINT_ASSET_DIR";
pub const ENV_VSYNC: &str = "GLINT_VSYNC";
pub const ENV_WINDOW_SIZE: &str = "GLINT_WINDOW_SIZE";
pub const ENV_LOG: &str = "GLINT_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    /// Requested core profile version, `(major, minor)`.
    pub gl_version: (u8, u8),
    pub asset_dir: PathBuf,
    pub clear_colour: [f32; 4],
    pub camera_speed: f32,
    pub camera_sensitivity: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
    /// `env_logger` filter; `None` falls back to `RUST_LOG`.
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "glint".to_string(),
            width: 1280,
            height: 720,
            vsync: true,
            gl_version: (3, 3),
            asset_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets"),
            clear_colour: [0.05, 0.06, 0.08, 1.0],
            camera_speed: 4.0,
            camera_sensitivity: 2.0,
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
            log_filter: None,
        }
    }
}

impl Config {
    /// Defaults overridden by any `GLINT_*` variables set in the process
    /// environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Config::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();
        if let Some(dir) = lookup(ENV_ASSET_DIR) {
            config.asset_dir = PathBuf::from(dir);
        }
        if let Some(vsync) = lookup(ENV_VSYNC) {
            config.vsync = parse_bool(&vsync).with_context(|| format!("invalid {ENV_VSYNC}"))?;
        }
        if let Some(size) = lookup(ENV_WINDOW_SIZE) {
            let (width, height) =
                parse_size(&size).with_context(|| format!("invalid {ENV_WINDOW_SIZE}"))?;
            config.width = width;
            config.height = height;
        }
        if let Some(filter) = lookup(ENV_LOG) {
            config.log_filter = Some(filter);
        }
        Ok(config)
    }
}

fn parse_bool(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("expected a boolean, got '{other}'")),
    }
}

/// `WIDTHxHEIGHT`, both non-zero.
fn parse_size(value: &str) -> anyhow::Result<(u32, u32)> {
    let (width, height) = value
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let width: u32 = width.trim().parse().context("width is not a number")?;
    let height: u32 = height.trim().parse().context("height is not a number")?;
    if width == 0 || height == 0 {
        return Err(anyhow!("window size must be non-zero, got {width}x{height}"));
    }
    Ok((width, height))
}
