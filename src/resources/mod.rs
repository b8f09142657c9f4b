//! Loading meshes, textures and shader programs from asset files.
//!
//! Every path handed to [`Assets`] is relative to its root directory, which
//! comes from [`Config::asset_dir`](crate::config::Config). Assets are read once
//! at startup; nothing here watches or reloads files.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

pub mod mesh;
pub mod shader;
pub mod texture;

#[derive(Debug, Clone)]
pub struct Assets {
    root: PathBuf,
}

impl Assets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.root.join(file_name)
    }

    pub fn load_string(&self, file_name: impl AsRef<Path>) -> anyhow::Result<String> {
        let path = self.path(file_name);
        log::debug!("reading {}", path.display());
        std::fs::read_to_string(&path).with_context(|| format!("could not read {}", path.display()))
    }

    pub fn load_binary(&self, file_name: impl AsRef<Path>) -> anyhow::Result<Vec<u8>> {
        let path = self.path(file_name);
        log::debug!("reading {}", path.display());
        std::fs::read(&path).with_context(|| format!("could not read {}", path.display()))
    }
}
