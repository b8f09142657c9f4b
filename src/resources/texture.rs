use std::path::Path;

use anyhow::Context as _;

use crate::gpu::{Gpu, Texture, TextureOptions};

use super::Assets;

impl Assets {
    /// Decode an image file and upload it as a texture.
    pub fn load_texture(
        &self,
        gpu: &Gpu,
        file_name: impl AsRef<Path>,
        options: TextureOptions,
    ) -> anyhow::Result<Texture> {
        let file_name = file_name.as_ref();
        let data = self.load_binary(file_name)?;
        let label = file_name.to_string_lossy();
        Texture::from_bytes(gpu, &label, &data, options)
            .with_context(|| format!("could not load texture {}", file_name.display()))
    }
}
