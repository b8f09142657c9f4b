//! GPU textures and texture creation utilities.
//!
//! [`Texture`] wraps a 2D texture object. Textures are the one resource shared
//! between owners: materials hold them through `Rc<Texture>` so a single upload
//! can be sampled by any number of shapes. The handle is released when the last
//! reference goes away.

use image::GenericImageView;

use super::{FilterMode, Gpu, GpuError, PixelFormat, RawHandle, SamplerParams, WrapMode};

/// Creation options for a texture upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureOptions {
    /// Store the pixels as sRGB so sampling returns linear values. Only useful
    /// when the framebuffer converts back; the built-in programs expect `false`.
    pub srgb: bool,
    pub sampler: SamplerParams,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self {
            srgb: false,
            sampler: SamplerParams::default(),
        }
    }
}

impl TextureOptions {
    pub fn srgb() -> Self {
        Self {
            srgb: true,
            ..Default::default()
        }
    }

    /// Nearest filtering without mipmaps, for pixel art and generated patterns.
    pub fn pixelated() -> Self {
        Self {
            srgb: false,
            sampler: SamplerParams {
                min_filter: FilterMode::Nearest,
                mag_filter: FilterMode::Nearest,
                wrap: WrapMode::Repeat,
                mipmaps: false,
            },
        }
    }
}

pub struct Texture {
    gpu: Gpu,
    handle: RawHandle,
    width: u32,
    height: u32,
    label: String,
}

impl Texture {
    /// Upload tightly packed RGBA8 pixels.
    pub fn from_rgba(
        gpu: &Gpu,
        label: &str,
        width: u32,
        height: u32,
        pixels: &[u8],
        options: TextureOptions,
    ) -> Result<Self, GpuError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected || expected == 0 {
            return Err(GpuError::InvalidImage {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        let handle = gpu.create_texture().map_err(|reason| GpuError::Allocation {
            kind: "texture",
            reason,
        })?;
        let format = if options.srgb {
            PixelFormat::Srgba8
        } else {
            PixelFormat::Rgba8
        };

        gpu.bind_texture(Some(handle));
        gpu.tex_image_2d(width, height, format, pixels);
        gpu.tex_parameters(&options.sampler);
        if options.sampler.mipmaps {
            gpu.generate_mipmap();
        }
        gpu.bind_texture(None);
        log::debug!("uploaded texture '{}' {}x{} ({})", label, width, height, handle);

        Ok(Self {
            gpu: gpu.clone(),
            handle,
            width,
            height,
            label: label.to_string(),
        })
    }

    pub fn from_image(
        gpu: &Gpu,
        label: &str,
        img: &image::DynamicImage,
        options: TextureOptions,
    ) -> Result<Self, GpuError> {
        let (width, height) = img.dimensions();
        // Image rows run top to bottom, texture rows bottom to top.
        let rgba = img.flipv().to_rgba8();
        Self::from_rgba(gpu, label, width, height, &rgba, options)
    }

    /// Decode an encoded image (PNG, JPEG, ...) and upload it.
    pub fn from_bytes(
        gpu: &Gpu,
        label: &str,
        bytes: &[u8],
        options: TextureOptions,
    ) -> anyhow::Result<Self> {
        let img = image::load_from_memory(bytes)?;
        Ok(Self::from_image(gpu, label, &img, options)?)
    }

    /// A 1x1 texture of a single colour, used when a material needs a sampler
    /// bound but has no image.
    pub fn solid_colour(gpu: &Gpu, rgba: [u8; 4]) -> Result<Self, GpuError> {
        Self::from_rgba(
            gpu,
            "solid colour",
            1,
            1,
            &rgba,
            TextureOptions {
                srgb: false,
                sampler: SamplerParams {
                    mipmaps: false,
                    ..Default::default()
                },
            },
        )
    }

    /// A two-colour checkerboard of `cells` x `cells` squares.
    pub fn checkerboard(
        gpu: &Gpu,
        size: u32,
        cells: u32,
        even: [u8; 4],
        odd: [u8; 4],
    ) -> Result<Self, GpuError> {
        let cell = (size / cells.max(1)).max(1);
        let img = image::RgbaImage::from_fn(size, size, |x, y| {
            if ((x / cell) + (y / cell)) % 2 == 0 {
                image::Rgba(even)
            } else {
                image::Rgba(odd)
            }
        });
        Self::from_rgba(
            gpu,
            "checkerboard",
            size,
            size,
            img.as_raw(),
            TextureOptions::pixelated(),
        )
    }

    /// Make `unit` active and bind this texture to it.
    pub fn bind(&self, unit: u32) {
        self.gpu.active_texture(unit);
        self.gpu.bind_texture(Some(self.handle));
    }

    pub fn handle(&self) -> RawHandle {
        self.handle
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        log::trace!("deleting texture '{}' ({})", self.label, self.handle);
        self.gpu.delete_texture(self.handle);
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("handle", &self.handle)
            .field("label", &self.label)
            .field("size", &(self.width, self.height))
            .finish()
    }
}
