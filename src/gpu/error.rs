use thiserror::Error;

use super::ShaderStage;

/// Failures raised while acquiring or preparing GPU resources.
#[derive(Debug, Error)]
pub enum GpuError {
    /// The driver refused to hand out a new object name.
    #[error("could not allocate {kind}: {reason}")]
    Allocation { kind: &'static str, reason: String },

    #[error("{stage} shader failed to compile:\n{log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("program '{label}' failed to link:\n{log}")]
    ProgramLink { label: String, log: String },

    #[error("a material holds at most {max} textures")]
    TooManyTextures { max: usize },

    #[error("texture data of {actual} bytes does not match {width}x{height} RGBA ({expected} bytes)")]
    InvalidImage {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}
