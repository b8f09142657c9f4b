use std::path::Path;

use anyhow::Context as _;

use crate::gpu::{Gpu, Program};

use super::Assets;

impl Assets {
    /// Compile and link a program from a GLSL vertex and fragment file.
    pub fn load_program(
        &self,
        gpu: &Gpu,
        vertex_file: impl AsRef<Path>,
        fragment_file: impl AsRef<Path>,
    ) -> anyhow::Result<Program> {
        let vertex_file = vertex_file.as_ref();
        let fragment_file = fragment_file.as_ref();
        let vertex_source = self.load_string(vertex_file)?;
        let fragment_source = self.load_string(fragment_file)?;
        let label = vertex_file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| vertex_file.display().to_string());
        Program::from_sources(gpu, &label, &vertex_source, &fragment_source).with_context(|| {
            format!(
                "could not build program from {} and {}",
                vertex_file.display(),
                fragment_file.display()
            )
        })
    }
}
