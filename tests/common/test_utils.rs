use std::{path::PathBuf, rc::Rc};

use glint::{
    data_structures::{mesh::Mesh, vertex::Vertex},
    gpu::{Gpu, Program, Texture},
    logging::{LoggingConfig, init_logging},
};

use super::mock_gl::{self, MockGl};

/// A fresh mock plus the `Gpu` handle resources are created against.
pub fn mock_gpu() -> (Rc<MockGl>, Gpu) {
    init_logging(LoggingConfig {
        env_filter: Some("glint=trace".to_string()),
        ..Default::default()
    });
    let mock = MockGl::new();
    let gpu = mock_gl::gpu(&mock);
    (mock, gpu)
}

/// The mock never looks at shader sources.
pub fn program(gpu: &Gpu, label: &str) -> Program {
    Program::from_sources(gpu, label, "void main() {}", "void main() {}")
        .expect("mock link succeeds")
}

pub fn triangle() -> Mesh {
    let n = [0.0, 0.0, 1.0];
    Mesh::new(
        "triangle",
        vec![
            Vertex::new([0.0, 0.0, 0.0], n, [0.0, 0.0]),
            Vertex::new([1.0, 0.0, 0.0], n, [1.0, 0.0]),
            Vertex::new([0.0, 1.0, 0.0], n, [0.0, 1.0]),
        ],
        None,
    )
}

pub fn texture(gpu: &Gpu) -> Rc<Texture> {
    Rc::new(Texture::solid_colour(gpu, [255, 0, 0, 255]).expect("mock upload succeeds"))
}

pub fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}

pub fn assert_vec3_close(actual: [f32; 3], expected: [f32; 3]) {
    for (a, e) in actual.iter().zip(expected) {
        assert_close(*a, e);
    }
}
