mod common;

use common::{
    mock_gl::Call,
    test_utils::{mock_gpu, program},
};
use glint::gpu::{GpuError, Program, Shader, ShaderStage, UniformValue};

#[test]
fn compile_failure_returns_the_log_and_deletes_the_shader() {
    let (mock, gpu) = mock_gpu();
    mock.fail_compile("0:1(1): error: syntax error");

    let result = Shader::fragment(&gpu, "not glsl");

    match result {
        Err(GpuError::ShaderCompile { stage, log }) => {
            assert_eq!(stage, ShaderStage::Fragment);
            assert!(log.contains("syntax error"));
        }
        other => panic!("expected a compile error, got {other:?}"),
    }
    assert_eq!(
        mock.calls(),
        vec![
            Call::CreateShader(1, ShaderStage::Fragment),
            Call::CompileShader(1),
            Call::DeleteShader(1),
        ]
    );
}

#[test]
fn from_sources_stops_at_the_first_failing_stage() {
    let (mock, gpu) = mock_gpu();
    mock.fail_compile("bad");

    let result = Program::from_sources(&gpu, "broken", "a", "b");

    assert!(matches!(
        result,
        Err(GpuError::ShaderCompile {
            stage: ShaderStage::Vertex,
            ..
        })
    ));
    assert_eq!(mock.count(|c| matches!(c, Call::CreateProgram(_))), 0);
    assert_eq!(mock.count(|c| matches!(c, Call::CreateShader(..))), 1);
}

#[test]
fn linking_consumes_and_deletes_the_shaders() {
    let (mock, gpu) = mock_gpu();
    let vertex = Shader::vertex(&gpu, "v").unwrap();
    let fragment = Shader::fragment(&gpu, "f").unwrap();
    mock.clear_calls();

    let program = Program::link(&gpu, "basic", vec![vertex, fragment]).unwrap();

    assert_eq!(program.handle().get(), 3);
    assert_eq!(
        mock.calls(),
        vec![
            Call::CreateProgram(3),
            Call::AttachShader(3, 1),
            Call::AttachShader(3, 2),
            Call::LinkProgram(3),
            Call::DetachShader(3, 1),
            Call::DetachShader(3, 2),
            Call::DeleteShader(1),
            Call::DeleteShader(2),
        ]
    );

    drop(program);
    assert_eq!(mock.count_of(&Call::DeleteProgram(3)), 1);
    assert_eq!(mock.count(|c| matches!(c, Call::DeleteShader(_))), 2);
}

#[test]
fn link_failure_releases_program_and_shaders() {
    let (mock, gpu) = mock_gpu();
    mock.fail_link("error: vertex output 'v_uv' not read by fragment shader");

    let result = Program::from_sources(&gpu, "mismatch", "v", "f");

    match result {
        Err(GpuError::ProgramLink { label, log }) => {
            assert_eq!(label, "mismatch");
            assert!(log.contains("v_uv"));
        }
        other => panic!("expected a link error, got {other:?}"),
    }
    assert_eq!(mock.count_of(&Call::DeleteProgram(3)), 1);
    assert_eq!(mock.count_of(&Call::DeleteShader(1)), 1);
    assert_eq!(mock.count_of(&Call::DeleteShader(2)), 1);
}

#[test]
fn uniform_locations_are_looked_up_once() {
    let (mock, gpu) = mock_gpu();
    let program = program(&gpu, "cached");
    program.bind();

    program.set_f32("u_time", 1.0);
    program.set_f32("u_time", 2.0);
    program.set_i32("u_count", 3);

    assert_eq!(
        mock.count(|c| matches!(c, Call::UniformLocation(_, name) if name == "u_time")),
        1
    );
    assert_eq!(
        mock.uniform_writes("u_time"),
        vec![UniformValue::Float(1.0), UniformValue::Float(2.0)]
    );
    assert_eq!(mock.last_uniform("u_count"), Some(UniformValue::Int(3)));
    assert_eq!(mock.count_of(&Call::UseProgram(Some(program.handle().get()))), 1);
}

#[test]
fn writes_to_inactive_uniforms_are_dropped() {
    let (mock, gpu) = mock_gpu();
    mock.mark_inactive("u_unused");
    let program = program(&gpu, "sparse");

    program.set_vec3("u_unused", [1.0, 2.0, 3.0]);
    program.set_vec3("u_unused", [4.0, 5.0, 6.0]);

    assert!(program.uniform_location("u_unused").is_none());
    assert_eq!(
        mock.count(|c| matches!(c, Call::UniformLocation(_, name) if name == "u_unused")),
        1
    );
    assert_eq!(mock.count(|c| matches!(c, Call::SetUniform(..))), 0);
}

#[test]
fn matrices_are_uploaded_column_major() {
    let (mock, gpu) = mock_gpu();
    let program = program(&gpu, "matrices");
    let model = cgmath::Matrix4::from_translation(cgmath::Vector3::new(1.0, 2.0, 3.0));

    program.set_mat4("u_model", model);

    match mock.last_uniform("u_model") {
        Some(UniformValue::Mat4(m)) => assert_eq!(&m[12..15], &[1.0, 2.0, 3.0]),
        other => panic!("expected a mat4, got {other:?}"),
    }
}
