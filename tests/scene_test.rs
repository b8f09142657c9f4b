mod common;

use std::rc::Rc;

use cgmath::{Deg, Matrix4, SquareMatrix};
use common::{
    mock_gl::Call,
    test_utils::{mock_gpu, program, texture, triangle},
};
use glint::{
    camera::{Camera, Projection},
    data_structures::{
        light::{Light, LightColour},
        material::Material,
        mesh::Mesh,
        shape::Shape,
        transform::Transform,
    },
    gpu::{PrimitiveMode, UniformValue},
    render::{FrameCounters, Renderer},
    scene::{Scene, Shading},
};

fn scene() -> Scene {
    Scene::new(
        Camera::new((0.0, 1.0, 5.0), Deg(-90.0), Deg(0.0)),
        Projection::new(800, 600, Deg(45.0), 0.1, 100.0),
    )
}

#[test]
fn renderer_enables_depth_and_clears_each_frame() {
    let (mock, gpu) = mock_gpu();
    let mut renderer = Renderer::new(&gpu, [0.1, 0.2, 0.3, 1.0]);
    assert_eq!(mock.calls(), vec![Call::DepthTest(true)]);

    renderer.begin_frame(640, 480);

    assert_eq!(
        mock.calls()[1..],
        [Call::Viewport(0, 0, 640, 480), Call::Clear([0.1, 0.2, 0.3, 1.0])]
    );
    assert_eq!(renderer.counters(), FrameCounters::default());
}

#[test]
fn each_program_is_bound_once_and_every_shape_drawn() {
    let (mock, gpu) = mock_gpu();
    let mut scene = scene();
    let lit = scene.add_program(program(&gpu, "lit"), Shading::Lit);
    let unlit = scene.add_program(program(&gpu, "unlit"), Shading::Unlit);
    for _ in 0..3 {
        let shape = Shape::new(&gpu, Mesh::cube(), Material::default()).unwrap();
        scene.add_shape(lit, shape);
    }
    let marker = Shape::new(&gpu, triangle(), Material::coloured([1.0, 0.5, 0.0])).unwrap();
    scene.add_shape(unlit, marker);
    let lit_handle = scene.program(lit).handle().get();
    let unlit_handle = scene.program(unlit).handle().get();
    let mut renderer = Renderer::new(&gpu, [0.0; 4]);
    mock.clear_calls();

    renderer.begin_frame(800, 600);
    scene.render(&mut renderer);

    assert_eq!(mock.count_of(&Call::UseProgram(Some(lit_handle))), 1);
    assert_eq!(mock.count_of(&Call::UseProgram(Some(unlit_handle))), 1);
    assert_eq!(mock.count_of(&Call::DrawElements(PrimitiveMode::Triangles, 36)), 3);
    assert_eq!(mock.count_of(&Call::DrawArrays(PrimitiveMode::Triangles, 0, 3)), 1);
    assert_eq!(
        renderer.counters(),
        FrameCounters {
            draw_calls: 4,
            triangles: 37,
        }
    );

    // Groups render in registration order.
    let lit_bind = mock.position(&Call::UseProgram(Some(lit_handle))).unwrap();
    let unlit_bind = mock.position(&Call::UseProgram(Some(unlit_handle))).unwrap();
    assert!(lit_bind < unlit_bind);
    assert_eq!(mock.uniform_writes("u_colour"), vec![UniformValue::Vec3([1.0, 0.5, 0.0])]);
}

#[test]
fn camera_and_lights_are_pushed_per_program_and_transforms_per_shape() {
    let (mock, gpu) = mock_gpu();
    let mut scene = scene();
    let lit = scene.add_program(program(&gpu, "lit"), Shading::Lit);
    let first = scene.add_shape(
        lit,
        Shape::new(&gpu, Mesh::cube(), Material::default())
            .unwrap()
            .with_transform(Transform::from_translation([1.0, 0.0, 0.0])),
    );
    scene.add_shape(
        lit,
        Shape::new(&gpu, Mesh::cube(), Material::textured(texture(&gpu))).unwrap(),
    );
    scene.add_light(Light::directional([0.0, -1.0, 0.0], LightColour::default()));
    scene.add_light(Light::point([0.0, 2.0, 0.0], LightColour::default()));
    let mut renderer = Renderer::new(&gpu, [0.0; 4]);

    scene.render(&mut renderer);

    assert_eq!(mock.uniform_writes("u_view").len(), 1);
    assert_eq!(mock.uniform_writes("u_projection").len(), 1);
    assert_eq!(
        mock.last_uniform("u_view_pos"),
        Some(UniformValue::Vec3([0.0, 1.0, 5.0]))
    );
    assert_eq!(mock.last_uniform("u_num_dir_lights"), Some(UniformValue::Int(1)));
    assert_eq!(mock.last_uniform("u_num_point_lights"), Some(UniformValue::Int(1)));
    assert_eq!(mock.last_uniform("u_num_spot_lights"), Some(UniformValue::Int(0)));

    let models = mock.uniform_writes("u_model");
    assert_eq!(models.len(), 2);
    let translated: Matrix4<f32> = Transform::from_translation([1.0, 0.0, 0.0]).to_matrix();
    assert_eq!(models[0], UniformValue::from(translated));
    assert_eq!(models[1], UniformValue::from(Matrix4::<f32>::identity()));
    assert_eq!(mock.uniform_writes("u_normal_matrix").len(), 2);
    assert_eq!(
        mock.uniform_writes("u_material.texture_count"),
        vec![UniformValue::Int(0), UniformValue::Int(1)]
    );

    // Mutations through the id show up on the next frame.
    scene.shape_mut(first).unwrap().transform = Transform::new();
    mock.clear_calls();
    scene.render(&mut renderer);
    assert_eq!(
        mock.uniform_writes("u_model")[0],
        UniformValue::from(Matrix4::<f32>::identity())
    );
}

#[test]
fn light_handles_address_the_light_they_were_issued_for() {
    let (_mock, _gpu) = mock_gpu();
    let mut scene = scene();
    let sun = scene.add_light(Light::directional([0.0, -1.0, 0.0], LightColour::default()));
    let bulb = scene.add_light(Light::point([0.0, 0.0, 0.0], LightColour::default()));

    scene.light_mut(bulb).unwrap().set_position([3.0, 4.0, 5.0]);

    assert_eq!(scene.light(sun).unwrap().position(), None);
    assert_eq!(
        scene.light(bulb).unwrap().position(),
        Some(cgmath::Point3::new(3.0, 4.0, 5.0))
    );
    assert_eq!(scene.lights().len(), 2);
}

#[test]
fn empty_groups_are_skipped() {
    let (mock, gpu) = mock_gpu();
    let mut scene = scene();
    let empty = scene.add_program(program(&gpu, "empty"), Shading::Lit);
    let handle = scene.program(empty).handle().get();
    let mut renderer = Renderer::new(&gpu, [0.0; 4]);

    scene.render(&mut renderer);

    assert_eq!(mock.count_of(&Call::UseProgram(Some(handle))), 0);
    assert_eq!(mock.draw_calls(), 0);
    assert_eq!(scene.shape_count(), 0);
}

#[test]
fn dropping_the_scene_releases_everything_once() {
    let (mock, gpu) = mock_gpu();
    let mut scene = scene();
    let lit = scene.add_program(program(&gpu, "lit"), Shading::Lit);
    let shared = texture(&gpu);
    for _ in 0..2 {
        let shape = Shape::new(&gpu, Mesh::cube(), Material::textured(Rc::clone(&shared))).unwrap();
        scene.add_shape(lit, shape);
    }
    drop(shared);

    drop(scene);

    assert_eq!(mock.count(|c| matches!(c, Call::DeleteProgram(_))), 1);
    assert_eq!(mock.count(|c| matches!(c, Call::DeleteVertexArray(_))), 2);
    assert_eq!(mock.count(|c| matches!(c, Call::DeleteBuffer(_))), 4);
    assert_eq!(mock.count(|c| matches!(c, Call::DeleteTexture(_))), 1);
}

#[test]
#[should_panic]
fn program_ids_from_another_scene_are_rejected() {
    let (_mock, gpu) = mock_gpu();
    let mut other = scene();
    other.add_program(program(&gpu, "a"), Shading::Lit);
    let foreign = other.add_program(program(&gpu, "b"), Shading::Lit);

    let mut empty = scene();
    empty.add_program(program(&gpu, "c"), Shading::Lit);
    let _ = empty.shapes(foreign);
}
