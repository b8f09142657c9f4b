mod common;

use common::{
    mock_gl::Call,
    test_utils::{mock_gpu, triangle},
};
use glint::{
    data_structures::{
        material::Material,
        mesh::Mesh,
        shape::{DrawCall, Shape},
        vertex::Vertex,
    },
    gpu::{Buffer, BufferTarget, PrimitiveMode, VertexArray},
};

#[test]
fn attach_describes_every_vertex_attribute() {
    let (mock, gpu) = mock_gpu();
    let vertex_array = VertexArray::new(&gpu).unwrap();
    let buffer = Buffer::vertices(&gpu, &[Vertex::default(); 3]).unwrap();
    mock.clear_calls();

    vertex_array.attach::<Vertex>(&buffer);

    let stride = std::mem::size_of::<Vertex>() as i32;
    assert_eq!(stride, 32);
    assert_eq!(
        mock.calls(),
        vec![
            Call::BindVertexArray(Some(1)),
            Call::BindBuffer(BufferTarget::Vertex, Some(2)),
            Call::VertexAttribPointer {
                location: 0,
                components: 3,
                offset: 0,
                stride,
            },
            Call::EnableVertexAttribArray(0),
            Call::VertexAttribPointer {
                location: 1,
                components: 3,
                offset: 12,
                stride,
            },
            Call::EnableVertexAttribArray(1),
            Call::VertexAttribPointer {
                location: 2,
                components: 2,
                offset: 24,
                stride,
            },
            Call::EnableVertexAttribArray(2),
        ]
    );
}

#[test]
fn vertex_array_is_deleted_once() {
    let (mock, gpu) = mock_gpu();
    let vertex_array = VertexArray::new(&gpu).unwrap();
    let moved = vertex_array;
    drop(moved);

    assert_eq!(mock.count_of(&Call::CreateVertexArray(1)), 1);
    assert_eq!(mock.count_of(&Call::DeleteVertexArray(1)), 1);
}

#[test]
fn indexed_shape_records_its_element_buffer_and_draws_elements() {
    let (mock, gpu) = mock_gpu();
    let shape = Shape::new(&gpu, Mesh::cube(), Material::default()).unwrap();

    let index_buffer = shape.index_buffer().expect("cube is indexed");
    assert_eq!(index_buffer.len(), 36);
    let index_handle = index_buffer.handle().get();
    let bind_vao = mock.position(&Call::BindVertexArray(Some(1))).unwrap();
    let bind_ebo = mock
        .position(&Call::BindBuffer(BufferTarget::Index, Some(index_handle)))
        .unwrap();
    let unbind_vao = mock.position(&Call::BindVertexArray(None)).unwrap();
    assert!(bind_vao < bind_ebo && bind_ebo < unbind_vao);

    mock.clear_calls();
    let call = shape.draw();

    assert_eq!(call, DrawCall::Indexed { count: 36 });
    assert_eq!(call.triangles(), 12);
    assert_eq!(
        mock.calls(),
        vec![
            Call::BindVertexArray(Some(1)),
            Call::DrawElements(PrimitiveMode::Triangles, 36),
            Call::BindVertexArray(None),
        ]
    );
}

#[test]
fn non_indexed_shape_draws_arrays() {
    let (mock, gpu) = mock_gpu();
    let shape = Shape::new(&gpu, triangle(), Material::default()).unwrap();
    assert!(shape.index_buffer().is_none());
    mock.clear_calls();

    assert_eq!(shape.draw(), DrawCall::Arrays { count: 3 });
    assert_eq!(mock.count_of(&Call::DrawArrays(PrimitiveMode::Triangles, 0, 3)), 1);
}

#[test]
fn dropping_a_shape_releases_the_vertex_array_before_its_buffers() {
    let (mock, gpu) = mock_gpu();
    let shape = Shape::new(&gpu, Mesh::plane(2.0, 1.0), Material::default()).unwrap();
    let vao = 1;
    let vbo = shape.vertex_buffer().handle().get();
    let ebo = shape.index_buffer().unwrap().handle().get();

    drop(shape);

    let delete_vao = mock.position(&Call::DeleteVertexArray(vao)).unwrap();
    let delete_vbo = mock.position(&Call::DeleteBuffer(vbo)).unwrap();
    let delete_ebo = mock.position(&Call::DeleteBuffer(ebo)).unwrap();
    assert!(delete_vao < delete_vbo);
    assert!(delete_vao < delete_ebo);
    assert_eq!(mock.count(|c| matches!(c, Call::DeleteBuffer(_))), 2);
    assert_eq!(mock.count(|c| matches!(c, Call::DeleteVertexArray(_))), 1);
}

#[test]
fn failed_buffer_allocation_releases_the_vertex_array() {
    let (mock, gpu) = mock_gpu();
    let vertex_array = VertexArray::new(&gpu).unwrap();
    mock.refuse_allocation(true);

    assert!(Buffer::vertices(&gpu, &[Vertex::default()]).is_err());
    drop(vertex_array);

    assert_eq!(mock.count_of(&Call::DeleteVertexArray(1)), 1);
}
