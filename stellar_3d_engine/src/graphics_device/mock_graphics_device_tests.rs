/// Unit tests for MockGraphicsDevice and MockCommandList.

use crate::graphics_device::mock_graphics_device::*;
use crate::graphics_device::{
    GraphicsDevice, BufferDesc, BufferUsage, CommandList,
    TextureDesc, TextureFormat, ShaderProgramDesc, FramebufferDesc,
    Viewport, ClearFlags, UniformValue,
};
use crate::error::Error;
use glam::Vec3;

// ============================================================================
// Buffers
// ============================================================================

#[test]
fn test_buffer_update_writes_bytes() {
    let mut device = MockGraphicsDevice::new();
    let buffer = device.create_buffer(BufferDesc { size: 8, usage: BufferUsage::Vertex }).unwrap();

    buffer.update(4, &[1, 2, 3, 4]).unwrap();

    let mock = &device.live_buffers_with_usage(BufferUsage::Vertex)[0];
    assert_eq!(mock.contents(), vec![0, 0, 0, 0, 1, 2, 3, 4]);
}

#[test]
fn test_buffer_update_out_of_range_fails() {
    let mut device = MockGraphicsDevice::new();
    let buffer = device.create_buffer(BufferDesc { size: 4, usage: BufferUsage::Index }).unwrap();
    assert!(buffer.update(2, &[0; 4]).is_err());
}

#[test]
fn test_zero_sized_buffer_rejected() {
    let mut device = MockGraphicsDevice::new();
    assert!(device.create_buffer(BufferDesc { size: 0, usage: BufferUsage::Vertex }).is_err());
}

#[test]
fn test_live_buffer_count_tracks_drop() {
    let mut device = MockGraphicsDevice::new();
    let a = device.create_buffer(BufferDesc { size: 16, usage: BufferUsage::Vertex }).unwrap();
    let b = device.create_buffer(BufferDesc { size: 32, usage: BufferUsage::Instance }).unwrap();

    let stats = device.stats();
    assert_eq!(stats.live_buffers, 2);
    assert_eq!(stats.buffer_bytes, 48);

    drop(a);
    assert_eq!(device.stats().live_buffers, 1);
    assert_eq!(device.stats().buffer_bytes, 32);

    drop(b);
    assert_eq!(device.stats().live_buffers, 0);
    assert!(device.live_buffers_with_usage(BufferUsage::Instance).is_empty());
}

// ============================================================================
// Textures / programs / framebuffers
// ============================================================================

#[test]
fn test_texture_creation_and_release() {
    let mut device = MockGraphicsDevice::new();
    let texture = device.create_texture(TextureDesc {
        width: 64,
        height: 64,
        array_layers: 3,
        format: TextureFormat::D32_FLOAT,
        data: None,
    }).unwrap();

    assert_eq!(texture.array_layers(), 3);
    assert_eq!(device.stats().live_textures, 1);
    drop(texture);
    assert_eq!(device.stats().live_textures, 0);
}

#[test]
fn test_failing_program_reports_shader_compilation() {
    let mut device = MockGraphicsDevice::failing_program("depth");

    let ok = device.create_shader_program(ShaderProgramDesc::new("scene", "vs", "fs"));
    assert!(ok.is_ok());

    match device.create_shader_program(ShaderProgramDesc::new("depth", "vs", "fs")) {
        Err(Error::ShaderCompilation(msg)) => assert!(msg.contains("depth")),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("program should fail"),
    }
    assert_eq!(device.created_programs, vec!["scene".to_string()]);
}

#[test]
fn test_framebuffer_dimensions() {
    let mut device = MockGraphicsDevice::new();
    let fb = device.create_framebuffer(FramebufferDesc {
        depth_attachment: None,
        width: 1024,
        height: 512,
    }).unwrap();
    assert_eq!((fb.width(), fb.height()), (1024, 512));
}

// ============================================================================
// Command list
// ============================================================================

#[test]
fn test_command_list_records_in_order() {
    let mut device = MockGraphicsDevice::new();
    let program = device.create_shader_program(ShaderProgramDesc::new("scene", "vs", "fs")).unwrap();
    let mut cmd = MockCommandList::new();

    cmd.bind_framebuffer(None).unwrap();
    cmd.set_viewport(Viewport::full(800, 600)).unwrap();
    cmd.clear(ClearFlags::COLOR | ClearFlags::DEPTH, [0.0; 4]).unwrap();
    cmd.use_program(Some(&program)).unwrap();
    cmd.set_uniform("ambientLight", UniformValue::Vec3(Vec3::ONE)).unwrap();
    cmd.draw_indexed(36).unwrap();
    cmd.draw_indexed_instanced(6, 10).unwrap();

    assert_eq!(cmd.commands, vec![
        "bind_framebuffer(default)",
        "set_viewport(800x600)",
        "clear(COLOR|DEPTH)",
        "use_program(scene)",
        "set_uniform(ambientLight)",
        "draw_indexed(36)",
        "draw_indexed_instanced(6, 10)",
    ]);
    assert_eq!(cmd.uniform_values("ambientLight"), vec![&UniformValue::Vec3(Vec3::ONE)]);
    assert_eq!(cmd.count("draw_indexed"), 2);
    assert_eq!(cmd.position("use_program"), Some(3));
}

#[test]
fn test_failing_texture_unit() {
    let mut device = MockGraphicsDevice::new();
    let texture = device.create_texture(TextureDesc {
        width: 1,
        height: 1,
        array_layers: 1,
        format: TextureFormat::R8G8B8A8_UNORM,
        data: Some(vec![255; 4]),
    }).unwrap();

    let mut cmd = MockCommandList::new();
    cmd.failing_texture_unit = Some(0);

    assert!(cmd.bind_texture(0, &texture).is_err());
    assert!(cmd.bind_texture(2, &texture).is_ok());
    assert_eq!(cmd.commands, vec!["bind_texture(2)"]);
}
