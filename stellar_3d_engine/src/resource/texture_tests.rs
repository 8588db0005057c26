use glam::Vec2;
use super::*;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;

fn image(width: u32, height: u32) -> TextureImage {
    TextureImage {
        width,
        height,
        pixels: vec![255; (width * height * 4) as usize],
    }
}

#[test]
fn test_from_image_uploads_texture() {
    let mut device = MockGraphicsDevice::new();
    let texture = Texture::from_image(&mut device, image(8, 4), 1, 1).unwrap();

    assert_eq!((texture.width(), texture.height()), (8, 4));
    assert_eq!(device.stats().live_textures, 1);
    drop(texture);
    assert_eq!(device.stats().live_textures, 0);
}

#[test]
fn test_bad_pixel_size_rejected() {
    let mut device = MockGraphicsDevice::new();
    let mut img = image(2, 2);
    img.pixels.pop();
    assert!(Texture::from_image(&mut device, img, 1, 1).is_err());
}

#[test]
fn test_zero_grid_rejected() {
    let mut device = MockGraphicsDevice::new();
    assert!(Texture::from_image(&mut device, image(2, 2), 0, 4).is_err());
}

#[test]
fn test_atlas_offset_non_square_grid() {
    // 2 rows x 4 cols: column from cols, row from rows
    assert_eq!(atlas_offset(0, 2, 4), Vec2::new(0.0, 0.0));
    assert_eq!(atlas_offset(1, 2, 4), Vec2::new(0.25, 0.0));
    assert_eq!(atlas_offset(3, 2, 4), Vec2::new(0.75, 0.5));
    assert_eq!(atlas_offset(5, 2, 4), Vec2::new(0.25, 1.0));
}

#[test]
fn test_atlas_offset_single_cell() {
    assert_eq!(atlas_offset(0, 1, 1), Vec2::ZERO);
    // Rows are not wrapped
    assert_eq!(atlas_offset(3, 1, 1), Vec2::new(0.0, 3.0));
}
