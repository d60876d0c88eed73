//! Shared fixtures for this crate's unit tests.

use std::io::Cursor;
use std::sync::Arc;

use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};

use tms_core::config::DatabaseConfig;
use tms_database::store::UserStore;
use tms_database::{UserRepository, create_pool, migration};

pub(crate) async fn sqlite_repo() -> UserRepository {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };
    let pool = create_pool(&config).await.unwrap();
    migration::run_migrations(&pool).await.unwrap();
    UserRepository::new(pool)
}

pub(crate) async fn sqlite_users() -> Arc<dyn UserStore> {
    Arc::new(sqlite_repo().await)
}

/// Encodes a small gradient image in the requested format.
pub(crate) fn sample_image(format: ImageFormat) -> Vec<u8> {
    let rgb = RgbImage::from_fn(16, 12, |x, y| image::Rgb([(x * 15) as u8, (y * 20) as u8, 128]));
    let img = match format {
        ImageFormat::Gif => DynamicImage::ImageRgba8(DynamicImage::ImageRgb8(rgb).to_rgba8()),
        _ => DynamicImage::ImageRgb8(rgb),
    };
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

pub(crate) fn sample_rgba_png() -> Vec<u8> {
    let img = RgbaImage::from_pixel(8, 8, image::Rgba([10, 20, 30, 40]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

/// Encodes a noisy PNG (incompressible, so the file stays large) and pads
/// it after the end of the image to exactly `total_len` bytes.
pub(crate) fn padded_png(total_len: usize) -> Vec<u8> {
    let mut state: u32 = 0x9E37_79B9;
    let rgb = RgbImage::from_fn(480, 640, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let [r, g, b, _] = state.to_le_bytes();
        image::Rgb([r, g, b])
    });
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(rgb)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    let mut data = buf.into_inner();
    assert!(data.len() <= total_len, "encoded PNG is {} bytes", data.len());
    data.resize(total_len, 0);
    data
}
