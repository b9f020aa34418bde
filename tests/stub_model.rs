use std::path::PathBuf;
use std::time::Instant;

use image::{ImageBuffer, Rgb, RgbImage};
use stub_serving::model::{ModelError, StubModel, SLEEP_TIME_MAX, SLEEP_TIME_MIN};
use tempfile::TempDir;

fn write_test_asset(dir: &TempDir, width: u32, height: u32) -> PathBuf {
    let mut img: RgbImage = ImageBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            img.put_pixel(x, y, Rgb([(x % 256) as u8, (y % 256) as u8, 128]));
        }
    }
    let path = dir.path().join("image.jpg");
    img.save(&path).unwrap();
    path
}

#[test]
fn load_preserves_dimensions_and_rgb_layout() {
    let dir = TempDir::new().unwrap();
    let path = write_test_asset(&dir, 64, 48);

    let model = StubModel::load(&path)
        .unwrap()
        .with_sleep_bounds(0.0, 0.01);
    let frame = model.generate("any prompt");
    assert_eq!(frame.shape(), [48, 64, 3]);
    assert_eq!(frame.as_bytes().len(), 48 * 64 * 3);
}

#[test]
fn generate_ignores_prompt_content() {
    let dir = TempDir::new().unwrap();
    let path = write_test_asset(&dir, 16, 16);

    let model = StubModel::load(&path)
        .unwrap()
        .with_sleep_bounds(0.0, 0.01);
    let first = model.generate("a red apple");
    let second = model.generate("a blue whale");

    assert_eq!(first.shape(), second.shape());
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn generate_blocks_within_sleep_bounds() {
    let dir = TempDir::new().unwrap();
    let path = write_test_asset(&dir, 8, 8);

    let model = StubModel::load(&path)
        .unwrap()
        .with_sleep_bounds(0.05, 0.2);
    let start = Instant::now();
    let _ = model.generate("timing check");
    let elapsed = start.elapsed().as_secs_f64();

    assert!(elapsed >= 0.05, "returned after {elapsed}s, below the minimum");
    assert!(elapsed < 1.0, "returned after {elapsed}s, far above the maximum");
}

#[test]
fn missing_asset_fails_with_not_found() {
    let result = StubModel::load("/nonexistent/assets/image.jpg");
    assert!(matches!(result, Err(ModelError::NotFound(_))));
}

#[test]
fn serving_path_uses_fixed_delay_constants() {
    let dir = TempDir::new().unwrap();
    let path = write_test_asset(&dir, 8, 8);

    let model = StubModel::load(&path).unwrap();
    assert_eq!(model.sleep_bounds(), (SLEEP_TIME_MIN, SLEEP_TIME_MAX));
}
