use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use thiserror::Error;

// Latency envelope of the real model this stub stands in for.
pub const SLEEP_TIME_MIN: f64 = 1.0;
pub const SLEEP_TIME_MAX: f64 = 4.0;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("image asset not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to decode image asset {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Decoded RGB image held in memory for the process lifetime.
/// Row-major `height x width x 3` bytes; never mutated after load.
#[derive(Debug, Clone)]
pub struct ImageFrame {
    height: u32,
    width: u32,
    data: Arc<[u8]>,
}

impl ImageFrame {
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn shape(&self) -> [usize; 3] {
        [self.height as usize, self.width as usize, 3]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Fake image-generation model: returns the same cached image for every
/// prompt after a uniform-random delay, simulating real inference latency.
pub struct StubModel {
    image: ImageFrame,
    sleep_min: f64,
    sleep_max: f64,
}

impl StubModel {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }
        let decoded = image::open(path).map_err(|source| ModelError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        // Normalize whatever the source encodes to a canonical RGB layout.
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();
        Ok(Self {
            image: ImageFrame {
                height,
                width,
                data: Arc::from(rgb.into_raw()),
            },
            sleep_min: SLEEP_TIME_MIN,
            sleep_max: SLEEP_TIME_MAX,
        })
    }

    /// Test seam: same model with shorter delays. The serving path always
    /// uses the fixed constants.
    pub fn with_sleep_bounds(mut self, min_secs: f64, max_secs: f64) -> Self {
        self.sleep_min = min_secs;
        self.sleep_max = max_secs;
        self
    }

    pub fn sleep_bounds(&self) -> (f64, f64) {
        (self.sleep_min, self.sleep_max)
    }

    /// Blocks the calling thread for a random duration within the sleep
    /// bounds, then returns the cached image. The prompt only matters for
    /// the caller's logging; it never affects the output.
    pub fn generate(&self, _prompt: &str) -> ImageFrame {
        let sleep_time = rand::thread_rng().gen_range(self.sleep_min..=self.sleep_max);
        std::thread::sleep(Duration::from_secs_f64(sleep_time));

        self.image.clone()
    }
}
