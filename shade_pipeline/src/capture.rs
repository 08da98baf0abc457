//! Frame acquisition seam.
//!
//! The pipeline consumes frames through [`FrameSource`] so the presentation
//! collaborator can plug in whatever acquisition it has (camera still, file
//! upload). Implementations that hold a device must release it in `Drop`,
//! which runs on every exit path, success or failure.

use std::path::PathBuf;

use image::DynamicImage;
use thiserror::Error;

/// Failure to acquire a frame. The session treats it like any other failed
/// analysis: nothing changes.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to read or decode {path:?}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("frame source is exhausted")]
    Exhausted,
}

/// A source of frames to analyze.
pub trait FrameSource {
    /// Produces the next frame, blocking until one is available.
    fn next_frame(&mut self) -> Result<DynamicImage, CaptureError>;
}

/// File-backed source: decodes one image file, then reports exhaustion.
///
/// Holds no handle between calls, so there is nothing to release on drop.
pub struct FileSource {
    path: PathBuf,
    consumed: bool,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            consumed: false,
        }
    }
}

impl FrameSource for FileSource {
    fn next_frame(&mut self) -> Result<DynamicImage, CaptureError> {
        if self.consumed {
            return Err(CaptureError::Exhausted);
        }
        self.consumed = true;

        image::open(&self.path).map_err(|source| CaptureError::Decode {
            path: self.path.clone(),
            source,
        })
    }
}
