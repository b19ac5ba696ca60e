use std::{
    path::PathBuf,
    sync::Arc,
};

use tracing::{
    debug,
    warn,
};

use crate::core::image::EncodedImage;

/// A read the caller should perform for the capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadTicket {
    pub generation: u64,
    pub path: PathBuf,
}

/// Decoded bytes ready for display, keyed by a URI unique to the read that
/// produced them so the image loader never serves a stale texture.
#[derive(Debug, Clone)]
pub struct ImagePreview {
    pub uri: String,
    pub mime: String,
    pub bytes: Arc<[u8]>,
}

#[derive(Debug, Clone)]
struct ReadyImage {
    image: EncodedImage,
    preview: ImagePreview,
}

#[derive(Debug, Clone, Default)]
enum CaptureState {
    #[default]
    Empty,
    Pending {
        path: PathBuf,
        // restored if the read fails
        previous: Option<ReadyImage>,
    },
    Ready(ReadyImage),
}

/// What a finished read did to the capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Applied(EncodedImage),
    Failed,
    Stale,
}

/// Tracks the single image picked for a draft.
///
/// Every selection and every clear bumps the generation. A finished read is
/// only applied when it carries the current generation, so clearing or
/// re-selecting while a read is in flight can never be undone by the late
/// result.
#[derive(Debug, Default)]
pub struct ImageCapture {
    generation: u64,
    state: CaptureState,
    // preview URIs no longer shown, waiting to be evicted from the loader
    released: Vec<String>,
}

impl ImageCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a read for the first of `paths`. Nothing changes when no path was
    /// picked. Any current preview is hidden until the read finishes.
    pub fn select<I>(&mut self, paths: I) -> Option<ReadTicket>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let path = paths.into_iter().next()?;

        self.generation += 1;
        let previous = match std::mem::take(&mut self.state) {
            CaptureState::Ready(ready) => Some(ready),
            CaptureState::Pending { previous, .. } => previous,
            CaptureState::Empty => None,
        };
        self.state = CaptureState::Pending { path: path.clone(), previous };

        Some(ReadTicket { generation: self.generation, path })
    }

    pub fn finish<E: std::fmt::Display>(
        &mut self,
        generation: u64,
        result: Result<EncodedImage, E>,
    ) -> ReadOutcome {
        if generation != self.generation || !self.is_pending() {
            debug!("Ignoring image read {} (active read is {})", generation, self.generation);
            return ReadOutcome::Stale;
        }

        let decoded = result.map_err(|e| e.to_string()).and_then(|image| {
            image.decode().map(|(mime, bytes)| (image, mime, bytes)).map_err(|e| e.to_string())
        });

        match decoded {
            Ok((image, mime, bytes)) => {
                let preview = ImagePreview {
                    uri: format!("bytes://draft-image-{}", generation),
                    mime,
                    bytes: Arc::from(bytes),
                };
                let superseded = std::mem::replace(
                    &mut self.state,
                    CaptureState::Ready(ReadyImage { image: image.clone(), preview }),
                );
                self.release(superseded);
                ReadOutcome::Applied(image)
            }
            Err(e) => {
                if let CaptureState::Pending { path, previous } = std::mem::take(&mut self.state) {
                    warn!("Failed to read image {}: {}", path.display(), e);
                    self.state = previous.map(CaptureState::Ready).unwrap_or_default();
                }
                ReadOutcome::Failed
            }
        }
    }

    /// Drops the preview and any in-flight read.
    pub fn clear(&mut self) {
        self.generation += 1;
        let dropped = std::mem::take(&mut self.state);
        self.release(dropped);
    }

    fn release(&mut self, state: CaptureState) {
        let ready = match state {
            CaptureState::Ready(ready) => Some(ready),
            CaptureState::Pending { previous, .. } => previous,
            CaptureState::Empty => None,
        };
        if let Some(ready) = ready {
            self.released.push(ready.preview.uri);
        }
    }

    /// Preview URIs that were replaced or cleared since the last call. The UI
    /// forgets them so the image loader does not keep their textures alive.
    pub fn take_released(&mut self) -> Vec<String> {
        std::mem::take(&mut self.released)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, CaptureState::Pending { .. })
    }

    pub fn preview(&self) -> Option<&ImagePreview> {
        match &self.state {
            CaptureState::Ready(ready) => Some(&ready.preview),
            _ => None,
        }
    }

    pub fn image(&self) -> Option<&EncodedImage> {
        match &self.state {
            CaptureState::Ready(ready) => Some(&ready.image),
            _ => None,
        }
    }
}
