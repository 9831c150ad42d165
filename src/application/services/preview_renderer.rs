//! Conversion of staged files into displayable previews.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use image::ImageReader;
use thiserror::Error;
use tracing::debug;

use crate::application::dto::Preview;
use crate::domain::entities::{MediaType, UploadCandidate};

/// Preview conversion failures.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// Payload is not a decodable image.
    #[error("file content is not a readable image: {0}")]
    Undecodable(String),

    /// The blocking task died.
    #[error("preview worker failed: {0}")]
    Worker(String),
}

/// Renders `candidate` on the blocking pool.
///
/// # Errors
/// Returns error if the image header cannot be read or the worker panics.
pub async fn render_preview(candidate: &UploadCandidate) -> Result<Preview, PreviewError> {
    let media_type = candidate.media_type();
    let payload = candidate.payload().clone();

    tokio::task::spawn_blocking(move || render_blocking(media_type, &payload))
        .await
        .map_err(|e| PreviewError::Worker(e.to_string()))?
}

fn render_blocking(media_type: MediaType, payload: &Bytes) -> Result<Preview, PreviewError> {
    let dimensions = ImageReader::new(Cursor::new(payload.as_ref()))
        .with_guessed_format()
        .map_err(|e| PreviewError::Undecodable(e.to_string()))?
        .into_dimensions()
        .map_err(|e| PreviewError::Undecodable(e.to_string()))?;

    let data_url = format!("data:{};base64,{}", media_type.mime(), STANDARD.encode(payload));
    debug!(
        width = dimensions.0,
        height = dimensions.1,
        len = data_url.len(),
        "Preview rendered"
    );

    Ok(Preview::new(data_url, dimensions))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use image::{ImageFormat, RgbaImage};
    use std::io::Cursor;

    /// Encodes a small opaque image.
    pub fn encoded_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, image::Rgba([200, 30, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        match format {
            ImageFormat::Jpeg => image::DynamicImage::ImageRgba8(image)
                .to_rgb8()
                .write_to(&mut out, format)
                .unwrap(),
            _ => image.write_to(&mut out, format).unwrap(),
        }
        out.into_inner()
    }

    /// PNG padded with trailing bytes up to `size`.
    pub fn png_of_size(size: usize) -> Vec<u8> {
        let mut bytes = encoded_image(4, 3, ImageFormat::Png);
        bytes.resize(size.max(bytes.len()), 0);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use image::ImageFormat;

    #[tokio::test]
    async fn test_renders_png_data_url() {
        let candidate =
            UploadCandidate::new("cat.png", "image/png", encoded_image(4, 3, ImageFormat::Png))
                .unwrap();

        let preview = render_preview(&candidate).await.unwrap();

        assert!(preview.data_url.starts_with("data:image/png;base64,iVBORw0KGgo"));
        assert_eq!(preview.dimensions, (4, 3));
    }

    #[tokio::test]
    async fn test_renders_two_megabyte_png() {
        let candidate =
            UploadCandidate::new("big.png", "image/png", png_of_size(2 * 1024 * 1024)).unwrap();

        let preview = render_preview(&candidate).await.unwrap();

        assert!(preview.data_url.starts_with("data:image/png;base64,"));
        assert_eq!(preview.dimensions, (4, 3));
    }

    #[tokio::test]
    async fn test_uses_declared_media_type() {
        let jpeg = encoded_image(2, 2, ImageFormat::Jpeg);
        let candidate = UploadCandidate::new("photo.jpg", "image/jpeg", jpeg).unwrap();

        let preview = render_preview(&candidate).await.unwrap();

        assert!(preview.data_url.starts_with("data:image/jpeg;base64,"));
    }

    #[tokio::test]
    async fn test_garbage_payload_fails() {
        let candidate = UploadCandidate::new("fake.png", "image/png", vec![0u8; 64]).unwrap();

        let result = render_preview(&candidate).await;

        assert!(matches!(result, Err(PreviewError::Undecodable(_))));
    }
}
