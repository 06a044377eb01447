//! Multimodal attachment preparation.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tokio::fs;
use tracing::info;

use crate::error::{AiError, AiResult};
use crate::types::{ContentPart, ImageUrl, VideoRef};

/// Upstream ceiling for inline media payloads (20 MB).
pub const MAX_INLINE_PAYLOAD_BYTES: u64 = 20 * 1024 * 1024;

/// Build a referenced-video content part, enforcing the payload ceiling.
pub async fn video_part(path: impl AsRef<Path>, limit: u64) -> AiResult<ContentPart> {
    let path = path.as_ref();
    let size = fs::metadata(path).await?.len();

    if size > limit {
        return Err(AiError::PayloadTooLarge { size, limit });
    }

    info!("Prepared video attachment: {} bytes", size);
    Ok(ContentPart::Video {
        video: VideoRef {
            file_path: path.to_string_lossy().to_string(),
        },
    })
}

/// Build an inline base64 image part from a JPEG frame on disk.
pub async fn image_part(path: impl AsRef<Path>) -> AiResult<ContentPart> {
    let bytes = fs::read(path.as_ref()).await?;
    Ok(ContentPart::ImageUrl {
        image_url: ImageUrl {
            url: format!("data:image/jpeg;base64,{}", BASE64.encode(&bytes)),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_video_part_within_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        fs::write(&path, vec![0u8; 128]).await.unwrap();

        let part = video_part(&path, 1024).await.unwrap();
        match part {
            ContentPart::Video { video } => {
                assert!(video.file_path.ends_with("clip.mp4"));
            }
            other => panic!("expected video part, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_video_part_over_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.mp4");
        fs::write(&path, vec![0u8; 2048]).await.unwrap();

        let err = video_part(&path, 1024).await.unwrap_err();
        assert!(matches!(
            err,
            AiError::PayloadTooLarge {
                size: 2048,
                limit: 1024
            }
        ));
    }

    #[tokio::test]
    async fn test_image_part_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.jpg");
        fs::write(&path, b"jpegbytes").await.unwrap();

        let part = image_part(&path).await.unwrap();
        match part {
            ContentPart::ImageUrl { image_url } => {
                assert!(image_url.url.starts_with("data:image/jpeg;base64,"));
                let encoded = image_url.url.split(',').nth(1).unwrap();
                assert_eq!(BASE64.decode(encoded).unwrap(), b"jpegbytes");
            }
            other => panic!("expected image part, got {:?}", other),
        }
    }
}
