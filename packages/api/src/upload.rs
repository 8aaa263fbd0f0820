//! Image-host integration for product photos.
//!
//! Files are validated server side (count, size, and the actual byte
//! format; the declared content type is not trusted) and relayed to the
//! configured image host, which returns the CDN URL the catalog stores.

use bytes::Bytes;
use image::ImageFormat;
use serde::Deserialize;
use shringar::hub::UploadConfig;
use shringar_types::Result;

pub struct ImageHostClient {
    client: reqwest::Client,
    upload_url: String,
    api_key: String,
    pub max_files: usize,
    pub max_file_bytes: usize,
}

#[derive(Deserialize)]
struct UploadResponse {
    #[serde(alias = "url")]
    secure_url: String,
}

/// Formats the storefront accepts for product photos.
const ALLOWED_FORMATS: [ImageFormat; 3] = [ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::WebP];

impl ImageHostClient {
    pub fn new(config: &UploadConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            shringar_types::anyhow!("Image host API key env var {} not set", config.api_key_env)
        })?;

        Ok(Self {
            client: reqwest::Client::new(),
            upload_url: config.upload_url.clone(),
            api_key,
            max_files: config.max_files,
            max_file_bytes: config.max_file_bytes,
        })
    }

    /// Push one validated file to the image host, returning the hosted URL.
    pub async fn upload(&self, file_name: &str, data: Bytes) -> Result<String> {
        let part = reqwest::multipart::Part::stream(data).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new()
            .text("api_key", self.api_key.clone())
            .part("file", part);

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| shringar_types::anyhow!("Failed to reach image host: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(shringar_types::anyhow!(
                "Image host error: {} - {}",
                status,
                body
            ));
        }

        let uploaded = response
            .json::<UploadResponse>()
            .await
            .map_err(|e| shringar_types::anyhow!("Invalid image host response: {}", e))?;

        Ok(uploaded.secure_url)
    }
}

/// Sniff the image format from the bytes and check it against the allowed
/// set. Returns the canonical file extension.
pub fn validate_image_bytes(data: &[u8]) -> Result<&'static str> {
    let format = image::guess_format(data)
        .map_err(|_| shringar_types::anyhow!("File is not a recognized image"))?;
    if !ALLOWED_FORMATS.contains(&format) {
        shringar_types::bail!("Unsupported image format: {:?}", format);
    }
    Ok(match format {
        ImageFormat::Jpeg => "jpg",
        ImageFormat::Png => "png",
        ImageFormat::WebP => "webp",
        _ => unreachable!(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0];
    const GIF_MAGIC: &[u8] = b"GIF89a";

    #[test]
    fn png_and_jpeg_pass() {
        assert_eq!(validate_image_bytes(PNG_MAGIC).unwrap(), "png");
        assert_eq!(validate_image_bytes(JPEG_MAGIC).unwrap(), "jpg");
    }

    #[test]
    fn gif_is_rejected() {
        assert!(validate_image_bytes(GIF_MAGIC).is_err());
    }

    #[test]
    fn arbitrary_bytes_are_rejected() {
        assert!(validate_image_bytes(b"<html>not an image</html>").is_err());
    }
}
