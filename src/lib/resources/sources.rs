//! Module for acquiring the bytes of images to caption.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use image::{ImageError, ImageFormat};
use mime::{self, Mime};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use thiserror::Error;

use crate::model::ImageSource;
use super::Loader;


lazy_static! {
    /// Map of file extensions to image formats, used as a hint
    /// when the content itself isn't conclusive.
    pub static ref IMAGE_FORMAT_EXTENSIONS: HashMap<&'static str, ImageFormat> = hashmap!{
        "bmp" => ImageFormat::Bmp,
        "gif" => ImageFormat::Gif,
        "jpeg" => ImageFormat::Jpeg,
        "jpg" => ImageFormat::Jpeg,
        "png" => ImageFormat::Png,
        "tif" => ImageFormat::Tiff,
        "tiff" => ImageFormat::Tiff,
        "webp" => ImageFormat::WebP,
    };
}

/// Default timeout for fetching remote images.
const DEFAULT_TIMEOUT_SECS: u64 = 30;


/// Raw (still encoded) image data, as acquired from an `ImageSource`.
#[derive(Clone)]
pub struct SourceData {
    pub bytes: Vec<u8>,
    /// Image format suggested by the file extension or the Content-Type header.
    pub format_hint: Option<ImageFormat>,
}

impl std::fmt::Debug for SourceData {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        fmt.debug_struct("SourceData")
            .field("bytes", &format_args!("<{} bytes>", self.bytes.len()))
            .field("format_hint", &self.format_hint)
            .finish()
    }
}


/// Loader of image bytes from local files, memory, or HTTP(S) URLs.
#[derive(Debug)]
pub struct SourceLoader {
    timeout: Duration,
}

impl SourceLoader {
    #[inline]
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    #[inline]
    pub fn with_timeout(timeout: Duration) -> Self {
        SourceLoader{timeout}
    }
}

impl Default for SourceLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s> Loader<&'s ImageSource> for SourceLoader {
    type Item = SourceData;
    type Err = SourceError;

    fn load(&self, source: &'s ImageSource) -> Result<SourceData, SourceError> {
        let data = match *source {
            ImageSource::Path(ref path) => self.load_file(path)?,
            ImageSource::Bytes(ref bytes) => SourceData{bytes: bytes.clone(), format_hint: None},
            ImageSource::Url(ref url) => self.fetch(url)?,
        };
        if data.bytes.is_empty() {
            warn!("Image source {} is empty", source);
            return Err(SourceError::Empty);
        }
        debug!("Loaded {} byte(s) from {}", data.bytes.len(), source);
        Ok(data)
    }
}

impl SourceLoader {
    fn load_file(&self, path: &Path) -> Result<SourceData, SourceError> {
        trace!("Reading image file {}", path.display());
        let bytes = fs::read(path).map_err(|e| {
            warn!("Cannot read image file {}: {}", path.display(), e);
            SourceError::Io{path: path.to_owned(), source: e}
        })?;
        let format_hint = path.extension().and_then(|e| e.to_str())
            .and_then(format_for_extension);
        Ok(SourceData{bytes, format_hint})
    }

    fn fetch(&self, url: &str) -> Result<SourceData, SourceError> {
        debug!("Fetching remote image from {} (timeout: {:?})", url, self.timeout);
        let fetch_error = |e| SourceError::Fetch{url: url.to_owned(), source: e};

        let client = Client::builder().timeout(self.timeout).build().map_err(fetch_error)?;
        let response = client.get(url).send().map_err(fetch_error)?;
        let status = response.status();
        if !status.is_success() {
            warn!("Fetching {} failed with HTTP status {}", url, status);
            return Err(SourceError::Status{url: url.to_owned(), status});
        }

        let content_type = response.headers().get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<Mime>().ok());
        trace!("Content-Type of {}: {:?}", url, content_type);
        let format_hint = content_type.as_ref().and_then(format_for_mime)
            .or_else(|| url_extension(url).and_then(format_for_extension));

        let bytes = response.bytes().map_err(fetch_error)?.to_vec();
        Ok(SourceData{bytes, format_hint})
    }
}

fn format_for_extension(ext: &str) -> Option<ImageFormat> {
    IMAGE_FORMAT_EXTENSIONS.get(ext.trim().to_lowercase().as_str()).cloned()
}

fn format_for_mime(content_type: &Mime) -> Option<ImageFormat> {
    if content_type.type_() != mime::IMAGE {
        return None;
    }
    match content_type.subtype().as_str() {
        "gif" => Some(ImageFormat::Gif),
        "jpeg" | "jpg" => Some(ImageFormat::Jpeg),
        "png" => Some(ImageFormat::Png),
        "bmp" => Some(ImageFormat::Bmp),
        "webp" => Some(ImageFormat::WebP),
        "tiff" => Some(ImageFormat::Tiff),
        _ => None,
    }
}

/// Extension of the last path segment of a URL, ignoring query & fragment.
fn url_extension(url: &str) -> Option<&str> {
    let path = url.split(|c| c == '?' || c == '#').next()?;
    let last_segment = path.rsplit('/').next()?;
    let dot = last_segment.rfind('.')?;
    Some(&last_segment[dot + 1..])
}


/// Error that may occur while acquiring or decoding a source image.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The image file cannot be read.
    #[error("cannot read image file {}: {source}", path.display())]
    Io { path: PathBuf, #[source] source: io::Error },
    /// The remote image cannot be fetched.
    #[error("cannot fetch image from {url}: {source}")]
    Fetch { url: String, #[source] source: reqwest::Error },
    /// The remote server responded with an error status.
    #[error("fetching image from {url} failed with HTTP {status}")]
    Status { url: String, status: StatusCode },
    /// The bytes are not an image in any supported format.
    #[error("cannot decode image: {0}")]
    Decode(#[source] ImageError),
    /// The source contains no data at all.
    #[error("image source is empty")]
    Empty,
}
