//! Defines the output of a captioning operation.

use std::fs;
use std::io;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use mime::{self, Mime};


/// Output of the captioning process: the encoded image.
#[derive(Clone, Debug, PartialEq)]
#[must_use = "unused caption output which must be used"]
pub struct CaptionOutput {
    format: ImageFormat,
    bytes: Vec<u8>,
}

impl CaptionOutput {
    #[inline]
    pub(super) fn new(format: ImageFormat, bytes: Vec<u8>) -> Self {
        CaptionOutput{format, bytes}
    }
}

impl CaptionOutput {
    /// Image format of the output.
    #[inline]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Raw bytes of the output.
    ///
    /// See `CaptionOutput::format` for how to interpret it.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..]
    }

    /// Convert the output into a vector of bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// File extension (without the dot) that matches output's format.
    pub fn extension(&self) -> &'static str {
        match self.format {
            ImageFormat::Gif => "gif",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
            f => f.extensions_str().first().cloned().unwrap_or("img"),
        }
    }

    /// Write the output to `base` with the matching extension appended,
    /// e.g. `memes/cat` becomes `memes/cat.gif`.
    ///
    /// An existing file at the final path is overwritten.
    pub fn save_to<P: AsRef<Path>>(&self, base: P) -> io::Result<PathBuf> {
        let mut path = base.as_ref().as_os_str().to_owned();
        path.push(".");
        path.push(self.extension());
        let path = PathBuf::from(path);

        debug!("Writing {} byte(s) to {}", self.bytes.len(), path.display());
        fs::write(&path, self.bytes())?;
        Ok(path)
    }

    /// The MIME type that matches output's format.
    pub fn mime_type(&self) -> Option<Mime> {
        match self.format {
            ImageFormat::Gif => Some(mime::IMAGE_GIF),
            ImageFormat::Jpeg => Some(mime::IMAGE_JPEG),
            ImageFormat::Png => Some(mime::IMAGE_PNG),
            _ => None,
        }
    }
}

impl Deref for CaptionOutput {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.bytes()
    }
}

impl From<CaptionOutput> for Vec<u8> {
    fn from(output: CaptionOutput) -> Self {
        output.into_bytes()
    }
}
impl From<CaptionOutput> for Box<[u8]> {
    fn from(output: CaptionOutput) -> Self {
        output.into_bytes().into_boxed_slice()
    }
}


#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;
    use image::ImageFormat;
    use tempfile::tempdir;
    use super::CaptionOutput;

    #[test]
    fn format_details() {
        let output = CaptionOutput::new(ImageFormat::Jpeg, vec![0xff, 0xd8]);
        assert_eq!("jpg", output.extension());
        assert_eq!(Some(mime::IMAGE_JPEG), output.mime_type());
        assert_eq!(2, output.len());

        let output = CaptionOutput::new(ImageFormat::Gif, vec![]);
        assert_eq!("gif", output.extension());
        assert_eq!("image/gif", output.mime_type().unwrap().as_ref());
    }

    #[test]
    fn save_to_appends_extension() {
        let dir = tempdir().unwrap();
        let output = CaptionOutput::new(ImageFormat::Png, vec![1, 2, 3]);

        let path = output.save_to(dir.path().join("meme")).unwrap();
        assert_eq!(dir.path().join("meme.png"), path);
        assert_eq!(vec![1, 2, 3], fs::read(&path).unwrap());

        // Dots in the base name are kept.
        let path = output.save_to(dir.path().join("v1.2")).unwrap();
        assert_eq!(Some("v1.2.png"), path.file_name().and_then(|n| n.to_str()));
    }

    #[test]
    fn save_to_missing_directory() {
        let output = CaptionOutput::new(ImageFormat::Gif, vec![]);
        assert!(output.save_to(Path::new("/no/such/dir/meme")).is_err());
    }
}
