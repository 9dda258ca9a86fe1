//! Module defining where the captioned image comes from.

use std::fmt;
use std::path::{Path, PathBuf};


/// Source of the image to caption.
#[derive(Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Image file on the local filesystem.
    Path(PathBuf),
    /// Encoded image already in memory.
    Bytes(Vec<u8>),
    /// Image to be fetched over HTTP(S).
    Url(String),
}

impl ImageSource {
    /// Interpret a command line style argument as an image source.
    ///
    /// Anything starting with `http://` or `https://` is a URL,
    /// everything else is treated as a filesystem path.
    pub fn parse<S: AsRef<str>>(s: S) -> Self {
        let s = s.as_ref().trim();
        let lowercase = s.to_lowercase();
        if lowercase.starts_with("http://") || lowercase.starts_with("https://") {
            ImageSource::Url(s.to_owned())
        } else {
            ImageSource::Path(PathBuf::from(s))
        }
    }

    #[inline]
    pub fn is_remote(&self) -> bool {
        match *self { ImageSource::Url(..) => true, _ => false }
    }
}

impl From<PathBuf> for ImageSource {
    #[inline]
    fn from(path: PathBuf) -> Self {
        ImageSource::Path(path)
    }
}
impl<'p> From<&'p Path> for ImageSource {
    #[inline]
    fn from(path: &'p Path) -> Self {
        ImageSource::Path(path.to_owned())
    }
}
impl<'s> From<&'s str> for ImageSource {
    #[inline]
    fn from(s: &'s str) -> Self {
        ImageSource::parse(s)
    }
}
impl From<Vec<u8>> for ImageSource {
    #[inline]
    fn from(bytes: Vec<u8>) -> Self {
        ImageSource::Bytes(bytes)
    }
}
impl<'b> From<&'b [u8]> for ImageSource {
    #[inline]
    fn from(bytes: &'b [u8]) -> Self {
        ImageSource::Bytes(bytes.to_vec())
    }
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ImageSource::Path(ref p) => write!(fmt, "ImageSource::Path({:?})", p),
            ImageSource::Bytes(ref b) => write!(fmt, "ImageSource::Bytes(<{} bytes>)", b.len()),
            ImageSource::Url(ref u) => write!(fmt, "ImageSource::Url({:?})", u),
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ImageSource::Path(ref p) => write!(fmt, "{}", p.display()),
            ImageSource::Bytes(ref b) => write!(fmt, "<{} bytes>", b.len()),
            ImageSource::Url(ref u) => write!(fmt, "{}", u),
        }
    }
}


#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use super::ImageSource;

    #[test]
    fn parse_url() {
        assert_eq!(ImageSource::Url("https://example.com/a.gif".into()),
                   ImageSource::parse("https://example.com/a.gif"));
        assert_eq!(ImageSource::Url("HTTP://example.com/b.png".into()),
                   ImageSource::parse(" HTTP://example.com/b.png "));
    }

    #[test]
    fn parse_path() {
        assert_eq!(ImageSource::Path(PathBuf::from("yesbutno.jpg")),
                   ImageSource::parse("yesbutno.jpg"));
        assert_eq!(ImageSource::Path(PathBuf::from("httpdocs/a.png")),
                   ImageSource::parse("httpdocs/a.png"));
        assert!(!ImageSource::parse("/tmp/x.gif").is_remote());
    }

    #[test]
    fn debug_hides_bytes() {
        let source = ImageSource::from(vec![1u8, 2, 3]);
        assert_eq!("ImageSource::Bytes(<3 bytes>)", format!("{:?}", source));
    }
}
