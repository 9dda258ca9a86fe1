//! Module for loading fonts used in captions.

use std::fmt;
use std::fs;
use std::io;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::FontStyle;
use super::Loader;


pub const FILE_EXTENSION: &str = "ttf";

/// Name of the built-in font family.
const BUILTIN_FAMILY: &str = "DejaVuSans";

/// Style suffix that some families put on their regular variant.
const REGULAR_SUFFIX: &str = "-Regular";

const BUILTIN_REGULAR: &[u8] = include_bytes!("../../../data/fonts/DejaVuSans.ttf");
const BUILTIN_BOLD: &[u8] = include_bytes!("../../../data/fonts/DejaVuSans-Bold.ttf");
const BUILTIN_OBLIQUE: &[u8] = include_bytes!("../../../data/fonts/DejaVuSans-Oblique.ttf");
const BUILTIN_BOLD_OBLIQUE: &[u8] = include_bytes!("../../../data/fonts/DejaVuSans-BoldOblique.ttf");


/// Font that can be used to caption images.
pub struct Font {
    name: String,
    inner: rusttype::Font<'static>,
}

impl Font {
    /// Parse a font from the contents of a TrueType file.
    pub fn from_bytes<N: Into<String>>(name: N, bytes: Vec<u8>) -> Result<Self, FontError> {
        let name = name.into();
        let inner = rusttype::Font::try_from_vec(bytes)
            .ok_or_else(|| FontError::Invalid(name.clone()))?;
        Ok(Font{name, inner})
    }

    fn from_static(name: &str, bytes: &'static [u8]) -> Result<Self, FontError> {
        let inner = rusttype::Font::try_from_bytes(bytes)
            .ok_or_else(|| FontError::Invalid(name.to_owned()))?;
        Ok(Font{name: name.to_owned(), inner})
    }

    /// Name of the font, which is the file name it was loaded from.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Deref for Font {
    type Target = rusttype::Font<'static>;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Font({:?})", self.name)
    }
}


/// Family of fonts from which a style variant is picked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontFamily {
    /// DejaVu Sans, embedded in the library.
    Builtin,
    /// Font file on disk; its style variants are expected next to it.
    File(PathBuf),
}

impl Default for FontFamily {
    fn default() -> Self {
        FontFamily::Builtin
    }
}

impl From<Option<PathBuf>> for FontFamily {
    fn from(path: Option<PathBuf>) -> Self {
        path.map(FontFamily::File).unwrap_or(FontFamily::Builtin)
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FontFamily::Builtin => write!(fmt, "{}", BUILTIN_FAMILY),
            FontFamily::File(ref path) => write!(fmt, "{}", path.display()),
        }
    }
}


/// Loader of a font family's style variants.
#[derive(Debug, Default)]
pub struct FontLoader {
    family: FontFamily,
}

impl FontLoader {
    #[inline]
    pub fn new(family: FontFamily) -> Self {
        FontLoader{family}
    }

    #[inline]
    pub fn family(&self) -> &FontFamily {
        &self.family
    }
}

impl Loader<FontStyle> for FontLoader {
    type Item = Font;
    type Err = FontError;

    fn load(&self, style: FontStyle) -> Result<Font, FontError> {
        trace!("Loading {} style of the {} font", style, self.family);
        let font = match self.family {
            FontFamily::Builtin => load_builtin(style)?,
            FontFamily::File(ref path) => load_file(path, style)?,
        };
        debug!("Font `{}` loaded successfully ({} glyphs)", font.name(), font.glyph_count());
        Ok(font)
    }
}

fn load_builtin(style: FontStyle) -> Result<Font, FontError> {
    let (suffix, bytes) = match (style.bold, style.italic) {
        (false, false) => ("", BUILTIN_REGULAR),
        (true, false) => ("-Bold", BUILTIN_BOLD),
        (false, true) => ("-Oblique", BUILTIN_OBLIQUE),
        (true, true) => ("-BoldOblique", BUILTIN_BOLD_OBLIQUE),
    };
    let name = format!("{}{}.{}", BUILTIN_FAMILY, suffix, FILE_EXTENSION);
    Font::from_static(&name, bytes)
}

fn load_file(path: &Path, style: FontStyle) -> Result<Font, FontError> {
    let font_path = if style.is_regular() {
        path.to_owned()
    } else {
        style_variant_path(path, style).ok_or_else(|| {
            warn!("No {} variant found next to font file {}", style, path.display());
            FontError::MissingStyle{font: path.display().to_string(), style}
        })?
    };

    trace!("Reading font file {}", font_path.display());
    let bytes = fs::read(&font_path).map_err(|e| {
        FontError::Io{path: font_path.clone(), source: e}
    })?;
    let name = font_path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| font_path.display().to_string());
    Font::from_bytes(name, bytes)
}

/// Find the file of given style variant that sits next to the font file at `path`,
/// e.g. `Foo-Bold.ttf` for `Foo.ttf` (or `Foo-Regular.ttf`).
fn style_variant_path(path: &Path, style: FontStyle) -> Option<PathBuf> {
    let stem = path.file_stem()?.to_str()?;
    let stem = stem.strip_suffix(REGULAR_SUFFIX).unwrap_or(stem);
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or(FILE_EXTENSION);
    let directory = path.parent().unwrap_or_else(|| Path::new(""));

    style.file_suffixes().iter()
        .map(|suffix| directory.join(format!("{}{}.{}", stem, suffix, extension)))
        .inspect(|candidate| trace!("Trying font file {}", candidate.display()))
        .find(|candidate| candidate.is_file())
}


/// Error that may occur while loading a font.
#[derive(Debug, Error)]
pub enum FontError {
    /// The font file cannot be read.
    #[error("cannot read font file {}: {source}", path.display())]
    Io { path: PathBuf, #[source] source: io::Error },
    /// The file isn't a valid TrueType font.
    #[error("`{0}` is not a valid TrueType font")]
    Invalid(String),
    /// The family doesn't have the requested style variant.
    #[error("font {font} has no {style} variant")]
    MissingStyle { font: String, style: FontStyle },
}


#[cfg(test)]
mod tests {
    use std::fs;
    use spectral::prelude::*;
    use tempfile::tempdir;
    use crate::model::FontStyle;
    use super::{BUILTIN_BOLD, BUILTIN_REGULAR, FontError, FontFamily, FontLoader, Loader,
                style_variant_path};

    #[test]
    fn builtin_family_has_all_styles() {
        let loader = FontLoader::default();
        for &(bold, italic) in [(false, false), (true, false), (false, true), (true, true)].iter() {
            assert_that!(loader.load(FontStyle::new(bold, italic))).is_ok();
        }
    }

    #[test]
    fn builtin_bold_italic_name() {
        let font = FontLoader::default().load(FontStyle::new(true, true)).unwrap();
        assert_eq!("DejaVuSans-BoldOblique.ttf", font.name());
    }

    #[test]
    fn file_family_finds_siblings() {
        let dir = tempdir().unwrap();
        let regular = dir.path().join("Meme-Regular.ttf");
        fs::write(&regular, BUILTIN_REGULAR).unwrap();
        fs::write(dir.path().join("Meme-Bold.ttf"), BUILTIN_BOLD).unwrap();

        assert_eq!(Some(dir.path().join("Meme-Bold.ttf")),
                   style_variant_path(&regular, FontStyle::new(true, false)));
        assert_eq!(None, style_variant_path(&regular, FontStyle::new(false, true)));

        let loader = FontLoader::new(FontFamily::File(regular));
        let font = loader.load(FontStyle::new(true, false)).unwrap();
        assert_eq!("Meme-Bold.ttf", font.name());
    }

    #[test]
    fn file_family_missing_style() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Lonely.ttf");
        fs::write(&path, BUILTIN_REGULAR).unwrap();

        let result = FontLoader::new(FontFamily::File(path)).load(FontStyle::new(true, true));
        match result {
            Err(FontError::MissingStyle{style, ..}) => assert_eq!(FontStyle::new(true, true), style),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn invalid_font_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Garbage.ttf");
        fs::write(&path, b"definitely not a font").unwrap();

        let result = FontLoader::new(FontFamily::File(path)).load(FontStyle::default());
        match result {
            Err(FontError::Invalid(name)) => assert_eq!("Garbage.ttf", name),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
