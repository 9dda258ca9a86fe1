//! Module defining the font style selection.

use std::fmt;


/// Style variant of the font that captions are rendered with.
///
/// Bold and italic can be combined freely;
/// whether a given combination is available depends on the font family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct FontStyle {
    pub bold: bool,
    pub italic: bool,
}

impl FontStyle {
    /// The regular (upright, normal weight) style.
    pub const REGULAR: FontStyle = FontStyle{bold: false, italic: false};

    #[inline]
    pub fn new(bold: bool, italic: bool) -> Self {
        FontStyle{bold, italic}
    }

    #[inline]
    pub fn is_regular(&self) -> bool {
        !self.bold && !self.italic
    }

    /// File name suffixes under which font families customarily ship this style,
    /// in the order of preference.
    pub(crate) fn file_suffixes(&self) -> &'static [&'static str] {
        match (self.bold, self.italic) {
            (false, false) => &[""],
            (true, false) => &["-Bold"],
            (false, true) => &["-Italic", "-Oblique"],
            (true, true) => &["-BoldItalic", "-BoldOblique"],
        }
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let name = match (self.bold, self.italic) {
            (false, false) => "regular",
            (true, false) => "bold",
            (false, true) => "italic",
            (true, true) => "bold italic",
        };
        write!(fmt, "{}", name)
    }
}


#[cfg(test)]
mod tests {
    use super::FontStyle;

    #[test]
    fn regular_is_default() {
        assert_eq!(FontStyle::REGULAR, FontStyle::default());
        assert!(FontStyle::default().is_regular());
        assert!(!FontStyle::new(true, true).is_regular());
    }

    #[test]
    fn bold_italic_suffixes() {
        let style = FontStyle::new(true, true);
        assert_eq!(&["-BoldItalic", "-BoldOblique"], style.file_suffixes());
        assert_eq!("bold italic", format!("{}", style));
    }
}
