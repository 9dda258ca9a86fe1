//! Module defining the command line argument parser.

use std::convert::TryFrom;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{self, AppSettings, Arg, ArgMatches};
use dankcap::{CaptionConfig, Color, ImageSource};
use serde_json;

use super::super::{NAME, VERSION};
use super::model::{ArgsError, Options};


impl<'a> TryFrom<ArgMatches<'a>> for Options {
    type Error = ArgsError;

    fn try_from(matches: ArgMatches<'a>) -> Result<Self, Self::Error> {
        let verbose_count = matches.occurrences_of(OPT_VERBOSE) as isize;
        let quiet_count = matches.occurrences_of(OPT_QUIET) as isize;
        let verbosity = verbose_count - quiet_count;

        // Both are required, so clap has already made sure they are present.
        let source = ImageSource::parse(matches.value_of(ARG_IMAGE).unwrap_or_default());
        let text = matches.value_of(ARG_TEXT).unwrap_or_default().to_owned();

        let filename = matches.value_of(OPT_FILENAME)
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .map(|f| f.to_owned());

        let mut config = match matches.value_of(OPT_STYLE) {
            Some(path) => load_style(Path::new(path))?,
            None => CaptionConfig::default(),
        };
        apply_flags(&matches, &mut config)?;

        Ok(Options{verbosity, source, text, filename, config})
    }
}

/// Read the `CaptionConfig` from a --style JSON file.
fn load_style(path: &Path) -> Result<CaptionConfig, ArgsError> {
    trace!("Loading caption style from {}", path.display());
    let json = fs::read_to_string(path).map_err(|e| ArgsError::StyleFile{
        path: path.to_owned(), source: e,
    })?;
    serde_json::from_str(&json).map_err(|e| ArgsError::StyleJson{
        path: path.to_owned(), source: e,
    })
}

/// Override the config fields whose flags were given explicitly.
fn apply_flags(matches: &ArgMatches, config: &mut CaptionConfig) -> Result<(), ArgsError> {
    if let Some(text) = matches.value_of(OPT_BOTTOM_TEXT) {
        config.bottom_text = Some(text.to_owned());
    }
    if matches.is_present(OPT_BOTTOM_TEXT_BOX) {
        config.bottom_text_box = true;
    }
    if matches.is_present(OPT_NO_BOTTOM_TEXT_BOX) {
        config.bottom_text_box = false;
    }
    if matches.is_present(OPT_SEPARATOR_LINE) {
        config.separator_line = true;
    }
    if matches.is_present(OPT_BOLD) {
        config.bold = true;
    }
    if matches.is_present(OPT_ITALIC) {
        config.italic = true;
    }
    if let Some(font) = matches.value_of(OPT_FONT) {
        config.font = Some(PathBuf::from(font));
    }

    color_flag(matches, OPT_TOP_FONT_COLOR, &mut config.top_font_color)?;
    color_flag(matches, OPT_TOP_BG_COLOR, &mut config.top_background_color)?;
    color_flag(matches, OPT_BOTTOM_FONT_COLOR, &mut config.bottom_font_color)?;
    color_flag(matches, OPT_BOTTOM_BG_COLOR, &mut config.bottom_background_color)?;
    color_flag(matches, OPT_SEPARATOR_COLOR, &mut config.separator_line_color)?;
    Ok(())
}

fn color_flag(matches: &ArgMatches, flag: &'static str, field: &mut Color) -> Result<(), ArgsError> {
    if let Some(value) = matches.value_of(flag) {
        *field = value.parse().map_err(|e| ArgsError::Color{flag, error: e})?;
    }
    Ok(())
}


// Parser definition

/// Type of the argument parser object
/// (which is called an "App" in clap's silly nomenclature).
pub type Parser<'p> = clap::App<'p, 'p>;


lazy_static! {
    static ref ABOUT: &'static str = option_env!("CARGO_PKG_DESCRIPTION").unwrap_or("");
}

const ARG_IMAGE: &str = "image";
const ARG_TEXT: &str = "text";
const OPT_FILENAME: &str = "filename";
const OPT_STYLE: &str = "style";
const OPT_FONT: &str = "font";
const OPT_BOTTOM_TEXT: &str = "bottom-text";
const OPT_BOTTOM_TEXT_BOX: &str = "bottom-text-box";
const OPT_NO_BOTTOM_TEXT_BOX: &str = "no-bottom-text-box";
const OPT_TOP_FONT_COLOR: &str = "top-font-color";
const OPT_TOP_BG_COLOR: &str = "top-bg-color";
const OPT_BOTTOM_FONT_COLOR: &str = "bottom-font-color";
const OPT_BOTTOM_BG_COLOR: &str = "bottom-bg-color";
const OPT_SEPARATOR_LINE: &str = "separator-line";
const OPT_SEPARATOR_COLOR: &str = "separator-color";
const OPT_BOLD: &str = "bold";
const OPT_ITALIC: &str = "italic";
const OPT_VERBOSE: &str = "verbose";
const OPT_QUIET: &str = "quiet";


/// Create the parser for application's command line.
#[allow(unknown_lints, dangerous_implicit_autorefs)]
pub fn create_parser<'p>() -> Parser<'p> {
    let parser = Parser::new(*NAME).version(&**VERSION);
    parser
        .about(*ABOUT)
        .author(crate_authors!(", "))

        .setting(AppSettings::StrictUtf8)

        .setting(AppSettings::UnifiedHelpMessage)
        .setting(AppSettings::DontCollapseArgsInUsage)
        .setting(AppSettings::DeriveDisplayOrder)

        // What to caption.
        .arg(Arg::with_name(ARG_IMAGE)
            .value_name("IMAGE")
            .required(true)
            .help("Image to caption (file path or http(s) URL)"))
        .arg(Arg::with_name(ARG_TEXT)
            .value_name("TEXT")
            .required(true)
            .help("Text of the top caption")
            .long_help(concat!(
                "Text of the caption placed above the image.\n\n",
                "It is wrapped to fit the image width. ",
                "Use \\n (backslash followed by n) to break lines explicitly.")))

        // Output flags.
        .arg(Arg::with_name(OPT_FILENAME)
            .long("filename").short("f")
            .value_name("NAME")
            .required(false)
            .help("Name of the output file, without extension")
            .long_help(concat!(
                "Name the final image should be saved under, without the extension.\n\n",
                "The extension matching the output format (png, jpg or gif) is appended. ",
                "By default, the current local time (YYYYMMDDhhmmss) is used.")))

        // Styling flags.
        // Underscored aliases are the flag names of older releases.
        .arg(Arg::with_name(OPT_STYLE)
            .long("style").short("s")
            .value_name("FILE")
            .help("JSON file with the caption style")
            .long_help(concat!(
                "JSON file with the caption style, as an object with any of the fields: ",
                "bottom_text, top_font_color, top_background_color, bottom_font_color, ",
                "bottom_background_color, bottom_text_box, separator_line, ",
                "separator_line_color, bold, italic, font.\n\n",
                "Flags given on the command line take precedence.")))
        .arg(Arg::with_name(OPT_FONT)
            .long("font")
            .value_name("PATH")
            .help("TrueType font file to use")
            .long_help(concat!(
                "TrueType font file to use instead of the built-in DejaVu Sans.\n\n",
                "Bold & italic variants are looked up in the same directory, ",
                "e.g. Foo-Bold.ttf or Foo-Italic.ttf for Foo.ttf.")))
        .arg(Arg::with_name(OPT_BOTTOM_TEXT)
            .long("bottom-text").alias("bottom_text")
            .value_name("TEXT")
            .help("Text of the bottom caption"))
        .arg(Arg::with_name(OPT_BOTTOM_TEXT_BOX)
            .long("bottom-text-box").alias("bottom_text_box")
            .overrides_with(OPT_NO_BOTTOM_TEXT_BOX)
            .help("Put the bottom text in a band below the image (default)"))
        .arg(Arg::with_name(OPT_NO_BOTTOM_TEXT_BOX)
            .long("no-bottom-text-box")
            .overrides_with(OPT_BOTTOM_TEXT_BOX)
            .help("Draw the bottom text over the image rather than below it"))
        .arg(Arg::with_name(OPT_TOP_FONT_COLOR)
            .long("top-font-color").alias("top_font_color")
            .value_name("COLOR")
            .help("Text color of the top caption"))
        .arg(Arg::with_name(OPT_TOP_BG_COLOR)
            .long("top-bg-color").alias("top_bg_color")
            .value_name("COLOR")
            .help("Background color of the top caption"))
        .arg(Arg::with_name(OPT_BOTTOM_FONT_COLOR)
            .long("bottom-font-color").alias("bottom_font_color")
            .value_name("COLOR")
            .help("Text color of the bottom caption"))
        .arg(Arg::with_name(OPT_BOTTOM_BG_COLOR)
            .long("bottom-bg-color").alias("bottom_bg_color")
            .value_name("COLOR")
            .help("Background color of the bottom caption"))
        .arg(Arg::with_name(OPT_SEPARATOR_LINE)
            .long("separator-line").alias("separator_line")
            .help("Separate the caption(s) from the image with a line"))
        .arg(Arg::with_name(OPT_SEPARATOR_COLOR)
            .long("separator-color").alias("separator_color")
            .value_name("COLOR")
            .help("Color of the separator line"))
        .arg(Arg::with_name(OPT_BOLD)
            .long("bold").short("b")
            .help("Use bold font"))
        .arg(Arg::with_name(OPT_ITALIC)
            .long("italic").short("i")
            .help("Use italic font"))

        // Verbosity flags.
        .arg(Arg::with_name(OPT_VERBOSE)
            .long("verbose").short("v")
            .multiple(true)
            .conflicts_with(OPT_QUIET)
            .help("Increase logging verbosity"))
        .arg(Arg::with_name(OPT_QUIET)
            .long("quiet").short("q")
            .multiple(true)
            .conflicts_with(OPT_VERBOSE)
            .help("Decrease logging verbosity"))

        .after_help(concat!(
            "Colors can be given as R,G,B or \"R G B\" triples, ",
            "CSS color names, or hex numbers (#rrggbb, #rgb, 0xrrggbb, $rrggbb)."))

        .help_short("H")
        .version_short("V")
}
