//! Module for handling command line arguments.

mod model;
mod parser;


use std::convert::TryFrom;
use std::env;
use std::ffi::OsString;

pub use self::model::{ArgsError, Options};
use self::parser::create_parser;


/// Parse command line arguments and return `Options` object.
#[inline]
pub fn parse() -> Result<Options, ArgsError> {
    parse_from_argv(env::args_os())
}

/// Parse application options from given array of arguments
/// (*all* arguments, including binary name).
#[inline]
pub fn parse_from_argv<I, T>(argv: I) -> Result<Options, ArgsError>
    where I: IntoIterator<Item=T>, T: Clone + Into<OsString>
{
    let parser = create_parser();
    let matches = parser.get_matches_from_safe(argv)?;
    Options::try_from(matches)
}


#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use dankcap::{CaptionConfig, Color, ImageSource};
    use spectral::prelude::*;
    use tempfile::tempdir;
    use super::{parse_from_argv, ArgsError};
    use crate::NAME;

    #[test]
    fn no_args() {
        assert_that!(parse_from_argv(Vec::<&str>::new())).is_err();
        assert_that!(parse_from_argv(vec![*NAME])).is_err();
    }

    #[test]
    fn image_without_text() {
        assert_that!(parse_from_argv(vec![*NAME, "yesbutno.jpg"])).is_err();
    }

    #[test]
    fn image_and_text() {
        let opts = parse_from_argv(vec![*NAME, "yesbutno.jpg", "Me:"]).unwrap();
        assert_eq!(ImageSource::Path(PathBuf::from("yesbutno.jpg")), opts.source);
        assert_eq!("Me:", opts.text);
        assert_eq!(None, opts.filename);
        assert_eq!(0, opts.verbosity);
        assert_eq!(CaptionConfig::default(), opts.config);
    }

    #[test]
    fn url_source() {
        let opts = parse_from_argv(vec![
            *NAME, "https://example.com/cat.gif", "Caption"]).unwrap();
        assert_eq!(ImageSource::Url("https://example.com/cat.gif".into()), opts.source);
    }

    #[test]
    fn text_keeps_line_break_markers() {
        // They are only turned into newlines by the library.
        let opts = parse_from_argv(vec![*NAME, "a.png", r"Top\nline"]).unwrap();
        assert_eq!(r"Top\nline", opts.text);
    }

    #[test]
    fn filename() {
        let opts = parse_from_argv(vec![*NAME, "a.png", "Text", "-f", "meme"]).unwrap();
        assert_eq!(Some("meme".to_owned()), opts.filename);
        let opts = parse_from_argv(vec![*NAME, "a.png", "Text", "--filename", "  "]).unwrap();
        assert_eq!(None, opts.filename);
    }

    #[test]
    fn styling_flags() {
        let opts = parse_from_argv(vec![
            *NAME, "a.png", "Top",
            "--bottom-text", "Bottom", "--no-bottom-text-box",
            "--separator-line", "--separator-color", "255,0,0",
            "-b", "-i", "--font", "fonts/Impact.ttf",
        ]).unwrap();
        let config = &opts.config;
        assert_eq!(Some("Bottom".to_owned()), config.bottom_text);
        assert!(!config.bottom_text_box);
        assert!(config.separator_line);
        assert_eq!(Color(255, 0, 0), config.separator_line_color);
        assert!(config.bold);
        assert!(config.italic);
        assert_eq!(Some(PathBuf::from("fonts/Impact.ttf")), config.font);
    }

    #[test]
    fn underscored_aliases() {
        let opts = parse_from_argv(vec![
            *NAME, "a.png", "Top",
            "--bottom_text", "Bottom",
            "--top_font_color", "white", "--top_bg_color", "black",
            "--bottom_font_color", "0,0,255", "--bottom_bg_color", "#eee",
            "--separator_line", "--separator_color", "red",
        ]).unwrap();
        let config = &opts.config;
        assert_eq!(Some("Bottom".to_owned()), config.bottom_text);
        assert_eq!(Color::white(), config.top_font_color);
        assert_eq!(Color::black(), config.top_background_color);
        assert_eq!(Color(0, 0, 255), config.bottom_font_color);
        assert_eq!(Color::gray(0xee), config.bottom_background_color);
        assert!(config.separator_line);
        assert_eq!(Color(255, 0, 0), config.separator_line_color);
    }

    #[test]
    fn bottom_text_box_flags() {
        let opts = parse_from_argv(vec![
            *NAME, "a.png", "Top", "--bottom_text_box", "--no-bottom-text-box"]).unwrap();
        assert!(!opts.config.bottom_text_box);
        let opts = parse_from_argv(vec![
            *NAME, "a.png", "Top", "--no-bottom-text-box", "--bottom-text-box"]).unwrap();
        assert!(opts.config.bottom_text_box);
    }

    #[test]
    fn color_flags() {
        let opts = parse_from_argv(vec![
            *NAME, "a.png", "Top",
            "--top-font-color", "white",
            "--top-bg-color", "0 0 0",
            "--bottom-font-color", "#f00",
            "--bottom-bg-color", "0x00ff00",
        ]).unwrap();
        let config = &opts.config;
        assert_eq!(Color::white(), config.top_font_color);
        assert_eq!(Color::black(), config.top_background_color);
        assert_eq!(Color(255, 0, 0), config.bottom_font_color);
        assert_eq!(Color(0, 255, 0), config.bottom_background_color);
    }

    #[test]
    fn invalid_color() {
        let result = parse_from_argv(vec![*NAME, "a.png", "Top", "--top-bg-color", "nope"]);
        match result {
            Err(ArgsError::Color{flag, ..}) => assert_eq!("top-bg-color", flag),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_that!(parse_from_argv(vec![
            *NAME, "a.png", "Top", "--top-bg-color", "rgba(0, 0, 0, 0.5)"])).is_err();
    }

    #[test]
    fn verbosity() {
        let opts = parse_from_argv(vec![*NAME, "a.png", "Top", "-vv"]).unwrap();
        assert_eq!(2, opts.verbosity);
        assert!(opts.verbose());
        let opts = parse_from_argv(vec![*NAME, "a.png", "Top", "-q"]).unwrap();
        assert_eq!(-1, opts.verbosity);
        assert!(opts.quiet());
        assert_that!(parse_from_argv(vec![*NAME, "a.png", "Top", "-v", "-q"])).is_err();
    }

    #[test]
    fn style_file_with_overrides() {
        let dir = tempdir().unwrap();
        let style = dir.path().join("style.json");
        fs::write(&style, r#"{
            "bottom_text": "from the file",
            "top_background_color": [0, 0, 0],
            "top_font_color": "white",
            "bold": true
        }"#).unwrap();
        let style = style.to_str().unwrap();

        let opts = parse_from_argv(vec![
            *NAME, "a.png", "Top", "-s", style, "--top-font-color", "yellow"]).unwrap();
        let config = &opts.config;
        assert_eq!(Some("from the file".to_owned()), config.bottom_text);
        assert_eq!(Color::black(), config.top_background_color);
        assert_eq!(Color(255, 255, 0), config.top_font_color);
        assert!(config.bold);
        assert!(!config.italic);
    }

    #[test]
    fn style_file_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        match parse_from_argv(vec![*NAME, "a.png", "Top", "-s", missing.to_str().unwrap()]) {
            Err(ArgsError::StyleFile{..}) => {}
            other => panic!("unexpected result: {:?}", other),
        }

        let invalid = dir.path().join("invalid.json");
        fs::write(&invalid, r#"{"no_such_field": 42}"#).unwrap();
        match parse_from_argv(vec![*NAME, "a.png", "Top", "-s", invalid.to_str().unwrap()]) {
            Err(ArgsError::StyleJson{..}) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
