//!
//! dankcap  -- Caption bands for images and GIFs
//!
//! Loads an image (or an animated GIF), stacks a caption band with wrapped text
//! above it (and optionally another one below), and encodes the result again.
//!
//! ```no_run
//! use dankcap::{Captioner, Color};
//!
//! let captioner = Captioner::builder("yesbutno.jpg", "Mom at 2am: Are you awake?\\n\\nMe:")
//!     .bottom_text("zzz")
//!     .separator_line(true)
//!     .bottom_background_color(Color::gray(0xee))
//!     .build()?;
//! let path = captioner.save("meme")?;
//! println!("{}", path.display());
//! # Ok::<(), dankcap::CaptionError>(())
//! ```

             extern crate color_quant;
             extern crate css_color_parser;
             extern crate gif;
             extern crate image;
             extern crate itertools;
#[macro_use] extern crate lazy_static;
#[macro_use] extern crate log;
#[macro_use] extern crate maplit;
             extern crate mime;
             extern crate reqwest;
             extern crate rusttype;
             extern crate serde;
#[macro_use] extern crate serde_derive;
             extern crate thiserror;
             extern crate unicode_normalization;


#[cfg(test)]              extern crate serde_json;
#[cfg(test)]              extern crate serde_test;
#[cfg(test)] #[macro_use] extern crate spectral;
#[cfg(test)]              extern crate tempfile;


mod caption;
mod codec;
mod model;
mod resources;
pub mod text;


pub use crate::caption::*;
pub use crate::codec::*;
pub use crate::model::*;
pub use crate::resources::*;
