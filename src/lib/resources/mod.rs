//! Module handling the resources used for captioning.

mod fonts;
mod sources;


pub use self::fonts::{Font, FontError, FontFamily, FontLoader, FILE_EXTENSION as FONT_FILE_EXTENSION};
pub use self::sources::{IMAGE_FORMAT_EXTENSIONS, SourceData, SourceError, SourceLoader};


/// Loader of resources from some external source.
///
/// The key type `K` is what identifies the resource:
/// an `ImageSource` for images, a `FontStyle` for fonts of a family, etc.
pub trait Loader<K> {
    /// Type of resources that this loader can load.
    type Item;
    /// Error that may occur while loading the resource.
    type Err: std::error::Error;

    /// Load a resource identified by given key.
    fn load(&self, key: K) -> Result<Self::Item, Self::Err>;
}
