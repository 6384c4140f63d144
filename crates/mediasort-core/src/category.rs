//! Media categories and the extension classifier.

use std::path::Path;

use strum::{Display, EnumIter, IntoStaticStr};

/// Destination category for a media file.
///
/// The string form is the name of the subfolder files are sorted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum Category {
    #[strum(serialize = "JPEG")]
    Jpeg,
    #[strum(serialize = "HEIF")]
    Heif,
    #[strum(serialize = "RAW")]
    Raw,
    #[strum(serialize = "MOV")]
    Mov,
    #[strum(serialize = "BRAW")]
    Braw,
    #[strum(serialize = "MP4")]
    Mp4,
}

impl Category {
    /// Map a bare extension (without the leading dot) to a category.
    ///
    /// Matching is case-insensitive.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let category = match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Self::Jpeg,
            "heif" | "heic" => Self::Heif,
            "raw" | "arw" | "raf" | "nef" => Self::Raw,
            "mov" => Self::Mov,
            "braw" => Self::Braw,
            "mp4" => Self::Mp4,
            _ => return None,
        };
        Some(category)
    }

    /// Name of the destination subfolder for this category.
    pub fn folder_name(self) -> &'static str {
        self.into()
    }
}

/// Classify a file by its extension.
///
/// Returns `None` for files that are not migrated at all.
pub fn classify(path: &Path) -> Option<Category> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(Category::from_extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_classify_known_extensions() {
        assert_eq!(classify(Path::new("a.jpg")), Some(Category::Jpeg));
        assert_eq!(classify(Path::new("a.jpeg")), Some(Category::Jpeg));
        assert_eq!(classify(Path::new("a.heic")), Some(Category::Heif));
        assert_eq!(classify(Path::new("a.heif")), Some(Category::Heif));
        assert_eq!(classify(Path::new("a.nef")), Some(Category::Raw));
        assert_eq!(classify(Path::new("a.arw")), Some(Category::Raw));
        assert_eq!(classify(Path::new("a.raf")), Some(Category::Raw));
        assert_eq!(classify(Path::new("clip.mov")), Some(Category::Mov));
        assert_eq!(classify(Path::new("clip.braw")), Some(Category::Braw));
        assert_eq!(classify(Path::new("clip.mp4")), Some(Category::Mp4));
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify(Path::new("DSC_0001.JPG")), Some(Category::Jpeg));
        assert_eq!(classify(Path::new("C0001.MoV")), Some(Category::Mov));
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify(Path::new("notes.txt")), None);
        assert_eq!(classify(Path::new("Makefile")), None);
        assert_eq!(classify(Path::new("archive.jpg.bak")), None);
    }

    #[test]
    fn test_folder_names() {
        let names: Vec<_> = Category::iter().map(Category::folder_name).collect();
        assert_eq!(names, ["JPEG", "HEIF", "RAW", "MOV", "BRAW", "MP4"]);
        assert_eq!(Category::Raw.to_string(), "RAW");
    }
}
