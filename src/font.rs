//! Font handling for the badge
//!
//! A [`Font`] wraps a shared fontdue face together with a nominal size and
//! weight. The size is advisory only: the badge recomputes the pixel size
//! from its bounds on every draw.

use log::{debug, warn};
use std::{
    fmt, fs,
    path::Path,
    sync::{Arc, OnceLock},
};

/// Nominal size of the default font
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

/// Bold sans faces tried, in order, when looking for the system font
const BOLD_SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    "/usr/share/fonts/TTF/LiberationSans-Bold.ttf",
    "/usr/share/fonts/noto/NotoSans-Bold.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Bold.ttf",
    "/usr/share/fonts/google-noto/NotoSans-Bold.ttf",
];

static SYSTEM_BOLD_FACE: OnceLock<Option<Arc<fontdue::Font>>> = OnceLock::new();

#[derive(Clone)]
pub struct Font {
    face: Option<Arc<fontdue::Font>>,
    size: f32,
    bold: bool,
}

impl Font {
    /// The bold system font at the given nominal size.
    ///
    /// The font paths are probed once per process. If no face is found the
    /// returned font has no glyphs and text drawn with it is skipped.
    pub fn bold_system(size: f32) -> Self {
        let face = SYSTEM_BOLD_FACE.get_or_init(probe_system_bold).clone();
        Self {
            face,
            size,
            bold: true,
        }
    }

    /// Load a TTF/OTF face from disk
    pub fn from_file(path: impl AsRef<Path>, size: f32) -> Result<Self, Box<dyn std::error::Error>> {
        let bytes = fs::read(path.as_ref())?;
        Self::from_bytes(&bytes, size)
    }

    pub fn from_bytes(bytes: &[u8], size: f32) -> Result<Self, Box<dyn std::error::Error>> {
        let face = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())?;
        Ok(Self {
            face: Some(Arc::new(face)),
            size,
            bold: false,
        })
    }

    /// Same face at a different nominal size
    pub fn with_size(&self, size: f32) -> Self {
        Self {
            face: self.face.clone(),
            size,
            bold: self.bold,
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub fn face(&self) -> Option<&fontdue::Font> {
        self.face.as_deref()
    }

    pub fn has_face(&self) -> bool {
        self.face.is_some()
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::bold_system(DEFAULT_FONT_SIZE)
    }
}

impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        let same_face = match (&self.face, &other.face) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_face && self.size == other.size && self.bold == other.bold
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("loaded", &self.face.is_some())
            .field("size", &self.size)
            .field("bold", &self.bold)
            .finish()
    }
}

fn probe_system_bold() -> Option<Arc<fontdue::Font>> {
    for path in BOLD_SYSTEM_FONT_PATHS {
        let Ok(bytes) = fs::read(path) else {
            continue;
        };
        match fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()) {
            Ok(face) => {
                debug!("Using bold system font {}", path);
                return Some(Arc::new(face));
            }
            Err(e) => warn!("Failed to parse system font {}: {}", path, e),
        }
    }
    warn!("No bold system font found, initials will not be rendered");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_font_is_bold() {
        let font = Font::default();
        assert!(font.is_bold());
        assert_eq!(font.size(), DEFAULT_FONT_SIZE);
    }

    #[test]
    fn system_face_is_shared() {
        let a = Font::bold_system(12.0);
        let b = Font::bold_system(12.0);
        assert_eq!(a, b);
        assert_ne!(a, b.with_size(20.0));
    }

    #[test]
    fn with_size_keeps_face_and_weight() {
        let font = Font::bold_system(16.0).with_size(30.0);
        assert_eq!(font.size(), 30.0);
        assert!(font.is_bold());
        assert_eq!(font.has_face(), Font::default().has_face());
    }

    #[test]
    fn debug_reports_load_state() {
        let font = Font::bold_system(16.0);
        let text = format!("{:?}", font);
        assert!(text.contains(&format!("loaded: {}", font.has_face())));
        assert!(text.contains("bold: true"));
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(Font::from_bytes(b"not a font", 16.0).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Font::from_file("/nonexistent/font.ttf", 16.0).is_err());
    }
}
