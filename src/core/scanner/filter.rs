//! File classification for the scanner.

use std::collections::HashSet;
use std::path::Path;

/// Raster, vector and animation formats treated as pictures.
pub const PICTURE_EXTENSIONS: &[&str] = &[
    "ani", "anim", "apng", "art", "bmp", "bpg", "bsave", "cal", "cin", "cpc", "cpt", "dds", "dpx",
    "ecw", "exr", "fits", "flic", "flif", "fpx", "gif", "hdri", "hevc", "icer", "icns", "ico",
    "cur", "ics", "ilbm", "jbig", "jbig2", "jng", "jpeg", "jpg", "kra", "mng", "miff", "nrrd",
    "ora", "pam", "pbm", "pgm", "ppm", "pnm", "pcx", "pgf", "pictor", "png", "psd", "psb", "psp",
    "qtvr", "ras", "rgbe", "sgi", "tga", "tiff", "ufo", "ufp", "wbmp", "webp", "xbm", "xcf",
    "xpm", "xwd",
];

/// Decides whether a file is a candidate picture
#[derive(Debug, Clone)]
pub struct ImageFilter {
    /// Lowercase extensions to include, without the dot
    extensions: HashSet<String>,
    /// Whether to include hidden files
    include_hidden: bool,
}

impl ImageFilter {
    /// Create a new filter accepting [`PICTURE_EXTENSIONS`], hidden files included
    pub fn new() -> Self {
        Self {
            extensions: PICTURE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            include_hidden: true,
        }
    }

    /// Include hidden files (starting with .)
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Override the list of extensions to accept
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions.into_iter().map(|e| e.to_lowercase()).collect();
        self
    }

    /// Check if a file should be included
    pub fn should_include(&self, path: &Path) -> bool {
        if !self.include_hidden {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with('.') {
                    return false;
                }
            }
        }

        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.contains(&ext.to_lowercase()))
            .unwrap_or(false)
    }
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify a path with the default filter
pub fn is_picture_file(path: &Path) -> bool {
    ImageFilter::new().should_include(path)
}
