//! Configuration for page geometry and signature preparation.
//!
//! All layout constants (page size, margins, font sizes) travel through an
//! explicit [`LayoutConfig`] value instead of module-level globals, so tests
//! can render alternate geometries deterministically.

/// Page geometry and typography used by the content builder and writer.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Page width in points (default: A4, 595pt).
    pub page_width: f32,
    /// Page height in points (default: A4, 842pt).
    pub page_height: f32,
    /// Margin on all four sides, in points.
    pub margin: f32,
    /// Vertical advance per emitted line, in points.
    pub line_height: f32,
    /// Font size for title entries, in points.
    pub title_size: f32,
    /// Font size for heading entries, in points.
    pub heading_size: f32,
    /// Font size for body text entries, in points.
    pub body_size: f32,
    /// Approximate glyph width as a fraction of the font size, used to turn
    /// the usable page width into a character budget for line wrapping.
    pub char_width_ratio: f32,
    /// Signature image preparation settings.
    pub signature: SignatureConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 595.0,
            page_height: 842.0,
            margin: 48.0,
            line_height: 16.0,
            title_size: 18.0,
            heading_size: 14.0,
            body_size: 11.0,
            char_width_ratio: 0.5,
            signature: SignatureConfig::default(),
        }
    }
}

impl LayoutConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page dimensions in points.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Set the margin in points.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the line height in points.
    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    /// Character budget for one wrapped line at the given font size.
    ///
    /// The usable width is the page width minus both margins; each glyph is
    /// estimated at `char_width_ratio * font_size` points.
    pub fn wrap_width(&self, font_size: f32) -> usize {
        let usable = self.page_width - 2.0 * self.margin;
        let per_char = self.char_width_ratio * font_size;
        ((usable / per_char).floor() as usize).max(1)
    }
}

/// Settings for signature image preparation.
#[derive(Debug, Clone)]
pub struct SignatureConfig {
    /// Maximum width of the prepared image, in pixels.
    pub max_width_px: u32,
    /// Maximum height of the prepared image, in pixels.
    pub max_height_px: u32,
    /// JPEG re-encode quality, 1-100.
    pub jpeg_quality: u8,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            max_width_px: 420,
            max_height_px: 220,
            jpeg_quality: 80,
        }
    }
}

impl SignatureConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bounding box in pixels.
    pub fn with_bounding_box(mut self, width: u32, height: u32) -> Self {
        self.max_width_px = width;
        self.max_height_px = height;
        self
    }

    /// Set the JPEG re-encode quality (1-100).
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }
}
