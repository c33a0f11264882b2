//! Layout and typography configuration, and the stylesheet injected into
//! every rendered chapter.

use std::fmt::Write;

/// Column layout of the rendering surface.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ColumnMode {
    /// A single vertically growing column.
    ///
    /// Chapters are not paginated horizontally; each chapter is one page.
    Single,
    /// Two columns per page, flowing horizontally.
    #[default]
    Double,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Geometry settings; changing either value requires a full re-layout.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Default: [`ColumnMode::Double`]
    pub column_mode: ColumnMode,
    /// Gap between columns in pixels.
    ///
    /// Default: `100.0`
    pub column_gap: f64,
}

impl LayoutConfig {
    pub const DEFAULT_COLUMN_GAP: f64 = 100.0;

    pub fn builder() -> LayoutConfigBuilder {
        LayoutConfigBuilder(Self::default())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_mode: ColumnMode::Double,
            column_gap: Self::DEFAULT_COLUMN_GAP,
        }
    }
}

impl From<LayoutConfigBuilder> for LayoutConfig {
    fn from(value: LayoutConfigBuilder) -> Self {
        value.build()
    }
}

/// Builder to construct a [`LayoutConfig`] instance.
#[derive(Clone, Debug)]
pub struct LayoutConfigBuilder(LayoutConfig);

impl LayoutConfigBuilder {
    pub fn build(self) -> LayoutConfig {
        self.0
    }

    /// See [`LayoutConfig::column_mode`].
    pub fn column_mode(mut self, column_mode: ColumnMode) -> Self {
        self.0.column_mode = column_mode;
        self
    }

    /// See [`LayoutConfig::column_gap`].
    pub fn column_gap(mut self, column_gap: f64) -> Self {
        self.0.column_gap = column_gap;
        self
    }
}

/// Typography and color settings supplied by the caller.
///
/// Storage of these values is up to the caller; the reader only applies them.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct StyleConfig {
    /// Font size in pixels.
    ///
    /// Default: `20`
    pub font_size: u32,
    /// Font family applied to all text.
    /// The family [`StyleConfig::DEFAULT_FONT_FAMILY`] is assumed to be
    /// available on the surface; any other family is loaded from
    /// [`StyleConfig::font_url`].
    ///
    /// Default: `sans`
    pub font_family: String,
    /// Location of the font file for a custom family.
    pub font_url: Option<String>,
    /// CSS font format hint, such as `truetype` or `woff2`.
    pub font_format: Option<String>,
    /// Default: `1.5`
    pub line_height: f64,
    /// Default: [`Theme::Light`]
    pub theme: Theme,
}

impl StyleConfig {
    pub const DEFAULT_FONT_FAMILY: &'static str = "sans";

    pub fn builder() -> StyleConfigBuilder {
        StyleConfigBuilder(Self::default())
    }

    /// Generates the stylesheet injected alongside chapter markup.
    ///
    /// Images are capped at `image_max_width` pixels.
    ///
    /// ```
    /// # use rpage::reader::{ColumnMode, LayoutConfig, StyleConfig, Theme};
    /// let style = StyleConfig::builder().font_size(18).theme(Theme::Dark).build();
    /// let css = style.stylesheet(&LayoutConfig::default(), 200.0);
    ///
    /// assert!(css.contains("columns: 2;"));
    /// assert!(css.contains("font-size: 18px"));
    /// assert!(css.contains("background-color: #171717"));
    /// ```
    pub fn stylesheet(&self, layout: &LayoutConfig, image_max_width: f64) -> String {
        // Writing into a String cannot fail
        let mut css = String::new();

        if self.font_family != Self::DEFAULT_FONT_FAMILY
            && let Some(url) = &self.font_url
        {
            let format = self
                .font_format
                .as_deref()
                .map(|format| format!(" format('{format}')"))
                .unwrap_or_default();
            let _ = writeln!(
                css,
                "@font-face {{ font-family: '{}'; font-style: normal; src: url({url}){format}; }}",
                self.font_family,
            );
        }

        let body = match layout.column_mode {
            ColumnMode::Double => format!(
                "columns: 2; column-fill: auto; column-gap: {}px; overflow: hidden;",
                layout.column_gap,
            ),
            ColumnMode::Single => String::from("overflow: hidden; min-height: 80vh; max-height: max-content;"),
        };
        let _ = writeln!(
            css,
            "body {{ {body} word-wrap: break-word; font-size: {}px !important; line-height: {}; }}",
            self.font_size, self.line_height,
        );

        let theme = match self.theme {
            Theme::Dark => " color: #FFF !important; background-color: #171717 !important;",
            Theme::Light => "",
        };
        let _ = writeln!(
            css,
            "* {{ font-family: '{}' !important;{theme} }}",
            self.font_family,
        );
        let _ = writeln!(css, "a {{ text-decoration: none; }}");
        let _ = writeln!(css, "img {{ max-width: {image_max_width}px; height: auto; }}");
        css
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_size: 20,
            font_family: String::from(Self::DEFAULT_FONT_FAMILY),
            font_url: None,
            font_format: None,
            line_height: 1.5,
            theme: Theme::Light,
        }
    }
}

impl From<StyleConfigBuilder> for StyleConfig {
    fn from(value: StyleConfigBuilder) -> Self {
        value.build()
    }
}

/// Builder to construct a [`StyleConfig`] instance.
#[derive(Clone, Debug)]
pub struct StyleConfigBuilder(StyleConfig);

impl StyleConfigBuilder {
    pub fn build(self) -> StyleConfig {
        self.0
    }

    /// See [`StyleConfig::font_size`].
    pub fn font_size(mut self, font_size: u32) -> Self {
        self.0.font_size = font_size;
        self
    }

    /// Sets a custom font family loaded from `url`.
    pub fn font(mut self, family: impl Into<String>, url: impl Into<String>, format: impl Into<String>) -> Self {
        self.0.font_family = family.into();
        self.0.font_url = Some(url.into());
        self.0.font_format = Some(format.into());
        self
    }

    /// See [`StyleConfig::line_height`].
    pub fn line_height(mut self, line_height: f64) -> Self {
        self.0.line_height = line_height;
        self
    }

    /// See [`StyleConfig::theme`].
    pub fn theme(mut self, theme: Theme) -> Self {
        self.0.theme = theme;
        self
    }
}
