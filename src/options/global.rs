use super::{ArgList, ToArgs};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Options that apply to the whole output document.
///
/// Margins and page dimensions are in millimetres.
#[derive(Builder, Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[builder(default)]
#[serde(default)]
pub struct GlobalOptions {
    /// Read and write cookies from and to the supplied cookie jar file
    #[builder(setter(into, strip_option))]
    pub cookie_jar: Option<String>,
    /// Number of copies to print into the pdf file
    #[builder(setter(strip_option))]
    pub copies: Option<u32>,
    /// Change the dpi explicitly
    #[builder(setter(strip_option))]
    pub dpi: Option<u32>,
    /// PDF will be generated in grayscale
    pub grayscale: bool,
    /// When embedding images scale them down to this dpi
    #[builder(setter(strip_option))]
    pub image_dpi: Option<u32>,
    /// When jpeg compressing images use this quality
    #[builder(setter(strip_option))]
    pub image_quality: Option<u32>,
    /// One of "none", "error", "warn" or "info"
    #[builder(setter(into, strip_option))]
    pub log_level: Option<String>,
    /// Generates lower quality pdf/ps. Useful to shrink the result document space
    pub low_quality: bool,
    #[builder(setter(strip_option))]
    pub margin_bottom: Option<u32>,
    #[builder(setter(strip_option))]
    pub margin_left: Option<u32>,
    #[builder(setter(strip_option))]
    pub margin_right: Option<u32>,
    #[builder(setter(strip_option))]
    pub margin_top: Option<u32>,
    /// Do not collate when printing multiple copies
    pub no_collate: bool,
    /// Do not use lossless compression on pdf objects
    pub no_pdf_compression: bool,
    /// "Landscape" or "Portrait"
    #[builder(setter(into, strip_option))]
    pub orientation: Option<String>,
    #[builder(setter(strip_option))]
    pub page_height: Option<u32>,
    /// Named paper size, e.g. "A4", "Letter"
    #[builder(setter(into, strip_option))]
    pub page_size: Option<String>,
    #[builder(setter(strip_option))]
    pub page_width: Option<u32>,
    /// Be less verbose
    pub quiet: bool,
    /// The title of the generated pdf file
    #[builder(setter(into, strip_option))]
    pub title: Option<String>,
}

impl ToArgs for GlobalOptions {
    fn args(&self) -> Vec<String> {
        ArgList::new()
            .value("--cookie-jar", &self.cookie_jar)
            .value("--copies", &self.copies)
            .value("--dpi", &self.dpi)
            .flag("--grayscale", self.grayscale)
            .value("--image-dpi", &self.image_dpi)
            .value("--image-quality", &self.image_quality)
            .value("--log-level", &self.log_level)
            .flag("--lowquality", self.low_quality)
            .value("--margin-bottom", &self.margin_bottom)
            .value("--margin-left", &self.margin_left)
            .value("--margin-right", &self.margin_right)
            .value("--margin-top", &self.margin_top)
            .flag("--no-collate", self.no_collate)
            .flag("--no-pdf-compression", self.no_pdf_compression)
            .value("--orientation", &self.orientation)
            .value("--page-height", &self.page_height)
            .value("--page-size", &self.page_size)
            .value("--page-width", &self.page_width)
            .flag("--quiet", self.quiet)
            .value("--title", &self.title)
            .finish()
    }
}
