use super::{ArgList, PageOptions, ToArgs};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Options specific to the generated table of contents
#[derive(Builder, Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[builder(default)]
#[serde(default)]
pub struct TocOptions {
    /// Do not use dotted lines in the toc
    pub disable_dotted_lines: bool,
    /// The header text of the toc
    #[builder(setter(into, strip_option))]
    pub toc_header_text: Option<String>,
    /// For each level of headings in the toc indent by this length
    #[builder(setter(strip_option))]
    pub toc_level_indentation: Option<u32>,
    /// Do not link from toc to sections
    pub disable_toc_links: bool,
    /// For each level of headings in the toc the font is scaled by this factor
    #[builder(setter(strip_option))]
    pub toc_text_size_shrink: Option<f64>,
    /// Use the supplied xsl style sheet for printing the table of contents
    #[builder(setter(into, strip_option))]
    pub xsl_style_sheet: Option<String>,
}

impl ToArgs for TocOptions {
    fn args(&self) -> Vec<String> {
        ArgList::new()
            .flag("--disable-dotted-lines", self.disable_dotted_lines)
            .value("--toc-header-text", &self.toc_header_text)
            .value("--toc-level-indentation", &self.toc_level_indentation)
            .flag("--disable-toc-links", self.disable_toc_links)
            .value("--toc-text-size-shrink", &self.toc_text_size_shrink)
            .value("--xsl-style-sheet", &self.xsl_style_sheet)
            .finish()
    }
}

/// The table of contents, rendered after the cover and before the pages when included
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toc {
    pub include: bool,
    pub page: PageOptions,
    pub toc: TocOptions,
}

impl ToArgs for Toc {
    /// The page options followed by the toc options. The leading `toc` keyword is added by
    /// the document, not here.
    fn args(&self) -> Vec<String> {
        ArgList::new().extend(&self.page).extend(&self.toc).finish()
    }
}
