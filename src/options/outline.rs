use super::{ArgList, ToArgs};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Controls the PDF outline (bookmarks) wkhtmltopdf generates
#[derive(Builder, Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[builder(default)]
#[serde(default)]
pub struct OutlineOptions {
    /// Dump the default TOC xsl style sheet to stdout
    pub dump_default_toc_xsl: bool,
    /// Dump the outline to a file
    #[builder(setter(into, strip_option))]
    pub dump_outline: Option<String>,
    /// Do not put an outline into the pdf
    pub no_outline: bool,
    /// Set the depth of the outline
    #[builder(setter(strip_option))]
    pub outline_depth: Option<u32>,
}

impl ToArgs for OutlineOptions {
    fn args(&self) -> Vec<String> {
        ArgList::new()
            .flag("--dump-default-toc-xsl", self.dump_default_toc_xsl)
            .value("--dump-outline", &self.dump_outline)
            .flag("--no-outline", self.no_outline)
            .value("--outline-depth", &self.outline_depth)
            .finish()
    }
}
