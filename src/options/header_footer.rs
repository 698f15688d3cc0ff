use super::{ArgList, ToArgs};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Header and footer options for an input page.
///
/// Text fields may contain wkhtmltopdf's substitution variables such as `[page]`,
/// `[topage]` or `[title]`.
#[derive(Builder, Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[builder(default)]
#[serde(default)]
pub struct HeaderFooterOptions {
    #[builder(setter(into, strip_option))]
    pub footer_center: Option<String>,
    #[builder(setter(into, strip_option))]
    pub footer_font_name: Option<String>,
    #[builder(setter(strip_option))]
    pub footer_font_size: Option<u32>,
    /// Adds a html footer
    #[builder(setter(into, strip_option))]
    pub footer_html: Option<String>,
    #[builder(setter(into, strip_option))]
    pub footer_left: Option<String>,
    /// Display line above the footer
    pub footer_line: bool,
    #[builder(setter(into, strip_option))]
    pub footer_right: Option<String>,
    /// Spacing between footer and content in mm
    #[builder(setter(strip_option))]
    pub footer_spacing: Option<f64>,
    #[builder(setter(into, strip_option))]
    pub header_center: Option<String>,
    #[builder(setter(into, strip_option))]
    pub header_font_name: Option<String>,
    #[builder(setter(strip_option))]
    pub header_font_size: Option<u32>,
    /// Adds a html header
    #[builder(setter(into, strip_option))]
    pub header_html: Option<String>,
    #[builder(setter(into, strip_option))]
    pub header_left: Option<String>,
    /// Display line below the header
    pub header_line: bool,
    #[builder(setter(into, strip_option))]
    pub header_right: Option<String>,
    /// Spacing between header and content in mm
    #[builder(setter(strip_option))]
    pub header_spacing: Option<f64>,
    /// Replace `[name]` with value in header and footer
    #[builder(setter(each(name = "replacement")))]
    pub replace: Vec<(String, String)>,
}

impl ToArgs for HeaderFooterOptions {
    fn args(&self) -> Vec<String> {
        ArgList::new()
            .value("--footer-center", &self.footer_center)
            .value("--footer-font-name", &self.footer_font_name)
            .value("--footer-font-size", &self.footer_font_size)
            .value("--footer-html", &self.footer_html)
            .value("--footer-left", &self.footer_left)
            .flag("--footer-line", self.footer_line)
            .value("--footer-right", &self.footer_right)
            .value("--footer-spacing", &self.footer_spacing)
            .value("--header-center", &self.header_center)
            .value("--header-font-name", &self.header_font_name)
            .value("--header-font-size", &self.header_font_size)
            .value("--header-html", &self.header_html)
            .value("--header-left", &self.header_left)
            .flag("--header-line", self.header_line)
            .value("--header-right", &self.header_right)
            .value("--header-spacing", &self.header_spacing)
            .pairs("--replace", &self.replace)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn can_create_header_footer_options_with_builder_pattern() {
        let options = HeaderFooterOptionsBuilder::default()
            .footer_right("[page]/[topage]")
            .header_spacing(2.5)
            .replacement(("client".to_string(), "ACME".to_string()))
            .build()
            .expect("can build header and footer options");
        assert_eq!(
            options.args(),
            vec![
                "--footer-right",
                "[page]/[topage]",
                "--header-spacing",
                "2.500",
                "--replace",
                "client",
                "ACME"
            ]
        );
    }
}
