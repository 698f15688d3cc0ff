use super::{ArgList, HeaderFooterOptions, ToArgs};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Options for a single input page, the cover, or the table of contents.
#[derive(Builder, Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[builder(default)]
#[serde(default)]
pub struct PageOptions {
    /// Allow the file or files from the specified folder to be loaded
    #[builder(setter(each(name = "allow_path", into)))]
    pub allow: Vec<String>,
    /// Bypass the proxy for these hosts
    #[builder(setter(each(name = "bypass_proxy_host", into)))]
    pub bypass_proxy_for: Vec<String>,
    /// Web cache directory
    #[builder(setter(into, strip_option))]
    pub cache_dir: Option<String>,
    #[builder(setter(into, strip_option))]
    pub checkbox_checked_svg: Option<String>,
    #[builder(setter(into, strip_option))]
    pub checkbox_svg: Option<String>,
    /// Cookies sent with the page request, as (name, value)
    #[builder(setter(each(name = "cookie")))]
    pub cookies: Vec<(String, String)>,
    /// Extra HTTP headers sent with the page request, as (name, value)
    #[builder(setter(each(name = "custom_header")))]
    pub custom_headers: Vec<(String, String)>,
    /// Add the custom headers to every resource request
    pub custom_header_propagation: bool,
    pub no_custom_header_propagation: bool,
    /// Show javascript debugging output
    pub debug_javascript: bool,
    /// Add a default header with the name of the page on the left and the page number on
    /// the right
    pub default_header: bool,
    /// Default text encoding for text input
    #[builder(setter(into, strip_option))]
    pub encoding: Option<String>,
    /// Do not make links to remote web pages
    pub disable_external_links: bool,
    /// Turn HTML form fields into pdf form fields
    pub enable_forms: bool,
    /// Do not load or print images
    pub no_images: bool,
    /// Do not make local links
    pub disable_internal_links: bool,
    /// Do not allow web pages to run javascript
    pub disable_javascript: bool,
    /// Wait some milliseconds for javascript to finish
    #[builder(setter(strip_option))]
    pub javascript_delay: Option<u32>,
    /// One of "abort", "ignore" or "skip"
    #[builder(setter(into, strip_option))]
    pub load_error_handling: Option<String>,
    /// One of "abort", "ignore" or "skip"
    #[builder(setter(into, strip_option))]
    pub load_media_error_handling: Option<String>,
    /// Do not allow conversion of a local file to read in other local files unless
    /// explicitly allowed with `allow`
    pub disable_local_file_access: bool,
    pub enable_local_file_access: bool,
    /// Minimum font size
    #[builder(setter(strip_option))]
    pub minimum_font_size: Option<u32>,
    /// Do not include the page in the table of contents and outlines
    pub exclude_from_outline: bool,
    /// Do not print background
    pub no_background: bool,
    /// Set the starting page number
    #[builder(setter(strip_option))]
    pub page_offset: Option<u32>,
    /// HTTP authentication password
    #[builder(setter(into, strip_option))]
    pub password: Option<String>,
    /// Form fields posted with the page request, as (name, value)
    #[builder(setter(each(name = "post_field")))]
    pub post: Vec<(String, String)>,
    /// Files posted with the page request, as (name, path)
    #[builder(setter(each(name = "post_file_field")))]
    pub post_file: Vec<(String, String)>,
    /// Use print media-type instead of screen
    pub print_media_type: bool,
    /// Use a proxy
    #[builder(setter(into, strip_option))]
    pub proxy: Option<String>,
    #[builder(setter(into, strip_option))]
    pub radiobutton_checked_svg: Option<String>,
    #[builder(setter(into, strip_option))]
    pub radiobutton_svg: Option<String>,
    /// Run these additional javascripts after the page is done loading
    #[builder(setter(each(name = "script", into)))]
    pub run_script: Vec<String>,
    /// Disable the intelligent shrinking strategy used by WebKit that makes the pixel/dpi
    /// ratio non-constant
    pub disable_smart_shrinking: bool,
    /// Do not stop slow running javascripts
    pub no_stop_slow_scripts: bool,
    /// Link from section header to the table of contents
    pub enable_toc_back_links: bool,
    /// Specify a user style sheet, to load with every page
    #[builder(setter(into, strip_option))]
    pub user_style_sheet: Option<String>,
    /// HTTP authentication username
    #[builder(setter(into, strip_option))]
    pub username: Option<String>,
    /// Set viewport size if you have custom scrollbars or css attribute overflow to emulate
    /// window size
    #[builder(setter(into, strip_option))]
    pub viewport_size: Option<String>,
    /// Wait until window.status is equal to this string before rendering the page
    #[builder(setter(into, strip_option))]
    pub window_status: Option<String>,
    /// Use this zoom factor
    #[builder(setter(strip_option))]
    pub zoom: Option<f64>,
}

impl ToArgs for PageOptions {
    fn args(&self) -> Vec<String> {
        ArgList::new()
            .each("--allow", &self.allow)
            .each("--bypass-proxy-for", &self.bypass_proxy_for)
            .value("--cache-dir", &self.cache_dir)
            .value("--checkbox-checked-svg", &self.checkbox_checked_svg)
            .value("--checkbox-svg", &self.checkbox_svg)
            .pairs("--cookie", &self.cookies)
            .pairs("--custom-header", &self.custom_headers)
            .flag("--custom-header-propagation", self.custom_header_propagation)
            .flag(
                "--no-custom-header-propagation",
                self.no_custom_header_propagation,
            )
            .flag("--debug-javascript", self.debug_javascript)
            .flag("--default-header", self.default_header)
            .value("--encoding", &self.encoding)
            .flag("--disable-external-links", self.disable_external_links)
            .flag("--enable-forms", self.enable_forms)
            .flag("--no-images", self.no_images)
            .flag("--disable-internal-links", self.disable_internal_links)
            .flag("--disable-javascript", self.disable_javascript)
            .value("--javascript-delay", &self.javascript_delay)
            .value("--load-error-handling", &self.load_error_handling)
            .value("--load-media-error-handling", &self.load_media_error_handling)
            .flag("--disable-local-file-access", self.disable_local_file_access)
            .flag("--enable-local-file-access", self.enable_local_file_access)
            .value("--minimum-font-size", &self.minimum_font_size)
            .flag("--exclude-from-outline", self.exclude_from_outline)
            .flag("--no-background", self.no_background)
            .value("--page-offset", &self.page_offset)
            .value("--password", &self.password)
            .pairs("--post", &self.post)
            .pairs("--post-file", &self.post_file)
            .flag("--print-media-type", self.print_media_type)
            .value("--proxy", &self.proxy)
            .value("--radiobutton-checked-svg", &self.radiobutton_checked_svg)
            .value("--radiobutton-svg", &self.radiobutton_svg)
            .each("--run-script", &self.run_script)
            .flag("--disable-smart-shrinking", self.disable_smart_shrinking)
            .flag("--no-stop-slow-scripts", self.no_stop_slow_scripts)
            .flag("--enable-toc-back-links", self.enable_toc_back_links)
            .value("--user-style-sheet", &self.user_style_sheet)
            .value("--username", &self.username)
            .value("--viewport-size", &self.viewport_size)
            .value("--window-status", &self.window_status)
            .value("--zoom", &self.zoom)
            .finish()
    }
}

/// Everything configurable on an input page: its page options followed by its header and
/// footer options.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    pub page: PageOptions,
    pub header_footer: HeaderFooterOptions,
}

impl ToArgs for PageSettings {
    fn args(&self) -> Vec<String> {
        ArgList::new()
            .extend(&self.page)
            .extend(&self.header_footer)
            .finish()
    }
}

/// An optional cover page, placed before everything else in the document
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cover {
    /// File path or URL of the cover; the cover is left out while this is empty
    pub input: String,
    pub options: PageOptions,
}

impl Cover {
    pub fn is_set(&self) -> bool {
        !self.input.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_render_nothing() {
        assert!(PageOptions::default().args().is_empty());
        assert!(PageSettings::default().args().is_empty());
    }

    #[test]
    fn key_value_options_emit_three_tokens_per_entry() {
        let options = PageOptionsBuilder::default()
            .cookie(("session".to_string(), "abc".to_string()))
            .custom_header(("X-Trace".to_string(), "1".to_string()))
            .build()
            .expect("can build page options");
        assert_eq!(
            options.args(),
            vec![
                "--cookie",
                "session",
                "abc",
                "--custom-header",
                "X-Trace",
                "1"
            ]
        );
    }

    #[test]
    fn repeated_scripts_keep_their_order() {
        let options = PageOptionsBuilder::default()
            .script("second()")
            .script("first()")
            .build()
            .expect("can build page options");
        assert_eq!(
            options.args(),
            vec!["--run-script", "second()", "--run-script", "first()"]
        );
    }

    #[test]
    fn page_options_come_before_header_and_footer_options() {
        let mut settings = PageSettings::default();
        settings.header_footer.footer_line = true;
        settings.page.zoom = Some(1.5);
        settings.page.print_media_type = true;
        assert_eq!(
            settings.args(),
            vec!["--print-media-type", "--zoom", "1.500", "--footer-line"]
        );
    }

    #[test]
    fn every_set_option_is_emitted_exactly_once() {
        let options = PageOptions {
            encoding: Some("utf-8".to_string()),
            javascript_delay: Some(200),
            no_background: true,
            ..Default::default()
        };
        let args = options.args();
        for flag in ["--encoding", "--javascript-delay", "--no-background"] {
            assert_eq!(args.iter().filter(|a| *a == flag).count(), 1, "{flag}");
        }
        assert_eq!(args.len(), 5);
    }
}
