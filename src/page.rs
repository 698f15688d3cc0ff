use crate::options::{PageSettings, ToArgs};
use std::fmt;
use std::io::Read;

/// Input token telling wkhtmltopdf to read a page from its standard input
pub const STDIN_SENTINEL: &str = "-";

/// One HTML input of a document. A single input can span many pages of the output.
pub trait InputPage: Send {
    /// The path or URL wkhtmltopdf should load, or [`STDIN_SENTINEL`] for streamed pages
    fn input_file(&self) -> &str;

    /// This page's own argument fragment
    fn args(&self) -> Vec<String>;

    /// The stream to feed into wkhtmltopdf's standard input, if this page is streamed
    fn reader(&mut self) -> Option<&mut (dyn Read + Send)>;

    fn settings(&self) -> &PageSettings;

    fn is_streamed(&self) -> bool {
        self.input_file() == STDIN_SENTINEL
    }
}

/// A page loaded by wkhtmltopdf itself from a local file or a URL
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub input: String,
    pub settings: PageSettings,
}

impl Page {
    pub fn new<S: Into<String>>(input: S) -> Page {
        Page {
            input: input.into(),
            settings: PageSettings::default(),
        }
    }
}

impl InputPage for Page {
    fn input_file(&self) -> &str {
        &self.input
    }

    fn args(&self) -> Vec<String> {
        self.settings.args()
    }

    fn reader(&mut self) -> Option<&mut (dyn Read + Send)> {
        None
    }

    fn settings(&self) -> &PageSettings {
        &self.settings
    }
}

/// A page whose HTML is streamed into wkhtmltopdf's standard input.
///
/// The process has a single standard input, so a document accepts at most one of these.
pub struct PageReader {
    pub input: Box<dyn Read + Send>,
    pub settings: PageSettings,
}

impl PageReader {
    pub fn new<R: Read + Send + 'static>(input: R) -> PageReader {
        PageReader {
            input: Box::new(input),
            settings: PageSettings::default(),
        }
    }
}

impl fmt::Debug for PageReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageReader")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl InputPage for PageReader {
    fn input_file(&self) -> &str {
        STDIN_SENTINEL
    }

    fn args(&self) -> Vec<String> {
        self.settings.args()
    }

    fn reader(&mut self) -> Option<&mut (dyn Read + Send)> {
        Some(&mut *self.input)
    }

    fn settings(&self) -> &PageSettings {
        &self.settings
    }
}
