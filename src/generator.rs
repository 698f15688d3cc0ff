use crate::locator;
use crate::options::{Cover, GlobalOptions, OutlineOptions, ToArgs, Toc};
use crate::page::{InputPage, PageReader};
use crate::runner::{self, Rendering};
use crate::{Error, Result};
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

/// Output target telling wkhtmltopdf to write the PDF to its standard output
pub const STDOUT_SENTINEL: &str = "-";

/// A PDF document to be rendered by wkhtmltopdf.
///
/// Configure the option groups and add pages, then call [`create`](PDFGenerator::create).
/// The arguments are composed as: global options, outline options, the cover, the table of
/// contents, each page in order, and finally the output file (or `-` for standard output).
pub struct PDFGenerator {
    pub global: GlobalOptions,
    pub outline: OutlineOptions,
    pub cover: Cover,
    pub toc: Toc,
    /// File for wkhtmltopdf to write to. When unset or empty the PDF is captured in the
    /// internal buffer instead.
    pub output_file: Option<PathBuf>,

    command: String,
    pages: Vec<Box<dyn InputPage>>,
    buffer: Vec<u8>,
}

impl PDFGenerator {
    /// Create an empty document and find wkhtmltopdf (and the optional wrapper) on this
    /// system. Not finding wkhtmltopdf is an error.
    pub fn new() -> Result<PDFGenerator> {
        let mut pdfg = PDFGenerator::preparer();
        pdfg.command = locator::resolve_command()?;
        Ok(pdfg)
    }

    /// Create an empty document without looking for wkhtmltopdf.
    ///
    /// Useful to prepare a document that is rendered elsewhere, e.g. to save it as JSON.
    /// [`create`](PDFGenerator::create) only works on a preparer once a command is known,
    /// either through [`set_command`](PDFGenerator::set_command) or [`locator::set_path`].
    pub fn preparer() -> PDFGenerator {
        PDFGenerator {
            global: GlobalOptions::default(),
            outline: OutlineOptions::default(),
            cover: Cover::default(),
            toc: Toc::default(),
            output_file: None,
            command: String::new(),
            pages: Vec::new(),
            buffer: Vec::new(),
        }
    }

    /// The command this document runs, empty for a preparer
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Run `command` for this document only, leaving the process-wide cache alone
    pub fn set_command<S: Into<String>>(&mut self, command: S) {
        self.command = command.into();
    }

    /// The full wkhtmltopdf argument list for this document
    pub fn args(&self) -> Vec<String> {
        let mut args = self.global.args();
        args.extend(self.outline.args());
        if self.cover.is_set() {
            args.push("cover".to_string());
            args.push(self.cover.input.clone());
            args.extend(self.cover.options.args());
        }
        if self.toc.include {
            args.push("toc".to_string());
            args.extend(self.toc.args());
        }
        for page in &self.pages {
            args.push("page".to_string());
            args.push(page.input_file().to_string());
            args.extend(page.args());
        }
        match self.output_path() {
            Some(path) => args.push(path.to_string_lossy().into_owned()),
            None => args.push(STDOUT_SENTINEL.to_string()),
        }
        args
    }

    /// [`args`](PDFGenerator::args) joined by spaces
    pub fn arg_string(&self) -> String {
        self.args().join(" ")
    }

    /// Append an input page. Only one page per document may be streamed.
    pub fn add_page<P: InputPage + 'static>(&mut self, page: P) -> Result<()> {
        if page.is_streamed() && self.pages.iter().any(|p| p.is_streamed()) {
            return Err(Error::MultipleStreamPages);
        }
        self.pages.push(Box::new(page));
        Ok(())
    }

    /// Replace every page. Only one page may be streamed.
    pub fn set_pages(&mut self, pages: Vec<Box<dyn InputPage>>) -> Result<()> {
        if pages.iter().filter(|p| p.is_streamed()).count() > 1 {
            return Err(Error::MultipleStreamPages);
        }
        self.pages = pages;
        Ok(())
    }

    pub fn pages(&self) -> &[Box<dyn InputPage>] {
        &self.pages
    }

    /// The output captured from wkhtmltopdf when no output file is set
    pub fn buffer(&self) -> &Vec<u8> {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buffer
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Write the captured output to `path`
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, &self.buffer)?;
        Ok(())
    }

    /// Render the document, blocking until wkhtmltopdf exits.
    ///
    /// On success the buffer holds wkhtmltopdf's standard output, which is the PDF unless an
    /// output file was set. A streamed page is read directly into the process; it is
    /// exhausted afterwards, so calling `create` again sends it no input.
    pub fn create(&mut self) -> Result<()> {
        let command = self.effective_command();
        let args = self.args();
        let input = self.pages.iter_mut().find_map(|page| page.reader());
        runner::run(&command, &args, input, &mut self.buffer)
    }

    /// Start rendering in the background and return a handle that can be waited on with a
    /// timeout or killed.
    ///
    /// A streamed page is read into memory first and kept, so the document can be rendered
    /// again later.
    pub fn spawn(&mut self) -> Result<Rendering<'_>> {
        let command = self.effective_command();
        let args = self.args();
        let input = self.buffer_streamed_page()?;
        Rendering::start(&command, &args, input, &mut self.buffer)
    }

    fn output_path(&self) -> Option<&Path> {
        self.output_file
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    fn effective_command(&self) -> String {
        if self.command.is_empty() {
            locator::cached_command()
        } else {
            self.command.clone()
        }
    }

    /// Read the streamed page, if there is one, fully into memory and replace it with a page
    /// streaming the same bytes so it can be read again.
    pub(crate) fn buffer_streamed_page(&mut self) -> Result<Option<Vec<u8>>> {
        for page in self.pages.iter_mut() {
            let Some(reader) = page.reader() else {
                continue;
            };
            let mut data = Vec::new();
            reader.read_to_end(&mut data).map_err(Error::Input)?;

            let settings = page.settings().clone();
            *page = Box::new(PageReader {
                input: Box::new(Cursor::new(data.clone())),
                settings,
            });
            return Ok(Some(data));
        }
        Ok(None)
    }
}

impl std::fmt::Debug for PDFGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PDFGenerator")
            .field("command", &self.command)
            .field("args", &self.args())
            .field("buffered", &self.buffer.len())
            .finish()
    }
}
