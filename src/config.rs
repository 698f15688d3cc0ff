//! Persistence of a document description.
//!
//! A [`GeneratorConfig`] captures every option group, the cover, the table of contents,
//! the pages and the output file of a [`PDFGenerator`], so a document can be prepared in
//! one place, saved as JSON (or TOML) and rendered somewhere else. Streamed pages are
//! stored with their full content, base64 encoded.

use crate::options::{Cover, GlobalOptions, OutlineOptions, PageSettings, Toc};
use crate::page::{InputPage, Page, PageReader, STDIN_SENTINEL};
use crate::{PDFGenerator, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::io::{Cursor, Read};
use std::path::PathBuf;

/// Serialisable description of a whole document
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub global: GlobalOptions,
    pub outline: OutlineOptions,
    pub cover: Cover,
    pub toc: Toc,
    pub pages: Vec<PageConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,
}

/// Serialisable description of one input page
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Path or URL of the page, or `-` for a streamed page
    pub input: String,
    pub options: PageSettings,
    /// Content of a streamed page. A streamed page without data is read from this
    /// process's standard input when restored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64_data: Option<String>,
}

impl PageConfig {
    fn into_page(self) -> Result<Box<dyn InputPage>> {
        let PageConfig {
            input,
            options,
            base64_data,
        } = self;

        let page: Box<dyn InputPage> = match base64_data {
            Some(data) => Box::new(PageReader {
                input: Box::new(Cursor::new(STANDARD.decode(data)?)),
                settings: options,
            }),
            None if input == STDIN_SENTINEL => Box::new(PageReader {
                input: Box::new(std::io::stdin()),
                settings: options,
            }),
            None => Box::new(Page {
                input,
                settings: options,
            }),
        };
        Ok(page)
    }
}

impl PDFGenerator {
    /// Describe this document. A streamed page is read into memory to be stored and stays
    /// usable afterwards.
    pub fn to_config(&mut self) -> Result<GeneratorConfig> {
        let streamed = self.buffer_streamed_page()?;

        let pages = self
            .pages()
            .iter()
            .map(|page| PageConfig {
                input: page.input_file().to_string(),
                options: page.settings().clone(),
                base64_data: if page.is_streamed() {
                    streamed.as_ref().map(|data| STANDARD.encode(data))
                } else {
                    None
                },
            })
            .collect();

        Ok(GeneratorConfig {
            global: self.global.clone(),
            outline: self.outline.clone(),
            cover: self.cover.clone(),
            toc: self.toc.clone(),
            pages,
            output_file: self.output_file.clone(),
        })
    }

    /// Serialise this document to JSON
    pub fn to_json(&mut self) -> Result<Vec<u8>> {
        let config = self.to_config()?;
        Ok(serde_json::to_vec(&config)?)
    }

    /// Restore a document and find wkhtmltopdf to render it with
    pub fn from_config(config: GeneratorConfig) -> Result<PDFGenerator> {
        let mut pdfg = PDFGenerator::new()?;
        pdfg.apply(config)?;
        Ok(pdfg)
    }

    /// Restore a document without looking for wkhtmltopdf
    pub fn preparer_from_config(config: GeneratorConfig) -> Result<PDFGenerator> {
        let mut pdfg = PDFGenerator::preparer();
        pdfg.apply(config)?;
        Ok(pdfg)
    }

    /// Restore a document from JSON and find wkhtmltopdf to render it with
    pub fn from_json<R: Read>(reader: R) -> Result<PDFGenerator> {
        let config: GeneratorConfig = serde_json::from_reader(reader)?;
        PDFGenerator::from_config(config)
    }

    fn apply(&mut self, config: GeneratorConfig) -> Result<()> {
        let GeneratorConfig {
            global,
            outline,
            cover,
            toc,
            pages,
            output_file,
        } = config;

        let pages = pages
            .into_iter()
            .map(PageConfig::into_page)
            .collect::<Result<Vec<_>>>()?;
        self.set_pages(pages)?;

        self.global = global;
        self.outline = outline;
        self.cover = cover;
        self.toc = toc;
        self.output_file = output_file;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::options::PageOptionsBuilder;

    fn sample() -> PDFGenerator {
        let mut pdfg = PDFGenerator::preparer();
        pdfg.global.page_size = Some("A4".to_string());
        pdfg.global.grayscale = true;
        pdfg.outline.outline_depth = Some(3);
        pdfg.cover.input = "cover.html".to_string();
        pdfg.toc.include = true;
        pdfg.toc.toc.toc_header_text = Some("Contents".to_string());

        let mut page = Page::new("https://example.com");
        page.settings.page = PageOptionsBuilder::default()
            .cookie(("session".to_string(), "abc".to_string()))
            .zoom(1.25)
            .build()
            .expect("can build page options");
        page.settings.header_footer.footer_right = Some("[page]".to_string());
        pdfg.add_page(page).expect("can add page");

        let mut streamed = PageReader::new(Cursor::new(b"<h1>streamed</h1>".to_vec()));
        streamed.settings.page.print_media_type = true;
        pdfg.add_page(streamed).expect("can add stream page");
        pdfg
    }

    #[test]
    fn json_round_trip_keeps_args() {
        let mut pdfg = sample();
        let json = pdfg.to_json().expect("can serialise to JSON");

        let config: GeneratorConfig =
            serde_json::from_slice(&json).expect("can deserialise JSON");
        let mut restored =
            PDFGenerator::preparer_from_config(config).expect("can restore document");
        assert_eq!(restored.args(), pdfg.args());

        let data = restored
            .buffer_streamed_page()
            .expect("can read restored stream page");
        assert_eq!(data.as_deref(), Some(&b"<h1>streamed</h1>"[..]));
    }

    #[test]
    fn serialising_leaves_the_stream_page_usable() {
        let mut pdfg = sample();
        let first = pdfg.to_config().expect("can describe document");
        let second = pdfg.to_config().expect("can describe document again");
        assert_eq!(first, second);
        assert_eq!(
            first.pages[1].base64_data.as_deref(),
            Some(STANDARD.encode(b"<h1>streamed</h1>").as_str())
        );
        assert!(first.pages[0].base64_data.is_none());
    }

    #[test]
    fn can_serialise_to_toml() {
        let mut pdfg = sample();
        let config = pdfg.to_config().expect("can describe document");
        let text = toml::to_string_pretty(&config).expect("can serialise config to TOML");
        let parsed: GeneratorConfig = toml::from_str(&text).expect("can parse TOML");
        assert_eq!(parsed, config);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: GeneratorConfig = serde_json::from_str(
            r#"{"pages": [{"input": "report.html"}], "global": {"dpi": 96}}"#,
        )
        .expect("can parse partial JSON");
        let pdfg = PDFGenerator::preparer_from_config(config).expect("can restore document");
        assert_eq!(pdfg.args(), vec!["--dpi", "96", "page", "report.html", "-"]);
    }

    #[test]
    fn bad_page_data_is_an_error() {
        let config = GeneratorConfig {
            pages: vec![PageConfig {
                input: STDIN_SENTINEL.to_string(),
                base64_data: Some("not base64!".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(PDFGenerator::preparer_from_config(config).is_err());
    }
}
