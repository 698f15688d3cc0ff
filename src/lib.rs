//! Drive the `wkhtmltopdf` command line tool from a typed document description.
//!
//! ```no_run
//! use wkhtml_pdf::{Page, PDFGenerator};
//!
//! let mut pdfg = PDFGenerator::new()?;
//! pdfg.global.page_size = Some("A4".to_string());
//! pdfg.add_page(Page::new("report.html"))?;
//! pdfg.create()?;
//! pdfg.write_file("report.pdf")?;
//! # Ok::<(), wkhtml_pdf::Error>(())
//! ```

mod error;
pub use error::*;

pub mod options;

mod page;
pub use page::*;

mod generator;
pub use generator::*;

mod config;
pub use config::*;

pub mod locator;
pub use locator::{get_path, get_wrapper, reset_paths, set_path, set_wrapper};

mod runner;
pub use runner::Rendering;
