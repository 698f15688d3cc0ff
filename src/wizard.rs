//! Interactive wizard for creating a job file.
//!
//! Collects the input pages, output file, paper settings, cover and table of contents
//! through a series of prompts and writes them as TOML.

use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use std::path::{Path, PathBuf};
use wkhtml_pdf::options::{GlobalOptionsBuilder, HeaderFooterOptionsBuilder, PageSettings};
use wkhtml_pdf::{GeneratorConfig, PageConfig};

const PAGE_SIZES: &[&str] = &["A4", "Letter", "Legal", "A3", "A5"];
const ORIENTATIONS: &[&str] = &["Portrait", "Landscape"];

/// Run the interactive job wizard, writing the result to `path`.
pub fn run(path: &Path) -> Result<()> {
    let theme = ColorfulTheme::default();

    let mut inputs: Vec<String> = Vec::new();
    loop {
        let input: String = Input::with_theme(&theme)
            .with_prompt(if inputs.is_empty() {
                "HTML file or URL to render"
            } else {
                "Another HTML file or URL (leave empty to finish)"
            })
            .allow_empty(!inputs.is_empty())
            .interact()
            .with_context(|| "Failed to obtain page input")?;
        if input.trim().is_empty() {
            break;
        }
        inputs.push(input.trim().to_string());
    }

    let outfile: String = Input::with_theme(&theme)
        .with_prompt("Output pdf file")
        .default("output.pdf".to_string())
        .interact()?;
    let mut outfile = PathBuf::from(outfile);
    let ext = outfile
        .extension()
        .map(std::ffi::OsStr::to_ascii_lowercase)
        .unwrap_or_default();
    if ext != *"pdf" {
        outfile.set_extension("pdf");
    }

    let page_size = Select::with_theme(&theme)
        .with_prompt("Page size")
        .items(PAGE_SIZES)
        .default(0)
        .interact()?;
    let orientation = Select::with_theme(&theme)
        .with_prompt("Orientation")
        .items(ORIENTATIONS)
        .default(0)
        .interact()?;
    let margin: u32 = Input::with_theme(&theme)
        .with_prompt("Margins in millimetres")
        .default(10)
        .interact()?;
    let grayscale = Confirm::with_theme(&theme)
        .with_prompt("Render in grayscale?")
        .default(false)
        .interact()?;

    let global = GlobalOptionsBuilder::default()
        .page_size(PAGE_SIZES[page_size])
        .orientation(ORIENTATIONS[orientation])
        .margin_top(margin)
        .margin_bottom(margin)
        .margin_left(margin)
        .margin_right(margin)
        .grayscale(grayscale)
        .build()
        .with_context(|| "Failed to build global options")?;

    let mut config = GeneratorConfig {
        global,
        output_file: Some(outfile),
        ..GeneratorConfig::default()
    };

    let cover: String = Input::with_theme(&theme)
        .with_prompt("Cover page (leave empty for none)")
        .allow_empty(true)
        .interact()?;
    config.cover.input = cover.trim().to_string();

    if Confirm::with_theme(&theme)
        .with_prompt("Include a table of contents?")
        .default(false)
        .interact()?
    {
        let header: String = Input::with_theme(&theme)
            .with_prompt("Table of contents heading")
            .default("Table of Contents".to_string())
            .interact()?;
        config.toc.include = true;
        config.toc.toc.toc_header_text = Some(header);
    }

    let mut settings = PageSettings::default();
    if Confirm::with_theme(&theme)
        .with_prompt("Number the pages in the footer?")
        .default(true)
        .interact()?
    {
        settings.header_footer = HeaderFooterOptionsBuilder::default()
            .footer_right("[page]/[topage]")
            .footer_font_size(8)
            .build()
            .with_context(|| "Failed to build footer options")?;
    }

    config.pages = inputs
        .into_iter()
        .map(|input| PageConfig {
            input,
            options: settings.clone(),
            base64_data: None,
        })
        .collect();

    let contents = toml::to_string_pretty(&config)
        .with_context(|| "Failed to convert job to TOML")?;

    if path.exists()
        && !Confirm::with_theme(&theme)
            .with_prompt(format!(
                "{} already exists, do you want to override it?",
                path.display()
            ))
            .interact()?
    {
        println!("Job:");
        println!("{}", contents);
    } else {
        std::fs::write(path, contents).with_context(|| "Failed to write job file")?;
        println!("{} written!", path.display());
    }

    Ok(())
}
