use anyhow::{Context, Result};
use cli::{Cli, JobArgs, RenderArgs};
use indicatif::{ProgressBar, ProgressStyle};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use wkhtml_pdf::{GeneratorConfig, PDFGenerator};

mod cli;
mod wizard;

fn main() -> ExitCode {
    if let Err(e) = try_main() {
        eprintln!("{}: {e:#}", console::style("Error").red());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<()> {
    use clap::Parser;
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .with_context(|| "Failed to initialise logging")?;

    match &cli.command {
        cli::Commands::Init(JobArgs { file }) => wizard::run(file),
        cli::Commands::Render(args) => render(args),
        cli::Commands::Args(JobArgs { file }) => {
            let pdfg = PDFGenerator::preparer_from_config(load_job(file)?)
                .with_context(|| "Failed to prepare document")?;
            println!("{}", pdfg.arg_string());
            Ok(())
        }
        cli::Commands::Locate => {
            let command = wkhtml_pdf::locator::resolve_command()
                .with_context(|| "Failed to locate wkhtmltopdf")?;
            println!("{command}");
            Ok(())
        }
    }
}

fn load_job(path: &Path) -> Result<GeneratorConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to load {} contents", path.display()))?;
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if is_json {
        serde_json::from_str(&contents).with_context(|| "Failed to parse JSON")
    } else {
        toml::from_str(&contents).with_context(|| "Failed to parse TOML")
    }
}

fn render(args: &RenderArgs) -> Result<()> {
    let config = load_job(&args.job.file)?;
    let mut pdfg =
        PDFGenerator::from_config(config).with_context(|| "Failed to prepare document")?;
    if let Some(output) = &args.output {
        pdfg.output_file = Some(output.clone());
    }

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("can parse progress style"),
    );
    progress.set_message("Rendering PDF...");
    progress.enable_steady_tick(Duration::from_millis(100));

    let rendering = pdfg.spawn().with_context(|| "Failed to start wkhtmltopdf")?;
    let result = match args.timeout {
        Some(secs) => rendering.wait_timeout(Duration::from_secs(secs)),
        None => rendering.wait(),
    };
    progress.finish_and_clear();
    result.with_context(|| "Failed to render PDF")?;

    match pdfg
        .output_file
        .as_ref()
        .filter(|path| !path.as_os_str().is_empty())
    {
        Some(path) => eprintln!("PDF written to {}", path.display()),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(pdfg.bytes())
                .and_then(|_| stdout.flush())
                .with_context(|| "Failed to write PDF to stdout")?;
        }
    }

    Ok(())
}
