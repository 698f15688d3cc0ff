#![cfg(unix)]

use std::io::Cursor;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wkhtml_pdf::{Error, Page, PageReader, PDFGenerator};

/// Write a shell script standing in for wkhtmltopdf and return the command running it
fn fake_wkhtmltopdf(dir: &TempDir, body: &str) -> String {
    let script = dir.path().join("wkhtmltopdf.sh");
    std::fs::write(&script, format!("#!/bin/sh\n{body}\n")).expect("can write fake script");
    format!("/bin/sh {}", script.display())
}

fn generator(dir: &TempDir, body: &str) -> PDFGenerator {
    let mut pdfg = PDFGenerator::preparer();
    pdfg.set_command(fake_wkhtmltopdf(dir, body));
    pdfg
}

#[test]
fn failure_reports_trimmed_stderr() {
    let dir = TempDir::new().expect("can create temp dir");
    let mut pdfg = generator(&dir, "echo 'Error: no display' >&2\nexit 1");
    pdfg.add_page(Page::new("report.html")).expect("can add page");

    let err = pdfg.create().expect_err("fake wkhtmltopdf fails");
    assert_eq!(err.to_string(), "Error: no display");
}

#[test]
fn failure_without_stderr_reports_exit_status() {
    let dir = TempDir::new().expect("can create temp dir");
    let mut pdfg = generator(&dir, "exit 3");

    let err = pdfg.create().expect_err("fake wkhtmltopdf fails");
    assert!(matches!(err, Error::Process(_)));
    assert_eq!(err.to_string(), "exit status: 3");
}

#[test]
fn buffer_holds_stdout_byte_for_byte() {
    let dir = TempDir::new().expect("can create temp dir");
    let mut pdfg = generator(&dir, r"printf '%%PDF-1.4\n\000\377\r\n%%%%EOF'");
    pdfg.add_page(Page::new("report.html")).expect("can add page");

    pdfg.create().expect("can render");
    assert_eq!(pdfg.bytes(), b"%PDF-1.4\n\x00\xff\r\n%%EOF");

    // running again replaces the previous output
    pdfg.create().expect("can render again");
    assert_eq!(pdfg.bytes(), b"%PDF-1.4\n\x00\xff\r\n%%EOF");
}

#[test]
fn arguments_reach_the_process_in_order() {
    let dir = TempDir::new().expect("can create temp dir");
    let mut pdfg = generator(&dir, r#"printf '%s\n' "$@""#);
    pdfg.global.page_size = Some("A4".to_string());
    pdfg.toc.include = true;
    let mut page = Page::new("report.html");
    page.settings.header_footer.footer_center = Some("[page] of [topage]".to_string());
    pdfg.add_page(page).expect("can add page");
    pdfg.output_file = Some(PathBuf::from(""));

    pdfg.create().expect("can render");
    let received = String::from_utf8(pdfg.bytes().to_vec()).expect("output is utf-8");
    let received: Vec<&str> = received.lines().collect();
    assert_eq!(received, pdfg.args());
}

#[test]
fn stream_page_is_fed_to_stdin() {
    let dir = TempDir::new().expect("can create temp dir");
    let mut pdfg = generator(&dir, "cat");
    pdfg.add_page(Page::new("before.html")).expect("can add page");
    pdfg.add_page(PageReader::new(Cursor::new(b"<h1>streamed</h1>".to_vec())))
        .expect("can add stream page");

    pdfg.create().expect("can render");
    assert_eq!(pdfg.bytes(), b"<h1>streamed</h1>");
}

#[test]
fn stdin_is_empty_without_a_stream_page() {
    let dir = TempDir::new().expect("can create temp dir");
    let mut pdfg = generator(&dir, "cat; echo done");
    pdfg.add_page(Page::new("report.html")).expect("can add page");

    pdfg.create().expect("can render");
    assert_eq!(pdfg.bytes(), b"done\n");
}

#[test]
fn spawned_render_can_be_waited_on_repeatedly() {
    let dir = TempDir::new().expect("can create temp dir");
    let mut pdfg = generator(&dir, "cat");
    pdfg.add_page(PageReader::new(Cursor::new(b"<p>again</p>".to_vec())))
        .expect("can add stream page");

    pdfg.spawn().expect("can start render").wait().expect("can render");
    assert_eq!(pdfg.bytes(), b"<p>again</p>");

    pdfg.spawn()
        .expect("can start render")
        .wait_timeout(Duration::from_secs(30))
        .expect("can render again");
    assert_eq!(pdfg.bytes(), b"<p>again</p>");
}

#[test]
fn spawned_render_reports_stderr() {
    let dir = TempDir::new().expect("can create temp dir");
    let mut pdfg = generator(&dir, "echo '  Error: no display  ' >&2\nexit 1");

    let err = pdfg
        .spawn()
        .expect("can start render")
        .wait()
        .expect_err("fake wkhtmltopdf fails");
    assert_eq!(err.to_string(), "Error: no display");
}

#[test]
fn hung_render_is_killed_at_the_deadline() {
    let dir = TempDir::new().expect("can create temp dir");
    let mut pdfg = generator(&dir, "exec sleep 30");

    let started = Instant::now();
    let err = pdfg
        .spawn()
        .expect("can start render")
        .wait_timeout(Duration::from_millis(200))
        .expect_err("render times out");
    assert!(matches!(err, Error::TimedOut(_)));
    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(pdfg.bytes().is_empty());
}

#[test]
fn killed_render_fails() {
    let dir = TempDir::new().expect("can create temp dir");
    let mut pdfg = generator(&dir, "exec sleep 30");

    let mut rendering = pdfg.spawn().expect("can start render");
    assert!(rendering.id() > 0);
    rendering.kill().expect("can kill render");
    assert!(rendering.wait().is_err());
}

#[test]
fn timeout_does_not_wait_for_a_wrapped_child() {
    let dir = TempDir::new().expect("can create temp dir");
    // without exec the shell stays in front of sleep, like xvfb-run in front of wkhtmltopdf
    let mut pdfg = generator(&dir, "sleep 5\necho finished");

    let started = Instant::now();
    let err = pdfg
        .spawn()
        .expect("can start render")
        .wait_timeout(Duration::from_millis(200))
        .expect_err("render times out");
    assert!(matches!(err, Error::TimedOut(_)));
    assert!(started.elapsed() < Duration::from_secs(3));
    assert!(pdfg.bytes().is_empty());
}

#[test]
fn kill_does_not_wait_for_a_wrapped_child() {
    let dir = TempDir::new().expect("can create temp dir");
    let mut pdfg = generator(&dir, "sleep 5\necho finished");

    let started = Instant::now();
    let mut rendering = pdfg.spawn().expect("can start render");
    rendering.kill().expect("can kill render");
    let err = rendering.wait().expect_err("killed render fails");
    assert!(matches!(err, Error::Process(_)));
    assert!(started.elapsed() < Duration::from_secs(3));
    assert!(pdfg.bytes().is_empty());
}

#[test]
fn preparer_uses_the_process_wide_path() {
    // the only test in this binary touching the process-wide cache
    wkhtml_pdf::reset_paths();
    let mut pdfg = PDFGenerator::preparer();
    pdfg.add_page(Page::new("report.html")).expect("can add page");
    let err = pdfg.create().expect_err("no command is known yet");
    assert_eq!(err.to_string(), "wkhtmltopdf not found");

    let dir = TempDir::new().expect("can create temp dir");
    let script = dir.path().join("wkhtmltopdf.sh");
    std::fs::write(&script, "#!/bin/sh\nprintf rendered\n").expect("can write fake script");
    wkhtml_pdf::set_path(script.display().to_string());
    wkhtml_pdf::set_wrapper("/bin/sh");

    pdfg.create().expect("can render with the cached command");
    assert_eq!(pdfg.bytes(), b"rendered");
    assert_eq!(pdfg.command(), "");

    wkhtml_pdf::reset_paths();
}
