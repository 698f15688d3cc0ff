use crate::locator::WKHTMLTOPDF;
use crate::{Error, Result};
use std::io::{self, Read, Write};
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How often [`Rendering::wait_timeout`] checks whether the process has exited
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Build the process for `command`, which may be a wrapper followed by wkhtmltopdf,
/// separated by whitespace.
fn build(command: &str, args: &[String], stdin: bool) -> Result<Command> {
    let mut tokens = command.split_whitespace();
    let program = tokens.next().ok_or_else(|| Error::NotFound {
        command: WKHTMLTOPDF.to_string(),
    })?;

    let mut cmd = Command::new(program);
    cmd.args(tokens)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .stdin(if stdin { Stdio::piped() } else { Stdio::null() });
    Ok(cmd)
}

fn spawn(command: &str, args: &[String], stdin: bool) -> Result<Child> {
    log::debug!("Running `{command} {}`", args.join(" "));
    build(command, args, stdin)?
        .spawn()
        .map_err(|e| Error::Process(e.to_string()))
}

/// Prefer whatever the process wrote to standard error over the generic failure
fn failure(stderr: &[u8], fallback: String) -> Error {
    let message = String::from_utf8_lossy(stderr);
    let message = message.trim();
    if message.is_empty() {
        Error::Process(fallback)
    } else {
        Error::Process(message.to_string())
    }
}

fn check(status: ExitStatus, stderr: &[u8]) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        Err(failure(stderr, status.to_string()))
    }
}

fn feed<R: Read + ?Sized>(input: &mut R, mut stdin: ChildStdin) -> io::Result<()> {
    match io::copy(input, &mut stdin).and_then(|_| stdin.flush()) {
        // the process is free to stop reading early; its exit status tells the story
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn joined<T>(handle: JoinHandle<io::Result<T>>) -> io::Result<T> {
    handle
        .join()
        .unwrap_or_else(|_| Err(io::Error::other("pipe thread panicked")))
}

/// Run `command` with `args` to completion, streaming `input` into its standard input.
///
/// On success `output` holds exactly what the process wrote to standard output.
pub(crate) fn run(
    command: &str,
    args: &[String],
    input: Option<&mut (dyn Read + Send)>,
    output: &mut Vec<u8>,
) -> Result<()> {
    output.clear();
    let mut child = spawn(command, args, input.is_some())?;
    let stdin = child.stdin.take();

    let (finished, fed) = thread::scope(|scope| {
        let feeder = match (input, stdin) {
            (Some(input), Some(stdin)) => Some(scope.spawn(move || feed(input, stdin))),
            _ => None,
        };
        let finished = child.wait_with_output();
        let fed = feeder.map(|handle| {
            handle
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("pipe thread panicked")))
        });
        (finished, fed)
    });

    let finished = finished.map_err(|e| Error::Process(e.to_string()))?;
    check(finished.status, &finished.stderr)?;
    if let Some(Err(e)) = fed {
        return Err(Error::Input(e));
    }

    *output = finished.stdout;
    Ok(())
}

/// A wkhtmltopdf process running in the background, started by
/// [`PDFGenerator::spawn`](crate::PDFGenerator::spawn).
///
/// Dropping a `Rendering` without waiting on it leaves the process running.
#[derive(Debug)]
pub struct Rendering<'a> {
    child: Child,
    stdin: Option<JoinHandle<io::Result<()>>>,
    stdout: Option<JoinHandle<io::Result<Vec<u8>>>>,
    stderr: Option<JoinHandle<io::Result<Vec<u8>>>>,
    output: &'a mut Vec<u8>,
    killed: bool,
}

impl<'a> Rendering<'a> {
    pub(crate) fn start(
        command: &str,
        args: &[String],
        input: Option<Vec<u8>>,
        output: &'a mut Vec<u8>,
    ) -> Result<Rendering<'a>> {
        output.clear();
        let mut child = spawn(command, args, input.is_some())?;

        let stdin = match (input, child.stdin.take()) {
            (Some(input), Some(stdin)) => {
                Some(thread::spawn(move || feed(&mut input.as_slice(), stdin)))
            }
            _ => None,
        };
        let stdout = child.stdout.take().map(collect);
        let stderr = child.stderr.take().map(collect);

        Ok(Rendering {
            child,
            stdin,
            stdout,
            stderr,
            output,
            killed: false,
        })
    }

    /// The operating system's id for the process
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Forcibly stop the process. [`wait`](Rendering::wait) afterwards reports the failure.
    ///
    /// Only the process itself is killed: anything it started, such as wkhtmltopdf under a
    /// wrapper, keeps running until it finishes on its own.
    pub fn kill(&mut self) -> Result<()> {
        match self.child.kill() {
            Ok(()) => {
                self.killed = true;
                Ok(())
            }
            // already exited
            Err(e) if e.kind() == io::ErrorKind::InvalidInput => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Block until the process exits. On success the document's buffer holds the output.
    pub fn wait(mut self) -> Result<()> {
        let status = self.child.wait();
        match status {
            Ok(status) if self.killed && !status.success() => {
                self.detach_pipes();
                Err(Error::Process(status.to_string()))
            }
            status => self.finish(status),
        }
    }

    /// Like [`wait`](Rendering::wait), but kills the process and returns
    /// [`Error::TimedOut`] once `timeout` has passed.
    pub fn wait_timeout(mut self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = self.child.try_wait()? {
                return self.finish(Ok(status));
            }
            if Instant::now() >= deadline {
                self.kill()?;
                let _ = self.child.wait();
                self.detach_pipes();
                return Err(Error::TimedOut(timeout));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    #[allow(clippy::type_complexity)]
    fn join_pipes(
        &mut self,
    ) -> (
        Option<io::Result<()>>,
        io::Result<Vec<u8>>,
        io::Result<Vec<u8>>,
    ) {
        let fed = self.stdin.take().map(joined);
        let stdout = self.stdout.take().map_or_else(|| Ok(Vec::new()), joined);
        let stderr = self.stderr.take().map_or_else(|| Ok(Vec::new()), joined);
        (fed, stdout, stderr)
    }

    /// Stop waiting on the pipe threads. Children of a killed process may hold the pipes
    /// open long after it has gone; the threads end once they close.
    fn detach_pipes(&mut self) {
        self.stdin.take();
        self.stdout.take();
        self.stderr.take();
    }

    fn finish(mut self, status: io::Result<ExitStatus>) -> Result<()> {
        let (fed, stdout, stderr) = self.join_pipes();
        let status = status.map_err(|e| Error::Process(e.to_string()))?;
        check(status, &stderr?)?;
        if let Some(Err(e)) = fed {
            return Err(Error::Input(e));
        }
        *self.output = stdout?;
        Ok(())
    }
}

fn collect<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn stderr_is_trimmed_and_preferred() {
        let err = failure(b"  Error: no display\n", "exit status: 1".to_string());
        assert_eq!(err.to_string(), "Error: no display");
    }

    #[test]
    fn blank_stderr_falls_back_to_exit_description() {
        let err = failure(b" \n\t", "exit status: 1".to_string());
        assert_eq!(err.to_string(), "exit status: 1");
    }

    #[test]
    fn empty_command_is_not_found() {
        let err = build("  ", &[], false).expect_err("empty command can't run");
        assert_eq!(err.to_string(), "wkhtmltopdf not found");
    }

    #[test]
    fn launch_failures_are_reported() {
        let mut output = b"stale".to_vec();
        let err = run(
            "/nonexistent/wkhtmltopdf-for-tests",
            &["-".to_string()],
            None,
            &mut output,
        )
        .expect_err("can't launch a missing program");
        assert!(matches!(err, Error::Process(_)));
        assert!(output.is_empty());
    }
}
