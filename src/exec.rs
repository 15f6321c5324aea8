/*! External command execution.

Every stage that shells out goes through [Cmd], which logs the full
command line before spawning and turns a non-zero exit status into
[Error::Command] carrying the captured stderr.

[run_pipeline] wires several commands stdout-to-stdin the way a shell
pipe chain would, with the chain endpoints redirected to files.
!*/
use std::ffi::{OsStr, OsString};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};

use log::{error, info};

use crate::error::Error;

/// A single external command with optional file redirections.
#[derive(Debug, Clone)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    stdin: Option<PathBuf>,
    stdout: Option<(PathBuf, bool)>,
}

impl Cmd {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            stdin: None,
            stdout: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self.args.push(arg.as_ref().to_os_string());
        }
        self
    }

    pub fn stdin_from(mut self, path: &Path) -> Self {
        self.stdin = Some(path.to_path_buf());
        self
    }

    pub fn stdout_to(mut self, path: &Path) -> Self {
        self.stdout = Some((path.to_path_buf(), false));
        self
    }

    pub fn stdout_append(mut self, path: &Path) -> Self {
        self.stdout = Some((path.to_path_buf(), true));
        self
    }

    /// Shell-style rendition, for the log.
    pub fn display(&self) -> String {
        let mut line = self.program.to_string_lossy().into_owned();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        if let Some(stdin) = &self.stdin {
            line.push_str(&format!(" < {}", stdin.display()));
        }
        if let Some((stdout, append)) = &self.stdout {
            line.push_str(&format!(
                " {} {}",
                if *append { ">>" } else { ">" },
                stdout.display()
            ));
        }
        line
    }

    fn command(&self) -> Result<Command, Error> {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(path) = &self.stdin {
            command.stdin(File::open(path)?);
        }
        if let Some((path, append)) = &self.stdout {
            command.stdout(open_sink(path, *append)?);
        }
        Ok(command)
    }

    fn check(&self, status: ExitStatus, stderr: &[u8]) -> Result<(), Error> {
        if status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(stderr).into_owned();
        error!("command failed: {}", self.display());
        if !stderr.is_empty() {
            error!("{}", stderr.trim_end());
        }
        Err(Error::Command {
            command: self.display(),
            code: status.code(),
            stderr,
        })
    }

    /// Run to completion.
    pub fn run(&self) -> Result<(), Error> {
        info!("executing: {}", self.display());
        let mut command = self.command()?;
        command.stderr(Stdio::piped());
        let output = command.output()?;
        self.check(output.status, &output.stderr)
    }

    /// Run with `input` fed over stdin.
    pub fn run_feeding(&self, input: &str) -> Result<(), Error> {
        info!("executing: {}", self.display());
        let mut command = self.command()?;
        command.stdin(Stdio::piped()).stderr(Stdio::piped());
        let mut child = command.spawn()?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Custom("child stdin not captured".to_string()))?;
        let payload = input.as_bytes().to_vec();
        // feed on a side thread so a chatty child cannot deadlock us
        let feeder = std::thread::spawn(move || stdin.write_all(&payload));
        let output = child.wait_with_output()?;
        feeder
            .join()
            .map_err(|_| Error::Custom("stdin feeder thread panicked".to_string()))??;

        self.check(output.status, &output.stderr)
    }
}

fn open_sink(path: &Path, append: bool) -> Result<File, std::io::Error> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
}

/// Run `stages` as a pipe chain: the first stage reads `input`, the last
/// writes (or appends to) `output`, and every stdout in between feeds the
/// next stage's stdin. Per-stage redirections are ignored, the chain owns
/// both endpoints.
pub fn run_pipeline(stages: &[Cmd], input: &Path, output: &Path, append: bool) -> Result<(), Error> {
    if stages.is_empty() {
        return Err(Error::Custom("empty command pipeline".to_string()));
    }
    let chain = stages
        .iter()
        .map(Cmd::display)
        .collect::<Vec<_>>()
        .join(" | ");
    info!(
        "executing: {} < {} {} {}",
        chain,
        input.display(),
        if append { ">>" } else { ">" },
        output.display()
    );

    let last = stages.len() - 1;
    let mut children: Vec<Child> = Vec::with_capacity(stages.len());
    for (idx, stage) in stages.iter().enumerate() {
        let mut command = Command::new(&stage.program);
        command.args(&stage.args).stderr(Stdio::piped());

        if idx == 0 {
            command.stdin(File::open(input)?);
        } else {
            let upstream = children[idx - 1]
                .stdout
                .take()
                .ok_or_else(|| Error::Custom("upstream stdout not captured".to_string()))?;
            command.stdin(upstream);
        }

        if idx == last {
            command.stdout(open_sink(output, append)?);
        } else {
            command.stdout(Stdio::piped());
        }

        children.push(command.spawn()?);
    }

    // A failing downstream stage kills its upstream neighbours with a broken
    // pipe, so the most downstream failure is the root cause and wins.
    let mut failure = None;
    for (stage, child) in stages.iter().zip(children) {
        let output = child.wait_with_output()?;
        if let Err(e) = stage.check(output.status, &output.stderr) {
            failure = Some(e);
        }
    }
    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
