use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use parking_lot::Mutex;

use crate::{error::SinkError, severity::Severity, utils::timestamp};

const SWITCH_MARKER: &str = "=== Switching to new log file ===";
const HEADER_RULE: &str = "===================================";

/// Line-oriented destination behind the file sink.
pub trait LogWriter: Send {
    fn regular(&mut self, line: &str) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
}

/// A log file opened in append mode.
pub struct LogFile {
    file: BufWriter<File>,
}

impl LogFile {
    /// Opens `path` for appending, creating missing parent directories first.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, SinkError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| SinkError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| SinkError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            file: BufWriter::new(file),
        })
    }
}

impl LogWriter for LogFile {
    fn regular(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.file, "{line}")
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Reports a file fault straight to stderr. Never goes through a console lock,
/// since the file lock is held whenever this runs.
fn report_fault(err: &io::Error) {
    let _ = writeln!(io::stderr().lock(), "ERROR: Failed to write to log file: {err}");
}

struct Session {
    path: PathBuf,
    writer: Box<dyn LogWriter>,
}

impl Session {
    fn start(path: PathBuf, mut writer: Box<dyn LogWriter>, name: &str) -> io::Result<Self> {
        writer.regular(&format!("=== Log Started: {} ===", timestamp()))?;
        writer.regular(&format!("Logger: {name}"))?;
        writer.regular(HEADER_RULE)?;
        writer.flush()?;
        Ok(Self { path, writer })
    }

    fn close_with(mut self, trailer: &str) {
        let result = self
            .writer
            .regular(trailer)
            .and_then(|_| self.writer.flush());
        if let Err(err) = result {
            report_fault(&err);
        }
    }

    fn end(self) {
        let footer = format!("=== Log Ended: {} ===\n", timestamp());
        self.close_with(&footer);
    }

    fn switch(self) {
        self.close_with(SWITCH_MARKER);
    }
}

/// File half of a logger. At most one session is open at a time; every
/// operation runs under the sink's own lock.
#[derive(Default)]
pub(crate) struct FileSink {
    session: Mutex<Option<Session>>,
}

impl FileSink {
    /// Closes any current session with a switching marker, then opens `path`.
    pub fn enable(&self, path: &Path, name: &str) -> Result<(), SinkError> {
        self.start(path, name, || {
            Ok(Box::new(LogFile::new(path)?) as Box<dyn LogWriter>)
        })
    }

    fn start<F>(&self, path: &Path, name: &str, open: F) -> Result<(), SinkError>
    where
        F: FnOnce() -> Result<Box<dyn LogWriter>, SinkError>,
    {
        let mut session = self.session.lock();
        if let Some(previous) = session.take() {
            previous.switch();
        }
        let started = Session::start(path.to_path_buf(), open()?, name).map_err(|source| {
            SinkError::Open {
                path: path.to_path_buf(),
                source,
            }
        })?;
        *session = Some(started);
        Ok(())
    }

    /// Ends the current session. Returns whether one was open.
    pub fn disable(&self) -> bool {
        match self.session.lock().take() {
            Some(session) => {
                session.end();
                true
            }
            None => false,
        }
    }

    pub fn write(&self, line: &str, severity: Severity) {
        let mut session = self.session.lock();
        let Some(session) = session.as_mut() else {
            return;
        };
        if let Err(err) = session.writer.regular(line) {
            report_fault(&err);
            return;
        }
        if severity == Severity::Error
            && let Err(err) = session.writer.flush()
        {
            report_fault(&err);
        }
    }

    pub fn flush(&self) {
        if let Some(session) = self.session.lock().as_mut()
            && let Err(err) = session.writer.flush()
        {
            report_fault(&err);
        }
    }

    pub fn path(&self) -> Option<PathBuf> {
        self.session.lock().as_ref().map(|s| s.path.clone())
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Some(session) = self.session.get_mut().take() {
            session.end();
        }
    }
}
