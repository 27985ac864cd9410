use std::{
    io::{self, IsTerminal, Write},
    sync::Arc,
    thread,
};

use parking_lot::{Mutex, MutexGuard};

use crate::{
    color::{ColorFlags, TerminalColorizer, select_colorizer},
    config::ColorMode,
};

/// Serializes console lines. Share one through an `Arc` to keep several
/// loggers from interleaving their output.
#[derive(Debug, Default)]
pub struct ConsoleLock(Mutex<()>);

impl ConsoleLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A lock meant to be handed to several loggers.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.0.lock()
    }
}

/// Where a logger's console lock lives.
#[derive(Debug)]
pub(crate) enum ConsoleLockRef {
    /// Private to one logger.
    Owned(ConsoleLock),
    /// Held by every logger sharing it; lives as long as the longest holder.
    Shared(Arc<ConsoleLock>),
}

impl ConsoleLockRef {
    fn get(&self) -> &ConsoleLock {
        match self {
            ConsoleLockRef::Owned(lock) => lock,
            ConsoleLockRef::Shared(lock) => lock,
        }
    }
}

/// In-memory console, readable back. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryConsole(Arc<Mutex<Vec<u8>>>);

impl MemoryConsole {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }
}

/// Stream receiving console lines.
#[derive(Debug, Clone, Default)]
pub enum ConsoleTarget {
    /// Process standard output.
    #[default]
    Stdout,
    Memory(MemoryConsole),
    /// In-memory console taking each write one byte at a time, yielding in
    /// between. Writers that do not hold a common lock tear each other's lines.
    Chunked(MemoryConsole),
}

impl ConsoleTarget {
    /// A fresh in-memory target plus the handle to read it back.
    pub fn memory() -> (Self, MemoryConsole) {
        let console = MemoryConsole::default();
        (ConsoleTarget::Memory(console.clone()), console)
    }

    /// Like [`ConsoleTarget::memory`], but byte by byte.
    pub fn chunked_memory() -> (Self, MemoryConsole) {
        let console = MemoryConsole::default();
        (ConsoleTarget::Chunked(console.clone()), console)
    }

    fn is_terminal(&self) -> bool {
        match self {
            ConsoleTarget::Stdout => io::stdout().is_terminal(),
            ConsoleTarget::Memory(_) | ConsoleTarget::Chunked(_) => false,
        }
    }

    /// Writes each part in turn, as separate writes.
    fn write_parts(&self, parts: &[&str]) -> io::Result<()> {
        match self {
            ConsoleTarget::Stdout => {
                let mut stdout = io::stdout().lock();
                for part in parts {
                    stdout.write_all(part.as_bytes())?;
                }
                stdout.flush()
            }
            ConsoleTarget::Memory(console) => {
                for part in parts {
                    console.0.lock().extend_from_slice(part.as_bytes());
                }
                Ok(())
            }
            ConsoleTarget::Chunked(console) => {
                for byte in parts.iter().flat_map(|part| part.bytes()) {
                    console.0.lock().push(byte);
                    thread::yield_now();
                }
                Ok(())
            }
        }
    }

    fn flush(&self) -> io::Result<()> {
        match self {
            ConsoleTarget::Stdout => io::stdout().flush(),
            ConsoleTarget::Memory(_) | ConsoleTarget::Chunked(_) => Ok(()),
        }
    }
}

/// Console half of a logger: set color, line and newline, reset. The three
/// writes happen under the console lock.
pub(crate) struct ConsoleSink {
    lock: ConsoleLockRef,
    target: ConsoleTarget,
    colorizer: Box<dyn TerminalColorizer>,
}

impl ConsoleSink {
    pub fn new(lock: ConsoleLockRef, target: ConsoleTarget, mode: ColorMode) -> Self {
        let colorizer = select_colorizer(mode.should_colorize(target.is_terminal()));
        Self {
            lock,
            target,
            colorizer,
        }
    }

    pub fn write(&self, line: &str, color: ColorFlags) {
        let set = self.colorizer.set_color(color);
        let reset = self.colorizer.reset();
        let _guard = self.lock.get().lock();
        // Nowhere left to report a broken console.
        let _ = self.target.write_parts(&[&*set, line, "\n", reset]);
    }

    pub fn flush(&self) {
        let _guard = self.lock.get().lock();
        let _ = self.target.flush();
    }

    pub fn colors_enabled(&self) -> bool {
        self.colorizer.is_enabled()
    }

    pub fn is_shared(&self) -> bool {
        matches!(self.lock, ConsoleLockRef::Shared(_))
    }
}
