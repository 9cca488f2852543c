#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{Cursor, Result as IoResult, Write};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Mutex, MutexGuard};

use marrow::core::config::Config;
use marrow::flags::Flags;
use marrow::highlight::SyntaxHighlighter;
use marrow::input::BufferedSource;
use marrow::shell::{Shell, Termination};

/// Collects everything the shell writes so tests can read it back.
#[derive(Clone, Default)]
pub struct MemWriter {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl MemWriter {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.borrow()).into_owned()
    }
}

impl Write for MemWriter {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}

/// Serializes tests that touch the working directory or `PATH`, restoring
/// both when dropped.
pub struct EnvGuard {
    cwd: Option<PathBuf>,
    path: Option<OsString>,
    _lock: MutexGuard<'static, ()>,
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        if let Some(cwd) = &self.cwd {
            let _ = env::set_current_dir(cwd);
        }
        match &self.path {
            Some(path) => env::set_var("PATH", path),
            None => env::remove_var("PATH"),
        }
    }
}

pub fn env_lock() -> EnvGuard {
    static LOCK: Mutex<()> = Mutex::new(());
    let lock = LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    EnvGuard {
        cwd: env::current_dir().ok(),
        path: env::var_os("PATH"),
        _lock: lock,
    }
}

pub struct Run {
    pub termination: Termination,
    pub output: String,
}

/// Feeds `script` to a fresh shell whose state files live in `dir`.
pub fn run_script(dir: &Path, script: impl AsRef<[u8]>, quiet: bool) -> Run {
    let mut flags = Flags::new();
    if quiet {
        flags.set("quiet", "true");
    }
    let out = MemWriter::default();
    let mut shell = Shell::with_io(
        flags,
        Config::in_dir(dir),
        Box::new(BufferedSource::new(Cursor::new(script.as_ref().to_vec()))),
        Box::new(out.clone()),
        SyntaxHighlighter::plain(),
    );

    let termination = shell.run().expect("shell run failed");
    Run {
        termination,
        output: out.contents(),
    }
}
