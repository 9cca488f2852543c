//! An interactive command interpreter: aliases on the first word, a bounded
//! history that can be replayed with `!!`, `!n` and `!-n`, a handful of
//! built-ins, and external programs run in the foreground.

pub mod error;
pub mod flags;
pub mod logger;
pub mod shell;

pub mod core;
pub mod highlight;
pub mod input;
pub mod path;
pub mod process;
