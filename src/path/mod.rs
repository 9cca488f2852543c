mod expander;

pub use expander::{home_dir, PathExpander};
