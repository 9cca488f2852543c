pub mod aliases;
pub mod commands;
pub mod config;
pub mod history;
pub mod session;
pub mod tokenizer;
