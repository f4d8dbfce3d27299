pub mod config;
pub mod pages;
pub mod repl;
