pub mod cli;
pub mod config;
pub mod git;
pub mod hook;
pub mod install;
pub mod prompt;
pub mod provider;
pub mod sanitize;
