pub mod commands;
pub mod error;
pub mod fs_utils;
pub mod library;
pub mod operation;
pub mod paths;
pub mod resolve;
pub mod shell;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
