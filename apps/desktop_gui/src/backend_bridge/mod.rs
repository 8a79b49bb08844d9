//! Backend bridge: command queue from the UI thread to the tokio worker.

pub mod commands;
pub mod runtime;
