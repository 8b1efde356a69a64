//! CLI library components for the voter roll tools.

#![allow(missing_docs)]

pub mod cli;
pub mod commands;
pub mod logging;
mod tables;
