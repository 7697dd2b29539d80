//! DetectAI - terminal client for the DetectAI code analysis backend
//!
//! This library provides the pieces behind the `detectai` CLI: the HTTP
//! gateway to the backend, the shared tool panel state machine, result
//! rendering and the interactive navigation shell.

pub mod api;
pub mod cli;
pub mod commands;
pub mod global;
pub mod home;
pub mod model;
pub mod panel;
pub mod render;
pub mod shell;
