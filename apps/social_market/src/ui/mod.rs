//! Terminal presentation: brief form, result and banner rendering, clipboard,
//! and the interactive session loop.

pub mod clipboard;
pub mod form;
pub mod interactive;
pub mod render;
