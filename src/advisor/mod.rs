//! Advisory text: prompt assembly and the language-model client.

pub mod client;
pub mod prompt;

pub use client::*;
pub use prompt::*;
