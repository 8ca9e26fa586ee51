pub mod client;
pub mod ollama;
pub mod parse;
pub mod prompts;

pub use client::*;
pub use ollama::*;
pub use parse::*;
pub use prompts::*;
