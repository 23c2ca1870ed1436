mod output;
mod prompt;

pub use output::Output;
pub use prompt::Prompt;
