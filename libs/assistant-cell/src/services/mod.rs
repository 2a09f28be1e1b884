pub mod completion;
pub mod orchestrator;
pub mod prompt;
pub mod selector;
