// Reusable library API, visible to both CLI and WASM builds
pub mod alphabet;
pub mod corpus;
pub mod engine;
pub mod errors;
pub mod letters;
pub mod log;
pub mod output;
pub mod partition;

// Generators
pub mod anagram;
pub mod chain;
pub mod clusters;
pub mod hiding;
pub mod lock;
pub mod rotation;
pub mod sandwich;
pub mod square;

// Compile the wasm glue only when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;
