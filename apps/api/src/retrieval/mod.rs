// Retrieval core: profile → chunks → alias expansion → intent routing → scoring.
// Pure, synchronous, no I/O. Outputs are memoized per loaded profile by chat::engine.

pub mod aliases;
pub mod chunker;
pub mod intent;
pub mod scoring;
pub mod text;
