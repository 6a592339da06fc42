// Synthesizer domain - attaches model-generated "badly written" variants to records

pub mod generate;
pub mod pipeline;
pub mod prompts;

pub use generate::{extract_snippets, rewrite_poorly, synthesize};
pub use pipeline::{augment_record, augment_records, run, SynthesisPolicy, SynthesisStats};
