// Candidate generators - delegates to category modules
//
// Each generator scans one block against one rule table and proposes
// replacements. Generators never edit text; the resolver decides which
// proposals survive.

pub mod engine;

pub mod adjectives;
pub mod capitalization;
pub mod filler;
pub mod grammar;
pub mod industry;
pub mod keywords;
pub mod phrases;
pub mod punctuation;
pub mod quantification;
pub mod sentence_split;
pub mod spelling;
pub mod structure;
pub mod verbs;
pub mod vocabulary;

// Re-export the public interface
pub use engine::*;
