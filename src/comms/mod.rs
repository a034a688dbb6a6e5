//! Radio-communication prompts.
//!
//! Components:
//! - `token`: scenario tokens parsed from legacy file names
//! - `lexicon`: per-locale digit words, phonetics and sentence templates
//! - `callout`: other-traffic callout rotation and phonetic spelling
//! - `templater`: token + locale → utterance
//! - `transcript`: per-locale `transcript.txt`
//! - `batch`: directory walk, synthesis and transcoding

pub mod batch;
pub mod callout;
pub mod lexicon;
pub mod templater;
pub mod token;
pub mod transcript;
