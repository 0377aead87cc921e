//! Core library for readscore.
//!
//! Computes seven readability formulas for English prose: Spache,
//! Dale-Chall, ARI, Coleman-Liau, Flesch-Kincaid, SMOG and Gunning-Fog.
//!
//! # Modules
//!
//! - [`tokenize`] - Sentence and word segmentation
//! - [`syllables`] - Syllable estimation
//! - [`stemmer`] - Porter stemming
//! - [`word_lists`] - Spache and Dale-Chall familiar-word lists
//! - [`suffix_rules`] - Inflections accepted as familiar
//! - [`classify`] - Per-word classification
//! - [`aggregate`] - Document totals
//! - [`formulas`] - The readability formulas
//! - [`score`] - The scoring entry point
//! - [`markdown`] - Markdown to prose
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use readscore_core::{Formula, ScoreConfig, score};
//!
//! let text = "The cat sat on the mat. The dog ran fast.";
//! let result = score(text, &ScoreConfig::default()).unwrap();
//! assert_eq!(result.sentence_count, 2);
//! assert_eq!(result.flesch_kincaid, Some(-1.84));
//!
//! let spache = score(text, &ScoreConfig::only(Formula::Spache)).unwrap();
//! assert!(spache.flesch_kincaid.is_none());
//! ```
#![deny(unsafe_code)]

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod error;
pub mod formulas;
pub mod markdown;
pub mod score;
pub mod stemmer;
pub mod suffix_rules;
pub mod syllables;
pub mod tokenize;
pub mod word_lists;

pub use classify::{Classification, Classifier, ClassifyOptions, Familiarity, WordReport};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{ConfigError, ConfigResult, WordListError, WordListResult};
pub use formulas::Formula;
pub use score::{ScoreConfig, ScoreResult, ScoreSelection, Scorer, score};
pub use word_lists::{ListKind, WordList, WordLists};
