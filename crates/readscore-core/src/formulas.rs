//! The seven readability formulas.
//!
//! Each formula reads a [`DocumentCounts`] and returns `None` when one of
//! its denominators is zero. Scores are unrounded; callers apply [`round2`]
//! (or [`dale_chall_grade`] for Dale-Chall) before reporting.
//!
//! | Formula | Definition |
//! |---|---|
//! | Spache | `0.659 + 0.121·W/S + 0.082·(100·U/W)` |
//! | Dale-Chall | `0.1579·P + 0.0496·W/S (+ 3.6365 if P > 5)`, `P = 100·D/W` |
//! | ARI | `4.71·L/W + 0.5·W/S − 21.43` |
//! | Coleman-Liau | `0.0588·(100·L/W) − 0.296·(100·S/W) − 15.8` |
//! | Flesch-Kincaid | `0.39·W/S + 11.8·Y/W − 15.59` |
//! | SMOG | `1.043·√(30·C/S) + 3.1291` |
//! | Gunning-Fog | `0.4·(W/S + 100·C/W)` |
//!
//! `W` words, `S` sentences, `L` letters, `Y` syllables, `C` complex
//! polysyllabic words, `U` unfamiliar words, `D` difficult words.

// Plain arithmetic keeps the reported two-decimal values stable.
#![allow(clippy::suboptimal_flops)]

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::aggregate::DocumentCounts;

/// The highest grade Dale-Chall reports.
pub const DALE_CHALL_MAX_GRADE: u8 = 17;

/// A readability formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Formula {
    /// Spache, for early-grade texts.
    Spache,
    /// New Dale-Chall, as a grade band.
    DaleChall,
    /// Automated Readability Index.
    Ari,
    /// Coleman-Liau index.
    ColemanLiau,
    /// Flesch-Kincaid grade level.
    FleschKincaid,
    /// SMOG grade.
    Smog,
    /// Gunning-Fog index.
    GunningFog,
}

impl Formula {
    /// Every formula, in selection precedence order.
    pub const ALL: [Self; 7] = [
        Self::Spache,
        Self::DaleChall,
        Self::Ari,
        Self::ColemanLiau,
        Self::FleschKincaid,
        Self::Smog,
        Self::GunningFog,
    ];

    /// Returns the formula name in kebab-case.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Spache => "spache",
            Self::DaleChall => "dale-chall",
            Self::Ari => "ari",
            Self::ColemanLiau => "coleman-liau",
            Self::FleschKincaid => "flesch-kincaid",
            Self::Smog => "smog",
            Self::GunningFog => "gunning-fog",
        }
    }

    /// Human-readable label for reports.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Spache => "Spache",
            Self::DaleChall => "Dale-Chall",
            Self::Ari => "ARI",
            Self::ColemanLiau => "Coleman-Liau",
            Self::FleschKincaid => "Flesch-Kincaid",
            Self::Smog => "SMOG",
            Self::GunningFog => "Gunning-Fog",
        }
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[allow(clippy::cast_precision_loss)]
fn float(n: usize) -> f64 {
    n as f64
}

/// `numerator / denominator`, or `None` for a zero denominator.
fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    (denominator > 0).then(|| float(numerator) / float(denominator))
}

/// Round half up to two decimals, nudged by one epsilon first.
pub fn round2(n: f64) -> f64 {
    ((n + f64::EPSILON) * 100.0 + 0.5).floor() / 100.0
}

/// Spache grade.
pub fn spache(c: &DocumentCounts) -> Option<f64> {
    let per_sentence = ratio(c.words, c.sentences)?;
    let unfamiliar = ratio(c.unfamiliar, c.words)?;
    Some(0.659 + 0.121 * per_sentence + 0.082 * (unfamiliar * 100.0))
}

/// Unbanded Dale-Chall score.
pub fn dale_chall_raw(c: &DocumentCounts) -> Option<f64> {
    let per_sentence = ratio(c.words, c.sentences)?;
    let percent = ratio(c.difficult, c.words)? * 100.0;
    let adjustment = if percent > 5.0 { 3.6365 } else { 0.0 };
    Some(0.1579 * percent + 0.0496 * per_sentence + adjustment)
}

/// Map a raw Dale-Chall score onto its grade band.
///
/// The score is floored first, so 4.99 lands in the lowest band.
pub fn dale_chall_grade(raw: f64) -> u8 {
    const BANDS: [(f64, u8); 6] = [
        (5.0, 4),
        (6.0, 6),
        (7.0, 8),
        (8.0, 10),
        (9.0, 12),
        (10.0, 15),
    ];
    let floored = raw.floor();
    BANDS
        .iter()
        .find(|(limit, _)| floored < *limit)
        .map_or(DALE_CHALL_MAX_GRADE, |&(_, grade)| grade)
}

/// Automated Readability Index.
pub fn automated_readability(c: &DocumentCounts) -> Option<f64> {
    let per_word = ratio(c.letters, c.words)?;
    let per_sentence = ratio(c.words, c.sentences)?;
    Some(4.71 * per_word + 0.5 * per_sentence - 21.43)
}

/// Coleman-Liau index.
pub fn coleman_liau(c: &DocumentCounts) -> Option<f64> {
    let letters = ratio(c.letters, c.words)? * 100.0;
    let sentences = ratio(c.sentences, c.words)? * 100.0;
    Some(0.0588 * letters - 0.296 * sentences - 15.8)
}

/// Flesch-Kincaid grade level.
pub fn flesch_kincaid(c: &DocumentCounts) -> Option<f64> {
    let per_sentence = ratio(c.words, c.sentences)?;
    let per_word = ratio(c.syllables, c.words)?;
    Some(0.39 * per_sentence + 11.8 * per_word - 15.59)
}

/// SMOG grade. Names are not counted as polysyllabic.
pub fn smog(c: &DocumentCounts) -> Option<f64> {
    let density = ratio(c.complex_polysyllabic * 30, c.sentences)?;
    Some(1.043 * density.sqrt() + 3.1291)
}

/// Gunning-Fog index.
pub fn gunning_fog(c: &DocumentCounts) -> Option<f64> {
    let per_sentence = ratio(c.words, c.sentences)?;
    let complex = ratio(c.complex_polysyllabic, c.words)? * 100.0;
    Some(0.4 * (per_sentence + complex))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(words: usize, sentences: usize) -> DocumentCounts {
        DocumentCounts {
            words,
            sentences,
            ..DocumentCounts::default()
        }
    }

    #[test]
    fn round2_rounds_half_up() {
        assert_eq!(round2(1.005), 1.01);
        assert_eq!(round2(2.094), 2.09);
        assert_eq!(round2(-2.094), -2.09);
        assert_eq!(round2(11.0), 11.0);
    }

    #[test]
    fn dale_chall_bands() {
        assert_eq!(dale_chall_grade(0.0), 4);
        assert_eq!(dale_chall_grade(4.99), 4);
        assert_eq!(dale_chall_grade(5.0), 6);
        assert_eq!(dale_chall_grade(6.5), 8);
        assert_eq!(dale_chall_grade(7.2), 10);
        assert_eq!(dale_chall_grade(8.9), 12);
        assert_eq!(dale_chall_grade(9.99), 15);
        assert_eq!(dale_chall_grade(10.0), 17);
        assert_eq!(dale_chall_grade(42.0), DALE_CHALL_MAX_GRADE);
    }

    #[test]
    fn dale_chall_adjusts_above_five_percent() {
        let easy = DocumentCounts {
            difficult: 1,
            ..counts(20, 1)
        };
        let hard = DocumentCounts {
            difficult: 2,
            ..counts(20, 1)
        };
        let easy = dale_chall_raw(&easy).unwrap();
        let hard = dale_chall_raw(&hard).unwrap();
        assert!((easy - (0.1579 * 5.0 + 0.0496 * 20.0)).abs() < 1e-9);
        assert!((hard - (0.1579 * 10.0 + 0.0496 * 20.0 + 3.6365)).abs() < 1e-9);
    }

    #[test]
    fn single_word_document() {
        let c = DocumentCounts {
            letters: 4,
            syllables: 1,
            ..counts(1, 1)
        };
        assert_eq!(automated_readability(&c).map(round2), Some(-2.09));
        assert_eq!(coleman_liau(&c).map(round2), Some(-21.88));
        assert_eq!(flesch_kincaid(&c).map(round2), Some(-3.4));
        assert_eq!(smog(&c).map(round2), Some(3.13));
        assert_eq!(gunning_fog(&c).map(round2), Some(0.4));
        assert_eq!(dale_chall_raw(&c).map(dale_chall_grade), Some(4));
    }

    #[test]
    fn zero_denominators_yield_none() {
        let empty = DocumentCounts::default();
        assert_eq!(spache(&empty), None);
        assert_eq!(dale_chall_raw(&empty), None);
        assert_eq!(automated_readability(&empty), None);
        assert_eq!(coleman_liau(&empty), None);
        assert_eq!(flesch_kincaid(&empty), None);
        assert_eq!(smog(&empty), None);
        assert_eq!(gunning_fog(&empty), None);
    }

    #[test]
    fn formula_names_round_trip_through_serde() {
        for formula in Formula::ALL {
            let json = serde_json::to_string(&formula).unwrap();
            assert_eq!(json, format!("\"{formula}\""));
        }
        let parsed: Formula = serde_json::from_str("\"coleman-liau\"").unwrap();
        assert_eq!(parsed, Formula::ColemanLiau);
    }
}
