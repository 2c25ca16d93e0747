//! Pronunciation variants and canonical variant selection.
//!
//! Phones follow the ARPABET conventions of the CMU dictionary: vowel phones
//! carry a trailing stress digit (`AH0`, `EY1`, `AA2`), consonants carry none.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Stress level carried by a vowel phone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Stress {
    /// `0` — unstressed vowel.
    Unstressed,
    /// `1` — primary stress.
    Primary,
    /// `2` — secondary stress.
    Secondary,
}

impl Stress {
    /// Parse a stress digit.
    pub const fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '0' => Some(Self::Unstressed),
            '1' => Some(Self::Primary),
            '2' => Some(Self::Secondary),
            _ => None,
        }
    }

    /// The digit used for this stress level in the dictionary.
    pub const fn as_digit(self) -> char {
        match self {
            Self::Unstressed => '0',
            Self::Primary => '1',
            Self::Secondary => '2',
        }
    }

    /// Whether this is primary or secondary stress.
    pub const fn is_stressed(self) -> bool {
        matches!(self, Self::Primary | Self::Secondary)
    }
}

/// Stress carried by a phone symbol, if it ends in `0`, `1` or `2`.
pub fn phone_stress(phone: &str) -> Option<Stress> {
    phone.chars().next_back().and_then(Stress::from_digit)
}

/// The phone symbol with any stress digit removed (`EY1` -> `EY`).
pub fn bare_phone(phone: &str) -> &str {
    match phone_stress(phone) {
        Some(_) => &phone[..phone.len() - 1],
        None => phone,
    }
}

/// One recorded pronunciation of a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PronunciationVariant {
    phones: Vec<String>,
    stresses: Vec<Stress>,
}

impl PronunciationVariant {
    /// Build a variant from its phone symbols, deriving the stress list.
    pub fn new<I, S>(phones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phones: Vec<String> = phones.into_iter().map(Into::into).collect();
        let stresses = phones.iter().filter_map(|p| phone_stress(p)).collect();
        Self { phones, stresses }
    }

    /// Phone symbols in order, with stress digits intact.
    pub fn phones(&self) -> &[String] {
        &self.phones
    }

    /// Stress levels of the vowel phones, in order.
    pub fn stresses(&self) -> &[Stress] {
        &self.stresses
    }

    /// Number of syllables (one per vowel phone).
    pub fn syllables(&self) -> usize {
        self.stresses.len()
    }
}

impl std::fmt::Display for PronunciationVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.phones.join(" "))
    }
}

/// Pick the canonical variant: the one with the most stress marks.
///
/// Ties go to the earliest variant in source order. Returns `None` only for an
/// empty slice, which a parsed dictionary never produces.
pub fn select_canonical(variants: &[PronunciationVariant]) -> Option<&PronunciationVariant> {
    let mut best: Option<&PronunciationVariant> = None;
    for variant in variants {
        // Strictly greater keeps the first of equal-length variants.
        if best.is_none_or(|b| variant.stresses.len() > b.stresses.len()) {
            best = Some(variant);
        }
    }
    best
}
