//! Syllable-based name generation.
//!
//! A name is one prefix plus one suffix drawn from the gender's tables, e.g.
//! `"Zorgon"` or `"Quibblob"`.  Names are not unique.

use blob_core::SimRng;

/// Cosmetic gender tag; only selects the name tables.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Unisex,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Unisex];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unisex => "unisex",
        }
    }

    /// A uniformly random gender.
    pub fn random(rng: &mut SimRng) -> Gender {
        rng.choose(&Self::ALL).copied().unwrap_or(Gender::Unisex)
    }

    fn syllables(self) -> (&'static [&'static str], &'static [&'static str]) {
        match self {
            Gender::Male => (
                &["Zor", "Blib", "Thra", "Plon", "Snor", "Grak", "Dro", "Klon"],
                &["gon", "dor", "zor", "bix", "nak", "tor", "vik", "rax"],
            ),
            Gender::Female => (
                &["Glo", "Fla", "Bli", "Tra", "Ila", "Vra", "Sha", "Nia"],
                &["lia", "nia", "sha", "vra", "lix", "ora", "ina", "exa"],
            ),
            Gender::Unisex => (
                &["Xor", "Quib", "Plo", "Zin", "Cra", "Vex", "Twi", "Lom"],
                &["blob", "nix", "zor", "rix", "lox", "vor", "pix", "tan"],
            ),
        }
    }
}

/// Draw a name for `gender`.
pub fn generate_name(gender: Gender, rng: &mut SimRng) -> String {
    let (prefixes, suffixes) = gender.syllables();
    let prefix = rng.choose(prefixes).copied().unwrap_or("Blob");
    let suffix = rng.choose(suffixes).copied().unwrap_or("");
    format!("{prefix}{suffix}")
}
