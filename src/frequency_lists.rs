//! Built-in ranked word lists and the source abstraction that loads them.

use std::error::Error;

/// Yields the words of named lists, one word per entry, lowercase, in
/// decreasing frequency order.
///
/// The engine derives ranks from the order words arrive in: the first
/// word of a list is rank 1.
pub trait DictionarySource {
    /// Load the named list, preserving the order of the underlying data.
    fn load(&self, name: &str) -> Result<Vec<String>, Box<dyn Error + Send + Sync>>;
}

/// Names of the word lists every engine loads at construction.
pub(crate) const BUILT_IN_DICTIONARIES: [&str; 6] = [
    "passwords",
    "english",
    "male_names",
    "female_names",
    "surnames",
    "us_tv_and_film",
];

/// Dictionary name attached to the per-request user-input matcher.
pub(crate) const USER_INPUTS_DICTIONARY: &str = "user_inputs";

/// The trimmed frequency lists embedded in the crate.
///
/// Answers to `english_wikipedia` as an alias for `english`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinSource;

impl DictionarySource for BuiltinSource {
    fn load(&self, name: &str) -> Result<Vec<String>, Box<dyn Error + Send + Sync>> {
        let data = match name {
            "passwords" => include_str!("../data/passwords.txt"),
            "english" | "english_wikipedia" => include_str!("../data/english.txt"),
            "male_names" => include_str!("../data/male_names.txt"),
            "female_names" => include_str!("../data/female_names.txt"),
            "surnames" => include_str!("../data/surnames.txt"),
            "us_tv_and_film" => include_str!("../data/us_tv_and_film.txt"),
            _ => return Err(format!("unknown built-in word list `{}`", name).into()),
        };
        Ok(data.lines().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_source_loads_every_list() {
        for name in BUILT_IN_DICTIONARIES {
            let words = BuiltinSource.load(name).unwrap();
            assert!(!words.is_empty(), "{} is empty", name);
            assert!(
                words.iter().all(|w| *w == w.to_lowercase()),
                "{} contains non-lowercase entries",
                name
            );
        }
    }

    #[test]
    fn test_builtin_source_english_alias() {
        let english = BuiltinSource.load("english").unwrap();
        let wikipedia = BuiltinSource.load("english_wikipedia").unwrap();
        assert_eq!(english, wikipedia);
    }

    #[test]
    fn test_builtin_source_unknown_list() {
        assert!(BuiltinSource.load("klingon").is_err());
    }
}
