//! Localization seam for every human-readable string the engine emits.
//!
//! The engine always reasons in the canonical English phrases below and
//! routes them through a [`Localizer`] at the last moment. Implementors
//! map a canonical phrase plus a BCP 47 language tag (e.g. `"fr-CA"`) to
//! the localized phrase, falling back to the canonical one on a miss.

/// Maps canonical English phrases to a locale.
pub trait Localizer: Send + Sync {
    /// Translate `phrase` for `locale`, or return it unchanged when no
    /// translation is known.
    fn translate(&self, phrase: &str, locale: &str) -> String;
}

/// A [`Localizer`] that hands every phrase back unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughLocalizer;

impl Localizer for PassthroughLocalizer {
    fn translate(&self, phrase: &str, _locale: &str) -> String {
        phrase.to_string()
    }
}

// Duration units.
pub(crate) const TIME_INSTANT: &str = "instant";
pub(crate) const TIME_MINUTES: &str = "minutes";
pub(crate) const TIME_HOURS: &str = "hours";
pub(crate) const TIME_DAYS: &str = "days";
pub(crate) const TIME_MONTHS: &str = "months";
pub(crate) const TIME_YEARS: &str = "years";
pub(crate) const TIME_CENTURIES: &str = "centuries";

// Warnings.
pub(crate) const WARN_TOP10_PASSWORD: &str = "This is a top-10 common password";
pub(crate) const WARN_TOP100_PASSWORD: &str = "This is a top-100 common password";
pub(crate) const WARN_VERY_COMMON_PASSWORD: &str = "This is a very common password";
pub(crate) const WARN_SIMILAR_TO_COMMON: &str = "This is similar to a commonly used password";
pub(crate) const WARN_WORD_BY_ITSELF: &str = "A word by itself is easy to guess";
pub(crate) const WARN_NAMES_BY_THEMSELVES: &str =
    "Names and surnames by themselves are easy to guess";
pub(crate) const WARN_COMMON_NAMES: &str = "Common names and surnames are easy to guess";
pub(crate) const WARN_USER_INPUT: &str =
    "Parts of this password appear in your personal information";
pub(crate) const WARN_STRAIGHT_ROW: &str = "Straight rows of keys are easy to guess";
pub(crate) const WARN_SHORT_KEYBOARD_PATTERN: &str = "Short keyboard patterns are easy to guess";
pub(crate) const WARN_REPEATS_AAA: &str = "Repeats like \"aaa\" are easy to guess";
pub(crate) const WARN_REPEATS_ABCABC: &str =
    "Repeats like \"abcabcabc\" are only slightly harder to guess than \"abc\"";
pub(crate) const WARN_SEQUENCES: &str = "Sequences like abc or 6543 are easy to guess";
pub(crate) const WARN_RECENT_YEARS: &str = "Recent years are easy to guess";
pub(crate) const WARN_DATES: &str = "Dates are often easy to guess";

// Suggestions.
pub(crate) const SUGGEST_USE_FEW_WORDS: &str = "Use a few words, avoid common phrases";
pub(crate) const SUGGEST_NO_NEED_SYMBOLS: &str =
    "No need for symbols, digits, or uppercase letters";
pub(crate) const SUGGEST_ADD_ANOTHER_WORD: &str =
    "Add another word or two. Uncommon words are better.";
pub(crate) const SUGGEST_LONGER_KEYBOARD_PATTERN: &str =
    "Use a longer keyboard pattern with more turns";
pub(crate) const SUGGEST_AVOID_REPEATS: &str = "Avoid repeated words and characters";
pub(crate) const SUGGEST_AVOID_SEQUENCES: &str = "Avoid sequences";
pub(crate) const SUGGEST_AVOID_DATES_YEARS: &str =
    "Avoid dates and years that are associated with you";
pub(crate) const SUGGEST_CAPITALIZATION: &str = "Capitalization doesn't help very much";
pub(crate) const SUGGEST_ALL_UPPERCASE: &str =
    "All-uppercase is almost as easy to guess as all-lowercase";
pub(crate) const SUGGEST_REVERSED_WORDS: &str = "Reversed words aren't much harder to guess";
pub(crate) const SUGGEST_PREDICTABLE_SUBSTITUTIONS: &str =
    "Predictable substitutions like '@' instead of 'a' don't help very much";

// Score labels, weakest first.
pub(crate) const SCORE_STRINGS: [&str; 5] = [
    "Too guessable",
    "Very guessable",
    "Somewhat guessable",
    "Safely unguessable",
    "Very unguessable",
];
