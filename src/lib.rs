#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

#[macro_use]
extern crate lazy_static;

#[cfg(test)]
#[macro_use]
extern crate quickcheck;

use itertools::Itertools;
use zeroize::Zeroize;

pub use crate::frequency_lists::{BuiltinSource, DictionarySource};
pub use crate::localize::{Localizer, PassthroughLocalizer};
pub use crate::matching::{
    DatePattern, DictionaryPattern, L33tPattern, Match, MatchPattern, Matcher, RegexPattern,
    RepeatPattern, SequencePattern, SpatialPattern,
};
pub use crate::scoring::Score;
pub use crate::time_estimates::{CrackTimes, CrackTimesDisplay};

mod adjacency_graphs;
mod feedback;
mod frequency_lists;
mod localize;
/// Defines the match model and the pattern matchers that feed the search.
pub mod matching;
mod numerics;
mod scoring;
/// Attack-budget crack-time estimation and display.
pub mod time_estimates;

/// Failure to construct an [`Engine`].
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A named word list could not be loaded from the dictionary source.
    #[error("failed to load dictionary `{name}`")]
    DictionaryLoad {
        /// The list that failed to load.
        name: String,
        /// The source's own error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// The result of evaluating one password.
///
/// Owns the decomposition the estimate rests on; the password and every
/// matched token are overwritten when the value is dropped.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "ser",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct Strength {
    password: String,
    entropy: f64,
    guesses: f64,
    guesses_log10: f64,
    crack_times: CrackTimes,
    crack_times_display: CrackTimesDisplay,
    score: Score,
    match_sequence: Vec<Match>,
    warning_text: String,
    suggestions_text: String,
    score_text: String,
}

impl Strength {
    /// The password that was evaluated.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Estimated bits an attacker needs to cover the password.
    pub fn entropy(&self) -> f64 {
        self.entropy
    }

    /// Estimated guesses to crack: `0.5 * 2^entropy`.
    pub fn guesses(&self) -> f64 {
        self.guesses
    }

    /// Order of magnitude of `guesses`.
    pub fn guesses_log10(&self) -> f64 {
        self.guesses_log10
    }

    /// Projected seconds-to-crack under the four attacker budgets.
    pub fn crack_times(&self) -> CrackTimes {
        self.crack_times
    }

    /// Human-readable crack times, localized.
    pub fn crack_times_display(&self) -> &CrackTimesDisplay {
        &self.crack_times_display
    }

    /// Overall strength band. Anything below [`Score::Three`] should be
    /// considered too weak.
    pub fn score(&self) -> Score {
        self.score
    }

    /// The non-overlapping decomposition the estimate rests on.
    pub fn match_sequence(&self) -> &[Match] {
        &self.match_sequence
    }

    /// What is wrong with the password, localized; empty when nothing
    /// stands out.
    pub fn warning_text(&self) -> &str {
        &self.warning_text
    }

    /// Improvement suggestions, localized, one per line.
    pub fn suggestions_text(&self) -> &str {
        &self.suggestions_text
    }

    /// The strength band as a localized label.
    pub fn score_text(&self) -> &str {
        &self.score_text
    }
}

impl Drop for Strength {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// A reusable password-strength estimator.
///
/// Construction loads the ranked word lists and builds the long-lived
/// matchers; evaluation itself touches no shared mutable state, so a
/// constructed engine can be shared freely across threads.
pub struct Engine {
    factory: matching::MatcherFactory,
    localizer: Box<dyn Localizer>,
    locale: String,
}

impl Engine {
    /// Builds an engine from a dictionary source and a localizer.
    ///
    /// Fails when the source cannot produce one of the built-in lists.
    pub fn new(
        source: &dyn DictionarySource,
        localizer: Box<dyn Localizer>,
    ) -> Result<Engine, EngineError> {
        Ok(Engine {
            factory: matching::MatcherFactory::new(source)?,
            localizer,
            locale: "en".to_string(),
        })
    }

    /// An engine over the embedded word lists, emitting canonical
    /// English text.
    pub fn with_defaults() -> Engine {
        Engine::new(&BuiltinSource, Box::new(PassthroughLocalizer))
            .expect("the embedded word lists always load")
    }

    /// Sets the language tag handed to the localizer, e.g. `"fr-CA"`.
    pub fn set_locale(&mut self, tag: &str) {
        self.locale = tag.to_string();
    }

    /// Estimates the strength of `password`.
    ///
    /// `user_inputs` are strings an attacker targeting this user would
    /// try early: names, email fragments, and the like. They join the
    /// dictionaries for this call only.
    pub fn evaluate(&self, password: &str, user_inputs: &[&str]) -> Strength {
        let matchers = self.factory.create_matchers(user_inputs);
        let mut matches = Vec::new();
        for matcher in &matchers {
            matches.extend(matcher.match_password(password));
        }
        let calculation = scoring::minimum_entropy_match_sequence(password, &matches);

        let entropy = calculation.entropy;
        let guesses = 0.5 * entropy.exp2();
        let score = scoring::entropy_to_score(entropy);
        let crack_times = time_estimates::estimate_crack_times(guesses);
        let raw_feedback = feedback::feedback_for(score, &calculation.sequence);

        let t = |phrase: &str| self.localizer.translate(phrase, &self.locale);
        let display = |seconds: f64| time_estimates::display_time(seconds).render(&t);
        let crack_times_display = CrackTimesDisplay {
            online_throttling_100_per_hour: display(crack_times.online_throttling_100_per_hour),
            online_no_throttling_100_per_second: display(
                crack_times.online_no_throttling_100_per_second,
            ),
            offline_slow_hashing_1e4_per_second: display(
                crack_times.offline_slow_hashing_1e4_per_second,
            ),
            offline_fast_hashing_1e10_per_second: display(
                crack_times.offline_fast_hashing_1e10_per_second,
            ),
        };

        Strength {
            password: password.to_string(),
            entropy,
            guesses,
            guesses_log10: guesses.log10(),
            crack_times,
            crack_times_display,
            score,
            match_sequence: calculation.sequence,
            warning_text: raw_feedback.warning.map(&t).unwrap_or_default(),
            suggestions_text: raw_feedback.suggestions.iter().map(|s| t(s)).join("\n"),
            score_text: t(localize::SCORE_STRINGS[u8::from(score) as usize]),
        }
    }
}

/// Evaluates one password with a default engine built for this call.
///
/// Prefer constructing an [`Engine`] when evaluating more than once: the
/// word lists are loaded per engine, not per call.
pub fn evaluate(password: &str, user_inputs: &[&str]) -> Strength {
    Engine::with_defaults().evaluate(password, user_inputs)
}
