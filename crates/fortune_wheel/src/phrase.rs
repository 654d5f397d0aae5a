//! Phrase repository contract and an in-memory phrase book.

use crate::board::normalize_phrase;
use crate::error::{ConfigError, ConfigErrorKind};
use crate::types::Letter;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{RngCore, SeedableRng};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, instrument, warn};

/// Source of categories and phrases for new rounds.
///
/// Repositories may hand out the same phrase more than once; the engine
/// does not require uniqueness.
pub trait PhraseRepository {
    /// Lists the categories a round can be drawn from.
    fn categories(&self) -> Vec<String>;

    /// Picks one phrase from a category, or `None` if it has none.
    fn pick_phrase(&mut self, category: &str) -> Option<String>;

    /// Draws the `(category, phrase)` for a new round.
    ///
    /// The default picks a category uniformly with `rng` and asks
    /// [`pick_phrase`](Self::pick_phrase) for a phrase from it.
    ///
    /// # Errors
    ///
    /// `NoCategories` when there is nothing to draw from, `EmptyCategory`
    /// when the chosen category yields no phrase.
    fn draw_phrase(&mut self, rng: &mut dyn RngCore) -> Result<(String, String), ConfigError> {
        let category = self
            .categories()
            .choose(rng)
            .cloned()
            .ok_or(ConfigErrorKind::NoCategories)?;
        let phrase = self
            .pick_phrase(&category)
            .ok_or_else(|| ConfigErrorKind::EmptyCategory(category.clone()))?;
        Ok((category, phrase))
    }
}

fn has_letters(phrase: &str) -> bool {
    phrase.chars().any(|c| Letter::from_char(c).is_some())
}

/// In-memory `category -> phrases` collection.
///
/// Remembers which phrases it has handed out. Round draws come from the
/// phrases not yet used anywhere in the book; once every phrase has been
/// used the memory resets. Phrases without a letter are dropped on load.
#[derive(Debug, Clone)]
pub struct PhraseBook {
    entries: BTreeMap<String, Vec<String>>,
    used: BTreeMap<String, HashSet<String>>,
    rng: StdRng,
}

impl PhraseBook {
    /// Creates a phrase book seeded from system entropy.
    #[instrument(skip(entries), fields(categories = entries.len()))]
    pub fn new(entries: BTreeMap<String, Vec<String>>) -> Self {
        Self::with_rng(entries, StdRng::from_os_rng())
    }

    /// Creates a phrase book with a fixed seed, for reproducible draws.
    #[instrument(skip(entries), fields(categories = entries.len()))]
    pub fn with_seed(entries: BTreeMap<String, Vec<String>>, seed: u64) -> Self {
        Self::with_rng(entries, StdRng::seed_from_u64(seed))
    }

    fn with_rng(entries: BTreeMap<String, Vec<String>>, rng: StdRng) -> Self {
        let mut normalized: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (category, phrases) in entries {
            let bucket = normalized.entry(normalize_phrase(&category)).or_default();
            for phrase in phrases.iter().map(|p| normalize_phrase(p)) {
                if has_letters(&phrase) {
                    bucket.push(phrase);
                } else if !phrase.is_empty() {
                    warn!(%category, %phrase, "Dropping phrase without letters");
                }
            }
        }
        normalized.retain(|_, phrases| !phrases.is_empty());
        Self {
            entries: normalized,
            used: BTreeMap::new(),
            rng,
        }
    }

    fn is_used(&self, category: &str, phrase: &str) -> bool {
        self.used
            .get(category)
            .is_some_and(|used| used.contains(phrase))
    }

    fn mark_used(&mut self, category: &str, phrase: &str) {
        self.used
            .entry(category.to_string())
            .or_default()
            .insert(phrase.to_string());
    }

    /// Every `(category, phrase)` pair not handed out yet.
    fn unused(&self) -> Vec<(&String, &String)> {
        self.entries
            .iter()
            .flat_map(|(category, phrases)| phrases.iter().map(move |p| (category, p)))
            .filter(|(category, phrase)| !self.is_used(category, phrase))
            .collect()
    }

    /// Returns all phrases of a category.
    pub fn phrases(&self, category: &str) -> Option<&[String]> {
        self.entries
            .get(&normalize_phrase(category))
            .map(Vec::as_slice)
    }

    /// Total number of phrases across categories.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Returns true if the book holds no phrases.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forgets which phrases were handed out.
    pub fn reset_used(&mut self) {
        self.used.clear();
    }
}

impl PhraseRepository for PhraseBook {
    fn categories(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Picks from the category's unused phrases, forgetting the category's
    /// history when all of them have been used.
    #[instrument(skip(self))]
    fn pick_phrase(&mut self, category: &str) -> Option<String> {
        let category = normalize_phrase(category);
        let phrases = self.entries.get(&category)?;

        let fresh: Vec<&String> = phrases
            .iter()
            .filter(|p| !self.is_used(&category, p))
            .collect();
        let picked = if fresh.is_empty() {
            info!(%category, "Every phrase of the category used, resetting its memory");
            self.used.remove(&category);
            phrases.choose(&mut self.rng)?.clone()
        } else {
            (*fresh.choose(&mut self.rng)?).clone()
        };

        debug!(%category, "Phrase picked");
        self.mark_used(&category, &picked);
        Some(picked)
    }

    #[instrument(skip(self, rng))]
    fn draw_phrase(&mut self, rng: &mut dyn RngCore) -> Result<(String, String), ConfigError> {
        if self.entries.is_empty() {
            return Err(ConfigErrorKind::NoCategories.into());
        }
        if self.unused().is_empty() {
            info!(phrases = self.len(), "Every phrase used, resetting memory");
            self.used.clear();
        }
        let (category, phrase) = self
            .unused()
            .choose(rng)
            .map(|(category, phrase)| ((*category).clone(), (*phrase).clone()))
            .ok_or(ConfigErrorKind::NoCategories)?;

        debug!(%category, "Round phrase drawn");
        self.mark_used(&category, &phrase);
        Ok((category, phrase))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> PhraseBook {
        let mut entries = BTreeMap::new();
        entries.insert(
            " proverbs ".to_string(),
            vec!["a stitch in time".to_string(), "  ".to_string(), "haste makes waste".to_string()],
        );
        entries.insert("empty".to_string(), vec![]);
        PhraseBook::with_seed(entries, 42)
    }

    #[test]
    fn test_entries_are_normalized() {
        let book = book();
        assert_eq!(book.categories(), vec!["PROVERBS".to_string()]);
        assert_eq!(book.len(), 2);
        assert_eq!(
            book.phrases("Proverbs").unwrap(),
            &["A STITCH IN TIME".to_string(), "HASTE MAKES WASTE".to_string()]
        );
    }

    #[test]
    fn test_no_repeat_until_exhausted() {
        let mut book = book();
        let first = book.pick_phrase("PROVERBS").unwrap();
        let second = book.pick_phrase("PROVERBS").unwrap();
        assert_ne!(first, second);
        // Third draw resets the memory and still yields a phrase.
        assert!(book.pick_phrase("PROVERBS").is_some());
    }

    #[test]
    fn test_phrases_without_letters_dropped() {
        let mut entries = BTreeMap::new();
        entries.insert("numbers".to_string(), vec!["123".to_string(), "4 - 5".to_string()]);
        entries.insert("animals".to_string(), vec!["cat".to_string(), "42".to_string()]);
        let book = PhraseBook::with_seed(entries, 7);
        assert_eq!(book.categories(), vec!["ANIMALS".to_string()]);
        assert_eq!(book.phrases("animals").unwrap(), &["CAT".to_string()]);
    }

    #[test]
    fn test_draws_cover_whole_book_before_repeating() {
        let mut entries = BTreeMap::new();
        entries.insert("a".to_string(), vec!["cat".to_string()]);
        entries.insert("b".to_string(), vec!["dog".to_string(), "pig".to_string()]);
        let mut book = PhraseBook::with_seed(entries, 3);
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..4 {
            let mut drawn: Vec<String> = (0..3)
                .map(|_| book.draw_phrase(&mut rng).unwrap().1)
                .collect();
            drawn.sort();
            assert_eq!(drawn, vec!["CAT", "DOG", "PIG"]);
        }
    }

    #[test]
    fn test_draw_reports_category() {
        let mut entries = BTreeMap::new();
        entries.insert("animals".to_string(), vec!["owl".to_string()]);
        let mut book = PhraseBook::with_seed(entries, 0);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            book.draw_phrase(&mut rng).unwrap(),
            ("ANIMALS".to_string(), "OWL".to_string())
        );
    }

    #[test]
    fn test_empty_book_draw_fails() {
        let mut book = PhraseBook::with_seed(BTreeMap::new(), 0);
        let mut rng = StdRng::seed_from_u64(0);
        let err = book.draw_phrase(&mut rng).unwrap_err();
        assert_eq!(err.kind(), &ConfigErrorKind::NoCategories);
    }

    #[test]
    fn test_unknown_category() {
        let mut book = book();
        assert!(book.pick_phrase("MOVIES").is_none());
        assert!(book.phrases("EMPTY").is_none());
    }
}
