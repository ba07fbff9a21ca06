//! Running tally for one session.

use crate::core::card::VocabularyCard;

/// Scores at or above this percentage get the "Amazing Job!" headline.
pub const GREAT_SCORE_THRESHOLD: u32 = 70;

/// Statistics for the current session.
///
/// `seen_words` and `incorrect_words` are append-only copies of deck cards;
/// the deck remains the source of truth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub seen_words: Vec<VocabularyCard>,
    pub incorrect_words: Vec<VocabularyCard>,
}

impl SessionStats {
    /// Fresh stats for a deck of `total` cards.
    pub fn for_deck(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Records one judged card.
    pub fn record(&mut self, card: &VocabularyCard, known: bool) {
        if known {
            self.correct += 1;
        } else {
            self.incorrect += 1;
            self.incorrect_words.push(card.clone());
        }
        self.seen_words.push(card.clone());
    }

    pub fn judged(&self) -> usize {
        self.seen_words.len()
    }

    /// `round(100 * correct / total)`. `None` when `total` is zero.
    pub fn score_percentage(&self) -> Option<u32> {
        if self.total == 0 {
            return None;
        }
        let pct = (100.0 * self.correct as f64 / self.total as f64).round();
        Some(pct as u32)
    }

    pub fn is_great_score(&self) -> bool {
        self.score_percentage()
            .is_some_and(|pct| pct >= GREAT_SCORE_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_cards;

    #[test]
    fn test_record_known_and_unknown() {
        let cards = sample_cards(2);
        let mut stats = SessionStats::for_deck(2);
        stats.record(&cards[0], true);
        stats.record(&cards[1], false);

        assert_eq!(stats.correct, 1);
        assert_eq!(stats.incorrect, 1);
        assert_eq!(stats.seen_words, cards);
        assert_eq!(stats.incorrect_words, vec![cards[1].clone()]);
        assert_eq!(stats.correct + stats.incorrect, stats.judged());
    }

    #[test]
    fn test_score_percentage_rounds() {
        let cards = sample_cards(3);
        let mut stats = SessionStats::for_deck(3);
        stats.record(&cards[0], true);
        stats.record(&cards[1], false);
        stats.record(&cards[2], true);
        // 2/3 = 66.67%
        assert_eq!(stats.score_percentage(), Some(67));
        assert!(!stats.is_great_score());
    }

    #[test]
    fn test_score_percentage_undefined_for_empty_total() {
        let stats = SessionStats::default();
        assert_eq!(stats.score_percentage(), None);
        assert!(!stats.is_great_score());
    }

    #[test]
    fn test_great_score_threshold() {
        let cards = sample_cards(10);
        let mut stats = SessionStats::for_deck(10);
        for (i, card) in cards.iter().enumerate() {
            stats.record(card, i < 7);
        }
        assert_eq!(stats.score_percentage(), Some(70));
        assert!(stats.is_great_score());
    }
}
