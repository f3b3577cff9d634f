// src/game/ranking.rs

//! Final scoring and tie-breaks.
//!
//! Lower is better. Players are ordered by a comparison key built from the
//! raw score:
//!
//! 1. the sum of the four measured slot values;
//! 2. minus [`DUTCH_BONUS`] for the player who called dutch;
//! 3. plus [`MIN_CARD_WEIGHT`] times the smallest measured slot value.
//!
//! The third term is bounded by `MIN_CARD_WEIGHT * (2^N - 1) < DUTCH_BONUS`,
//! so it can never overturn the dutch advantage. Displayed scores are always
//! the raw sums.

use crate::core::constants::qdutch_constants::{DUTCH_BONUS, MIN_CARD_WEIGHT};
use crate::game::player::Tally;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One line of the final standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// Player name.
    pub name: String,
    /// Raw score: sum of the measured slot values.
    pub score: usize,
    /// 1-based rank. Players whose comparison keys tie share a rank.
    pub rank: usize,
}

impl fmt::Display for RankingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} ({} points)", self.rank, self.name, self.score)
    }
}

/// Sort key of a player, never shown to anyone.
pub fn comparison_key(score: usize, min_card: usize, called_dutch: bool) -> f64 {
    let bonus = if called_dutch { DUTCH_BONUS } else { 0.0 };
    score as f64 - bonus + MIN_CARD_WEIGHT * min_card as f64
}

/// Orders tallied players (given in seat order) and assigns ranks.
pub(crate) fn rank_tallies(tallies: Vec<(String, Tally)>, dutch_caller: Option<usize>) -> Vec<RankingEntry> {
    let mut keyed: Vec<(f64, String, usize)> = tallies
        .into_iter()
        .enumerate()
        .map(|(seat, (name, tally))| {
            let key = comparison_key(tally.score, tally.min_card, dutch_caller == Some(seat));
            (key, name, tally.score)
        })
        .collect();
    // Stable, so seat order decides among equal keys
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut ranking: Vec<RankingEntry> = Vec::with_capacity(keyed.len());
    let mut previous_key = None;
    for (position, (key, name, score)) in keyed.into_iter().enumerate() {
        let rank = match (previous_key, ranking.last()) {
            (Some(prev), Some(last)) if prev == key => last.rank,
            _ => position + 1,
        };
        ranking.push(RankingEntry { name, score, rank });
        previous_key = Some(key);
    }
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(score: usize, min_card: usize) -> Tally {
        Tally { score, min_card }
    }

    fn seats(tallies: &[Tally]) -> Vec<(String, Tally)> {
        tallies
            .iter()
            .enumerate()
            .map(|(i, t)| (format!("Player {}", i + 1), *t))
            .collect()
    }

    fn rank_of(ranking: &[RankingEntry], name: &str) -> usize {
        ranking
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.rank)
            .unwrap_or_else(|| panic!("{} missing from ranking", name))
    }

    #[test]
    fn test_ties_share_rank_and_skip_next() {
        let ranking = rank_tallies(
            seats(&[tally(4, 1), tally(4, 1), tally(9, 2), tally(2, 0)]),
            None,
        );
        let ranks: Vec<usize> = (1..=4).map(|i| rank_of(&ranking, &format!("Player {}", i))).collect();
        assert_eq!(ranks, vec![2, 2, 4, 1]);
        let order: Vec<usize> = ranking.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![2, 4, 4, 9]);
    }

    #[test]
    fn test_min_card_breaks_raw_ties() {
        let ranking = rank_tallies(seats(&[tally(10, 3), tally(10, 0)]), None);
        assert_eq!(rank_of(&ranking, "Player 2"), 1);
        assert_eq!(rank_of(&ranking, "Player 1"), 2);
    }

    #[test]
    fn test_dutch_caller_wins_raw_tie_regardless_of_min_card() {
        // Caller holds the largest possible minimum, the other player the smallest
        let ranking = rank_tallies(seats(&[tally(28, 7), tally(28, 0)]), Some(0));
        assert_eq!(rank_of(&ranking, "Player 1"), 1);
        assert_eq!(rank_of(&ranking, "Player 2"), 2);
        assert!(comparison_key(28, 7, true) < comparison_key(28, 0, false));
        // Displayed score is the raw sum
        assert!(ranking.iter().all(|e| e.score == 28));
    }

    #[test]
    fn test_dutch_caller_does_not_beat_a_lower_score() {
        let ranking = rank_tallies(seats(&[tally(5, 0), tally(4, 1)]), Some(0));
        assert_eq!(rank_of(&ranking, "Player 2"), 1);
    }
}
