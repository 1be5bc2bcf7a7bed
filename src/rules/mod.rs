//! Legality layer.
//!
//! The core never interprets building powers directly. It asks
//! [`RuleQueries`] whether a player can use a structure and lets
//! [`legality`] decide whether a finished action is allowed.
//!
//! - `legality`: validation of every action kind against a game state
//! - `options`: enumeration of legal single-choice options

pub mod legality;
pub mod options;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardName, Material, Role};
use crate::core::PlayerId;

pub use legality::validate;
pub use options::{legal_options, LabeledAction};

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Draw (no winner).
    Draw,
    /// Several players tied for the best score.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw => false,
        }
    }

    /// Decide the result from per-seat scores.
    #[must_use]
    pub fn from_scores(scores: &[(PlayerId, usize)]) -> Self {
        let Some(best) = scores.iter().map(|(_, s)| *s).max() else {
            return GameResult::Draw;
        };
        let winners: Vec<PlayerId> = scores
            .iter()
            .filter(|(_, s)| *s == best)
            .map(|(p, _)| *p)
            .collect();

        match winners.as_slice() {
            [single] => GameResult::Winner(*single),
            _ if winners.len() == scores.len() => GameResult::Draw,
            _ => GameResult::Winners(winners),
        }
    }
}

/// Structure and card queries the decision layer depends on.
pub trait RuleQueries {
    /// Whether `player` can use the named structure: a completed building
    /// of their own, or an opponent's building opened by a Stairway.
    fn owns_active_structure(&self, player: PlayerId, structure: CardName) -> bool;

    /// Role a card leads or follows as, `None` for Jacks.
    fn role_of(&self, card: Card) -> Option<Role> {
        card.role()
    }

    /// Material of a card, `None` for Jacks.
    fn material_of(&self, card: Card) -> Option<Material> {
        card.material()
    }

    /// Roles in the order they are offered.
    fn all_roles(&self) -> &'static [Role] {
        &Role::ALL
    }

    /// Materials in the order they are offered.
    fn all_materials(&self) -> &'static [Material] {
        &Material::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoStructures;

    impl RuleQueries for NoStructures {
        fn owns_active_structure(&self, _player: PlayerId, _structure: CardName) -> bool {
            false
        }
    }

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(PlayerId::new(1));
        assert!(!result.is_winner(PlayerId::new(0)));
        assert!(result.is_winner(PlayerId::new(1)));

        let draw = GameResult::Draw;
        assert!(!draw.is_winner(PlayerId::new(0)));

        let tied = GameResult::Winners(vec![PlayerId::new(0), PlayerId::new(2)]);
        assert!(tied.is_winner(PlayerId::new(0)));
        assert!(!tied.is_winner(PlayerId::new(1)));
    }

    #[test]
    fn test_from_scores() {
        let p = PlayerId::new;
        assert_eq!(
            GameResult::from_scores(&[(p(0), 4), (p(1), 7), (p(2), 3)]),
            GameResult::Winner(p(1))
        );
        assert_eq!(
            GameResult::from_scores(&[(p(0), 7), (p(1), 7), (p(2), 3)]),
            GameResult::Winners(vec![p(0), p(1)])
        );
        assert_eq!(GameResult::from_scores(&[(p(0), 5), (p(1), 5)]), GameResult::Draw);
    }

    #[test]
    fn test_default_queries_follow_cards() {
        let queries = NoStructures;
        let road = Card::new(1, CardName::Road);
        let jack = Card::new(2, CardName::Jack);

        assert_eq!(queries.role_of(road), Some(Role::Laborer));
        assert_eq!(queries.material_of(road), Some(Material::Rubble));
        assert_eq!(queries.role_of(jack), None);
        assert_eq!(queries.all_roles().len(), 6);
        assert_eq!(queries.all_materials()[0], Material::Rubble);
    }
}
