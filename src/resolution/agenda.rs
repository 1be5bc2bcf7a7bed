//! The turn agenda.
//!
//! A turn is a queue of [`Step`]s. Decision steps wait for one or more
//! players; automatic steps are expanded by the game loop into further
//! steps. Expansions are pushed to the front so they resolve before
//! anything queued earlier.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Material, Role};
use crate::core::{Action, ActionKind, PlayerId};

/// A decision the game is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingDecision {
    pub player: PlayerId,
    pub kind: ActionKind,
}

impl PendingDecision {
    #[must_use]
    pub const fn new(player: PlayerId, kind: ActionKind) -> Self {
        Self { player, kind }
    }
}

/// One entry of the turn agenda.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    // === Decisions ===
    /// Leader chooses between thinking and leading.
    ThinkerOrLead { player: PlayerId },

    /// Optional Latrine discard before thinking.
    Latrine { player: PlayerId },

    /// Optional Vomitorium discard before thinking.
    Vomitorium { player: PlayerId },

    /// Jack or draw.
    ThinkerType { player: PlayerId },

    /// Optional Academy thinker at end of turn.
    AcademyThinker { player: PlayerId },

    /// Leader picks the role and cards.
    LeadRole { player: PlayerId },

    /// Barrier: every waiting player owes a FollowRole. Answers are held
    /// until nobody is waiting.
    Follow {
        lead_units: usize,
        waiting: Vec<PlayerId>,
        answers: Vec<(PlayerId, Action)>,
    },

    /// Patron owner of both Bar and Aqueduct orders them.
    BarOrAqueduct { player: PlayerId },

    /// Fountain owner decides whether to draw before a Craftsman.
    Fountain { player: PlayerId },

    /// One performance of the led role.
    Perform {
        player: PlayerId,
        role: Role,
        bar_first: bool,
    },

    /// Stairway owner may improve an opponent's building.
    Stairway { player: PlayerId },

    /// `from` owes `to` a card of `material`.
    GiveCard {
        from: PlayerId,
        to: PlayerId,
        material: Material,
    },

    /// Sewer owner may keep camp cards.
    Sewer { player: PlayerId },

    /// A Jack leaving a camp is offered to Senate owners in turn.
    Senate {
        jack: Card,
        candidates: Vec<PlayerId>,
    },

    // === Automatic ===
    /// Leader is asked to think or lead.
    StartTurn,

    /// Expands into Latrine, Vomitorium and ThinkerType prompts.
    Think { player: PlayerId },

    /// Expands into the prompts preceding one performance.
    Performance { player: PlayerId, role: Role },

    /// Queues Sewer prompts, camp clearing and Academy prompts.
    Cleanup,

    /// Moves camps to the pool and offers Jacks to Senate owners.
    CampToPool,

    /// Passes leadership and starts the next turn.
    EndTurn,
}

impl Step {
    /// Decisions this step waits for. Empty for automatic steps.
    #[must_use]
    pub fn pending(&self) -> Vec<PendingDecision> {
        let single = |player: PlayerId, kind: ActionKind| vec![PendingDecision::new(player, kind)];

        match self {
            Step::ThinkerOrLead { player } => single(*player, ActionKind::ThinkerOrLead),
            Step::Latrine { player } => single(*player, ActionKind::UseLatrine),
            Step::Vomitorium { player } => single(*player, ActionKind::UseVomitorium),
            Step::ThinkerType { player } => single(*player, ActionKind::ThinkerType),
            Step::AcademyThinker { player } => single(*player, ActionKind::SkipThinker),
            Step::LeadRole { player } => single(*player, ActionKind::LeadRole),
            Step::Follow { waiting, .. } => waiting
                .iter()
                .map(|&p| PendingDecision::new(p, ActionKind::FollowRole))
                .collect(),
            Step::BarOrAqueduct { player } => single(*player, ActionKind::BarOrAqueduct),
            Step::Fountain { player } => single(*player, ActionKind::UseFountain),
            Step::Perform { player, role, .. } => single(*player, ActionKind::for_role(*role)),
            Step::Stairway { player } => single(*player, ActionKind::Stairway),
            Step::GiveCard { from, .. } => single(*from, ActionKind::GiveCard),
            Step::Sewer { player } => single(*player, ActionKind::UseSewer),
            Step::Senate { candidates, .. } => candidates
                .first()
                .map(|&p| single(p, ActionKind::UseSenate))
                .unwrap_or_default(),
            Step::StartTurn
            | Step::Think { .. }
            | Step::Performance { .. }
            | Step::Cleanup
            | Step::CampToPool
            | Step::EndTurn => Vec::new(),
        }
    }

    /// Whether the game loop expands this step without input.
    #[must_use]
    pub fn is_automatic(&self) -> bool {
        matches!(
            self,
            Step::StartTurn
                | Step::Think { .. }
                | Step::Performance { .. }
                | Step::Cleanup
                | Step::CampToPool
                | Step::EndTurn
        )
    }
}

/// Ordered queue of steps for the current turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agenda {
    steps: VecDeque<Step>,
}

impl Agenda {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The step that resolves next.
    #[must_use]
    pub fn front(&self) -> Option<&Step> {
        self.steps.front()
    }

    pub fn front_mut(&mut self) -> Option<&mut Step> {
        self.steps.front_mut()
    }

    pub fn pop(&mut self) -> Option<Step> {
        self.steps.pop_front()
    }

    /// Queue a step at the back.
    pub fn push_back(&mut self, step: Step) {
        self.steps.push_back(step);
    }

    /// Put steps in front of everything queued, keeping their order.
    pub fn push_front_all(&mut self, steps: impl IntoIterator<Item = Step>) {
        let steps: Vec<Step> = steps.into_iter().collect();
        for step in steps.into_iter().rev() {
            self.steps.push_front(step);
        }
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }

    /// Performances of `role` still queued for `player`, not counting the
    /// one being resolved.
    #[must_use]
    pub fn queued_performances(&self, player: PlayerId, role: Role) -> usize {
        self.steps
            .iter()
            .filter(|s| is_performance(s, player, role))
            .count()
    }

    /// Drop one queued performance. Returns false if none was queued.
    pub fn consume_performance(&mut self, player: PlayerId, role: Role) -> bool {
        let found = self
            .steps
            .iter()
            .position(|s| is_performance(s, player, role));
        match found {
            Some(pos) => {
                self.steps.remove(pos);
                true
            }
            None => false,
        }
    }
}

fn is_performance(step: &Step, player: PlayerId, role: Role) -> bool {
    matches!(step, Step::Performance { player: p, role: r } if *p == player && *r == role)
}
