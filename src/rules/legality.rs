//! Action validation.
//!
//! [`validate`] checks a finished action against the current state without
//! touching it. Context the action does not carry itself (the material a
//! Legionary demanded, how many performances of a role are still queued)
//! is read from the agenda.
//!
//! ## Structures consulted
//!
//! | Structure | Effect on legality |
//! |-----------|--------------------|
//! | Palace | several units when leading or following |
//! | Circus | petitions of 2 instead of 3 |
//! | Dock | Laborer from hand |
//! | Bar, Aqueduct | Patron from deck, from hand |
//! | Atrium, Basilica | Merchant from deck, from hand |
//! | Archway | Architect and Stairway materials from the pool |
//! | Road, Tower | relaxed material matching |
//! | Insula, Aqueduct, Market | clientele and vault capacity |

use rustc_hash::FxHashSet;

use super::RuleQueries;
use crate::cards::{Card, CardName, Material, Role};
use crate::core::{Action, ActionUnit, GameError, GameState, PlayerId, PlayerState};
use crate::resolution::Step;
use crate::zones::Building;

type Verdict = Result<(), GameError>;

fn ensure(condition: bool, reason: &'static str) -> Verdict {
    if condition {
        Ok(())
    } else {
        Err(GameError::illegal(reason))
    }
}

fn not_jack(card: Card) -> Verdict {
    ensure(!card.is_jack(), "a Jack cannot be used here")
}

fn in_hand(me: &PlayerState, card: Card) -> Verdict {
    if me.hand.contains(card) {
        Ok(())
    } else {
        Err(GameError::illegal(format!("{card} is not in hand")))
    }
}

/// Check a finished action for `player` against `state`.
///
/// Does not check whether the action is expected right now; the turn
/// protocol does that first.
pub fn validate(state: &GameState, player: PlayerId, action: &Action) -> Result<(), GameError> {
    if !state.has_seat(player) {
        return Err(GameError::illegal(format!("{player} has no seat")));
    }
    let me = state.player(player);
    match action {
        Action::ThinkerOrLead { think } => {
            ensure(*think || !me.hand.is_empty(), "cannot lead with an empty hand")
        }
        Action::ThinkerType { for_jack } => {
            ensure(!*for_jack || !state.jack_pile.is_empty(), "no Jacks are left")
        }
        Action::SkipThinker { .. }
        | Action::UseVomitorium { .. }
        | Action::UseSenate { .. }
        | Action::BarOrAqueduct { .. } => Ok(()),
        Action::UseFountain { use_fountain } => ensure(
            !*use_fountain || me.fountain_card.is_none(),
            "a Fountain card is already drawn",
        ),
        Action::LeadRole { role, units } => {
            ensure(!units.is_empty(), "a role is led with at least one card")?;
            check_units(state, player, *role, units)
        }
        Action::FollowRole { think, units } => {
            if *think {
                return ensure(units.is_empty(), "a thinker plays no cards");
            }
            let role = state
                .role_led
                .ok_or_else(|| GameError::illegal("no role has been led"))?;
            ensure(!units.is_empty(), "following needs at least one card")?;
            check_units(state, player, role, units)
        }
        Action::Laborer {
            from_hand,
            from_pool,
        } => {
            if let Some(card) = from_pool {
                ensure(state.pool.contains(*card), "card is not in the pool")?;
            }
            if let Some(card) = from_hand {
                ensure(
                    state.owns_active_structure(player, CardName::Dock),
                    "taking from hand needs a Dock",
                )?;
                in_hand(me, *card)?;
                not_jack(*card)?;
            }
            Ok(())
        }
        Action::Patron {
            from_pool,
            from_deck,
            from_hand,
        } => check_patron(state, player, *from_pool, *from_deck, *from_hand),
        Action::Craftsman {
            building,
            material,
            site,
        } => check_craftsman(state, player, *building, *material, *site),
        Action::Architect {
            building,
            material,
            site,
            from_pool,
        } => check_architect(state, player, *building, *material, *site, *from_pool),
        Action::Legionary { card } => match card {
            Some(card) => {
                in_hand(me, *card)?;
                not_jack(*card)
            }
            None => Ok(()),
        },
        Action::Merchant {
            from_stockpile,
            from_deck,
            from_hand,
        } => check_merchant(state, player, *from_stockpile, *from_deck, *from_hand),
        Action::UseLatrine { discard } => match discard {
            Some(card) => in_hand(me, *card),
            None => Ok(()),
        },
        Action::UseSewer { cards } => {
            if cards.is_empty() {
                return Ok(());
            }
            ensure(
                state.owns_active_structure(player, CardName::Sewer),
                "keeping camp cards needs a Sewer",
            )?;
            let mut seen = FxHashSet::default();
            for &card in cards {
                ensure(me.camp.contains(card), "card is not in camp")?;
                not_jack(card)?;
                ensure(seen.insert(card.id), "card listed twice")?;
            }
            Ok(())
        }
        Action::Stairway {
            owner,
            building,
            material,
            from_pool,
        } => check_stairway(state, player, *owner, *building, *material, *from_pool),
        Action::GiveCard { cards } => {
            let Some(Step::GiveCard { material, .. }) = state.agenda.front() else {
                return Err(GameError::illegal("no demand is pending"));
            };
            let matching = me.hand.of_material(*material);
            if matching.is_empty() {
                return ensure(cards.is_empty(), "no matching card to give");
            }
            match cards.as_slice() {
                [card] => ensure(
                    matching.iter().any(|c| c.id == card.id),
                    "card does not match the demand",
                ),
                _ => Err(GameError::illegal("exactly one matching card must be given")),
            }
        }
    }
}

/// Cards of units must be in hand and pairwise distinct. A single card
/// must play as the role; a petition is `petition_size` non-Jack cards of
/// one role.
fn check_units(state: &GameState, player: PlayerId, role: Role, units: &[ActionUnit]) -> Verdict {
    if units.len() > 1 {
        ensure(
            state.owns_active_structure(player, CardName::Palace),
            "several units need a Palace",
        )?;
    }

    let me = state.player(player);
    let size = state.petition_size(player);
    let mut seen = FxHashSet::default();

    for unit in units {
        for &card in unit.cards() {
            in_hand(me, card)?;
            ensure(seen.insert(card.id), "card used twice")?;
        }
        match unit.cards() {
            [card] => {
                if !card.plays_as(role) {
                    return Err(GameError::illegal(format!("{card} cannot play as {role}")));
                }
            }
            cards => {
                if cards.len() != size {
                    return Err(GameError::illegal(format!("a petition needs {size} cards")));
                }
                let first = cards.first().and_then(Card::role);
                ensure(
                    cards.iter().all(|c| !c.is_jack() && c.role() == first),
                    "petition cards must share one role",
                )?;
            }
        }
    }
    Ok(())
}

/// Whether `material` may be added to `building` by `player`.
pub(crate) fn material_fits(
    state: &GameState,
    player: PlayerId,
    building: &Building,
    material: Card,
) -> bool {
    let Some(kind) = material.material() else {
        return false;
    };
    kind == building.site
        || (building.site == Material::Stone && state.owns_active_structure(player, CardName::Road))
        || (kind == Material::Rubble && state.owns_active_structure(player, CardName::Tower))
}

/// Sites a card may be started on, ignoring availability.
pub(crate) fn candidate_sites(card: Card) -> Vec<Material> {
    if card.name == CardName::Statue {
        Material::ALL.to_vec()
    } else {
        card.material().into_iter().collect()
    }
}

fn check_start(
    state: &GameState,
    player: PlayerId,
    card: Card,
    site: Option<Material>,
    role: Role,
) -> Verdict {
    not_jack(card)?;
    ensure(
        !state.player(player).has_building(card.name),
        "player already has this building",
    )?;
    let site = site.ok_or_else(|| GameError::illegal("a new building needs a site"))?;
    ensure(
        candidate_sites(card).contains(&site),
        "site must match the card's material",
    )?;
    if state.has_in_town_site(site) {
        return Ok(());
    }
    ensure(state.has_out_of_town_site(site), "no site of this material is left")?;
    ensure(
        state.agenda.queued_performances(player, role) >= 1,
        "an out-of-town site costs an extra action",
    )
}

fn check_add(state: &GameState, player: PlayerId, foundation: Card, material: Card) -> Verdict {
    let building = state
        .player(player)
        .buildings
        .iter()
        .find(|b| b.foundation.id == foundation.id)
        .ok_or_else(|| GameError::illegal("no such building"))?;
    ensure(!building.complete, "building is already complete")?;
    ensure(
        material_fits(state, player, building, material),
        "material does not match the site",
    )
}

fn check_craftsman(
    state: &GameState,
    player: PlayerId,
    building: Option<Card>,
    material: Option<Card>,
    site: Option<Material>,
) -> Verdict {
    let me = state.player(player);
    let from_hand = |card: Card| match me.fountain_card {
        Some(drawn) => ensure(card.id == drawn.id, "a Fountain Craftsman uses the drawn card"),
        None => in_hand(me, card),
    };

    match (building, material) {
        (None, None) => ensure(site.is_none(), "a skipped action names no site"),
        (Some(card), None) => {
            from_hand(card)?;
            check_start(state, player, card, site, Role::Craftsman)
        }
        (Some(foundation), Some(card)) => {
            ensure(site.is_none(), "adding a material names no site")?;
            from_hand(card)?;
            check_add(state, player, foundation, card)
        }
        (None, Some(_)) => Err(GameError::illegal("a material needs a building")),
    }
}

fn check_architect(
    state: &GameState,
    player: PlayerId,
    building: Option<Card>,
    material: Option<Card>,
    site: Option<Material>,
    from_pool: bool,
) -> Verdict {
    let me = state.player(player);
    match (building, material) {
        (None, None) => ensure(
            site.is_none() && !from_pool,
            "a skipped action names no site",
        ),
        (Some(card), None) => {
            ensure(!from_pool, "starting a building takes nothing from the pool")?;
            in_hand(me, card)?;
            check_start(state, player, card, site, Role::Architect)
        }
        (Some(foundation), Some(card)) => {
            ensure(site.is_none(), "adding a material names no site")?;
            check_material_source(state, player, card, from_pool)?;
            check_add(state, player, foundation, card)
        }
        (None, Some(_)) => Err(GameError::illegal("a material needs a building")),
    }
}

/// Architect and Stairway materials come from the stockpile, or from the
/// pool with an Archway.
fn check_material_source(
    state: &GameState,
    player: PlayerId,
    card: Card,
    from_pool: bool,
) -> Verdict {
    if from_pool {
        ensure(
            state.owns_active_structure(player, CardName::Archway),
            "taking material from the pool needs an Archway",
        )?;
        ensure(state.pool.contains(card), "card is not in the pool")
    } else {
        ensure(
            state.player(player).stockpile.contains(card),
            "card is not in the stockpile",
        )
    }
}

fn check_patron(
    state: &GameState,
    player: PlayerId,
    from_pool: Option<Card>,
    from_deck: bool,
    from_hand: Option<Card>,
) -> Verdict {
    let me = state.player(player);
    let mut added = 0;

    if let Some(card) = from_pool {
        ensure(state.pool.contains(card), "card is not in the pool")?;
        not_jack(card)?;
        added += 1;
    }
    if from_deck {
        ensure(
            state.owns_active_structure(player, CardName::Bar),
            "a client from the deck needs a Bar",
        )?;
        added += 1;
    }
    if let Some(card) = from_hand {
        ensure(
            state.owns_active_structure(player, CardName::Aqueduct),
            "a client from hand needs an Aqueduct",
        )?;
        in_hand(me, card)?;
        not_jack(card)?;
        added += 1;
    }
    ensure(
        added == 0 || me.clientele.len() + added <= state.clientele_limit(player),
        "clientele is full",
    )
}

fn check_merchant(
    state: &GameState,
    player: PlayerId,
    from_stockpile: Option<Card>,
    from_deck: bool,
    from_hand: Option<Card>,
) -> Verdict {
    let me = state.player(player);
    let mut added = 0;

    ensure(
        !(from_stockpile.is_some() && from_deck),
        "the Atrium replaces the stockpile card",
    )?;
    if let Some(card) = from_stockpile {
        ensure(me.stockpile.contains(card), "card is not in the stockpile")?;
        added += 1;
    }
    if from_deck {
        ensure(
            state.owns_active_structure(player, CardName::Atrium),
            "selling from the deck needs an Atrium",
        )?;
        added += 1;
    }
    if let Some(card) = from_hand {
        ensure(
            state.owns_active_structure(player, CardName::Basilica),
            "selling from hand needs a Basilica",
        )?;
        in_hand(me, card)?;
        not_jack(card)?;
        added += 1;
    }
    ensure(
        added == 0 || me.vault.len() + added <= state.vault_limit(player),
        "vault is full",
    )
}

fn check_stairway(
    state: &GameState,
    player: PlayerId,
    owner: Option<PlayerId>,
    building: Option<Card>,
    material: Option<Card>,
    from_pool: bool,
) -> Verdict {
    match (owner, building, material) {
        (None, None, None) => ensure(!from_pool, "a skipped action takes nothing"),
        (Some(owner), Some(foundation), Some(card)) => {
            ensure(
                owner != player && owner.index() < state.player_count(),
                "Stairway targets an opponent",
            )?;
            let target = state
                .player(owner)
                .buildings
                .iter()
                .find(|b| b.foundation.id == foundation.id)
                .ok_or_else(|| GameError::illegal("no such building"))?;
            ensure(target.complete, "only completed buildings can be opened")?;
            ensure(!target.public, "building is already open to everyone")?;
            check_material_source(state, player, card, from_pool)?;
            ensure(
                material_fits(state, player, target, card),
                "material does not match the site",
            )
        }
        _ => Err(GameError::illegal(
            "Stairway needs an owner, a building and a material",
        )),
    }
}
