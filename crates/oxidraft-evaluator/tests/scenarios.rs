use std::{collections::BTreeSet, sync::Arc};

use oxidraft_engine::{
    Ability, AbilityType, DraftActionKind, DraftConfig, DraftError, DraftMode, DraftState,
    DraftStatus, Hero, HeroCatalog as _, HeroId, InMemoryCatalog, InvalidAction, PrimaryAttribute,
    Side,
};
use oxidraft_evaluator::{
    bot::{DraftBot, auto_draft},
    config::{EngineConfig, ScoringProfile},
    recommendation::{HeroScore, RecommendationEngine},
    relationship::{RelationshipIndex, RelationshipProvider},
    score_component::ScoreComponent,
    selector::DifficultySelector,
};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

const DESCRIPTIONS: [&str; 5] = [
    "Stuns all enemies in a radius.",
    "Deals magical damage and slows the target.",
    "Heals nearby allies.",
    "Blinks a short distance to escape.",
    "Deals physical damage to the target.",
];

fn catalog(n: u32) -> Arc<InMemoryCatalog> {
    let attributes = [
        PrimaryAttribute::Strength,
        PrimaryAttribute::Agility,
        PrimaryAttribute::Intelligence,
    ];
    let heroes = (1..=n)
        .map(|id| {
            let i = id as usize;
            Hero::new(
                HeroId(id),
                format!("hero_{id}"),
                format!("Hero {id}"),
                attributes[i % attributes.len()],
            )
            .with_ability(Ability::new(
                "First",
                DESCRIPTIONS[i % DESCRIPTIONS.len()],
                AbilityType::Basic,
            ))
            .with_ability(Ability::new(
                "Second",
                DESCRIPTIONS[(i + 2) % DESCRIPTIONS.len()],
                AbilityType::Ultimate,
            ))
        })
        .collect();
    Arc::new(InMemoryCatalog::new(heroes).unwrap())
}

fn engine<P>(catalog: &Arc<InMemoryCatalog>, provider: P) -> RecommendationEngine
where
    P: RelationshipProvider + 'static,
{
    RecommendationEngine::new(catalog.clone(), Box::new(provider), EngineConfig::default()).unwrap()
}

#[test]
fn all_pick_with_twenty_heroes_recommends_five_distinct() {
    let catalog = catalog(20);
    let state = DraftState::new(&DraftConfig::with_mode(DraftMode::AllPick), catalog.as_ref())
        .unwrap();
    let engine = engine(&catalog, RelationshipIndex::neutral());

    assert_eq!(state.status(), DraftStatus::NotStarted);
    assert_eq!(state.current_team(), Some(Side::Radiant));
    assert!(!state.is_ban_phase());

    let recs = engine.recommend(&state, Side::Radiant, DraftActionKind::Pick, 5);
    assert_eq!(recs.len(), 5);
    let ids = recs.iter().map(|r| r.hero.id()).collect::<BTreeSet<_>>();
    assert_eq!(ids.len(), 5);
    for pair in recs.windows(2) {
        assert!(pair[0].score.total() >= pair[1].score.total());
    }
}

#[test]
fn captains_mode_fills_and_then_rejects_everything() {
    let catalog = catalog(30);
    let mut state = DraftState::new(&DraftConfig::default(), catalog.as_ref()).unwrap();
    let mut next = catalog.heroes().iter().map(|h| h.id());

    while let Some(step) = state.current_step() {
        assert_eq!(state.current_team(), Some(step.side));
        assert_eq!(state.is_ban_phase(), step.kind.is_ban());
        let hero = next.next().unwrap();
        match step.kind {
            DraftActionKind::Ban => state.ban(hero).unwrap(),
            DraftActionKind::Pick => state.pick(hero).unwrap(),
        }
    }

    assert_eq!(state.status(), DraftStatus::Complete);
    assert_eq!(state.picks(Side::Radiant).len(), 5);
    assert_eq!(state.picks(Side::Dire).len(), 5);
    assert_eq!(state.bans().len(), 12);
    assert_eq!(state.current_team(), None);

    let complete = Err(DraftError::InvalidAction(InvalidAction::DraftComplete));
    assert_eq!(state.pick(HeroId(30)), complete);
    assert_eq!(state.ban(HeroId(30)), complete);

    state.undo().unwrap();
    assert_eq!(state.status(), DraftStatus::InProgress);
}

/// Heroes that differ only in id and name.
fn uniform_catalog(n: u32) -> Arc<InMemoryCatalog> {
    let heroes = (1..=n)
        .map(|id| {
            Hero::new(
                HeroId(id),
                format!("hero_{id}"),
                format!("Hero {id}"),
                PrimaryAttribute::Strength,
            )
            .with_ability(Ability::new("First", DESCRIPTIONS[0], AbilityType::Basic))
            .with_ability(Ability::new("Second", DESCRIPTIONS[1], AbilityType::Ultimate))
        })
        .collect();
    Arc::new(InMemoryCatalog::new(heroes).unwrap())
}

#[test]
fn synergy_with_picked_ally_lifts_candidate() {
    let catalog = uniform_catalog(10);
    let mut state = DraftState::new(&DraftConfig::with_mode(DraftMode::AllPick), catalog.as_ref())
        .unwrap();
    // A has the higher id, so only the synergy can put it ahead of C
    let (a, b, c) = (HeroId(8), HeroId(2), HeroId(3));
    // radiant takes B, dire takes two unrelated heroes, radiant is up again
    state.pick(b).unwrap();
    state.pick(HeroId(9)).unwrap();
    state.pick(HeroId(10)).unwrap();
    assert_eq!(state.current_team(), Some(Side::Radiant));

    let engine = engine(&catalog, RelationshipIndex::neutral().with_synergy(a, b, 0.9));
    let score_a = engine
        .score_hero(&state, Side::Radiant, DraftActionKind::Pick, a)
        .unwrap();
    let score_c = engine
        .score_hero(&state, Side::Radiant, DraftActionKind::Pick, c)
        .unwrap();
    assert!(score_a.total() > score_c.total());

    let team_synergy =
        |score: &HeroScore| score.component(ScoreComponent::TeamSynergy).unwrap().value;
    assert!((team_synergy(&score_a) - 0.9).abs() < 1e-6);
    assert!((team_synergy(&score_c) - 0.5).abs() < 1e-6);

    let recs = engine.recommend(&state, Side::Radiant, DraftActionKind::Pick, 10);
    let position = |id| recs.iter().position(|r| r.hero.id() == id).unwrap();
    assert_eq!(recs.len(), 7);
    assert_eq!(recs[0].hero.id(), a);
    assert!(position(a) < position(c));
    // everyone else ties, so ids break the tie in ascending order
    for pair in recs.windows(2) {
        let (x, y) = (&pair[0], &pair[1]);
        let order = x
            .score
            .total()
            .total_cmp(&y.score.total())
            .then_with(|| y.hero.id().cmp(&x.hero.id()));
        assert_eq!(order, std::cmp::Ordering::Greater);
    }
}

#[test]
fn recommendations_exclude_unavailable_and_are_idempotent() {
    let catalog = catalog(30);
    let mut state = DraftState::new(&DraftConfig::default(), catalog.as_ref()).unwrap();
    let engine = engine(
        &catalog,
        RelationshipIndex::neutral()
            .with_counter(HeroId(7), HeroId(1), 0.8)
            .with_synergy(HeroId(4), HeroId(5), 0.7),
    );
    let mut rng = Pcg32::seed_from_u64(11);
    let bot = DraftBot::new(&engine, DifficultySelector::new(0.6, 3));
    for _ in 0..10 {
        bot.take_turn(&mut state, &mut rng).unwrap();
    }

    for side in Side::ALL {
        for action in [DraftActionKind::Ban, DraftActionKind::Pick] {
            let first = engine.recommend(&state, side, action, 100);
            let second = engine.recommend(&state, side, action, 100);
            assert_eq!(first.len(), 20);
            for r in &first {
                assert!(state.is_available(r.hero.id()));
            }
            for pair in first.windows(2) {
                let (x, y) = (&pair[0], &pair[1]);
                assert!(
                    x.score.total() > y.score.total()
                        || (x.score.total() == y.score.total() && x.hero.id() < y.hero.id())
                );
            }
            let ids = |recs: &[oxidraft_evaluator::recommendation::Recommendation<'_>]| {
                recs.iter().map(|r| r.hero.id()).collect::<Vec<_>>()
            };
            assert_eq!(ids(&first), ids(&second));
        }
    }
}

#[test]
fn empty_pool_gives_empty_recommendations() {
    let catalog = catalog(4);
    let mut state = DraftState::new(&DraftConfig::default(), catalog.as_ref()).unwrap();
    for id in 1..=4 {
        state.ban(HeroId(id)).unwrap();
    }
    let engine = engine(&catalog, RelationshipIndex::neutral());
    assert!(engine.recommend(&state, Side::Radiant, DraftActionKind::Pick, 5).is_empty());
}

#[test]
fn full_skill_selector_takes_top_recommendation() {
    let catalog = catalog(20);
    let state = DraftState::new(&DraftConfig::default(), catalog.as_ref()).unwrap();
    let engine = engine(&catalog, RelationshipIndex::neutral());
    let ranked = engine.rank_candidates(&state, Side::Radiant, DraftActionKind::Ban);
    let selector = DifficultySelector::new(1.0, ScoringProfile::Simple.selection_window());
    let mut rng = Pcg32::seed_from_u64(0);
    for _ in 0..100 {
        let chosen = selector.choose(&ranked, &mut rng).unwrap();
        assert_eq!(chosen.hero.id(), ranked[0].hero.id());
    }
}

#[test]
fn low_skill_selector_spreads_choices() {
    let catalog = catalog(20);
    let state = DraftState::new(&DraftConfig::default(), catalog.as_ref()).unwrap();
    let engine = engine(&catalog, RelationshipIndex::neutral());
    let ranked = engine.rank_candidates(&state, Side::Radiant, DraftActionKind::Ban);
    let selector = DifficultySelector::new(0.1, ScoringProfile::MultiFactor.selection_window());
    let mut rng = Pcg32::seed_from_u64(1234);
    let seen = (0..1000)
        .map(|_| selector.choose(&ranked, &mut rng).unwrap().hero.id())
        .collect::<BTreeSet<_>>();
    assert!(seen.len() > 1);
}

#[test]
fn bots_complete_a_captains_mode_draft() {
    let catalog = catalog(40);
    let engine = engine(&catalog, RelationshipIndex::neutral());
    let radiant = DraftBot::new(&engine, DifficultySelector::new(0.9, 3));
    let dire = DraftBot::new(&engine, DifficultySelector::new(0.3, 5));
    let config = DraftConfig {
        first_side: Side::Dire,
        ..DraftConfig::default()
    };
    let mut state = DraftState::new(&config, catalog.as_ref()).unwrap();
    let mut rng = Pcg32::seed_from_u64(77);

    let actions = auto_draft(&mut state, &radiant, &dire, &mut rng).unwrap();
    assert_eq!(actions.len(), 22);
    assert_eq!(actions[0].side, Side::Dire);
    assert!(state.is_complete());

    let mut seen = BTreeSet::new();
    for action in &actions {
        assert!(seen.insert(action.hero), "{} used twice", action.hero);
    }
}
