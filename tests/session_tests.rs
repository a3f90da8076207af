//! Whole turns through `GameSession`: place, claim, score.

use rust_carcassonne::board::PlacementError;
use rust_carcassonne::core::{Coord, Direction, PlayerId, RulesConfig};
use rust_carcassonne::features::{Feature, FeatureManager, ScoredFeatures};
use rust_carcassonne::game::{GameSession, MeepleError};
use rust_carcassonne::tiles::{SectionId, SectionType, TileCatalog, TileKindId};

const CAM: PlayerId = PlayerId(0);
const MINA: PlayerId = PlayerId(1);

fn setup() -> (TileCatalog, GameSession) {
    let mut catalog = TileCatalog::standard();
    let session = GameSession::new(catalog.start_tile(), 2, RulesConfig::default());
    (catalog, session)
}

fn place(session: &mut GameSession, catalog: &mut TileCatalog, kind: u8, turns: u8, x: i32, y: i32) {
    let tile = catalog.create(TileKindId(kind)).rotated(turns);
    session
        .place_tile(tile, Coord::new(x, y))
        .unwrap_or_else(|e| panic!("kind {} turned {} at ({}, {}): {}", kind, turns, x, y, e));
}

fn edge(session: &GameSession, x: i32, y: i32, direction: Direction) -> SectionId {
    session.grid().tile_at(Coord::new(x, y)).unwrap().edge_id(direction)
}

fn center(session: &GameSession, x: i32, y: i32) -> SectionId {
    let (id, _) = session.grid().tile_at(Coord::new(x, y)).unwrap().centers().next().unwrap();
    id
}

fn tally(session: &GameSession, kind: SectionType) -> (usize, usize) {
    let features = session.features();
    let of_kind = features.iter().filter(|f| f.kind() == kind);
    let complete = of_kind.clone().filter(|f| f.is_complete()).count();
    (of_kind.count(), complete)
}

/// City, roads and a monastery laid around the start tile.
fn build_composite(session: &mut GameSession, catalog: &mut TileCatalog, counts: &mut Vec<usize>) {
    let layout: [(u8, u8, i32, i32); 8] = [
        (11, 2, 0, 1),
        (20, 3, 1, 1),
        (7, 3, 2, 1),
        (18, 1, 1, 0),
        (10, 0, 2, 0),
        (7, 0, 0, -1),
        (10, 1, 1, -1),
        (15, 1, 2, -1),
    ];
    for (kind, turns, x, y) in layout {
        place(session, catalog, kind, turns, x, y);
        counts.push(session.features().len());
    }
}

// =============================================================================
// Placement
// =============================================================================

#[test]
fn test_place_tile_errors() {
    let (mut catalog, mut session) = setup();

    let crossroads = catalog.create(TileKindId(2));
    assert_eq!(
        session.place_tile(crossroads.clone(), Coord::new(0, 1)),
        Err(PlacementError::EdgeMismatch {
            direction: Direction::Down,
            expected: SectionType::City,
            found: SectionType::Road,
        })
    );
    assert_eq!(
        session.place_tile(crossroads.clone(), Coord::new(5, 5)),
        Err(PlacementError::NoAdjacentTile)
    );
    assert_eq!(
        session.place_tile(crossroads.clone(), Coord::ORIGIN),
        Err(PlacementError::Occupied)
    );

    assert!(session.place_tile(crossroads, Coord::new(-1, 0)).is_ok());
    assert_eq!(session.grid().len(), 2);
}

#[test]
fn test_legal_placements_are_placeable() {
    let (mut catalog, session) = setup();
    let tile = catalog.create(TileKindId(22));

    let options = session.legal_placements(&tile);
    assert!(!options.is_empty());
    for (coord, turns) in options {
        let mut attempt = session.clone();
        assert!(attempt.place_tile(tile.clone().rotated(turns), coord).is_ok());
    }
}

// =============================================================================
// Features across both trackers
// =============================================================================

#[test]
fn test_composite_feature_counts() {
    let (mut catalog, mut session) = setup();
    assert_eq!(session.features().len(), 2);

    let mut counts = Vec::new();
    build_composite(&mut session, &mut catalog, &mut counts);
    assert_eq!(counts, vec![2, 2, 5, 6, 6, 9, 9, 8]);

    assert_eq!(tally(&session, SectionType::City), (1, 1));
    assert_eq!(tally(&session, SectionType::Road), (6, 1));
    assert_eq!(tally(&session, SectionType::Monastery), (1, 1));
}

#[test]
fn test_field_is_never_claimable() {
    let (_, session) = setup();
    let field = edge(&session, 0, 0, Direction::Down);
    assert!(!session.can_place_meeple(Coord::ORIGIN, field));

    // the graph tracker alone has no opinion on fields
    let section = session.grid().tile_at(Coord::ORIGIN).unwrap().section_ref(field);
    assert!(session.feature_manager().graph().can_place_meeple(session.grid(), section));
    assert!(!session.feature_manager().can_place_meeple(session.grid(), section));
}

#[test]
fn test_one_meeple_per_tile() {
    let (_, mut session) = setup();
    let city = edge(&session, 0, 0, Direction::Up);
    let road = edge(&session, 0, 0, Direction::Left);

    assert!(session.can_place_meeple(Coord::ORIGIN, road));
    session.place_meeple(CAM, Coord::ORIGIN, city).unwrap();
    assert!(!session.can_place_meeple(Coord::ORIGIN, road));
    assert_eq!(
        session.place_meeple(MINA, Coord::ORIGIN, road),
        Err(MeepleError::Claimed {
            coord: Coord::ORIGIN,
            section: road
        })
    );
    assert!(session.claimable_sections(Coord::ORIGIN).is_empty());
}

#[test]
fn test_monastery_is_claimable() {
    let (mut catalog, mut session) = setup();
    place(&mut session, &mut catalog, 18, 1, 1, 0);

    let monastery = center(&session, 1, 0);
    assert!(session.can_place_meeple(Coord::new(1, 0), monastery));
    session.place_meeple(MINA, Coord::new(1, 0), monastery).unwrap();
    assert_eq!(session.roster().available_meeples(MINA), 6);
}

// =============================================================================
// Scoring
// =============================================================================

#[test]
fn test_city_cap_scores_for_its_owner() {
    let (mut catalog, mut session) = setup();
    session
        .place_meeple(MINA, Coord::ORIGIN, edge(&session, 0, 0, Direction::Left))
        .unwrap();

    place(&mut session, &mut catalog, 20, 2, 0, 1);
    let cap = edge(&session, 0, 1, Direction::Down);
    session.place_meeple(CAM, Coord::new(0, 1), cap).unwrap();

    let awards = session.score_features();
    assert_eq!(awards.len(), 1);
    assert_eq!(session.roster().score(CAM), 4);
    assert_eq!(session.roster().score(MINA), 0);
    assert_eq!(session.roster().available_meeples(CAM), 7);
    assert_eq!(session.roster().available_meeples(MINA), 6);
}

#[test]
fn test_composite_scoring_order() {
    let (mut catalog, mut session) = setup();
    session
        .place_meeple(CAM, Coord::ORIGIN, edge(&session, 0, 0, Direction::Up))
        .unwrap();
    place(&mut session, &mut catalog, 11, 2, 0, 1);
    place(&mut session, &mut catalog, 20, 3, 1, 1);
    place(&mut session, &mut catalog, 7, 3, 2, 1);
    place(&mut session, &mut catalog, 18, 1, 1, 0);
    session
        .place_meeple(MINA, Coord::new(1, 0), center(&session, 1, 0))
        .unwrap();

    // the city closed two tiles ago
    let first = session.score_features();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].kind, SectionType::City);
    assert_eq!(first[0].points, 6);

    place(&mut session, &mut catalog, 10, 0, 2, 0);
    place(&mut session, &mut catalog, 7, 0, 0, -1);
    place(&mut session, &mut catalog, 10, 1, 1, -1);
    place(&mut session, &mut catalog, 15, 1, 2, -1);

    let second = session.score_features();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].player, MINA);
    assert_eq!(second[0].kind, SectionType::Monastery);
    assert_eq!(session.roster().score(CAM), 6);
    assert_eq!(session.roster().score(MINA), 9);
    assert!(session.score_features().is_empty());
}

/// A city that already paid out cannot take another meeple.
#[test]
fn test_scored_city_rejects_meeple() {
    let (mut catalog, mut session) = setup();
    session
        .place_meeple(CAM, Coord::ORIGIN, edge(&session, 0, 0, Direction::Up))
        .unwrap();
    place(&mut session, &mut catalog, 20, 2, 0, 1);
    assert_eq!(session.score_features().len(), 1);

    let cap = edge(&session, 0, 1, Direction::Down);
    assert!(!session.can_place_meeple(Coord::new(0, 1), cap));
    assert_eq!(
        session.place_meeple(MINA, Coord::new(0, 1), cap),
        Err(MeepleError::Claimed {
            coord: Coord::new(0, 1),
            section: cap
        })
    );
    assert_eq!(session.roster().available_meeples(MINA), 7);
    assert!(session.score_features().is_empty());
}

// =============================================================================
// Replay
// =============================================================================

/// Resuming after a payout keeps the city scored: no new claim, no second
/// payout.
#[test]
fn test_resume_after_scoring_pays_nothing() {
    let (mut catalog, mut session) = setup();
    session
        .place_meeple(CAM, Coord::ORIGIN, edge(&session, 0, 0, Direction::Up))
        .unwrap();
    place(&mut session, &mut catalog, 20, 2, 0, 1);
    session.score_features();
    assert_eq!(session.roster().score(CAM), 4);

    let scored = session.scored_features();
    assert_eq!(scored.sections.len(), 1);
    let mut resumed = GameSession::from_parts(
        session.grid().clone(),
        session.roster().clone(),
        &scored,
        session.config().clone(),
    );

    let cap = edge(&resumed, 0, 1, Direction::Down);
    assert!(matches!(
        resumed.place_meeple(MINA, Coord::new(0, 1), cap),
        Err(MeepleError::Claimed { .. })
    ));
    assert!(resumed.score_features().is_empty());
    assert_eq!(resumed.roster().score(CAM), 4);
    assert_eq!(resumed.roster().score(MINA), 0);
    assert_eq!(resumed.scored_features(), scored);
}

/// The scored record goes through JSON with the rest of a save.
#[test]
fn test_scored_record_round_trips_json() {
    let (mut catalog, mut session) = setup();
    place(&mut session, &mut catalog, 20, 2, 0, 1);
    session.score_features();

    let scored = session.scored_features();
    let json = serde_json::to_string(&scored).unwrap();
    let restored: ScoredFeatures = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, scored);
}

#[test]
fn test_resume_from_parts_rebuilds_features() {
    let (mut catalog, mut session) = setup();
    let mut counts = Vec::new();
    build_composite(&mut session, &mut catalog, &mut counts);

    let resumed = GameSession::from_parts(
        session.grid().clone(),
        session.roster().clone(),
        &session.scored_features(),
        session.config().clone(),
    );

    assert_eq!(resumed.features().len(), session.features().len());
    for kind in [SectionType::City, SectionType::Road, SectionType::Monastery] {
        assert_eq!(tally(&resumed, kind), tally(&session, kind));
    }
    assert_eq!(
        resumed.feature_manager().graph().tracked_sections(),
        session.feature_manager().graph().tracked_sections()
    );
}

#[test]
fn test_config_from_partial_json() {
    let config: RulesConfig = serde_json::from_str(r#"{ "monastery_points": 5 }"#).unwrap();
    assert_eq!(config.monastery_points, 5);
    assert_eq!(config.city_points_per_tile, 2);
    assert_eq!(config.meeples_per_player, 7);
}
