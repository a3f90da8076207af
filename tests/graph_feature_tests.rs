//! City and road connectivity through whole placement sequences.
//!
//! Each scenario lays tiles one by one around the start tile and checks
//! how many features exist, of which type, and which are complete.

use rust_carcassonne::board::{is_valid_placement, Grid};
use rust_carcassonne::core::{Coord, Direction, PlayerId, PlayerRoster, RulesConfig};
use rust_carcassonne::features::{Feature, GraphFeatureManager};
use rust_carcassonne::tiles::{SectionRef, SectionType, TileCatalog, TileKindId};

/// A board with a graph tracker and two players.
struct Table {
    catalog: TileCatalog,
    grid: Grid,
    features: GraphFeatureManager,
    roster: PlayerRoster,
}

impl Table {
    fn new() -> Self {
        let mut catalog = TileCatalog::standard();
        let grid = Grid::new(catalog.start_tile());
        let config = RulesConfig::default();
        let features = GraphFeatureManager::from_grid(&grid, config.clone());
        let roster = PlayerRoster::new(2, &config);
        Self {
            catalog,
            grid,
            features,
            roster,
        }
    }

    fn place(&mut self, kind: u8, turns: u8, x: i32, y: i32) {
        let tile = self.catalog.create(TileKindId(kind)).rotated(turns);
        let coord = Coord::new(x, y);
        assert!(
            is_valid_placement(&self.grid, coord, &tile),
            "kind {} turned {} does not fit at {}",
            kind,
            turns,
            coord
        );
        self.grid.place(coord, tile);
        self.features.update(&self.grid, coord);
    }

    fn edge(&self, x: i32, y: i32, direction: Direction) -> SectionRef {
        self.grid.tile_at(Coord::new(x, y)).unwrap().edge_ref(direction)
    }

    fn claim(&mut self, player: PlayerId, section: SectionRef) {
        assert!(self.features.can_place_meeple(&self.grid, section));
        let meeple = self.roster.take_meeple(player).unwrap();
        self.grid.section_mut(section).unwrap().place_meeple(meeple);
    }

    fn count(&self) -> usize {
        self.features.features().len()
    }

    fn count_of(&self, kind: SectionType, complete: bool) -> usize {
        self.features
            .features()
            .iter()
            .filter(|f| f.kind() == kind && f.is_complete() == complete)
            .count()
    }
}

const P1: PlayerId = PlayerId(0);
const P2: PlayerId = PlayerId(1);

// =============================================================================
// Connectivity
// =============================================================================

#[test]
fn test_start_tile_features() {
    let table = Table::new();
    assert_eq!(table.count(), 2);
    assert_eq!(table.count_of(SectionType::City, false), 1);
    assert_eq!(table.count_of(SectionType::Road, false), 1);
}

#[test]
fn test_city_capped_above_start() {
    let mut table = Table::new();
    table.place(20, 2, 0, 1);

    assert_eq!(table.count(), 2);
    assert_eq!(table.count_of(SectionType::City, true), 1);
    assert_eq!(table.count_of(SectionType::Road, false), 1);
}

/// A tile touching two placed tiles closes the city they started.
#[test]
fn test_tile_placed_beside_two_tiles() {
    let mut table = Table::new();

    table.place(15, 0, 1, 0);
    assert_eq!(table.count(), 2);

    table.place(11, 2, 0, 1);
    assert_eq!(table.count(), 2);
    assert_eq!(table.count_of(SectionType::City, false), 1);

    table.place(20, 3, 1, 1);
    assert_eq!(table.count(), 2);
    assert_eq!(table.count_of(SectionType::City, true), 1);
    assert_eq!(table.count_of(SectionType::Road, false), 1);
}

/// A loop of roads broken by a crossroads and a junction.
#[test]
fn test_split_circle_road() {
    let mut table = Table::new();

    table.place(15, 0, 1, 0);
    assert_eq!(table.count(), 2);

    // crossroads: one arm joins, three start new roads
    table.place(2, 0, 1, -1);
    assert_eq!(table.count(), 5);
    assert_eq!(table.count_of(SectionType::City, false), 1);
    assert_eq!(table.count_of(SectionType::Road, false), 4);

    table.place(10, 1, 0, -1);
    assert_eq!(table.count(), 5);
    assert_eq!(table.count_of(SectionType::Road, false), 4);

    // junction closes the road from the crossroads, opens two more
    table.place(7, 2, -1, -1);
    assert_eq!(table.count(), 7);
    assert_eq!(table.count_of(SectionType::City, false), 1);
    assert_eq!(table.count_of(SectionType::Road, false), 5);
    assert_eq!(table.count_of(SectionType::Road, true), 1);

    table.place(14, 0, -1, 0);
    assert_eq!(table.count(), 7);
    assert_eq!(table.count_of(SectionType::City, false), 2);
    assert_eq!(table.count_of(SectionType::Road, false), 3);
    assert_eq!(table.count_of(SectionType::Road, true), 2);
}

/// The same loop without a break is a single road that completes.
#[test]
fn test_continuous_circle_road() {
    let mut table = Table::new();

    table.place(15, 0, 1, 0);
    table.place(15, 1, 1, -1);
    assert_eq!(table.count(), 2);

    table.place(10, 1, 0, -1);
    assert_eq!(table.count(), 2);

    table.place(15, 2, -1, -1);
    assert_eq!(table.count(), 2);
    assert_eq!(table.count_of(SectionType::Road, false), 1);

    table.place(14, 0, -1, 0);
    assert_eq!(table.count(), 3);
    assert_eq!(table.count_of(SectionType::City, false), 2);
    assert_eq!(table.count_of(SectionType::Road, true), 1);
}

/// Merging through a center removes all but one of the touched features.
#[test]
fn test_merge_reduces_road_count() {
    let mut table = Table::new();
    table.place(15, 0, 1, 0);
    table.place(2, 0, 1, -1);
    table.place(10, 1, 0, -1);
    table.place(7, 2, -1, -1);

    let roads = |table: &Table| table.count_of(SectionType::Road, false) + table.count_of(SectionType::Road, true);
    let left = table.features.feature_of(table.edge(0, 0, Direction::Left)).unwrap();
    let below = table.features.feature_of(table.edge(-1, -1, Direction::Up)).unwrap();
    assert_ne!(left, below);
    let before = roads(&table);

    // the curve's center touches both roads
    table.place(14, 0, -1, 0);
    assert_eq!(roads(&table), before - 1);

    let left = table.features.feature_of(table.edge(0, 0, Direction::Left)).unwrap();
    let below = table.features.feature_of(table.edge(-1, -1, Direction::Up)).unwrap();
    assert_eq!(left, below);
    assert!(table.features.feature(below).unwrap().is_complete());
}

/// Every tracked section points at a live feature that contains it.
#[test]
fn test_sections_point_at_live_features() {
    let mut table = Table::new();
    table.place(15, 0, 1, 0);
    table.place(2, 0, 1, -1);
    table.place(10, 1, 0, -1);
    table.place(7, 2, -1, -1);
    table.place(14, 0, -1, 0);

    for feature in table.features.features() {
        for section in feature.sections() {
            assert_eq!(table.features.feature_of(section), Some(feature.id()));
        }
    }
    let total: usize = table.features.features().iter().map(|f| f.len()).sum();
    assert_eq!(total, table.features.tracked_sections());
}

// =============================================================================
// Meeple gate
// =============================================================================

#[test]
fn test_no_meeple_on_claimed_road() {
    let mut table = Table::new();
    table.place(10, 1, 1, 0);

    let road = table.edge(1, 0, Direction::Left);
    table.claim(P1, road);

    table.place(15, 0, 2, 0);
    let further = table.edge(2, 0, Direction::Down);
    assert!(!table.features.can_place_meeple(&table.grid, further));
}

#[test]
fn test_no_meeple_on_claimed_city() {
    let mut table = Table::new();
    table.place(8, 1, 0, 1);

    let city = table.edge(0, 1, Direction::Down);
    assert_eq!(table.grid.section(city).unwrap().kind(), SectionType::City);
    table.claim(P1, city);

    table.place(20, 2, 0, 2);
    let further = table.edge(0, 2, Direction::Down);
    assert_eq!(table.grid.section(further).unwrap().kind(), SectionType::City);
    assert!(!table.features.can_place_meeple(&table.grid, further));
}

/// Two claimed roads joined later: both meeples stay, nobody new may join.
#[test]
fn test_joined_claims_block_further_meeples() {
    let mut table = Table::new();
    // road end left of the start tile, its lower arm is a separate road
    table.place(7, 0, -1, 0);
    table.claim(P1, table.edge(0, 0, Direction::Right));

    table.place(15, 2, -1, -1);
    table.claim(P2, table.edge(-1, -1, Direction::Right));
    table.place(10, 1, 0, -1);
    table.place(15, 1, 1, -1);

    let claimed_by_p1 = table.features.feature_of(table.edge(0, 0, Direction::Right)).unwrap();
    let claimed_by_p2 = table.features.feature_of(table.edge(1, -1, Direction::Up)).unwrap();
    assert_ne!(claimed_by_p1, claimed_by_p2);

    // the curve right of the start tile joins both roads into a loop
    table.place(15, 0, 1, 0);
    let joined = table.features.feature_of(table.edge(1, 0, Direction::Left)).unwrap();
    assert_eq!(table.features.feature_of(table.edge(1, 0, Direction::Down)), Some(joined));
    assert!(table.features.feature(joined).unwrap().is_complete());
    assert!(!table.features.can_place_meeple(&table.grid, table.edge(1, 0, Direction::Left)));
    assert!(!table.features.can_place_meeple(&table.grid, table.edge(0, -1, Direction::Left)));
}
