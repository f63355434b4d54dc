//! Horizontal wrap must be exactly periodic and always land in one period.

use std::sync::Arc;

use proptest::prelude::*;
use tradewinds_core::{CollisionType, TILE_SIZE};
use tradewinds_world::{wrap_coordinate, CollisionRegistry, LevelView, PortMap, TileGrid};

fn open_port() -> PortMap {
    let mut builder = CollisionRegistry::builder(vec![CollisionType::OPEN, CollisionType::BLOCKED]);
    builder.assign(0, 0).expect("class 0");
    builder.assign(1, 1).expect("class 1");
    PortMap::new(
        TileGrid::new(PortMap::WIDTH, PortMap::HEIGHT),
        Arc::new(builder.build()),
    )
    .expect("sized")
}

proptest! {
    #[test]
    fn wrap_col_is_periodic(x in -1_000_000i64..1_000_000, k in -50i64..50) {
        let level = open_port();
        let period = (PortMap::WIDTH as i64) * TILE_SIZE as i64;
        let a = level.wrap_col(x as f64);
        let b = level.wrap_col((x + k * period) as f64);
        prop_assert_eq!(a, b);
        prop_assert!((0.0..period as f64).contains(&a));
    }

    #[test]
    fn wrap_coordinate_in_range_for_fractions(x in -1.0e6f64..1.0e6) {
        let period = 3072.0;
        let wrapped = wrap_coordinate(x, period);
        prop_assert!((0.0..period).contains(&wrapped));
    }

    #[test]
    fn enterability_is_periodic(col in 0usize..PortMap::WIDTH, row in 0usize..PortMap::HEIGHT, k in -5i64..5) {
        let mut level = open_port();
        level.set_tile(col, row, 1).expect("in range");
        let size = TILE_SIZE as i64;
        let period = PortMap::WIDTH as i64 * size;
        let x = col as i64 * size + k * period;
        let y = row as i64 * size;
        prop_assert!(!level.is_enterable(x, y).expect("classified"));
        prop_assert!(!level.is_enterable(x + size - 1, y + size - 1).expect("classified"));
    }
}
