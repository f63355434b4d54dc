//! Property tests for the port grid codec.
//!
//! - Encoding then decoding any full-size grid yields the same grid
//! - Any strict prefix of an encoded grid is rejected as truncated
//! - Arbitrary bytes never panic the decoder

use proptest::prelude::*;
use tradewinds_world::{PortMap, TileGrid, TileGridCodec, WorldError, BYTES_PER_TILE};

const SMALL: TileGridCodec = TileGridCodec::new(7, 5);

fn port_grid() -> impl Strategy<Value = TileGrid> {
    prop::collection::vec(any::<u16>(), PortMap::WIDTH * PortMap::HEIGHT).prop_map(|tiles| {
        TileGrid::from_tiles(PortMap::WIDTH, PortMap::HEIGHT, tiles).expect("sized")
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn port_grids_roundtrip(grid in port_grid()) {
        let bytes = PortMap::CODEC.to_bytes(&grid).expect("encode");
        prop_assert_eq!(bytes.len(), PortMap::CODEC.byte_len());
        let decoded = PortMap::CODEC.decode_exact(&bytes[..]).expect("decode");
        prop_assert_eq!(decoded, grid);
    }

    #[test]
    fn truncated_input_is_rejected(
        tiles in prop::collection::vec(any::<u16>(), 35),
        cut in 0usize..70,
    ) {
        let grid = TileGrid::from_tiles(7, 5, tiles).expect("sized");
        let bytes = SMALL.to_bytes(&grid).expect("encode");
        match SMALL.decode(&bytes[..cut]) {
            Err(WorldError::TruncatedGrid { expected, found }) => {
                prop_assert_eq!(expected, 35);
                prop_assert_eq!(found, cut / BYTES_PER_TILE);
            }
            other => prop_assert!(false, "expected truncation, got {:?}", other),
        }
    }

    #[test]
    fn arbitrary_bytes_dont_crash(bytes in prop::collection::vec(any::<u8>(), 0..200)) {
        match SMALL.decode(&bytes[..]) {
            Ok(grid) => prop_assert!(bytes.len() >= SMALL.byte_len() && grid.tiles().len() == 35),
            Err(WorldError::TruncatedGrid { .. }) => prop_assert!(bytes.len() < SMALL.byte_len()),
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }
}

#[test]
fn encode_writes_through_any_writer() {
    let mut grid = TileGrid::new(7, 5);
    grid.set(6, 4, 0xBEEF).expect("in range");
    let mut out = Vec::new();
    SMALL.encode(&grid, &mut out).expect("encode");
    assert_eq!(&out[out.len() - 2..], &[0xBE, 0xEF]);
    assert_eq!(SMALL.decode(&out[..]).expect("decode"), grid);
}
