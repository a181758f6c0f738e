//! Integration tests for CISR slot assignment and hex export

use smvp_toolbox::matrix::cisr::{pack_entry, PADDING_COL};
use smvp_toolbox::matrix::config::MAX_SLOT_COUNT;
use smvp_toolbox::{
    run_cisr, Algorithm, BenchmarkConfig, BenchmarkDriver, CisrConfig, CisrEncoder, SlotEntry,
    SmvpError, SparseMatrixCSR, Triplet, TripletStore,
};

fn store(n_rows: usize, n_cols: usize, entries: &[(usize, usize, f64)]) -> TripletStore<f64> {
    let triplets = entries
        .iter()
        .map(|&(r, c, v)| Triplet::new(r, c, v))
        .collect();
    TripletStore::new(n_rows, n_cols, triplets).unwrap()
}

/// Rows of length 3, 1, 0, 2, 1
fn uneven() -> SparseMatrixCSR<f64> {
    SparseMatrixCSR::from_triplets(&store(
        5,
        4,
        &[
            (0, 0, 1.0),
            (0, 1, 2.0),
            (0, 3, 3.0),
            (1, 2, 4.0),
            (3, 0, 5.0),
            (3, 2, 6.0),
            (4, 1, 7.0),
        ],
    ))
    .unwrap()
}

#[test]
fn test_lane_schedule_with_two_slots() {
    let encoder = CisrEncoder::new(CisrConfig::with_slots(2)).unwrap();
    let image = encoder.encode(&uneven()).unwrap();

    let e = |value: f64, col: usize| SlotEntry::Entry { value, col };
    let lanes: Vec<_> = image.groups.iter().map(|g| g.lanes.clone()).collect();

    // Lane 0: row 0 (three entries) then row 4
    // Lane 1: row 1, skips empty row 2, then row 3
    assert_eq!(
        lanes,
        vec![
            vec![e(1.0, 0), e(4.0, 2)],
            vec![e(2.0, 1), e(5.0, 0)],
            vec![e(3.0, 3), e(6.0, 2)],
            vec![e(7.0, 1), SlotEntry::Padding],
        ]
    );

    let rows: Vec<_> = image.assignments.iter().map(|a| (a.lane, a.row, a.len)).collect();
    assert_eq!(rows, vec![(0, 0, 3), (1, 1, 1), (1, 2, 0), (1, 3, 2), (0, 4, 1)]);
}

#[test]
fn test_single_slot_streams_rows_in_order() {
    let encoder = CisrEncoder::new(CisrConfig::with_slots(1)).unwrap();
    let image = encoder.encode(&uneven()).unwrap();

    assert_eq!(image.groups.len(), 7);
    let values: Vec<f64> = image
        .groups
        .iter()
        .map(|g| match g.lanes[0] {
            SlotEntry::Entry { value, .. } => value,
            SlotEntry::Padding => panic!("single lane should never pad"),
        })
        .collect();
    assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
}

#[test]
fn test_group_count_never_exceeds_nnz() {
    let csr = uneven();
    for slots in 1..=8 {
        let image = CisrEncoder::new(CisrConfig::with_slots(slots))
            .unwrap()
            .encode(&csr)
            .unwrap();
        assert!(image.groups.len() <= csr.nnz());
        assert_eq!(image.entry_count(), csr.nnz());
        assert!(image.groups.iter().all(|g| g.lanes.len() == slots));
    }
}

#[test]
fn test_hex_export_uses_tag_and_padding_marker() {
    let config = CisrConfig {
        slot_count: 2,
        line_tag: 0x7e,
    };
    let export = run_cisr(&store(2, 2, &[(0, 0, 1.0), (0, 1, 2.0)]), config).unwrap();

    assert_eq!(
        export.hex_lines,
        vec!["7e00100000", "7e000fff01", "7e00200100", "7e000fff01"]
    );
    assert_eq!(
        pack_entry::<f64>(&SlotEntry::Padding, 0).unwrap() >> 8,
        PADDING_COL
    );
}

#[test]
fn test_zero_slots_rejected_before_conversion() {
    let err = run_cisr(&store(1, 1, &[(0, 0, 1.0)]), CisrConfig::with_slots(0)).unwrap_err();
    assert!(matches!(err, SmvpError::InvalidSlotCount(0)));
}

#[test]
fn test_too_many_slots_rejected_before_conversion() {
    let config = BenchmarkConfig {
        algorithms: vec![Algorithm::Cisr],
        iterations: 1,
        cisr: CisrConfig::with_slots(300),
    };
    assert!(matches!(
        BenchmarkDriver::new(config),
        Err(SmvpError::InvalidSlotCount(300))
    ));

    let err = run_cisr(&store(1, 1, &[(0, 0, 1.0)]), CisrConfig::with_slots(300)).unwrap_err();
    assert!(matches!(err, SmvpError::InvalidSlotCount(300)));
}

#[test]
fn test_widest_slot_count_packs() {
    let export = run_cisr(&store(1, 1, &[(0, 0, 1.0)]), CisrConfig::with_slots(MAX_SLOT_COUNT)).unwrap();
    assert_eq!(export.hex_lines.len(), MAX_SLOT_COUNT);
    assert_eq!(export.hex_lines.last().unwrap(), "00000fffff");
}

#[test]
fn test_wide_column_index_is_rejected_on_export() {
    let err = run_cisr(&store(1, 5000, &[(0, 4999, 1.0)]), CisrConfig::default()).unwrap_err();
    assert!(matches!(err, SmvpError::PackOverflow { field: "column", .. }));
}
