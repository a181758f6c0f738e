//! Property-based checks of the format invariants

use proptest::prelude::*;
use smvp_toolbox::{
    aggregate, ones_vector, CisrConfig, CisrEncoder, SlotEntry, SparseMatrixCSR, SparseMatrixTJDS,
    Triplet, TripletStore,
};

/// Random matrix with small integer values, unique coordinates, arbitrary entry order
fn arb_store() -> impl Strategy<Value = TripletStore<f64>> {
    (1usize..12, 1usize..12)
        .prop_flat_map(|(n_rows, n_cols)| {
            let cells = n_rows * n_cols;
            (
                Just(n_rows),
                Just(n_cols),
                proptest::collection::vec(any::<bool>(), cells),
                proptest::collection::vec(-9i32..10, cells),
                proptest::collection::vec(any::<u32>(), cells),
            )
        })
        .prop_map(|(n_rows, n_cols, present, values, order)| {
            let mut cells: Vec<usize> = (0..n_rows * n_cols).filter(|&c| present[c]).collect();
            cells.sort_by_key(|&c| order[c]);

            let entries = cells
                .into_iter()
                .map(|c| Triplet::new(c / n_cols, c % n_cols, values[c] as f64))
                .collect();
            TripletStore::new(n_rows, n_cols, entries).unwrap()
        })
}

proptest! {
    #[test]
    fn csr_row_ptr_is_well_formed(store in arb_store()) {
        let csr = SparseMatrixCSR::from_triplets(&store).unwrap();

        prop_assert_eq!(csr.row_ptr[0], 0);
        prop_assert_eq!(csr.row_ptr[csr.n_rows], store.nnz());
        prop_assert!(csr.row_ptr.windows(2).all(|w| w[0] <= w[1]));

        let total: usize = csr.row_ptr.windows(2).map(|w| w[1] - w[0]).sum();
        prop_assert_eq!(total, store.nnz());

        for r in 0..csr.n_rows {
            let expected = store.entries().iter().filter(|t| t.row == r).count();
            prop_assert_eq!(csr.row_ptr[r + 1] - csr.row_ptr[r], expected);
        }
    }

    #[test]
    fn csr_and_tjds_agree_on_ones(store in arb_store()) {
        let csr = SparseMatrixCSR::from_triplets(&store).unwrap();
        let tjds = SparseMatrixTJDS::from_triplets(&store);
        let ones = ones_vector(store.n_cols());

        prop_assert_eq!(csr.multiply(&ones), tjds.multiply(&ones));
    }

    #[test]
    fn tjds_reorder_table_is_a_bijection(store in arb_store()) {
        let tjds = SparseMatrixTJDS::from_triplets(&store);
        let table = &tjds.reorder;
        prop_assert_eq!(table.len(), store.n_cols());

        let mut seen = vec![false; store.n_cols()];
        for col in 0..store.n_cols() {
            let rank = table.rank_of(col);
            prop_assert!(!seen[rank]);
            seen[rank] = true;
            prop_assert_eq!(table.column_at(rank), col);
        }

        prop_assert_eq!(tjds.n_diagonals(), table.max_length());
        prop_assert_eq!(*tjds.start_pos.last().unwrap(), store.nnz());
        prop_assert!(tjds.start_pos.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn cisr_emits_every_nonzero_once_in_row_runs(store in arb_store(), slots in 1usize..6) {
        let csr = SparseMatrixCSR::from_triplets(&store).unwrap();
        let image = CisrEncoder::new(CisrConfig::with_slots(slots)).unwrap().encode(&csr).unwrap();

        prop_assert_eq!(image.entry_count(), csr.nnz());
        prop_assert!(image.groups.len() <= csr.nnz());

        // Replaying each lane's stream against its row assignments must
        // reproduce the CSR rows exactly, in order
        for lane in 0..slots {
            let stream: Vec<(f64, usize)> = image
                .groups
                .iter()
                .filter_map(|g| match g.lanes[lane] {
                    SlotEntry::Entry { value, col } => Some((value, col)),
                    SlotEntry::Padding => None,
                })
                .collect();
            let expected: Vec<(f64, usize)> = image
                .assignments
                .iter()
                .filter(|a| a.lane == lane)
                .flat_map(|a| csr.row_iter(a.row).map(|(c, &v)| (v, c)))
                .collect();
            prop_assert_eq!(stream, expected);
        }

        let mut rows: Vec<usize> = image.assignments.iter().map(|a| a.row).collect();
        rows.sort_unstable();
        prop_assert_eq!(rows, (0..csr.n_rows).collect::<Vec<_>>());
    }

    #[test]
    fn aggregate_ignores_sample_order(
        (samples, shuffled) in proptest::collection::vec(0.0f64..100.0, 1..40)
            .prop_flat_map(|s| (Just(s.clone()), Just(s).prop_shuffle()))
    ) {
        let original = aggregate(&samples).unwrap();
        let permuted = aggregate(&shuffled).unwrap();

        prop_assert!((original.total - permuted.total).abs() < 1e-9);
        prop_assert!((original.average - permuted.average).abs() < 1e-9);
        prop_assert_eq!(original.min, permuted.min);
        prop_assert_eq!(original.max, permuted.max);
        prop_assert!((original.stdev - permuted.stdev).abs() < 1e-9);

        // The series itself is reported in the order it was measured
        prop_assert_eq!(&original.per_iteration, &samples);
        prop_assert_eq!(&permuted.per_iteration, &shuffled);
    }
}
