//! Integration tests for the adjacency builder.

use prnn::catalog::all_architectures;
use prnn::{
    build_adjacency, create_adjacency_matrix, AdjacencyMatrix, ArchitectureFlags, Connection,
    Node, PrnnError,
};
use proptest::prelude::*;

fn backbone_only() -> [[u8; 3]; 3] {
    [[0, 1, 0], [0, 0, 1], [0, 0, 0]]
}

// =============================================================================
// Reference Architectures
// =============================================================================

#[test]
fn test_feedforward_matrix() {
    let w = create_adjacency_matrix(&[0, 0, 0, 0, 0, 0, 0]).unwrap();
    assert_eq!(w.rows(), backbone_only());
    assert_eq!(w.synapse_count(), 2);
}

#[test]
fn test_standard_rnn_matrix() {
    let w = create_adjacency_matrix(&[0, 1, 0, 0, 0, 0, 0]).unwrap();
    assert_eq!(w.rows(), [[0, 1, 0], [0, 1, 1], [0, 0, 0]]);
}

#[test]
fn test_fully_recurrent_matrix() {
    let w = create_adjacency_matrix(&[1, 1, 1, 1, 1, 1, 1]).unwrap();
    assert_eq!(w.rows(), [[1, 1, 1], [1, 1, 1], [1, 1, 1]]);
}

// =============================================================================
// Bit-to-cell Mapping
// =============================================================================

#[test]
fn test_each_bit_sets_exactly_its_cell() {
    let expected = [
        (0, Node::Input, Node::Input),
        (1, Node::Hidden, Node::Hidden),
        (2, Node::Output, Node::Output),
        (3, Node::Input, Node::Output),
        (4, Node::Output, Node::Input),
        (5, Node::Hidden, Node::Input),
        (6, Node::Output, Node::Hidden),
    ];

    for (bit, src, tgt) in expected {
        let mut config = [0u8; 7];
        config[bit] = 1;
        let w = create_adjacency_matrix(&config).unwrap();

        let mut want = backbone_only();
        want[src.index()][tgt.index()] = 1;
        assert_eq!(w.rows(), want, "bit {} should only set ({}, {})", bit, src, tgt);
    }
}

#[test]
fn test_connection_edges_match_table() {
    for connection in Connection::ALL {
        let flags = ArchitectureFlags::FEEDFORWARD.with(connection);
        let w = build_adjacency(&flags);
        assert!(w.is_connected(connection.source(), connection.target()));
        assert_eq!(w.synapse_count(), 3);
    }
}

// =============================================================================
// Determinism and Ownership
// =============================================================================

#[test]
fn test_independent_results() {
    let flags = ArchitectureFlags::STANDARD_RNN;
    let a = build_adjacency(&flags);
    let mut b = build_adjacency(&flags);
    assert_eq!(a, b);

    // Mutating a copy never touches a previously built matrix
    let mut rows = b.rows();
    rows[2][0] = 1;
    b = AdjacencyMatrix::from_rows(rows);
    assert_ne!(a, b);
    assert_eq!(build_adjacency(&flags), a);
}

#[test]
fn test_round_trip_all_architectures() {
    for flags in all_architectures() {
        let w = build_adjacency(&flags);
        assert_eq!(w.to_flags().unwrap(), flags);
        assert_eq!(w.synapse_count(), 2 + flags.num_enabled());
        assert_eq!(w.is_recurrent(), !flags.is_feedforward());
    }
}

// =============================================================================
// Malformed Input
// =============================================================================

#[test]
fn test_wrong_lengths_rejected() {
    assert!(matches!(
        create_adjacency_matrix(&[0u8; 6]),
        Err(PrnnError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        create_adjacency_matrix(&[0u8; 8]),
        Err(PrnnError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        create_adjacency_matrix::<u8>(&[]),
        Err(PrnnError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_non_binary_rejected() {
    let err = create_adjacency_matrix(&[0, 0, 0, 0, 0, 0, 5]).unwrap_err();
    assert!(err.to_string().contains("not 0 or 1"));
}

#[test]
fn test_position_indexed_configs() {
    let config: Vec<usize> = vec![0, 0, 0, 1, 0, 0, 0];
    let w = create_adjacency_matrix(&config).unwrap();
    assert!(w.is_connected(Node::Input, Node::Output));
    assert_eq!(w.synapse_count(), 3);

    assert!(create_adjacency_matrix(&[0u64, 0, 0, 0, 0, 0, 1 << 40]).is_err());
}

#[test]
fn test_json_round_trip() {
    let w = build_adjacency(&ArchitectureFlags::from_code(42).unwrap());
    let json = serde_json::to_string(&w).unwrap();
    let back: AdjacencyMatrix = serde_json::from_str(&json).unwrap();
    assert_eq!(back, w);
    assert_eq!(AdjacencyMatrix::from_vec(&w.to_vec()).unwrap(), w);
}

// =============================================================================
// Property-Based Tests
// =============================================================================

proptest! {
    #[test]
    fn prop_matrix_is_binary_with_backbone(bits in proptest::array::uniform7(any::<bool>())) {
        let w = build_adjacency(&ArchitectureFlags::from_array(bits));
        prop_assert!(w.rows().iter().flatten().all(|&c| c <= 1));
        prop_assert_eq!(w[(Node::Input, Node::Hidden)], 1);
        prop_assert_eq!(w[(Node::Hidden, Node::Output)], 1);
    }

    #[test]
    fn prop_cells_follow_bits(bits in proptest::array::uniform7(any::<bool>())) {
        let w = build_adjacency(&ArchitectureFlags::from_array(bits));
        for connection in Connection::ALL {
            prop_assert_eq!(
                w.is_connected(connection.source(), connection.target()),
                bits[connection.bit()]
            );
        }
    }

    #[test]
    fn prop_wrong_length_always_fails(len in 0..20usize) {
        prop_assume!(len != 7);
        let config = vec![0i32; len];
        prop_assert!(create_adjacency_matrix(&config).is_err());
    }

    #[test]
    fn prop_out_of_range_value_fails(pos in 0..7usize, value in 2..100i32) {
        let mut config = [0i32; 7];
        config[pos] = value;
        prop_assert!(create_adjacency_matrix(&config).is_err());
    }
}
