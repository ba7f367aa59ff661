use super::*;

fn sample_frame() -> EventFrame {
    EventFrame::new(
        vec![10, 20, 30, 40],
        vec![
            ("FSC-A".to_string(), vec![1.0, 2.0, 3.0, 4.0]),
            ("SSC-A".to_string(), vec![5.0, 6.0, 7.0, 8.0]),
        ],
    )
    .expect("valid frame")
}

fn sample_gates() -> GateTable {
    GateTable::new(
        vec![10, 20, 30, 40],
        vec![
            (
                "Lymphocytes".to_string(),
                vec![true, true, false, true],
            ),
            (
                "Single Cells".to_string(),
                vec![true, false, false, true],
            ),
        ],
    )
    .expect("valid gate table")
}

#[test]
fn test_event_frame_shape() {
    let frame = sample_frame();
    assert_eq!(frame.shape(), (4, 2));
    assert_eq!(frame.n_rows(), 4);
    assert_eq!(frame.n_cols(), 2);
}

#[test]
fn test_event_frame_column_names() {
    let frame = sample_frame();
    assert_eq!(frame.column_names(), vec!["FSC-A", "SSC-A"]);
}

#[test]
fn test_event_frame_column_lookup() {
    let frame = sample_frame();
    assert_eq!(frame.column("FSC-A").expect("column exists"), &[1.0, 2.0, 3.0, 4.0]);
    assert!(matches!(
        frame.column("CD3"),
        Err(CytogateError::MissingColumn { .. })
    ));
}

#[test]
fn test_event_frame_rejects_empty() {
    assert!(EventFrame::new(vec![], vec![]).is_err());
}

#[test]
fn test_event_frame_rejects_length_mismatch() {
    let result = EventFrame::new(
        vec![0, 1],
        vec![("FSC-A".to_string(), vec![1.0, 2.0, 3.0])],
    );
    assert!(result.is_err());
}

#[test]
fn test_event_frame_rejects_duplicate_columns() {
    let result = EventFrame::new(
        vec![0, 1],
        vec![
            ("FSC-A".to_string(), vec![1.0, 2.0]),
            ("FSC-A".to_string(), vec![3.0, 4.0]),
        ],
    );
    assert!(result.is_err());
}

#[test]
fn test_event_frame_rejects_duplicate_ids() {
    let result = EventFrame::new(
        vec![7, 7],
        vec![("FSC-A".to_string(), vec![1.0, 2.0])],
    );
    assert!(result.is_err());
}

#[test]
fn test_event_lookup_by_id_not_position() {
    // Ids deliberately out of order relative to row positions.
    let frame = EventFrame::new(
        vec![30, 10, 20],
        vec![("FSC-A".to_string(), vec![3.0, 1.0, 2.0])],
    )
    .expect("valid frame");
    assert_eq!(frame.event(10).expect("id exists"), vec![1.0]);
    assert_eq!(frame.event(30).expect("id exists"), vec![3.0]);
    assert!(frame.event(99).is_err());
}

#[test]
fn test_select_events_preserves_requested_order() {
    let frame = sample_frame();
    let subset = frame.select_events(&[40, 10]).expect("ids exist");
    assert_eq!(subset.index(), &[40, 10]);
    assert_eq!(subset.column("FSC-A").expect("column exists"), &[4.0, 1.0]);
    assert_eq!(subset.column("SSC-A").expect("column exists"), &[8.0, 5.0]);
}

#[test]
fn test_select_events_unknown_id() {
    let frame = sample_frame();
    assert!(frame.select_events(&[10, 99]).is_err());
}

#[test]
fn test_gate_table_column_and_flags() {
    let gates = sample_gates();
    assert!(gates.has_column("Lymphocytes"));
    assert!(!gates.has_column("Live"));
    assert!(gates.flag("Lymphocytes", 20).expect("flag exists"));
    assert!(!gates.flag("Single Cells", 20).expect("flag exists"));
}

#[test]
fn test_events_where_returns_ids_in_index_order() {
    let gates = sample_gates();
    assert_eq!(
        gates.events_where("Lymphocytes").expect("column exists"),
        vec![10, 20, 40]
    );
    assert_eq!(
        gates.events_where("Single Cells").expect("column exists"),
        vec![10, 40]
    );
}

#[test]
fn test_events_where_missing_column() {
    let gates = sample_gates();
    assert!(matches!(
        gates.events_where("Live"),
        Err(CytogateError::MissingColumn { .. })
    ));
}

#[test]
fn test_select_flags_by_id() {
    let gates = sample_gates();
    let flags = gates
        .select_flags("Lymphocytes", &[40, 30, 10])
        .expect("ids exist");
    assert_eq!(flags, vec![true, false, true]);
}

#[test]
fn test_select_flags_unknown_id() {
    let gates = sample_gates();
    assert!(gates.select_flags("Lymphocytes", &[10, 77]).is_err());
}
