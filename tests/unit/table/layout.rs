use super::*;

#[test]
fn index_of_is_angle_major_then_pitch_then_scale() {
    let layout = TableLayout {
        yaw_count: 3,
        pitch_count: 2,
        scale_count: 4,
    };
    assert_eq!(layout.len(), 24);

    let at = |yaw, pitch, scale| layout.index_of(TableCoords { yaw, pitch, scale });
    assert_eq!(at(0, 0, 0), Some(OutputIndex(1)));
    assert_eq!(at(0, 0, 3), Some(OutputIndex(4)));
    assert_eq!(at(0, 1, 0), Some(OutputIndex(5)));
    assert_eq!(at(1, 0, 0), Some(OutputIndex(9)));
    assert_eq!(at(2, 1, 3), Some(OutputIndex(24)));
    assert_eq!(at(3, 0, 0), None);
    assert_eq!(at(0, 2, 0), None);
    assert_eq!(at(0, 0, 4), None);
}

#[test]
fn coords_of_inverts_index_of() {
    let layout = TableLayout {
        yaw_count: 5,
        pitch_count: 3,
        scale_count: 7,
    };
    for i in 1..=layout.len() as u32 {
        let c = layout.coords_of(OutputIndex(i)).unwrap();
        assert_eq!(layout.index_of(c), Some(OutputIndex(i)));
    }
    assert_eq!(layout.coords_of(OutputIndex(0)), None);
    assert_eq!(layout.coords_of(OutputIndex(106)), None);
}

#[test]
fn empty_layout() {
    let layout = TableLayout {
        yaw_count: 0,
        pitch_count: 1,
        scale_count: 11,
    };
    assert!(layout.is_empty());
    assert_eq!(layout.coords_of(OutputIndex(1)), None);
}
