//! Property-based tests for detection, segmentation, and feature invariants.

use pp_common::{Checkpoint, PitchId, PitcherId, ScheduleId, Side};
use pp_core::segment::assign_checkpoints;
use pp_core::{
    detect_events, normalize_column_name, CoordinateColumn, FeatureSynthesizer, Frame, FrameMeta,
    TrajectoryTable,
};
use pp_math::{Axis, Point3};
use proptest::prelude::*;

fn meta() -> FrameMeta {
    FrameMeta {
        pitch_id: PitchId(1),
        schedule_id: ScheduleId(1),
        pitcher_id: PitcherId(1),
        batting_side: Side::Right,
        throwing_side: Side::Right,
    }
}

/// Distinct timestamps in hundredths of a second, at least two of them.
fn times_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::btree_set(-300i32..300, 2..80)
        .prop_map(|set| set.into_iter().map(|v| v as f64 / 100.0).collect())
        .prop_shuffle()
}

fn point_strategy() -> impl Strategy<Value = Point3> {
    (-10.0f64..10.0, -10.0f64..10.0, -10.0f64..10.0).prop_map(|(x, y, z)| Point3::new(x, y, z))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn release_has_minimal_abs_time(times in times_strategy()) {
        // Knee height equals time, so it always rises once sorted.
        let frames: Vec<Frame> = times
            .iter()
            .map(|&t| Frame::new(meta(), t, vec![Point3::new(0.0, 0.0, t)]))
            .collect();
        let table = TrajectoryTable::new(vec!["lKnee".to_string()], frames).expect("table");
        let annotated = detect_events(&table, &CoordinateColumn::new("lKnee", Axis::Z), 1)
            .expect("detect");

        let out = annotated.frames();
        prop_assert_eq!(out.iter().filter(|f| f.marks.start).count(), 1);
        prop_assert_eq!(out.iter().filter(|f| f.marks.release).count(), 1);
        let release = out.iter().find(|f| f.marks.release).expect("release");
        for f in out {
            prop_assert!(f.time.abs() >= release.time.abs());
        }
        prop_assert!(out.windows(2).all(|w| w[0].time < w[1].time));
    }

    #[test]
    fn checkpoints_flag_one_frame_each(n in 1usize..500) {
        let mut frames: Vec<Frame> = (0..n)
            .map(|i| Frame::new(meta(), i as f64, vec![]))
            .collect();
        assign_checkpoints(&mut frames);
        for cp in Checkpoint::ALL {
            let idx: Vec<usize> = frames
                .iter()
                .enumerate()
                .filter(|(_, f)| f.marks.get(cp))
                .map(|(i, _)| i)
                .collect();
            prop_assert_eq!(idx.len(), 1);
            let expected = match cp.fraction() {
                Some(f) => ((f * n as f64).floor() as usize).min(n - 1),
                None if cp == Checkpoint::Start => 0,
                None => n - 1,
            };
            prop_assert_eq!(idx[0], expected);
        }
    }

    #[test]
    fn path_length_is_additive(
        points in prop::collection::vec(point_strategy(), 2..60),
        split in 0usize..60,
    ) {
        let frames: Vec<Frame> = points
            .iter()
            .enumerate()
            .map(|(i, p)| Frame::new(meta(), i as f64 * 0.01, vec![*p]))
            .collect();
        let refs: Vec<&Frame> = frames.iter().collect();
        let k = split % refs.len();
        let synth = FeatureSynthesizer::new(&["wrist".to_string()], &["wrist".to_string()], "d");

        let path = |frames: &[&Frame]| {
            synth
                .kinematics(PitchId(1), frames)
                .expect("kinematics")
                .joints[0]
                .total_path_length
        };
        let whole = path(&refs);
        let parts = path(&refs[..=k]) + path(&refs[k..]);
        prop_assert!((whole - parts).abs() <= 1e-9 * whole.max(1.0));
        prop_assert!(whole >= 0.0);
    }

    #[test]
    fn constant_position_has_zero_path(p in point_strategy(), n in 1usize..40) {
        let frames: Vec<Frame> = (0..n)
            .map(|i| Frame::new(meta(), i as f64, vec![p]))
            .collect();
        let refs: Vec<&Frame> = frames.iter().collect();
        let synth = FeatureSynthesizer::new(&["wrist".to_string()], &["wrist".to_string()], "d");
        let k = synth.kinematics(PitchId(1), &refs).expect("kinematics");
        prop_assert_eq!(k.joints[0].total_path_length, 0.0);
    }

    #[test]
    fn normalization_is_idempotent(name in "[lr]?[A-Za-z]{0,8}(_[xyz])?") {
        let once = normalize_column_name(&name);
        prop_assert_eq!(normalize_column_name(&once), once.clone());
        prop_assert_eq!(once.to_lowercase(), once);
    }
}
