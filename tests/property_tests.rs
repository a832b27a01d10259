//! Property tests for the screening filters and LRI interpolation.

use lri_screen::prelude::*;
use proptest::prelude::*;

/// Ladder of consecutive alkanes starting at `first` with strictly increasing RTs
fn ladder(first: u32, gaps: &[f64]) -> AlkaneLadder {
    let mut rt = 1.0;
    let points = gaps
        .iter()
        .enumerate()
        .map(|(i, gap)| {
            rt += gap;
            lri_screen::lri::LadderPoint {
                carbon_count: first + i as u32,
                rt,
            }
        })
        .collect();
    AlkaneLadder::from_points(Method::Db1ms, points)
}

fn substance(rt: f64, fragments: &[u32]) -> SubstanceRecord {
    let text: Vec<String> = fragments.iter().map(|f| f.to_string()).collect();
    SubstanceRecord::new("Teste")
        .with_rt(Method::Db1ms, rt)
        .with_fragment_text(&text.join(","))
}

proptest! {
    #[test]
    fn window_contains_its_center(rt in 0.0f64..120.0, percent in 1u8..=10) {
        let window = RtWindow::new(rt, Tolerance::new(percent).unwrap());
        prop_assert!(window.contains(rt));
        prop_assert!(window.min <= window.max);
    }

    #[test]
    fn window_bounds_scale_with_tolerance(rt in 0.1f64..120.0, percent in 1u8..10) {
        let narrow = RtWindow::new(rt, Tolerance::new(percent).unwrap());
        let wide = RtWindow::new(rt, Tolerance::new(percent + 1).unwrap());
        prop_assert!(wide.min <= narrow.min);
        prop_assert!(wide.max >= narrow.max);
    }

    #[test]
    fn more_fragments_never_add_matches(
        reference in prop::collection::btree_set(1u32..500, 0..8),
        observed in prop::collection::vec(1u32..500, 0..4),
        extra in 1u32..500,
    ) {
        let reference: Vec<u32> = reference.into_iter().collect();
        let record = substance(10.0, &reference);

        let mut narrower = observed.clone();
        narrower.push(extra);

        let passes = FragmentFilter::new(&observed).passes(&record);
        let passes_narrower = FragmentFilter::new(&narrower).passes(&record);
        prop_assert!(passes || !passes_narrower);
    }

    #[test]
    fn reference_fragments_always_pass(
        reference in prop::collection::btree_set(1u32..500, 1..8),
    ) {
        let reference: Vec<u32> = reference.into_iter().collect();
        let record = substance(10.0, &reference);
        prop_assert!(FragmentFilter::new(&reference).passes(&record));
    }

    #[test]
    fn lri_at_rung_is_hundred_times_carbon_count(
        first in 5u32..20,
        gaps in prop::collection::vec(0.1f64..5.0, 2..10),
        pick in any::<prop::sample::Index>(),
    ) {
        let ladder = ladder(first, &gaps);
        // The first rung has nothing eluting before it.
        let points = ladder.points();
        let rung = points[1 + pick.index(points.len() - 1)];
        let index = ladder.retention_index(rung.rt).unwrap();
        prop_assert!((index.value - 100.0 * rung.carbon_count as f64).abs() < 1e-6);
    }

    #[test]
    fn lri_is_monotonic_in_rt(
        first in 5u32..20,
        gaps in prop::collection::vec(0.1f64..5.0, 2..10),
        a in 0.001f64..0.999,
        b in 0.001f64..0.999,
    ) {
        let ladder = ladder(first, &gaps);
        let points = ladder.points();
        let lo = points[0].rt;
        let hi = points[points.len() - 1].rt;
        let (a, b) = if a <= b { (a, b) } else { (b, a) };

        let first_index = ladder.retention_index(lo + a * (hi - lo)).unwrap();
        let second_index = ladder.retention_index(lo + b * (hi - lo)).unwrap();
        prop_assert!(first_index.value <= second_index.value + 1e-9);
        prop_assert!(first_index.value >= 100.0 * first as f64 - 1e-9);
    }

    #[test]
    fn lri_outside_ladder_is_rejected(
        gaps in prop::collection::vec(0.1f64..5.0, 2..10),
        past in 0.01f64..10.0,
    ) {
        let ladder = ladder(8, &gaps);
        let points = ladder.points();
        prop_assert_eq!(
            ladder.retention_index(points[0].rt - past).unwrap_err(),
            LriWarning::BelowLowerBracket
        );
        prop_assert_eq!(
            ladder.retention_index(points[points.len() - 1].rt + past).unwrap_err(),
            LriWarning::AboveUpperBracket
        );
    }

    #[test]
    fn fragment_input_never_panics(input in ".{0,64}") {
        for fragment in parse_fragment_input(&input) {
            prop_assert!(input.contains(&fragment.to_string()));
        }
    }
}
