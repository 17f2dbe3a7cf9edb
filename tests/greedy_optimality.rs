use knapstep::{
    algorithms::{fractional::GreedyPlan, zero_one::DpStepper},
    model::{FractionalItem, Item},
    Steppable,
};
use proptest::prelude::*;

/// Fractional optimum by enumerating LP vertices: a whole subset plus at
/// most one partially taken item.
fn lp_vertices_optimum(items: &[(f64, f64)], capacity: f64) -> f64 {
    let n = items.len();
    let mut best = 0.0f64;
    for mask in 0u32..(1 << n) {
        let (mut w, mut v) = (0.0, 0.0);
        for (k, &(value, weight)) in items.iter().enumerate() {
            if mask & (1 << k) != 0 {
                w += weight;
                v += value;
            }
        }
        if w > capacity + 1e-9 {
            continue;
        }
        best = best.max(v);
        let room = capacity - w;
        for (k, &(value, weight)) in items.iter().enumerate() {
            if mask & (1 << k) == 0 && weight > 0.0 {
                best = best.max(v + value * (room / weight).min(1.0));
            }
        }
    }
    best
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * (1.0 + a.abs().max(b.abs()))
}

proptest! {
    #[test]
    fn greedy_equals_fractional_optimum(
        raw in prop::collection::vec((0u32..50, 1u32..12), 0..7),
        capacity in 0u32..40,
    ) {
        let pairs: Vec<(f64, f64)> = raw.iter().map(|&(v, w)| (v as f64, w as f64)).collect();
        let items: Vec<FractionalItem> = pairs
            .iter()
            .enumerate()
            .map(|(k, &(v, w))| FractionalItem::new(format!("i{k}"), v, w))
            .collect();
        let plan = GreedyPlan::compute(&items, capacity as f64);
        let expected = lp_vertices_optimum(&pairs, capacity as f64);
        prop_assert!(close(plan.total_value(), expected), "{} vs {}", plan.total_value(), expected);
    }

    #[test]
    fn greedy_bounds_the_zero_one_optimum(
        raw in prop::collection::vec((0u64..50, 1usize..12), 0..7),
        capacity in 0usize..30,
    ) {
        let items: Vec<Item> = raw
            .iter()
            .enumerate()
            .map(|(k, &(v, w))| Item::new(format!("i{k}"), v, w))
            .collect();
        let mut fill = DpStepper::new(items.clone(), capacity);
        fill.run_to_end();
        let fractional: Vec<FractionalItem> = items.iter().map(FractionalItem::from).collect();
        let plan = GreedyPlan::compute(&fractional, capacity as f64);
        prop_assert!(plan.total_value() + 1e-9 >= fill.table().optimum() as f64);
    }

    #[test]
    fn plan_respects_capacity_and_ordering(
        raw in prop::collection::vec((0u32..50, 0u32..12), 0..8),
        capacity in 0u32..40,
    ) {
        let items: Vec<FractionalItem> = raw
            .iter()
            .enumerate()
            .map(|(k, &(v, w))| FractionalItem::new(format!("i{k}"), v as f64, w as f64))
            .collect();
        let plan = GreedyPlan::compute(&items, capacity as f64);
        let entries = plan.entries();
        prop_assert_eq!(entries.len(), items.len());
        for pair in entries.windows(2) {
            prop_assert!(pair[0].ratio >= pair[1].ratio);
            if pair[0].ratio == pair[1].ratio {
                prop_assert!(pair[0].index < pair[1].index);
            }
        }
        let used: f64 = entries.iter().map(|e| e.taken_weight).sum();
        prop_assert!(used <= capacity as f64 + 1e-9);
        for e in entries {
            prop_assert!((0.0..=1.0).contains(&e.fraction));
        }
        let last_taken = entries.iter().rposition(|e| e.fraction > 0.0).map_or(0, |p| p + 1);
        prop_assert_eq!(plan.total_steps(), last_taken);
    }

    #[test]
    fn totals_are_prefix_sums(
        raw in prop::collection::vec((0u32..50, 1u32..12), 0..8),
        capacity in 0u32..40,
        cursor in 0usize..10,
    ) {
        let items: Vec<FractionalItem> = raw
            .iter()
            .map(|&(v, w)| FractionalItem::new("", v as f64, w as f64))
            .collect();
        let mut g = knapstep::algorithms::fractional::GreedyStepper::new(&items, capacity as f64);
        let at = g.seek(cursor);
        let t = g.totals();
        let prefix = &g.plan().entries()[..at];
        let w: f64 = prefix.iter().map(|e| e.taken_weight).sum();
        let v: f64 = prefix.iter().map(|e| e.taken_value).sum();
        prop_assert!(close(t.used_weight, w));
        prop_assert!(close(t.total_value, v));
        prop_assert!(close(t.remaining, (capacity as f64 - w).max(0.0)));
    }
}
