#![cfg(feature = "heavy")]
use knapstep::{
    algorithms::{backtrack::Backtracker, zero_one::DpStepper},
    history::HistoryMode,
    model::Item,
    utils::full_table,
    Steppable,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_items(rng: &mut StdRng, n: usize) -> Vec<Item> {
    (0..n)
        .map(|k| Item::new(format!("i{k}"), rng.gen_range(0..1_000), rng.gen_range(1..200)))
        .collect()
}

#[test]
fn heavy_stress_reversible_fill() {
    let mut rng = StdRng::seed_from_u64(123);
    let items = random_items(&mut rng, 200);
    let capacity = 5_000;
    let mut s = DpStepper::with_history(items.clone(), capacity, HistoryMode::Reversible);
    assert_eq!(s.run_to_end(), 200 * 5_001);
    assert_eq!(s.table(), &full_table(&items, capacity));

    let mut b = Backtracker::start(&s).unwrap();
    b.run_to_end();
    assert!(b.chosen_weight() <= capacity);
    assert_eq!(b.chosen_value(), s.table().optimum());

    assert_eq!(s.rewind(), 200 * 5_001);
    assert!(s.table().is_all_zero());
}
