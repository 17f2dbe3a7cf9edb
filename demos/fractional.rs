//! Example: the fractional knapsack greedy plan, one allocation at a time.
//!
//! Run with:
//! `cargo run --example fractional`

use knapstep::algorithms::fractional::GreedyStepper;
use knapstep::model::FractionalItem;
use knapstep::Steppable;

fn main() {
    let items = vec![
        FractionalItem::new("A", 6.0, 2.0),
        FractionalItem::new("B", 10.0, 4.0),
        FractionalItem::new("C", 12.0, 6.0),
    ];
    let mut greedy = GreedyStepper::new(&items, 10.0);

    println!("order by value/weight:");
    for e in greedy.plan().entries() {
        println!("  {} (ratio {:.3})", e.name, e.ratio);
    }

    while let Ok(entry) = greedy.step_forward() {
        let t = greedy.totals();
        println!(
            "take {:.3} of {:<3} -> used {:>5.2}, remaining {:>5.2}, value {:>6.2}",
            entry.fraction, entry.name, t.used_weight, t.remaining, t.total_value
        );
    }
}
