//! Example: fill the 0/1 table step by step, undo a few steps, then
//! reconstruct the chosen items.
//!
//! Run with:
//! `cargo run --example walkthrough`

use knapstep::algorithms::zero_one::Transition;
use knapstep::{EngineBuilder, Steppable};

fn main() {
    let mut engine = EngineBuilder::new()
        .capacity(10)
        .item("A", 6, 2)
        .item("B", 10, 4)
        .item("C", 12, 6)
        .build();

    // First row, explained.
    for _ in 0..11 {
        let Ok(step) = engine.step_forward() else { break };
        let why = match step.transition {
            Transition::TooHeavy { up } => format!("too heavy, keep {up}"),
            Transition::Compare { skip, take, took, .. } => {
                format!("skip {skip} vs take {take} -> {}", if took { "take" } else { "skip" })
            }
        };
        println!("dp[{}][{}] = {:>2}  ({why})", step.cell.row, step.cell.col, step.value);
    }

    // Undo three cells and show that they are pending again.
    for _ in 0..3 {
        let _ = engine.step_backward();
    }
    println!(
        "after undo: {}/{} cells, next = {:?}",
        engine.fill().fill_step(),
        engine.fill().total_steps(),
        engine.fill().next_cell()
    );

    while engine.step_forward().is_ok() {}
    println!("optimum: {}", engine.fill().table().optimum());

    let mut backtrack = match engine.start_backtrack() {
        Ok(b) => b.clone(),
        Err(refusal) => {
            eprintln!("cannot backtrack: {refusal}");
            return;
        }
    };
    while let Ok(d) = backtrack.step_forward() {
        println!(
            "row {} at w={}: {}",
            d.row,
            d.capacity,
            if d.chosen { "take" } else { "skip" }
        );
    }
    let names: Vec<_> = backtrack.chosen_items().map(|it| it.name.as_str()).collect();
    println!(
        "chosen {{{}}}: weight {}, value {}",
        names.join(", "),
        backtrack.chosen_weight(),
        backtrack.chosen_value()
    );
}
