use knapstep::{
    model::{Inventory, ItemField, RawItem},
    EngineBuilder, EngineConfig, KnapsackEngine, Refusal, Steppable,
};

fn demo() -> KnapsackEngine {
    EngineBuilder::new()
        .capacity(10)
        .item("A", 6, 2)
        .item("B", 10, 4)
        .item("C", 12, 6)
        .build()
}

#[test]
fn demo_zero_one_and_fractional() {
    let mut e = demo();
    let mut steps = 0;
    while e.step_forward().is_ok() {
        steps += 1;
    }
    assert_eq!(steps, 33);
    assert!(e.fill().is_complete());
    assert_eq!(e.fill().table().optimum(), 22);

    e.start_backtrack().unwrap();
    while e.backtrack_forward().is_ok() {}
    let b = e.backtrack().unwrap();
    let names: Vec<_> = b.chosen_items().map(|it| it.name.as_str()).collect();
    assert_eq!(names, vec!["B", "C"]);
    assert_eq!(b.chosen_weight(), 10);
    assert_eq!(b.chosen_value(), 22);

    while e.greedy_forward().is_ok() {}
    let plan = e.greedy().plan();
    let order: Vec<_> = plan.entries().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(order, vec!["A", "B", "C"]);
    let t = e.greedy().totals();
    assert!((t.total_value - 24.0).abs() < 1e-9);
    assert!((t.used_weight - 10.0).abs() < 1e-9);
    assert_eq!(t.remaining, 0.0);
}

#[test]
fn no_items_is_trivially_complete() {
    let mut e = KnapsackEngine::new(Inventory::empty("10"), EngineConfig::default());
    assert_eq!(e.fill().total_steps(), 0);
    assert!(e.fill().is_complete());
    assert!(e.fill().table().is_all_zero());
    assert_eq!(e.step_forward(), Err(Refusal::AtEnd));
    let b = e.start_backtrack().unwrap();
    assert!(b.sequence().is_empty());
    assert!(b.chosen().is_empty());
    assert_eq!(e.greedy().plan().total_steps(), 0);
    assert!(e.greedy().plan().entries().is_empty());
}

#[test]
fn zero_capacity_is_all_zero() {
    let mut e = demo();
    e.set_capacity("0");
    while e.step_forward().is_ok() {}
    assert_eq!(e.fill().fill_step(), 3);
    assert!(e.fill().table().is_all_zero());
    e.start_backtrack().unwrap();
    while e.backtrack_forward().is_ok() {}
    assert!(e.backtrack().unwrap().chosen().is_empty());
    assert_eq!(e.greedy().plan().total_steps(), 0);
}

#[test]
fn edits_sanitize_and_reinitialize() {
    let mut e = demo();
    for _ in 0..10 {
        e.step_forward().unwrap();
    }
    let idx = e.add_item();
    assert_eq!(idx, 3);
    assert_eq!(e.fill().fill_step(), 0);
    assert_eq!(e.fill().total_steps(), 44);
    assert_eq!(e.fill().items()[3].name, "Item 4");

    e.update_item(3, ItemField::Weight, "-2").unwrap();
    assert_eq!(e.fill().items()[3].weight, 0);
    e.update_item(3, ItemField::Value, "abc").unwrap();
    assert_eq!(e.fill().items()[3].value, 0);

    assert_eq!(
        e.update_item(7, ItemField::Name, "x"),
        Err(Refusal::NoSuchItem { index: 7, len: 4 })
    );
    assert_eq!(e.delete_item(3).unwrap(), RawItem::new("", "abc", "-2"));
    assert_eq!(e.fill().total_steps(), 33);

    e.set_capacity("banana");
    assert_eq!(e.fill().capacity(), 0);
}

#[test]
fn reset_returns_to_start() {
    let mut e = demo();
    while e.step_forward().is_ok() {}
    e.start_backtrack().unwrap();
    e.reset();
    assert_eq!(e.fill().fill_step(), 0);
    assert!(e.fill().table().is_all_zero());
    assert!(e.backtrack().is_none());
    assert_eq!(e.backtrack_backward(), Err(Refusal::NoBacktrack));
}

#[test]
fn greedy_cursor_is_independent_of_fill() {
    let mut e = demo();
    e.greedy_forward().unwrap();
    e.step_forward().unwrap();
    assert_eq!(e.greedy().step_index(), 1);
    e.greedy_backward().unwrap();
    assert_eq!(e.greedy_backward(), Err(Refusal::AtStart));
    e.greedy_forward().unwrap();
    e.greedy_reset();
    assert_eq!(e.greedy().cursor(), 0);
}

#[test]
fn view_serializes_progress_counters() {
    let mut e = demo();
    while e.step_forward().is_ok() {}
    e.start_backtrack().unwrap();
    e.backtrack_forward().unwrap();
    let v = e.view();
    assert!(v.complete);
    assert_eq!(v.next_cell, None);
    let bt = v.backtrack.as_ref().unwrap();
    assert_eq!((bt.index, bt.len), (1, 3));
    assert_eq!(bt.chosen, vec![2]);
    let json = serde_json::to_value(&v).unwrap();
    assert_eq!(json["total_fill_steps"], 33);
    assert_eq!(json["table"][3][10], 22);
    assert_eq!(json["greedy"]["rows"][0]["applied"], false);
}
