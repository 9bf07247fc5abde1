use std::sync::Arc;
use std::thread;

use dectable::{Decision, DecisionTable, Input, Options, TableBuilder, Value};

fn routing() -> DecisionTable {
    TableBuilder::new()
        .header(["in :topic", "in :region", "in :score", "out :team_member"])
        .row(["sports", "Europe", ">= 50", "Alice"])
        .row(["sports", "", "", "Bob"])
        .row(["finance", "America", "", "Charlie"])
        .row(["finance", "Europe", "10..20", "Donald"])
        .row(["finance", "", "", "Ernest"])
        .options(Options::new().index(1))
        .compile()
        .unwrap()
}

#[test]
fn decide_across_threads() {
    let table = Arc::new(routing());

    let mut handles = vec![];

    // Thread 1: high sports score in Europe -> Alice
    let t = Arc::clone(&table);
    handles.push(thread::spawn(move || {
        let input = Input::new()
            .set("topic", "sports")
            .set("region", "Europe")
            .set("score", 75_i64);
        t.decide(&input).unwrap()
    }));

    // Thread 2: low sports score falls through to Bob
    let t = Arc::clone(&table);
    handles.push(thread::spawn(move || {
        let input = Input::new()
            .set("topic", "sports")
            .set("region", "Europe")
            .set("score", "12");
        t.decide(&input).unwrap()
    }));

    // Thread 3: finance in range -> Donald
    let t = Arc::clone(&table);
    handles.push(thread::spawn(move || {
        let input = Input::new()
            .set("topic", "finance")
            .set("region", "Europe")
            .set("score", 15_i64);
        t.decide(&input).unwrap()
    }));

    // Thread 4: unknown topic -> no decision
    let t = Arc::clone(&table);
    handles.push(thread::spawn(move || {
        let input = Input::new().set("topic", "weather");
        t.decide(&input).unwrap()
    }));

    let results: Vec<Decision> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results[0].get("team_member"), Some(&Value::from("Alice")));
    assert_eq!(results[1].get("team_member"), Some(&Value::from("Bob")));
    assert_eq!(results[2].get("team_member"), Some(&Value::from("Donald")));
    assert!(results[3].is_empty());
}

#[test]
fn concurrent_calls_agree_with_sequential() {
    let table = Arc::new(routing());
    let inputs: Vec<Input> = (0..64_i64)
        .map(|i| {
            let topic = if i % 2 == 0 { "sports" } else { "finance" };
            let region = ["Europe", "America", "Asia"][usize::try_from(i % 3).unwrap()];
            Input::new()
                .set("topic", topic)
                .set("region", region)
                .set("score", i)
        })
        .collect();
    let expected: Vec<Decision> = inputs.iter().map(|i| table.decide(i).unwrap()).collect();
    let inputs = Arc::new(inputs);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let t = Arc::clone(&table);
            let inputs = Arc::clone(&inputs);
            thread::spawn(move || {
                inputs
                    .iter()
                    .map(|i| t.decide(i).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn table_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DecisionTable>();
    assert_send_sync::<Decision>();
}
