use std::sync::Arc;
use std::thread;

use dectable::{Input, TableBuilder};

fn main() {
    let table = Arc::new(
        TableBuilder::new()
            .header(["in :age", "out :ticket"])
            .row(["< 12", "child"])
            .row(["12...18", "youth"])
            .row([">= 65", "senior"])
            .row(["", "adult"])
            .compile()
            .expect("failed to compile table"),
    );

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let t = Arc::clone(&table);
            thread::spawn(move || {
                let age = 8_i64 + 20 * i64::from(i);
                let decision = t.decide(&Input::new().set("age", age));
                println!("Thread {i} (age {age}): {decision:?}");
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
