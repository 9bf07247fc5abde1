use dectable::{DecisionTable, Input, Options};

const PRICING: &str = "\
# ticket pricing, first matching row wins
index: 1
in :venue, in :age,  in :member, out :price, out :note
cinema,    < 12,     ,           = 5,        child
cinema,    >= 65,    ,           = 6,        senior
cinema,    ,         = true,     = 7,        member
cinema,    ,         ,           = 10,
museum,    ,         ,           = 0,        \"free, every day\"
";

fn main() {
    let table = DecisionTable::from_csv(PRICING, Options::new()).expect("failed to load table");
    println!("{table}");

    let inputs = [
        Input::new().set("venue", "cinema").set("age", 9_i64),
        Input::new().set("venue", "cinema").set("age", "40").set("member", true),
        Input::new().set("venue", "museum").set("age", 40_i64),
        Input::new().set("venue", "theatre").set("age", 40_i64),
    ];
    for input in &inputs {
        match table.decide(input) {
            Ok(decision) if decision.is_empty() => println!("no price"),
            Ok(decision) => println!("{decision}"),
            Err(e) => eprintln!("error: {e}"),
        }
    }

    if let Some(path) = std::env::args().nth(1) {
        match DecisionTable::from_file(&path, Options::new()) {
            Ok(loaded) => println!("loaded {loaded}"),
            Err(e) => eprintln!("error: {e}"),
        }
    }
}
