use dectable::{Input, TableBuilder};

fn main() {
    // Define the table
    let table = TableBuilder::new()
        .header(["in :topic", "in :region", "out :team_member"])
        .row(["sports", "Europe", "Alice"])
        .row(["sports", "", "Bob"])
        .row(["finance", "America", "Charlie"])
        .row(["finance", "Europe", "Donald"])
        .row(["finance", "", "Ernest"])
        .row(["", "", "Zach"])
        .compile()
        .expect("failed to compile table");

    println!("{table}");

    // Decide a few inputs
    for (topic, region) in [
        ("finance", Some("Europe")),
        ("sports", None),
        ("culture", Some("America")),
    ] {
        let input = Input::new().set("topic", topic).set("region", region);
        let decision = table.decide(&input).expect("input is not empty");
        if decision.is_empty() {
            println!("{topic}/{region:?}: no row matched.");
        } else {
            println!("{topic}/{region:?}: {decision}");
        }
    }
}
