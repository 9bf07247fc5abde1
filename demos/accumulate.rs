use dectable::{Input, Options, TableBuilder};

fn main() {
    let table = TableBuilder::new()
        .header(["in :type_cd", "out :ID_type", "out :len", "if:"])
        .row(["=~ 7|8", "CUSIP8", ":ID.length", ":len == 8"])
        .row(["=~ 7|8", "CUSIP9", ":ID.length", ":len == 9"])
        .row(["", "ANY", ":ID.length", ""])
        .options(Options::new().accumulate())
        .compile()
        .expect("failed to compile table");

    for id in ["56789012", "037833100", "XYZ"] {
        let input = Input::new().set("type_cd", "7").set("ID", id);
        let decision = table.decide(&input).expect("input is not empty");
        let shape = if decision.is_multi_result() { "lists" } else { "scalars" };
        println!("{id}: {decision} ({shape})");
    }
}
