use dectable::{Input, Options, TableBuilder};
use tracing_subscriber::EnvFilter;

fn main() {
    // RUST_LOG=dectable=trace shows compile and scan events
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let table = TableBuilder::new()
        .header(["in :topic", "in :region", "in :score", "guard:", "out :team_member"])
        .row(["sports", "Europe", ">= 50", "", "Alice"])
        .row(["sports", "", "10..49", "", "Bob"])
        .row(["finance", "Europe", "", ":vip == true", "Donald"])
        .row(["finance", "", "", "", "Ernest"])
        .options(Options::new().index(1))
        .compile()
        .expect("failed to compile table");

    let input = Input::new()
        .set("topic", "finance")
        .set("region", "Europe")
        .set("vip", false);

    let report = table.decide_detailed(&input).expect("input is not empty");

    println!("{report}");
    println!();
    println!("Rows scanned: {:?}", report.scanned());
    println!("Rows matched: {:?}", report.matched());
    println!("Used index: {}", report.used_index());
    println!("Duration: {:?}", report.duration());
}
