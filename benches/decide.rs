use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dectable::{DecisionTable, Input, Options, TableBuilder};

/// A routing table with `n` keys of four rows each: three region-specific
/// rows with a score comparison, then a wildcard fallback.
fn build_rows(n: usize) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "in :topic".to_owned(),
        "in :region".to_owned(),
        "in :score".to_owned(),
        "out :team_member".to_owned(),
    ]];
    for i in 0..n {
        let topic = format!("topic{i}");
        for (j, region) in ["Europe", "America", "Asia"].iter().enumerate() {
            rows.push(vec![
                topic.clone(),
                (*region).to_owned(),
                format!(">= {}", j * 10),
                format!("member{i}_{j}"),
            ]);
        }
        rows.push(vec![topic, String::new(), String::new(), format!("fallback{i}")]);
    }
    rows
}

fn build_table(n: usize, options: Options) -> DecisionTable {
    DecisionTable::from_rows(&build_rows(n), options).unwrap()
}

fn probe(n: usize) -> Input {
    Input::new()
        .set("topic", format!("topic{}", n - 1))
        .set("region", "Asia")
        .set("score", 5_i64)
}

fn bench_decide(c: &mut Criterion) {
    let mut group = c.benchmark_group("decide");

    for &n in &[10, 100, 1000] {
        let input = probe(n);

        let table = build_table(n, Options::new());
        group.bench_function(format!("{n}_keys_scan"), |b| {
            b.iter(|| table.decide(black_box(&input)));
        });

        let table = build_table(n, Options::new().index(1));
        group.bench_function(format!("{n}_keys_indexed"), |b| {
            b.iter(|| table.decide(black_box(&input)));
        });

        let table = build_table(n, Options::new().accumulate().index(1));
        group.bench_function(format!("{n}_keys_accumulate"), |b| {
            b.iter(|| table.decide(black_box(&input)));
        });
    }

    group.finish();
}

fn bench_guards(c: &mut Criterion) {
    let table = TableBuilder::new()
        .header(["in :type_cd", "out :ID_type", "out :len", "if:"])
        .row(["=~ 7|8", "CUSIP8", ":ID.length", ":len == 8"])
        .row(["=~ 7|8", "CUSIP9", ":ID.length", ":len == 9"])
        .row(["", "UNKNOWN", "", ""])
        .compile()
        .unwrap();
    let input = Input::new().set("type_cd", "8").set("ID", "037833100");

    c.bench_function("if_column_filter", |b| {
        b.iter(|| table.decide(black_box(&input)));
    });
}

fn bench_compilation(c: &mut Criterion) {
    let mut group = c.benchmark_group("compilation");

    for &n in &[10, 100, 1000] {
        let rows = build_rows(n);
        group.bench_function(format!("{n}_keys"), |b| {
            b.iter(|| DecisionTable::from_rows(black_box(&rows), Options::new()).unwrap());
        });
        group.bench_function(format!("{n}_keys_indexed"), |b| {
            b.iter(|| DecisionTable::from_rows(black_box(&rows), Options::new().index(1)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decide, bench_guards, bench_compilation);
criterion_main!(benches);
