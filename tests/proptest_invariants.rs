
use dectable::{Decision, Input, Options, Value};
use proptest::prelude::*;
use strategies::{arb_input, arb_table, GenRow, GenTable};

/// Helper: decide a `GenTable` against an input with the given options.
fn decide(gen: &GenTable, options: Options, input: &Input) -> Decision {
    gen.compile(options).decide(input).unwrap()
}

fn wildcard(topic: &str) -> GenRow {
    GenRow {
        topic: topic.to_owned(),
        region: String::new(),
        score: String::new(),
        when: String::new(),
    }
}

// ---------------------------------------------------------------------------
// Invariant 1: Determinism
//
// The same table + input must always produce the same decision, across
// repeated calls, recompilation and clones.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn determinism_repeated(gen in arb_table(), input in arb_input()) {
        let table = gen.compile(Options::new().index(1));
        let first = table.decide(&input).unwrap();
        for _ in 0..5 {
            let again = table.decide(&input).unwrap();
            prop_assert_eq!(&first, &again, "determinism violated on repeated decide");
        }
    }

    #[test]
    fn determinism_recompile(gen in arb_table(), input in arb_input()) {
        let first = decide(&gen, Options::new(), &input);
        let second = decide(&gen, Options::new(), &input);
        prop_assert_eq!(&first, &second);

        let clone = gen.compile(Options::new()).clone();
        prop_assert_eq!(first, clone.decide(&input).unwrap());
    }
}

// ---------------------------------------------------------------------------
// Invariant 2: Row ordering
//
// Rows are tried top to bottom: a wildcard row placed first wins every input
// with its key, and rows appended after a surviving row never change a
// first-match decision.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn leading_wildcard_wins(gen in arb_table(), input in arb_input()) {
        let Some(topic) = input.get("topic").and_then(Value::as_str).map(str::to_owned) else {
            return Ok(());
        };
        let mut rows = vec![wildcard(&topic)];
        rows.extend(gen.rows.iter().cloned());
        let table = GenTable { rows };

        for options in [Options::new(), Options::new().index(1)] {
            let decision = decide(&table, options, &input);
            prop_assert_eq!(decision.get("tag"), Some(&Value::from("row0")));
        }
    }

    #[test]
    fn appended_rows_do_not_change_first_match(
        gen in arb_table(),
        extra in arb_table(),
        input in arb_input(),
    ) {
        let topic = input.get("topic").and_then(Value::as_str).unwrap_or_default();
        let mut rows = gen.rows.clone();
        rows.push(wildcard(topic));
        let before = decide(&GenTable { rows: rows.clone() }, Options::new(), &input);
        prop_assert!(!before.is_empty());

        rows.extend(extra.rows.iter().cloned());
        let after = decide(&GenTable { rows }, Options::new(), &input);
        prop_assert_eq!(before, after);
    }
}

// ---------------------------------------------------------------------------
// Invariant 3: Accumulate completeness
//
// Accumulate mode reports every row a full scan matches, in order, and the
// result lists hold exactly the matched rows whose `if:` cell holds.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn accumulate_reports_every_matched_row(gen in arb_table(), input in arb_input()) {
        let table = gen.compile(Options::new().accumulate());
        let report = table.decide_detailed(&input).unwrap();
        let matched = report.matched();

        prop_assert_eq!(report.scanned().len(), gen.rows.len());
        let expected: Vec<Value> = matched
            .iter()
            .filter(|&&i| gen.rows[i].keeps(i, &input))
            .map(|i| Value::from(format!("row{i}")))
            .collect();
        let tags = match report.decision().get("tag") {
            None => Vec::new(),
            Some(Value::List(items)) => items.clone(),
            Some(other) => vec![other.clone()],
        };
        prop_assert_eq!(tags, expected);
    }

    #[test]
    fn indexed_scan_is_a_subset(gen in arb_table(), input in arb_input()) {
        let table = gen.compile(Options::new().accumulate().index(1));
        let indexed = table.decide_detailed(&input).unwrap();
        let topic = input.get("topic").and_then(Value::as_str).unwrap_or_default();

        for &row in indexed.scanned() {
            prop_assert_eq!(gen.rows[row].topic.as_str(), topic);
        }
        prop_assert!(indexed.scanned().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn decide_agrees_with_detailed(gen in arb_table(), input in arb_input(), accumulate in any::<bool>()) {
        let table = gen.compile(Options::new().first_match(!accumulate).index(1));
        let plain = table.decide(&input).unwrap();
        let report = table.decide_detailed(&input).unwrap();
        prop_assert!(report.used_index());
        prop_assert_eq!(&plain, report.decision());
    }
}
