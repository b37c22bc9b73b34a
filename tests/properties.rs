use annograph::*;
use proptest::prelude::*;
use serde_json::{json, Value};

mod common;
use common::setup_config_builder;

/// Words, possibly with multi-byte characters, to build a text and its tokens from
fn words_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-zé漢]{1,6}", 1..24)
}

/// Candidate annotation ranges, some of which fall outside the token sequence
fn ranges_strategy() -> impl Strategy<Value = Vec<(i64, i64)>> {
    proptest::collection::vec((-2i64..30, -2i64..30), 0..12)
}

fn make_json(words: &[String], ranges: &[(i64, i64)]) -> Value {
    let text = words.join(" ");
    let mut tokens = Vec::with_capacity(words.len());
    let mut offset = 0;
    for word in words {
        let len = word.chars().count();
        tokens.push(json!({"tok": word, "ini": offset, "end": offset + len}));
        offset += len + 1;
    }
    let persons: Vec<Value> = ranges
        .iter()
        .enumerate()
        .map(|(i, (begin, end))| json!({"val": format!("P{}", i), "ini": begin, "end": end}))
        .collect();
    json!({ "text": text, "tokens": tokens, "persons": persons })
}

fn in_bounds(range: &(i64, i64), tokencount: usize) -> bool {
    range.0 >= 0 && range.1 >= range.0 && (range.1 as usize) < tokencount
}

proptest! {
    #[test]
    fn tokens_preserve_order_and_text(words in words_strategy()) {
        let config = setup_config_builder().expect("config");
        let document = build(&make_json(&words, &[]), &config).expect("valid document");
        prop_assert_eq!(document.tokens().len(), words.len());
        let mut previous_end = 0;
        for (token, word) in document.tokens().iter().zip(words.iter()) {
            prop_assert!(token.begin() >= previous_end);
            prop_assert!(token.end() <= document.textlen());
            prop_assert_eq!(token.text(), word.as_str());
            previous_end = token.end();
        }
        for (handle, token) in document.iter_tokens() {
            prop_assert_eq!(document.token_text(handle).expect("token text"), token.text());
            prop_assert_eq!(document.token_at(token.begin()), Some(handle));
        }
    }

    #[test]
    fn spans_stay_within_tokens(words in words_strategy(), ranges in ranges_strategy()) {
        let config = setup_config_builder().expect("config");
        let json = make_json(&words, &ranges);
        let valid = ranges.iter().all(|range| in_bounds(range, words.len()));
        match build(&json, &config) {
            Ok(document) => {
                prop_assert!(valid);
                prop_assert_eq!(document.spans().len(), ranges.len());
                for (span, range) in document.spans().iter().zip(ranges.iter()) {
                    prop_assert_eq!(span.layer(), "person");
                    prop_assert!(span.begin() <= span.end());
                    prop_assert!(span.end().as_usize() < document.tokens().len());
                    prop_assert_eq!(span.begin().as_usize() as i64, range.0);
                    prop_assert_eq!(span.len() as i64, range.1 - range.0 + 1);
                }
            }
            Err(err) => {
                prop_assert!(!valid);
                let is_range_error = matches!(err, AnnoError::TokenRangeOutOfBounds { .. });
                prop_assert!(is_range_error);
            }
        }
    }

    #[test]
    fn build_is_deterministic(words in words_strategy(), ranges in ranges_strategy()) {
        let config = setup_config_builder().expect("config");
        let json = make_json(&words, &ranges);
        match (build(&json, &config), build(&json, &config)) {
            (Ok(first), Ok(second)) => prop_assert_eq!(first, second),
            (Err(_), Err(_)) => {}
            _ => prop_assert!(false, "building the same input twice gave different outcomes"),
        }
    }
}
