//! The end-to-end token-sequence scenarios, each driven both as a single
//! whole-document feed and split into one byte per `feed()` call.

use alloc::vec::Vec;

use rstest::rstest;

use crate::{ParseStatus, Parser, ParserOptions, TokenKind};

fn drain(parser: &mut Parser) -> Vec<ParseStatus> {
    let mut out = Vec::new();
    loop {
        let status = parser.next().unwrap();
        let done = matches!(status, ParseStatus::Complete);
        out.push(status);
        if done {
            break;
        }
    }
    out
}

fn collect_whole(input: &[u8]) -> Vec<TokenKind> {
    let mut parser = Parser::new(ParserOptions::default());
    parser.feed(input).unwrap();
    parser.finish();
    token_kinds(&drain(&mut parser))
}

fn collect_byte_by_byte(input: &[u8]) -> Vec<TokenKind> {
    let mut parser = Parser::new(ParserOptions::default());
    for &byte in input {
        parser.feed([byte].as_slice()).unwrap();
    }
    parser.finish();
    token_kinds(&drain(&mut parser))
}

fn token_kinds(statuses: &[ParseStatus]) -> Vec<TokenKind> {
    statuses
        .iter()
        .filter_map(|status| match status {
            ParseStatus::Token(kind) => Some(*kind),
            _ => None,
        })
        .collect()
}

struct Scenario {
    input: &'static [u8],
    kinds: &'static [TokenKind],
}

const SCENARIOS: &[Scenario] = &[
    Scenario {
        input: b"[]",
        kinds: &[TokenKind::ArrayStart, TokenKind::ArrayEnd],
    },
    Scenario {
        input: br#"{"a":1}"#,
        kinds: &[
            TokenKind::ObjectStart,
            TokenKind::ObjectKey,
            TokenKind::Integer,
            TokenKind::ObjectEnd,
        ],
    },
    Scenario {
        input: b"[null,true,false]",
        kinds: &[
            TokenKind::ArrayStart,
            TokenKind::Null,
            TokenKind::True,
            TokenKind::False,
            TokenKind::ArrayEnd,
        ],
    },
    Scenario {
        input: br#"{"x":[1,2.5,3e2]}"#,
        kinds: &[
            TokenKind::ObjectStart,
            TokenKind::ObjectKey,
            TokenKind::ArrayStart,
            TokenKind::Integer,
            TokenKind::Float,
            TokenKind::Float,
            TokenKind::ArrayEnd,
            TokenKind::ObjectEnd,
        ],
    },
    Scenario {
        input: b"\"a\\u00e9b\"",
        kinds: &[TokenKind::String],
    },
];

#[test]
fn scenarios_match_whole_and_byte_by_byte_feed() {
    for scenario in SCENARIOS {
        assert_eq!(
            collect_whole(scenario.input),
            scenario.kinds,
            "whole-document feed for {:?}",
            scenario.input
        );
        assert_eq!(
            collect_byte_by_byte(scenario.input),
            scenario.kinds,
            "one-byte-at-a-time feed for {:?}",
            scenario.input
        );
    }
}

#[test]
fn mismatched_object_value_errors_in_both_feed_styles() {
    let input: &[u8] = br#"{"k":}"#;

    let mut whole = Parser::new(ParserOptions::default());
    whole.feed(input).unwrap();
    whole.finish();
    whole.next().unwrap();
    whole.next().unwrap();
    assert!(whole.next().is_err());

    let mut split = Parser::new(ParserOptions::default());
    for &byte in input {
        split.feed([byte].as_slice()).unwrap();
    }
    split.finish();
    split.next().unwrap();
    split.next().unwrap();
    assert!(split.next().is_err());
}

#[test]
fn nested_object_token_sequence_matches_snapshot() {
    let kinds = collect_whole(br#"{"x":[1,2.5,3e2]}"#);
    insta::assert_debug_snapshot!(kinds, @r#"
    [
        ObjectStart,
        ObjectKey,
        ArrayStart,
        Integer,
        Float,
        Float,
        ArrayEnd,
        ObjectEnd,
    ]
    "#);
}

#[rstest]
#[case(b"null")]
#[case(b"true")]
#[case(b"false")]
fn literal_keyword_survives_every_split_point(#[case] literal: &'static [u8]) {
    for split in 0..literal.len() {
        let (head, tail) = literal.split_at(split);
        let mut parser = Parser::new(ParserOptions::default());
        parser.feed(head).unwrap();
        parser.feed(tail).unwrap();
        parser.finish();
        let statuses = drain(&mut parser);
        assert_eq!(statuses.len(), 2);
        assert!(matches!(statuses[0], ParseStatus::Token(_)));
        assert_eq!(statuses[1], ParseStatus::Complete);
    }
}
