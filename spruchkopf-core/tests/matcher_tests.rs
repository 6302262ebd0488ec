//! Integration tests for token constraints and the pattern matcher

use spruchkopf_core::{Pattern, PatternMatcher, TokenConstraint};

const MONTHS: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

fn matcher(patterns: Vec<Vec<TokenConstraint>>) -> PatternMatcher {
    PatternMatcher::new(
        patterns
            .into_iter()
            .map(|p| Pattern::of_constraints(p).unwrap())
            .collect(),
    )
}

fn texts(matcher: &PatternMatcher, text: &str) -> Vec<String> {
    matcher.find(text).into_iter().map(|m| m.text).collect()
}

#[test]
fn test_exact_text_match_offsets() {
    let m = matcher(vec![vec![TokenConstraint::text("hello")]]);
    let matches = m.find("this is hello world");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].start, 8);
    assert_eq!(matches[0].end, 13);
    assert_eq!(matches[0].text, "hello");
}

#[test]
fn test_lower_match() {
    let m = matcher(vec![vec![TokenConstraint::lower("hello")]]);
    assert_eq!(texts(&m, "Hello WORLD"), vec!["Hello"]);
}

#[test]
fn test_regex_match() {
    let m = matcher(vec![vec![TokenConstraint::regex(r"^\d+$").unwrap()]]);
    assert_eq!(texts(&m, "The number is 123 here"), vec!["123"]);
}

#[test]
fn test_regex_must_match_whole_token() {
    let m = matcher(vec![vec![TokenConstraint::regex(r"\d").unwrap()]]);
    assert!(m.find("abc 123 x9").is_empty());
}

#[test]
fn test_in_list_match() {
    let m = matcher(vec![vec![
        TokenConstraint::one_of(["BGH", "BVerfG", "BFH"]).unwrap()
    ]]);
    assert_eq!(texts(&m, "The BGH decided that"), vec!["BGH"]);
    assert_eq!(texts(&m, "The BVerfG ruled"), vec!["BVerfG"]);
    assert!(m.find("the bgh decided").is_empty());
}

#[test]
fn test_is_digit_match() {
    let m = matcher(vec![vec![TokenConstraint::is_digit()]]);
    assert_eq!(texts(&m, "The year 2024 was good"), vec!["2024"]);
}

#[test]
fn test_court_with_title_case_location() {
    let m = matcher(vec![vec![
        TokenConstraint::one_of(["LG", "AG"]).unwrap(),
        TokenConstraint::is_title(),
    ]]);
    assert_eq!(texts(&m, "LG Berlin decided"), vec!["LG Berlin"]);
}

#[test]
fn test_three_part_date_pattern() {
    let m = matcher(vec![vec![
        TokenConstraint::regex(r"^\d+\.?$").unwrap(),
        TokenConstraint::one_of(MONTHS).unwrap(),
        TokenConstraint::shape("dddd"),
    ]]);
    assert_eq!(
        texts(&m, "Am 15 Januar 2024 wurde entschieden"),
        vec!["15 Januar 2024"]
    );
    assert_eq!(
        texts(&m, "Beschluss vom 24. Dezember 2023 in Sachen"),
        vec!["24. Dezember 2023"]
    );
}

#[test]
fn test_optional_quantifier() {
    let m = matcher(vec![vec![
        TokenConstraint::text("der"),
        TokenConstraint::text("große").optional(),
        TokenConstraint::text("test"),
    ]]);
    assert_eq!(texts(&m, "der große test"), vec!["der große test"]);
    assert_eq!(texts(&m, "der test"), vec!["der test"]);
    assert!(m.find("der kleine test").is_empty());
}

#[test]
fn test_alternative_patterns_are_case_sensitive() {
    let text = "Tenor: Es wird entschieden. Das Gericht hat beschlossen:";

    // TEXT is case-sensitive, so "tenor" does not match "Tenor".
    let exact = matcher(vec![
        vec![TokenConstraint::text("tenor")],
        vec![TokenConstraint::text("beschlossen"), TokenConstraint::text(":")],
    ]);
    assert_eq!(texts(&exact, text), vec!["beschlossen:"]);

    let folded = matcher(vec![
        vec![TokenConstraint::lower("tenor")],
        vec![TokenConstraint::text("beschlossen"), TokenConstraint::text(":")],
    ]);
    let matches = folded.find(text);
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].text, "Tenor");
    assert_eq!(matches[0].pattern_index, 0);
    assert_eq!(matches[1].text, "beschlossen:");
    assert_eq!(matches[1].pattern_index, 1);
}

#[test]
fn test_newline_then_rest_of_line() {
    let m = matcher(vec![vec![
        TokenConstraint::text("OBERLANDESGERICHT"),
        TokenConstraint::newline(),
        TokenConstraint::any_to_end(),
    ]]);
    let matches = m.find("OBERLANDESGERICHT\nKARLSRUHE");
    assert_eq!(matches.len(), 1);
    assert!(matches[0].text.contains("KARLSRUHE"));
    assert_eq!(matches[0].text, "OBERLANDESGERICHT\nKARLSRUHE");
}

#[test]
fn test_any_to_end_consumes_following_lines() {
    let m = matcher(vec![vec![
        TokenConstraint::text("OBERLANDESGERICHT"),
        TokenConstraint::newline(),
        TokenConstraint::any_to_end(),
    ]]);
    assert_eq!(
        texts(&m, "OBERLANDESGERICHT\nKARLSRUHE\nZivilsenat"),
        vec!["OBERLANDESGERICHT\nKARLSRUHE\nZivilsenat"]
    );
}

#[test]
fn test_any_to_end_gives_back_tokens_to_later_constraints() {
    let m = matcher(vec![vec![
        TokenConstraint::text("Gericht"),
        TokenConstraint::any_to_end(),
        TokenConstraint::newline(),
        TokenConstraint::text("Beschluss"),
    ]]);
    assert_eq!(
        texts(&m, "Gericht Karlsruhe Zivilsenat\nBeschluss"),
        vec!["Gericht Karlsruhe Zivilsenat\nBeschluss"]
    );
}

#[test]
fn test_greedy_alpha_stays_on_one_line() {
    let m = matcher(vec![vec![
        TokenConstraint::text("Gericht"),
        TokenConstraint::is_alpha().greedy(),
    ]]);
    assert_eq!(
        texts(&m, "Gericht Karlsruhe Zivilsenat\nBeschluss"),
        vec!["Gericht Karlsruhe Zivilsenat"]
    );
}

#[test]
fn test_greedy_constraint() {
    let m = matcher(vec![vec![
        TokenConstraint::text("Senat"),
        TokenConstraint::is_alpha().greedy(),
    ]]);
    assert_eq!(
        texts(&m, "Senat für Familiensachen 12"),
        vec!["Senat für Familiensachen"]
    );
}

#[test]
fn test_offsets_slice_source_by_chars() {
    let m = matcher(vec![vec![
        TokenConstraint::one_of(["LG"]).unwrap(),
        TokenConstraint::is_title(),
        TokenConstraint::text("I"),
    ]]);
    let text = "Urteil des LG München I vom 3. März";
    for found in m.find(text) {
        let slice: String = text
            .chars()
            .skip(found.start)
            .take(found.end - found.start)
            .collect();
        assert_eq!(slice, found.text);
    }
    assert_eq!(texts(&m, text), vec!["LG München I"]);
}

#[test]
fn test_matches_do_not_overlap() {
    let m = matcher(vec![
        vec![TokenConstraint::is_digit(), TokenConstraint::is_digit()],
        vec![TokenConstraint::is_digit()],
    ]);
    let matches = m.find("1 2 3");
    let spans: Vec<_> = matches.iter().map(|m| (m.start, m.end)).collect();
    assert_eq!(spans, vec![(0, 3), (4, 5)]);
}

#[test]
fn test_empty_text() {
    let m = matcher(vec![vec![TokenConstraint::any_to_end()]]);
    assert!(m.find("").is_empty());
}
