//! Integration tests for the tokenizer

use spruchkopf_core::{tokenize, Token};

fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(Token::text).collect()
}

#[test]
fn test_hello_world() {
    let tokens = tokenize("Hello world!");
    assert_eq!(tokens.len(), 3);
    assert_eq!((tokens[0].start(), tokens[0].end()), (0, 5));
    assert_eq!((tokens[1].start(), tokens[1].end()), (6, 11));
    assert_eq!((tokens[2].start(), tokens[2].end()), (11, 12));
    assert_eq!(texts(&tokens), vec!["Hello", "world", "!"]);
}

#[test]
fn test_court_name_with_umlaut() {
    let tokens = tokenize("LG München I");
    assert_eq!(texts(&tokens), vec!["LG", "München", "I"]);
    assert!(tokens[1].is_title());
    assert_eq!(tokens[1].shape(), "Xxxxxxx");
}

#[test]
fn test_hyphenated_state() {
    let tokens = tokenize("Sachsen-Anhalt");
    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is_alpha());
}

#[test]
fn test_tenor_line() {
    let tokens = tokenize("Tenor: Es wird entschieden.");
    assert_eq!(tokens.len(), 6);
    assert_eq!(tokens[1].text(), ":");
    assert_eq!(tokens[5].text(), ".");
}

#[test]
fn test_file_number_tokens() {
    let tokens = tokenize("Az.: II ZR 1/22");
    assert_eq!(
        texts(&tokens),
        vec!["Az", ".", ":", "II", "ZR", "1", "/", "22"]
    );
}

#[test]
fn test_newlines_are_tokens_and_offsets_are_global() {
    let text = "BUNDESGERICHTSHOF\n\nIM NAMEN DES VOLKES";
    let tokens = tokenize(text);
    assert_eq!(tokens.iter().filter(|t| t.is_newline()).count(), 2);
    let volkes = tokens.last().unwrap();
    assert_eq!(volkes.text(), "VOLKES");
    assert_eq!(volkes.start(), text.chars().count() - 6);
}

#[test]
fn test_tokens_are_strictly_ordered() {
    let tokens = tokenize("Urteil vom 1. Juli 2020 – 3 StR 45/20 (LG Köln)");
    for pair in tokens.windows(2) {
        assert!(pair[0].end() <= pair[1].start());
        assert!(pair[0].start() < pair[0].end());
    }
}
