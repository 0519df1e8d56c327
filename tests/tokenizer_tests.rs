use tally::lang::tokenizing::{tokenize, Token};

#[test]
fn a_full_program_tokenizes_into_the_expected_shape() {
    let tokens = tokenize("<test>", "[ 1 2 3 ] [ 2 * ] map sort").unwrap();

    assert!(matches!(tokens[0], Token::LeftBracket(_)));
    assert!(matches!(tokens[1], Token::Int(_, 1)));
    assert!(matches!(tokens[5], Token::RightBracket(_)));
    assert!(matches!(&tokens[10], Token::Word(_, name) if name == "map"));
    assert!(matches!(&tokens[11], Token::Word(_, name) if name == "sort"));
}

#[test]
fn deferred_words_round_trip_through_display() {
    let tokens = tokenize("<test>", "\\double def!").unwrap();
    assert_eq!(tokens[0].to_string(), "\\double");
}

#[test]
fn unmatched_right_bracket_is_not_a_tokenizer_error() {
    // Balance is a parse-time (interpreter dispatch) concern, not lexical; the tokenizer happily
    // emits a lone `]` token.
    let tokens = tokenize("<test>", "]").unwrap();
    assert!(matches!(tokens[0], Token::RightBracket(_)));
}
