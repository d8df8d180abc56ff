//! Lexer for the lambda-calculus term notation. The lambda glyph is
//! normalized to a backslash before scanning, so `λx x` and `\x x` produce
//! the same token stream.

use lazy_static::lazy_static;
use regex::Regex;

/// The different classes of tokens that compose the notation. An identifier
/// is any run of characters other than whitespace, backslash, and
/// parentheses, which is how names like `+1`, `&&`, and `2.` stay ordinary
/// identifiers.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum TokenClass {
    Lambda,
    OpenParen,
    CloseParen,
    Identifier,
    Whitespace,
    Error,
}

/// Represents a single token of the notation.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Token {
    pub token_class: TokenClass,
    pub token_text: String,
    pub line_num: usize,
}

// Represents how to recognize a token class.
#[derive(Debug)]
struct TokenRule {
    token_class: TokenClass,
    regex: Regex,
}

// Vector of regex patterns that correspond to each token class.
lazy_static! {
    static ref TOKEN_RULES: Vec<TokenRule> = vec![
        TokenRule {
            token_class: TokenClass::Lambda,
            regex: Regex::new(r"^\\").expect("Unable to compile Lambda rule regex."),
        },
        TokenRule {
            token_class: TokenClass::OpenParen,
            regex: Regex::new(r"^\(").expect("Unable to compile OpenParen rule regex."),
        },
        TokenRule {
            token_class: TokenClass::CloseParen,
            regex: Regex::new(r"^\)").expect("Unable to compile CloseParen rule regex."),
        },
        TokenRule {
            token_class: TokenClass::Identifier,
            regex: Regex::new(r"^[^\s\\()]+").expect("Unable to compile Identifier rule regex."),
        },
        TokenRule {
            token_class: TokenClass::Whitespace,
            regex: Regex::new(r"^\s+").expect("Unable to compile Whitespace rule regex."),
        },
        TokenRule {
            token_class: TokenClass::Error,
            regex: Regex::new(r"^(?s).").expect("Unable to compile Error rule regex."),
        },
    ];
}

// Finds the rule that matches the most characters from the start of the
// input string.
fn get_longest_matching_rule(input_str: &str) -> (&'static TokenRule, usize) {
    let mut longest_match_len: usize = 0;
    let mut longest_token_rule = TOKEN_RULES
        .last()
        .expect("Token rule table is unexpectedly empty.");

    for token_rule in TOKEN_RULES.iter() {
        if let Some(match_obj) = token_rule.regex.find(input_str) {
            if match_obj.len() > longest_match_len {
                longest_match_len = match_obj.len();
                longest_token_rule = token_rule;
            }
        }
    }

    return (longest_token_rule, longest_match_len);
}

/// Given a term string, returns the vector of tokens that comprise it, with
/// the lambda glyph normalized to a backslash. If `discard_uninteresting` is
/// true, whitespace tokens are dropped from the output.
pub fn run_lexical_analysis(input_str: &str, discard_uninteresting: bool) -> Vec<Token> {
    let normalized = input_str.replace('λ', "\\");

    let mut curr_idx: usize = 0;
    let mut curr_line: usize = 1;
    let mut out = Vec::new();

    while curr_idx < normalized.len() {
        let (token_rule, match_len) = get_longest_matching_rule(&normalized[curr_idx..]);

        let token_text = &normalized[curr_idx..curr_idx + match_len];
        let token_line = curr_line;
        curr_line += token_text.matches('\n').count();
        curr_idx += match_len;

        if discard_uninteresting && token_rule.token_class == TokenClass::Whitespace {
            continue;
        }

        out.push(Token {
            token_class: token_rule.token_class,
            token_text: String::from(token_text),
            line_num: token_line,
        });
    }

    return out;
}
