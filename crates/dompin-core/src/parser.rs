//! Parser for the emitted selector subset.
//!
//! Generated selectors come back to us: uniqueness probes and later
//! re-resolution both evaluate selector strings against a document, so the
//! subset the engine emits (`#id`, `tag`, `tag.class`, `tag:nth-of-type(n)`,
//! joined with `>`) must genuinely parse, escapes included. Anything outside
//! the subset is a `ParseError`; the caller decides whether that aborts a
//! probe or just downgrades it.

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

use crate::selector::{Compound, Selector};

#[derive(Parser)]
#[grammar_inline = r##"
WHITESPACE = _{ " " | "\t" }

selector   =  { SOI ~ compound ~ (">" ~ compound)* ~ EOI }
compound   =  { id_step | part_step }
id_step    = ${ "#" ~ ident }
part_step  = ${ tag ~ class_step* ~ nth_step? }
class_step = ${ "." ~ ident }
nth_step   = ${ ":nth-of-type(" ~ index ~ ")" }

tag        = @{ (ASCII_ALPHANUMERIC | "-" | "_")+ }
index      = @{ ASCII_DIGIT+ }
ident      = @{ ident_char+ }
ident_char = _{ escape_seq | ASCII_ALPHANUMERIC | "-" | "_" | ('\u{80}'..'\u{10FFFF}') }
escape_seq =  { "\\" ~ (hex_escape | ANY) }
hex_escape =  { ASCII_HEX_DIGIT{1,6} ~ " "? }
"##]
pub struct SelectorParser;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Pest error: {0}")]
    Pest(#[from] pest::error::Error<Rule>),
    #[error("Invalid nth-of-type index: {0}")]
    InvalidIndex(std::num::ParseIntError),
    #[error("Empty selector")]
    Empty,
    #[error("Unexpected rule: {0:?}")]
    UnexpectedRule(Rule),
}

/// Parse a selector string into its compound steps.
pub fn parse(input: &str) -> Result<Selector, ParseError> {
    let mut pairs = SelectorParser::parse(Rule::selector, input)?;
    let root = pairs.next().ok_or(ParseError::Empty)?;

    let mut compounds = Vec::new();
    for pair in root.into_inner() {
        if pair.as_rule() == Rule::compound {
            compounds.push(parse_compound(pair)?);
        }
    }

    if compounds.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(Selector::new(compounds))
}

fn parse_compound(pair: Pair<Rule>) -> Result<Compound, ParseError> {
    let step = pair.into_inner().next().ok_or(ParseError::Empty)?;
    match step.as_rule() {
        Rule::id_step => {
            let ident = step.into_inner().next().ok_or(ParseError::Empty)?;
            Ok(Compound::Id(unescape_ident(ident.as_str())))
        }
        Rule::part_step => parse_part(step),
        rule => Err(ParseError::UnexpectedRule(rule)),
    }
}

fn parse_part(pair: Pair<Rule>) -> Result<Compound, ParseError> {
    let mut tag = String::new();
    let mut classes = Vec::new();
    let mut nth = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::tag => tag = inner.as_str().to_ascii_lowercase(),
            Rule::class_step => {
                let ident = inner.into_inner().next().ok_or(ParseError::Empty)?;
                classes.push(unescape_ident(ident.as_str()));
            }
            Rule::nth_step => {
                let index = inner.into_inner().next().ok_or(ParseError::Empty)?;
                // Index 0 is valid CSS that matches nothing; ranks are 1-based
                // so the matcher handles it naturally.
                nth = Some(index.as_str().parse().map_err(ParseError::InvalidIndex)?);
            }
            rule => return Err(ParseError::UnexpectedRule(rule)),
        }
    }

    Ok(Compound::Part { tag, classes, nth })
}

/// Decode CSS escape sequences in an identifier: `\` + up to six hex digits
/// (plus one optional trailing space), or `\` + any literal character.
fn unescape_ident(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let mut hex = String::new();
        while hex.len() < 6 {
            match chars.peek() {
                Some(h) if h.is_ascii_hexdigit() => {
                    hex.push(*h);
                    chars.next();
                }
                _ => break,
            }
        }

        if hex.is_empty() {
            if let Some(literal) = chars.next() {
                out.push(literal);
            }
        } else {
            if chars.peek() == Some(&' ') {
                chars.next();
            }
            let code = u32::from_str_radix(&hex, 16).unwrap_or(0xFFFD);
            out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_id() {
        let sel = parse("#item-1").unwrap();
        assert_eq!(sel.compounds, vec![Compound::id("item-1")]);
    }

    #[test]
    fn parses_structural_path() {
        let sel = parse("body > ul > li:nth-of-type(3)").unwrap();
        assert_eq!(sel.depth(), 3);
        assert_eq!(
            sel.compounds[2],
            Compound::Part {
                tag: "li".into(),
                classes: vec![],
                nth: Some(3),
            }
        );
    }

    #[test]
    fn parses_id_anchored_path() {
        let sel = parse("#sidebar > div > span").unwrap();
        assert_eq!(sel.compounds[0], Compound::id("sidebar"));
        assert_eq!(sel.depth(), 3);
    }

    #[test]
    fn parses_class_compound() {
        let sel = parse("div.price-tag.sale").unwrap();
        assert_eq!(
            sel.compounds,
            vec![Compound::Part {
                tag: "div".into(),
                classes: vec!["price-tag".into(), "sale".into()],
                nth: None,
            }]
        );
    }

    #[test]
    fn decodes_escapes() {
        let sel = parse("#\\31 st").unwrap();
        assert_eq!(sel.compounds, vec![Compound::id("1st")]);

        let sel = parse("#a\\ b").unwrap();
        assert_eq!(sel.compounds, vec![Compound::id("a b")]);

        let sel = parse("div.\\--flag").unwrap();
        assert_eq!(
            sel.compounds,
            vec![Compound::Part {
                tag: "div".into(),
                classes: vec!["--flag".into()],
                nth: None,
            }]
        );
    }

    #[test]
    fn round_trips_through_display() {
        for input in ["#item-1", "body > ul > li:nth-of-type(3)", "div.a.b"] {
            let sel = parse(input).unwrap();
            assert_eq!(sel.to_string(), input);
            assert_eq!(parse(&sel.to_string()).unwrap(), sel);
        }
    }

    #[test]
    fn normalizes_tag_case() {
        let sel = parse("DIV > SPAN").unwrap();
        assert_eq!(sel.to_string(), "div > span");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse("").is_err());
        assert!(parse(">").is_err());
        assert!(parse("div >").is_err());
        assert!(parse("# id").is_err());
        assert!(parse("div:nth-of-type(x)").is_err());
    }

    #[test]
    fn zero_index_is_valid_syntax() {
        let sel = parse("li:nth-of-type(0)").unwrap();
        assert_eq!(
            sel.compounds,
            vec![Compound::Part {
                tag: "li".into(),
                classes: vec![],
                nth: Some(0),
            }]
        );
    }
}
