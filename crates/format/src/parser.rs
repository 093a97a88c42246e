use crate::program::{Directive, FormatProgram, Segment};
use graph_core::{Metric, ParseError};

/// Default upper bound on a directive's history length.
pub const DEFAULT_MAX_HISTORY: usize = 256;

/// Parse a format string into a [`FormatProgram`].
///
/// Grammar:
/// - `{{` and `}}` are literal braces; a single `}` outside a directive is an error.
/// - `{name}`, `{name:n}`, `{name!}`, `{name:n!}` are graph directives.
///   `n` is a decimal history length in `1..=max_history`; `!` requests a label.
/// - Everything else, ANSI escape sequences included, is literal text.
pub fn parse(format: &str) -> Result<FormatProgram, ParseError> {
    parse_with_limit(format, DEFAULT_MAX_HISTORY)
}

/// Like [`parse`], with an explicit bound on history lengths.
pub fn parse_with_limit(format: &str, max_history: usize) -> Result<FormatProgram, ParseError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = format.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        match c {
            '{' => {
                if chars.next_if(|&(_, c)| c == '{').is_some() {
                    literal.push('{');
                    continue;
                }

                let mut end = None;
                for (i, c) in chars.by_ref() {
                    match c {
                        '}' => {
                            end = Some(i);
                            break;
                        }
                        '{' => return Err(ParseError::NestedOpen { offset }),
                        _ => {}
                    }
                }
                let end = end.ok_or(ParseError::Unterminated { offset })?;
                let directive = parse_directive(&format[offset + 1..end], offset, max_history)?;

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Graph(directive));
            }
            '}' => {
                if chars.next_if(|&(_, c)| c == '}').is_none() {
                    return Err(ParseError::StrayClose { offset });
                }
                literal.push('}');
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(FormatProgram::new(segments))
}

/// Parse the text between the braces of one directive.
fn parse_directive(body: &str, offset: usize, max_history: usize) -> Result<Directive, ParseError> {
    let (body, label) = match body.split_once('!') {
        Some((head, tail)) => {
            if let Some(found) = tail.chars().next() {
                return Err(ParseError::TrailingLabel { found, offset });
            }
            (head, true)
        }
        None => (body, false),
    };

    let (name, history) = match body.split_once(':') {
        Some((name, spec)) => (name, Some(spec)),
        None => (body, None),
    };

    let metric = Metric::from_name(name).ok_or_else(|| ParseError::UnknownMetric {
        name: name.to_string(),
        offset,
    })?;

    let history = match history {
        Some(spec) => parse_history(spec, offset, max_history)?,
        None => 1,
    };

    Ok(Directive {
        metric,
        history,
        label,
    })
}

fn parse_history(spec: &str, offset: usize, max: usize) -> Result<usize, ParseError> {
    let invalid = || ParseError::InvalidHistory {
        spec: spec.to_string(),
        offset,
        max,
    };

    // `usize::from_str` would also accept a leading '+'.
    if spec.is_empty() || !spec.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match spec.parse::<usize>() {
        Ok(n) if (1..=max).contains(&n) => Ok(n),
        _ => Err(invalid()),
    }
}
