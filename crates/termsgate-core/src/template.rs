//! printf-style policy URL templates.
//!
//! Supported directives:
//!
//! | directive | meaning                                   |
//! |-----------|-------------------------------------------|
//! | `%N$s`    | argument N (1-based)                      |
//! | `%s`      | the next sequential argument              |
//! | `%%`      | a literal `%`                             |
//! | `%n`      | a newline                                 |
//!
//! Anything else (flags, widths, other conversions, a trailing `%`) is a
//! `GateError::Formatting`. Extra arguments are ignored; referencing an
//! argument that was not supplied is an error.

use termsgate_contracts::error::{GateError, GateResult};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// Zero-based argument index.
    Arg(usize),
}

/// A parsed template, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyUrlTemplate {
    segments: Vec<Segment>,
}

impl PolicyUrlTemplate {
    /// Parse `template`, rejecting directives this formatter does not know.
    pub fn parse(template: &str) -> GateResult<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut next_sequential = 0usize;
        let mut chars = template.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }

            let mut digits = String::new();
            while let Some(&(_, d)) = chars.peek() {
                if !d.is_ascii_digit() {
                    break;
                }
                digits.push(d);
                chars.next();
            }

            let explicit = if digits.is_empty() {
                None
            } else {
                match chars.next() {
                    Some((_, '$')) => Some(parse_index(&digits, offset)?),
                    _ => {
                        return Err(GateError::Formatting {
                            reason: format!(
                                "unsupported width or flag at offset {} in template '{}'",
                                offset, template
                            ),
                        })
                    }
                }
            };

            match (chars.next(), explicit) {
                (Some((_, 's')), Some(index)) => {
                    flush(&mut literal, &mut segments);
                    segments.push(Segment::Arg(index));
                }
                (Some((_, 's')), None) => {
                    flush(&mut literal, &mut segments);
                    segments.push(Segment::Arg(next_sequential));
                    next_sequential += 1;
                }
                (Some((_, '%')), None) => literal.push('%'),
                (Some((_, 'n')), None) => literal.push('\n'),
                (Some((_, other)), _) => {
                    return Err(GateError::Formatting {
                        reason: format!(
                            "unsupported conversion '%{}' at offset {} in template '{}'",
                            other, offset, template
                        ),
                    })
                }
                (None, _) => {
                    return Err(GateError::Formatting {
                        reason: format!("dangling '%' at end of template '{}'", template),
                    })
                }
            }
        }

        flush(&mut literal, &mut segments);
        Ok(Self { segments })
    }

    /// Substitute `args` into the template.
    pub fn render(&self, args: &[&str]) -> GateResult<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Arg(index) => {
                    let value = args.get(*index).ok_or_else(|| GateError::Formatting {
                        reason: format!(
                            "template references argument {} but only {} supplied",
                            index + 1,
                            args.len()
                        ),
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

fn parse_index(digits: &str, offset: usize) -> GateResult<usize> {
    let index: usize = digits.parse().map_err(|_| GateError::Formatting {
        reason: format!("argument index '{}' at offset {} is out of range", digits, offset),
    })?;
    if index == 0 {
        return Err(GateError::Formatting {
            reason: format!("argument index at offset {} must start at 1", offset),
        });
    }
    Ok(index - 1)
}

fn flush(literal: &mut String, segments: &mut Vec<Segment>) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}
