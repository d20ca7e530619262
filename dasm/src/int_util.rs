use crate::{new_parser_error, Result, Rule};
use pest::iterators::Pair;
use pest::Span;

fn process_radix_lit(pair: Pair<Rule>, radix: u32) -> Result<i64> {
    let inner = pair.into_inner().next().unwrap();
    let span = inner.as_span();
    match u64::from_str_radix(inner.as_str(), radix) {
        Ok(value) if value <= i64::max_value() as u64 => Ok(value as i64),
        Ok(value) => Err(new_parser_error(
            span,
            format!("Integer {} is too large.", value),
        )),
        Err(err) => Err(new_parser_error(
            span,
            format!("Parsing integer failed: {}", err),
        )),
    }
}

/// Parses an `int` pair in any of the four supported radixes.
pub fn process_int(pair: Pair<Rule>) -> Result<i64> {
    let inner = pair.into_inner().next().unwrap();
    match inner.as_rule() {
        Rule::bin_uint => process_radix_lit(inner, 2),
        Rule::oct_uint => process_radix_lit(inner, 8),
        Rule::hex_uint => process_radix_lit(inner, 16),
        Rule::dec_int => {
            let span = inner.as_span();
            inner
                .as_str()
                .parse::<i64>()
                .map_err(|err| new_parser_error(span, format!("Parsing integer failed: {}", err)))
        }
        _ => unreachable!(),
    }
}

pub fn to_i16(span: Span, value: i64) -> Result<i16> {
    if value < i64::from(i16::min_value()) || value > i64::from(i16::max_value()) {
        Err(new_parser_error(
            span,
            format!("Integer {} does not fit in 16 signed bits.", value),
        ))
    } else {
        Ok(value as i16)
    }
}

pub fn to_u16(span: Span, value: i64) -> Result<u16> {
    if value < 0 || value > i64::from(u16::max_value()) {
        Err(new_parser_error(
            span,
            format!("Integer {} does not fit in 16 unsigned bits.", value),
        ))
    } else {
        Ok(value as u16)
    }
}
