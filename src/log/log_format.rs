//! printf-style message formatting and error trace rendering.
//!
//! Templates use `%[index$][flags][width][.precision]conversion` specifiers.
//! Arguments are any `Display` values; numeric conversions parse the rendered
//! argument, so `%d` works for every integer type and `%x` for anything that
//! renders as an integer.

use std::{error::Error as StdError, fmt, iter::Peekable, str::Chars};

use thiserror::Error;

/// Ordered positional arguments of a log call.
pub type Args<'a> = &'a [&'a dyn fmt::Display];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("specifier '%{spec}' refers to missing argument {index}")]
    MissingArgument { spec: String, index: usize },
    #[error("unknown conversion '%{0}'")]
    UnknownConversion(char),
    #[error("argument {index} ('{value}') cannot be formatted with '%{conversion}'")]
    IllegalConversion {
        index: usize,
        value: String,
        conversion: char,
    },
    #[error("invalid format specifier '%{0}'")]
    InvalidSpecifier(String),
    #[error("template ends with a dangling '%'")]
    Dangling,
}

#[derive(Debug, Default)]
struct Spec {
    index: Option<usize>,
    left: bool,
    zero: bool,
    plus: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

/// Substitutes `args` into `template`.
///
/// Surplus arguments are ignored, like `String.format` on the JVM.
pub fn format_message(template: &str, args: Args<'_>) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len() + 16 * args.len());
    let mut chars = template.chars().peekable();
    let mut ordinary = 0usize;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let (raw, conversion) = read_specifier(&mut chars)?;
        match conversion {
            '%' => {
                out.push('%');
                continue;
            }
            'n' => {
                out.push('\n');
                continue;
            }
            _ => {}
        }

        let spec = parse_spec(&raw)?;
        let index = match spec.index {
            Some(explicit) => explicit,
            None => {
                ordinary += 1;
                ordinary
            }
        };
        let arg = args
            .get(index - 1)
            .ok_or_else(|| FormatError::MissingArgument {
                spec: format!("{raw}{conversion}"),
                index,
            })?;

        let rendered = convert(arg.to_string(), index, conversion, &spec)?;
        pad_into(&mut out, &rendered, &spec, is_numeric(conversion));
    }

    Ok(out)
}

/// Formats `template`, writing it unformatted when it is malformed.
pub fn format_or_raw(template: &str, args: Args<'_>) -> String {
    match format_message(template, args) {
        Ok(message) => message,
        Err(err) => {
            tracing::warn!(%err, template, "malformed log template; writing it unformatted");
            template.to_owned()
        }
    }
}

/// Renders an error and its `source()` chain, one cause per line.
#[must_use]
pub fn error_trace(error: &dyn StdError) -> String {
    let mut trace = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        trace.push_str("\nCaused by: ");
        trace.push_str(&cause.to_string());
        source = cause.source();
    }
    trace
}

fn read_specifier(chars: &mut Peekable<Chars<'_>>) -> Result<(String, char), FormatError> {
    let mut raw = String::new();
    loop {
        match chars.next() {
            None => return Err(FormatError::Dangling),
            Some(c) if c.is_ascii_alphabetic() || c == '%' => return Ok((raw, c)),
            Some(c) => raw.push(c),
        }
    }
}

fn parse_spec(raw: &str) -> Result<Spec, FormatError> {
    let invalid = || FormatError::InvalidSpecifier(raw.to_owned());
    let mut spec = Spec::default();

    let rest = match raw.split_once('$') {
        Some((index, rest)) => {
            let index: usize = index.parse().map_err(|_| invalid())?;
            if index == 0 {
                return Err(invalid());
            }
            spec.index = Some(index);
            rest
        }
        None => raw,
    };

    let mut chars = rest.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            '-' => spec.left = true,
            '0' => spec.zero = true,
            '+' => spec.plus = true,
            _ => break,
        }
        chars.next();
    }

    let mut width = String::new();
    while let Some(&c) = chars.peek().filter(|c| c.is_ascii_digit()) {
        width.push(c);
        chars.next();
    }
    if !width.is_empty() {
        spec.width = Some(width.parse().map_err(|_| invalid())?);
    }

    if chars.peek() == Some(&'.') {
        chars.next();
        let precision: String = chars.by_ref().collect();
        let precision: usize = precision.parse().map_err(|_| invalid())?;
        // std's formatter panics past this
        if precision > usize::from(u16::MAX) {
            return Err(invalid());
        }
        spec.precision = Some(precision);
    }

    if chars.next().is_some() {
        return Err(invalid());
    }
    Ok(spec)
}

fn convert(value: String, index: usize, conversion: char, spec: &Spec) -> Result<String, FormatError> {
    let illegal = |value: &str| FormatError::IllegalConversion {
        index,
        value: value.to_owned(),
        conversion,
    };

    let rendered = match conversion {
        's' | 'S' => {
            let mut text = match spec.precision {
                Some(max) => value.chars().take(max).collect(),
                None => value,
            };
            if conversion == 'S' {
                text = text.to_uppercase();
            }
            text
        }
        'b' => (value != "false").to_string(),
        'c' => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c.to_string(),
                _ => return Err(illegal(&value)),
            }
        }
        'd' => {
            let n: i128 = value.trim().parse().map_err(|_| illegal(&value))?;
            signed(n.to_string(), spec.plus && n >= 0)
        }
        'x' | 'X' | 'o' => {
            let n: i64 = value.trim().parse().map_err(|_| illegal(&value))?;
            match conversion {
                'x' => format!("{n:x}"),
                'X' => format!("{n:X}"),
                _ => format!("{n:o}"),
            }
        }
        'f' => {
            let n: f64 = value.trim().parse().map_err(|_| illegal(&value))?;
            let precision = spec.precision.unwrap_or(6);
            signed(format!("{n:.precision$}"), spec.plus && n >= 0.0)
        }
        other => return Err(FormatError::UnknownConversion(other)),
    };
    Ok(rendered)
}

fn signed(digits: String, plus: bool) -> String {
    if plus { format!("+{digits}") } else { digits }
}

fn is_numeric(conversion: char) -> bool {
    matches!(conversion, 'd' | 'x' | 'X' | 'o' | 'f')
}

fn pad_into(out: &mut String, rendered: &str, spec: &Spec, numeric: bool) {
    let len = rendered.chars().count();
    let fill = spec.width.map_or(0, |w| w.saturating_sub(len));
    if fill == 0 {
        out.push_str(rendered);
    } else if spec.left {
        out.push_str(rendered);
        out.extend(std::iter::repeat_n(' ', fill));
    } else if spec.zero && numeric {
        // zeros go between the sign and the digits
        let (sign, digits) = if rendered.starts_with(&['-', '+'][..]) {
            rendered.split_at(1)
        } else {
            ("", rendered)
        };
        out.push_str(sign);
        out.extend(std::iter::repeat_n('0', fill));
        out.push_str(digits);
    } else {
        out.extend(std::iter::repeat_n(' ', fill));
        out.push_str(rendered);
    }
}
