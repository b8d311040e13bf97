//! LDAP-style filters (RFC 1960) over property dictionaries.
//!
//! Used by the configuration and user admin hosts to select records, e.g.
//! `(&(service.factoryPid=org.example.http)(port>=8000))`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use osgi_jmx::codec::{Properties, PropertyValue, Scalar};
use osgi_jmx::{BigDecimal, BigInt};

/// Deepest nesting of `(`...`)` the parser accepts.
const MAX_DEPTH: usize = 256;

/// Error returned when a filter string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    InvalidSyntax {
        filter: String,
        position: usize,
        reason: &'static str,
    },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::InvalidSyntax {
                filter,
                position,
                reason,
            } => write!(f, "invalid filter '{filter}' at {position}: {reason}"),
        }
    }
}

impl std::error::Error for FilterError {}

/// Comparison operator of a simple item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    Approx,
    GreaterEq,
    LessEq,
}

/// A parsed filter expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
    Compare {
        attr: String,
        op: Comparison,
        value: String,
    },
    Present(String),
    /// `attr=a*b*c`: the literal runs between wildcards, first and last may be empty.
    Substring { attr: String, parts: Vec<String> },
}

impl Filter {
    pub fn parse(text: &str) -> Result<Self, FilterError> {
        let mut parser = Parser {
            text,
            chars: text.char_indices().collect(),
            pos: 0,
            depth: 0,
        };
        parser.skip_whitespace();
        let filter = parser.filter()?;
        parser.skip_whitespace();
        if parser.pos != parser.chars.len() {
            return Err(parser.error("trailing characters"));
        }
        Ok(filter)
    }

    /// Evaluates the filter against a dictionary. Attribute names are
    /// compared without regard to ASCII case.
    pub fn matches(&self, properties: &Properties) -> bool {
        match self {
            Filter::And(filters) => filters.iter().all(|f| f.matches(properties)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(properties)),
            Filter::Not(filter) => !filter.matches(properties),
            Filter::Present(attr) => lookup(properties, attr).is_some(),
            Filter::Compare { attr, op, value } => lookup(properties, attr)
                .map(|v| candidates(v).iter().any(|s| compare(s, *op, value)))
                .unwrap_or(false),
            Filter::Substring { attr, parts } => lookup(properties, attr)
                .map(|v| {
                    candidates(v)
                        .iter()
                        .any(|s| matches!(s, Scalar::String(text) if substring_match(text, parts)))
                })
                .unwrap_or(false),
        }
    }
}

/// Parses a filter received as an operation argument, logging rejections.
pub(crate) fn parse_argument(text: &str) -> Result<Filter, FilterError> {
    Filter::parse(text).inspect_err(|err| {
        #[cfg(feature = "logging")]
        log::error!("Invalid filter argument: {text}: {err}");
        #[cfg(not(feature = "logging"))]
        let _ = err;
    })
}

impl FromStr for Filter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Filter::parse(s)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::And(filters) => {
                f.write_str("(&")?;
                for filter in filters {
                    write!(f, "{filter}")?;
                }
                f.write_str(")")
            }
            Filter::Or(filters) => {
                f.write_str("(|")?;
                for filter in filters {
                    write!(f, "{filter}")?;
                }
                f.write_str(")")
            }
            Filter::Not(filter) => write!(f, "(!{filter})"),
            Filter::Present(attr) => write!(f, "({attr}=*)"),
            Filter::Compare { attr, op, value } => {
                let op = match op {
                    Comparison::Equal => "=",
                    Comparison::Approx => "~=",
                    Comparison::GreaterEq => ">=",
                    Comparison::LessEq => "<=",
                };
                write!(f, "({attr}{op}{})", escape(value))
            }
            Filter::Substring { attr, parts } => {
                let parts: Vec<String> = parts.iter().map(|p| escape(p)).collect();
                write!(f, "({attr}={})", parts.join("*"))
            }
        }
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '*' | '(' | ')') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn lookup<'a>(properties: &'a Properties, attr: &str) -> Option<&'a PropertyValue> {
    properties
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(attr))
        .map(|(_, value)| value)
}

/// Scalars an item is compared against: the value itself, or each element.
fn candidates(value: &PropertyValue) -> Vec<Scalar> {
    match value {
        PropertyValue::Scalar(scalar) => vec![scalar.clone()],
        PropertyValue::PrimitiveArray(array) => array.to_scalars(),
        PropertyValue::ScalarArray(array) => array.to_scalars(),
        PropertyValue::Vector(elements) => elements
            .iter()
            .filter_map(|e| e.as_scalar().cloned())
            .collect(),
        PropertyValue::Dictionary(_) => Vec::new(),
    }
}

fn compare(scalar: &Scalar, op: Comparison, value: &str) -> bool {
    let ordering = match scalar {
        Scalar::String(s) => {
            if op == Comparison::Approx {
                return normalize(s) == normalize(value);
            }
            Some(s.as_str().cmp(value))
        }
        Scalar::Integer(n) => compare_int(i64::from(*n), value),
        Scalar::Long(n) => compare_int(*n, value),
        Scalar::Byte(n) => compare_int(i64::from(*n), value),
        Scalar::Short(n) => compare_int(i64::from(*n), value),
        Scalar::Float(n) => compare_float(f64::from(*n), value),
        Scalar::Double(n) => compare_float(*n, value),
        Scalar::BigInteger(n) => value.trim().parse::<BigInt>().ok().map(|v| n.cmp(&v)),
        Scalar::BigDecimal(n) => value.trim().parse::<BigDecimal>().ok().map(|v| n.cmp(&v)),
        Scalar::Character(c) => {
            let mut chars = value.trim().chars();
            match (chars.next(), chars.next()) {
                (Some(other), None) if op == Comparison::Approx => {
                    return c.to_lowercase().eq(other.to_lowercase());
                }
                (Some(other), None) => Some(c.cmp(&other)),
                _ => None,
            }
        }
        Scalar::Boolean(b) => {
            // Booleans only support equality, whatever the operator.
            return value.trim().eq_ignore_ascii_case("true") == *b;
        }
    };
    match (ordering, op) {
        (Some(Ordering::Equal), _) => true,
        (Some(Ordering::Greater), Comparison::GreaterEq) => true,
        (Some(Ordering::Less), Comparison::LessEq) => true,
        _ => false,
    }
}

fn compare_int(n: i64, value: &str) -> Option<Ordering> {
    value.trim().parse::<i64>().ok().map(|v| n.cmp(&v))
}

fn compare_float(n: f64, value: &str) -> Option<Ordering> {
    value.trim().parse::<f64>().ok().and_then(|v| n.partial_cmp(&v))
}

fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn substring_match(text: &str, parts: &[String]) -> bool {
    let (Some(first), Some(last)) = (parts.first(), parts.last()) else {
        return false;
    };
    if parts.len() < 2 || text.len() < first.len() + last.len() {
        return false;
    }
    if !text.starts_with(first.as_str()) || !text.ends_with(last.as_str()) {
        return false;
    }
    let limit = text.len() - last.len();
    let mut pos = first.len();
    for middle in &parts[1..parts.len() - 1] {
        match text.get(pos..limit).and_then(|rest| rest.find(middle.as_str())) {
            Some(found) => pos += found + middle.len(),
            None => return false,
        }
    }
    pos <= limit
}

struct Parser<'a> {
    text: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
    depth: usize,
}

enum Piece {
    Text(String),
    Star,
}

impl Parser<'_> {
    fn error(&self, reason: &'static str) -> FilterError {
        FilterError::InvalidSyntax {
            filter: self.text.to_string(),
            position: self.chars.get(self.pos).map_or(self.text.len(), |(i, _)| *i),
            reason,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|(_, c)| *c)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn expect(&mut self, expected: char, reason: &'static str) -> Result<(), FilterError> {
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(reason))
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn filter(&mut self) -> Result<Filter, FilterError> {
        if self.depth == MAX_DEPTH {
            return Err(self.error("filter nested too deeply"));
        }
        self.depth += 1;
        let filter = self.nested_filter();
        self.depth -= 1;
        filter
    }

    fn nested_filter(&mut self) -> Result<Filter, FilterError> {
        self.expect('(', "expected '('")?;
        self.skip_whitespace();
        let filter = match self.peek() {
            Some('&') => {
                self.pos += 1;
                Filter::And(self.filter_list()?)
            }
            Some('|') => {
                self.pos += 1;
                Filter::Or(self.filter_list()?)
            }
            Some('!') => {
                self.pos += 1;
                self.skip_whitespace();
                Filter::Not(Box::new(self.filter()?))
            }
            _ => self.item()?,
        };
        self.skip_whitespace();
        self.expect(')', "expected ')'")?;
        self.skip_whitespace();
        Ok(filter)
    }

    fn filter_list(&mut self) -> Result<Vec<Filter>, FilterError> {
        let mut filters = Vec::new();
        self.skip_whitespace();
        while self.peek() == Some('(') {
            filters.push(self.filter()?);
        }
        if filters.is_empty() {
            return Err(self.error("expected at least one operand"));
        }
        Ok(filters)
    }

    fn item(&mut self) -> Result<Filter, FilterError> {
        let mut attr = String::new();
        while let Some(c) = self.peek() {
            if matches!(c, '=' | '~' | '<' | '>' | '(' | ')') {
                break;
            }
            attr.push(c);
            self.pos += 1;
        }
        let attr = attr.trim().to_string();
        if attr.is_empty() {
            return Err(self.error("missing attribute name"));
        }
        let op = match self.bump() {
            Some('=') => Comparison::Equal,
            Some('~') => {
                self.expect('=', "expected '=' after '~'")?;
                Comparison::Approx
            }
            Some('>') => {
                self.expect('=', "expected '=' after '>'")?;
                Comparison::GreaterEq
            }
            Some('<') => {
                self.expect('=', "expected '=' after '<'")?;
                Comparison::LessEq
            }
            _ => return Err(self.error("expected comparison operator")),
        };
        let pieces = self.value()?;
        let has_star = pieces.iter().any(|p| matches!(p, Piece::Star));
        if !has_star {
            let value = pieces
                .into_iter()
                .map(|p| match p {
                    Piece::Text(text) => text,
                    Piece::Star => String::new(),
                })
                .collect();
            return Ok(Filter::Compare { attr, op, value });
        }
        if op != Comparison::Equal {
            return Err(self.error("wildcards are only allowed with '='"));
        }
        if pieces.len() == 1 {
            return Ok(Filter::Present(attr));
        }
        let mut parts = vec![String::new()];
        for piece in pieces {
            match piece {
                Piece::Star => parts.push(String::new()),
                Piece::Text(text) => {
                    if let Some(last) = parts.last_mut() {
                        last.push_str(&text);
                    }
                }
            }
        }
        Ok(Filter::Substring { attr, parts })
    }

    fn value(&mut self) -> Result<Vec<Piece>, FilterError> {
        let mut pieces = Vec::new();
        let mut text = String::new();
        loop {
            match self.peek() {
                None => return Err(self.error("unterminated value")),
                Some(')') => break,
                Some('(') => return Err(self.error("unescaped '(' in value")),
                Some('\\') => {
                    self.pos += 1;
                    match self.bump() {
                        Some(c) => text.push(c),
                        None => return Err(self.error("dangling escape")),
                    }
                }
                Some('*') => {
                    self.pos += 1;
                    if !text.is_empty() {
                        pieces.push(Piece::Text(std::mem::take(&mut text)));
                    }
                    pieces.push(Piece::Star);
                }
                Some(c) => {
                    self.pos += 1;
                    text.push(c);
                }
            }
        }
        if !text.is_empty() {
            pieces.push(Piece::Text(text));
        }
        Ok(pieces)
    }
}
