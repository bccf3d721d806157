//! URI Templates (RFC 6570, level 4) and interactive variable resolution
//!
//! Values are always plain strings here, so list and map values from the RFC are
//! not modelled; the explode modifier is parsed but has no effect on a string.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::error::{CollectError, TemplateError};
use crate::prompt::{Prompt, PromptEngine};

/// Variable name to user-supplied value
pub type VariableValues = IndexMap<String, String>;

const MAX_PREFIX: usize = 9999;

/// Expression operator, which decides prefix, separator and encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Simple,
    Reserved,
    Fragment,
    Label,
    PathSegment,
    PathParameter,
    Query,
    QueryContinuation,
}

impl Operator {
    fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '+' => Operator::Reserved,
            '#' => Operator::Fragment,
            '.' => Operator::Label,
            '/' => Operator::PathSegment,
            ';' => Operator::PathParameter,
            '?' => Operator::Query,
            '&' => Operator::QueryContinuation,
            _ => return None,
        })
    }

    fn first(self) -> &'static str {
        match self {
            Operator::Simple | Operator::Reserved => "",
            Operator::Fragment => "#",
            Operator::Label => ".",
            Operator::PathSegment => "/",
            Operator::PathParameter => ";",
            Operator::Query => "?",
            Operator::QueryContinuation => "&",
        }
    }

    fn separator(self) -> &'static str {
        match self {
            Operator::Simple | Operator::Reserved | Operator::Fragment => ",",
            Operator::Label => ".",
            Operator::PathSegment => "/",
            Operator::PathParameter => ";",
            Operator::Query | Operator::QueryContinuation => "&",
        }
    }

    fn named(self) -> bool {
        matches!(
            self,
            Operator::PathParameter | Operator::Query | Operator::QueryContinuation
        )
    }

    /// Suffix for a named variable whose value is empty
    fn if_empty(self) -> &'static str {
        match self {
            Operator::Query | Operator::QueryContinuation => "=",
            _ => "",
        }
    }

    fn allows_reserved(self) -> bool {
        matches!(self, Operator::Reserved | Operator::Fragment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    None,
    Prefix(usize),
    Explode,
}

/// One variable reference inside an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarSpec {
    pub name: String,
    pub modifier: Modifier,
}

/// A parsed piece of a template, in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Literal(String),
    Expression {
        operator: Operator,
        variables: Vec<VarSpec>,
    },
}

impl TemplatePart {
    /// Variables referenced by this part; empty for literals
    pub fn variables(&self) -> &[VarSpec] {
        match self {
            TemplatePart::Literal(_) => &[],
            TemplatePart::Expression { variables, .. } => variables,
        }
    }
}

/// A parsed URI Template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    source: String,
    parts: Vec<TemplatePart>,
}

impl UriTemplate {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut rest = source.char_indices();

        while let Some((offset, c)) = rest.next() {
            match c {
                '{' => {
                    let body_start = offset + 1;
                    let close = source[body_start..]
                        .find(|c: char| c == '{' || c == '}')
                        .map(|i| body_start + i)
                        .filter(|&i| source.as_bytes()[i] == b'}')
                        .ok_or(TemplateError::Unclosed(offset))?;
                    if !literal.is_empty() {
                        parts.push(TemplatePart::Literal(std::mem::take(&mut literal)));
                    }
                    parts.push(parse_expression(&source[body_start..close], offset)?);
                    // skip past the closing brace
                    for _ in source[offset..=close].chars().skip(1) {
                        rest.next();
                    }
                }
                '}' => return Err(TemplateError::StrayClose(offset)),
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            parts.push(TemplatePart::Literal(literal));
        }

        Ok(UriTemplate {
            source: source.to_string(),
            parts,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    /// Every variable reference in template order, repeats included
    pub fn variables(&self) -> impl Iterator<Item = &VarSpec> {
        self.parts.iter().flat_map(TemplatePart::variables)
    }

    /// Expand against `values`; variables without a value are omitted
    pub fn expand(&self, values: &VariableValues) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                TemplatePart::Literal(text) => out.push_str(text),
                TemplatePart::Expression {
                    operator,
                    variables,
                } => expand_expression(&mut out, *operator, variables, values),
            }
        }
        out
    }
}

fn parse_expression(body: &str, offset: usize) -> Result<TemplatePart, TemplateError> {
    let mut chars = body.chars();
    let operator = match chars.next() {
        None => return Err(TemplateError::EmptyExpression(offset)),
        Some(c @ ('=' | ',' | '!' | '@' | '|')) => return Err(TemplateError::ReservedOperator(c)),
        Some(c) => Operator::from_char(c),
    };
    let list = match operator {
        Some(_) => chars.as_str(),
        None => body,
    };
    if list.is_empty() {
        return Err(TemplateError::EmptyExpression(offset));
    }

    let variables = list
        .split(',')
        .map(|spec| parse_varspec(spec, offset))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TemplatePart::Expression {
        operator: operator.unwrap_or(Operator::Simple),
        variables,
    })
}

fn parse_varspec(spec: &str, offset: usize) -> Result<VarSpec, TemplateError> {
    let (name, modifier) = if let Some(name) = spec.strip_suffix('*') {
        (name, Modifier::Explode)
    } else if let Some((name, len)) = spec.split_once(':') {
        // max-length = %x31-39 0*3DIGIT
        let well_formed = (1..=4).contains(&len.len())
            && len.bytes().all(|b| b.is_ascii_digit())
            && !len.starts_with('0');
        let prefix = well_formed
            .then(|| len.parse::<usize>().ok())
            .flatten()
            .filter(|n| (1..=MAX_PREFIX).contains(n))
            .ok_or_else(|| TemplateError::InvalidPrefix {
                name: name.to_string(),
                value: len.to_string(),
            })?;
        (name, Modifier::Prefix(prefix))
    } else {
        (spec, Modifier::None)
    };

    if !is_valid_varname(name) {
        return Err(TemplateError::InvalidVariable {
            name: name.to_string(),
            offset,
        });
    }
    Ok(VarSpec {
        name: name.to_string(),
        modifier,
    })
}

/// `varname = varchar *( ["."] varchar )`, varchar being ALPHA / DIGIT / "_" / pct-encoded
fn is_valid_varname(name: &str) -> bool {
    if name.is_empty() || name.starts_with('.') || name.ends_with('.') || name.contains("..") {
        return false;
    }
    let bytes = name.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = bytes.get(i + 1..i + 3);
                if !hex.is_some_and(|h| h.iter().all(u8::is_ascii_hexdigit)) {
                    return false;
                }
                i += 3;
            }
            b if b.is_ascii_alphanumeric() || b == b'_' || b == b'.' => i += 1,
            _ => return false,
        }
    }
    true
}

fn expand_expression(
    out: &mut String,
    operator: Operator,
    variables: &[VarSpec],
    values: &VariableValues,
) {
    let mut first = true;
    for var in variables {
        let Some(value) = values.get(&var.name) else {
            continue;
        };
        out.push_str(if first {
            operator.first()
        } else {
            operator.separator()
        });
        first = false;

        let value: String = match var.modifier {
            Modifier::Prefix(len) => value.chars().take(len).collect(),
            Modifier::None | Modifier::Explode => value.clone(),
        };
        if operator.named() {
            out.push_str(&var.name);
            if value.is_empty() {
                out.push_str(operator.if_empty());
                continue;
            }
            out.push('=');
        }
        encode_into(out, &value, operator.allows_reserved());
    }
}

fn is_reserved(c: char) -> bool {
    matches!(
        c,
        ':' | '/' | '?' | '#' | '[' | ']' | '@' | '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+'
            | ',' | ';' | '='
    )
}

/// Length of a pct-encoded triplet at the start of `text`, if there is one
fn pct_triplet(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    (bytes.len() >= 3 && bytes[0] == b'%' && bytes[1..3].iter().all(u8::is_ascii_hexdigit))
        .then_some(3)
}

/// Percent-encode `value` so only unreserved characters stay literal
///
/// With `allow_reserved`, reserved characters and existing pct-encoded
/// triplets also pass through untouched.
fn encode_into(out: &mut String, value: &str, allow_reserved: bool) {
    if !allow_reserved {
        out.push_str(&urlencoding::encode(value));
        return;
    }
    let mut pending = 0;
    let mut rest = value;
    while let Some(c) = rest[pending..].chars().next() {
        let at = &rest[pending..];
        let keep = if is_reserved(c) {
            Some(c.len_utf8())
        } else {
            pct_triplet(at)
        };
        match keep {
            Some(len) => {
                out.push_str(&urlencoding::encode(&rest[..pending]));
                out.push_str(&at[..len]);
                rest = &at[len..];
                pending = 0;
            }
            None => pending += c.len_utf8(),
        }
    }
    out.push_str(&urlencoding::encode(rest));
}

/// Prompt for every variable of `template`, expand it and optionally confirm
///
/// Returns `Ok(None)` when the user declines the constructed URI. A variable
/// referenced several times is asked each time, and the last answer is used.
pub async fn resolve_template_uri(
    engine: &mut dyn PromptEngine,
    template: &str,
    confirm: bool,
) -> Result<Option<String>, CollectError> {
    let parsed = UriTemplate::parse(template)?;
    engine.show("Constructing URI template:", template)?;

    let mut values = VariableValues::new();
    let mut preview = String::new();
    for part in parsed.parts() {
        match part {
            TemplatePart::Literal(text) => preview.push_str(text),
            TemplatePart::Expression { variables, .. } => {
                for var in variables {
                    let answer = match engine.ask(&Prompt::text(&var.name)).await? {
                        Value::String(s) => s,
                        other => other.to_string(),
                    };
                    values.insert(var.name.clone(), answer);
                }
            }
        }
    }
    debug!(%preview, variables = values.len(), "template variables collected");

    let expanded = parsed.expand(&values);
    engine.show("Constructed resource URI:", &expanded)?;
    if !confirm {
        return Ok(Some(expanded));
    }

    let accepted = engine
        .ask(&Prompt::confirm("Confirm resource URI?", true))
        .await?;
    Ok(match accepted {
        Value::Bool(true) => Some(expanded),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(template: &str, pairs: &[(&str, &str)]) -> String {
        let values: VariableValues = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        UriTemplate::parse(template).unwrap().expand(&values)
    }

    const RFC_VARS: &[(&str, &str)] = &[
        ("var", "value"),
        ("hello", "Hello World!"),
        ("path", "/foo/bar"),
        ("empty", ""),
        ("x", "1024"),
        ("y", "768"),
    ];

    #[test]
    fn test_parse_parts_in_order() {
        let t = UriTemplate::parse("https://api.example/{id}/items{?page,size}").unwrap();
        assert_eq!(t.parts().len(), 4);
        assert_eq!(
            t.parts()[0],
            TemplatePart::Literal("https://api.example/".to_string())
        );
        let names: Vec<&str> = t.variables().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["id", "page", "size"]);
    }

    #[test]
    fn test_simple_expansion() {
        assert_eq!(expand("https://api.example/{id}", &[("id", "42")]), "https://api.example/42");
        assert_eq!(expand("{hello}", RFC_VARS), "Hello%20World%21");
        assert_eq!(expand("{var:3}", RFC_VARS), "val");
        assert_eq!(expand("{x,y}", RFC_VARS), "1024,768");
    }

    #[test]
    fn test_operator_expansion() {
        assert_eq!(expand("{+path}/here", RFC_VARS), "/foo/bar/here");
        assert_eq!(expand("{#hello}", RFC_VARS), "#Hello%20World!");
        assert_eq!(expand("X{.var}", RFC_VARS), "X.value");
        assert_eq!(expand("{/var,x}/here", RFC_VARS), "/value/1024/here");
        assert_eq!(expand("{;x,y,empty}", RFC_VARS), ";x=1024;y=768;empty");
        assert_eq!(expand("{?x,y,empty}", RFC_VARS), "?x=1024&y=768&empty=");
        assert_eq!(expand("?fixed=yes{&x}", RFC_VARS), "?fixed=yes&x=1024");
    }

    #[test]
    fn test_undefined_variables_are_omitted() {
        assert_eq!(expand("{?x,undef,y}", RFC_VARS), "?x=1024&y=768");
        assert_eq!(expand("a{/undef}b", RFC_VARS), "ab");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(UriTemplate::parse("a{b"), Err(TemplateError::Unclosed(1)));
        assert_eq!(UriTemplate::parse("a{b{c}"), Err(TemplateError::Unclosed(1)));
        assert_eq!(UriTemplate::parse("a}"), Err(TemplateError::StrayClose(1)));
        assert_eq!(UriTemplate::parse("{}"), Err(TemplateError::EmptyExpression(0)));
        assert_eq!(UriTemplate::parse("{?}"), Err(TemplateError::EmptyExpression(0)));
        assert_eq!(UriTemplate::parse("{=x}"), Err(TemplateError::ReservedOperator('=')));
        assert!(matches!(
            UriTemplate::parse("{a b}"),
            Err(TemplateError::InvalidVariable { .. })
        ));
        assert!(matches!(
            UriTemplate::parse("{a:0}"),
            Err(TemplateError::InvalidPrefix { .. })
        ));
        assert!(matches!(
            UriTemplate::parse("{a:10000}"),
            Err(TemplateError::InvalidPrefix { .. })
        ));
    }

    #[test]
    fn test_prefix_length_must_be_plain_digits() {
        for bad in ["{a:+5}", "{a:05}", "{a:}", "{a:-1}", "{a:1x}"] {
            assert!(
                matches!(UriTemplate::parse(bad), Err(TemplateError::InvalidPrefix { .. })),
                "{bad} should be rejected"
            );
        }
        let t = UriTemplate::parse("{a:9999}").unwrap();
        assert_eq!(t.variables().next().unwrap().modifier, Modifier::Prefix(9999));
    }

    #[test]
    fn test_reserved_expansion_keeps_reserved_and_triplets() {
        assert_eq!(expand("{+v}", &[("v", "a b/c?d=%2F%zz")]), "a%20b/c?d=%2F%25zz");
        assert_eq!(expand("{v}", &[("v", "a b/c?d=%2F")]), "a%20b%2Fc%3Fd%3D%252F");
        assert_eq!(expand("{#v}", &[("v", "ß!")]), "#%C3%9F!");
    }

    #[test]
    fn test_varname_rules() {
        assert!(is_valid_varname("a.b_c1"));
        assert!(is_valid_varname("%2Fx"));
        assert!(!is_valid_varname(".a"));
        assert!(!is_valid_varname("a..b"));
        assert!(!is_valid_varname("%zz"));
    }

    #[test]
    fn test_multibyte_literals_survive() {
        assert_eq!(expand("é/{id}/ü", &[("id", "ß")]), "é/%C3%9F/ü");
    }
}
