//! Template scanning and path-to-regex compilation.

use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;
use std::collections::HashMap;
use tracing::debug;

use crate::error::RouteError;

/// Capture used for a placeholder that has no registered token subpattern.
pub const DEFAULT_SUBPATTERN: &str = "([^/]+)";

/// Maximum number of names in an optional group before heap allocation.
pub const MAX_INLINE_OPTIONAL: usize = 4;

/// Placeholder names must also be valid regex capture group names.
static PARAM_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("placeholder name regex should be valid")
});

/// One lexical piece of a route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    /// Literal text, copied as-is into generated paths and escaped in regexes
    Literal(&'a str),
    /// `{name}`, `{:name}`, `{name:subpattern}` or `{:name:subpattern}`
    Param {
        name: &'a str,
        inline: Option<&'a str>,
        raw: &'a str,
    },
    /// `{/name1,name2,...}`
    Optional {
        names: SmallVec<[&'a str; MAX_INLINE_OPTIONAL]>,
        raw: &'a str,
    },
}

/// Split a template into literals and placeholders.
///
/// Braces inside an inline subpattern are balanced, so `{year:(\d{4})}` is a
/// single placeholder. Anything that does not parse as a placeholder stays
/// literal text.
pub(crate) fn scan(template: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::with_capacity(template.matches('{').count() * 2 + 1);
    let bytes = template.as_bytes();
    let mut literal_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'{' {
            pos += 1;
            continue;
        }
        let Some(close) = matching_brace(bytes, pos) else {
            pos += 1;
            continue;
        };
        let raw = &template[pos..=close];
        let inner = &template[pos + 1..close];
        match placeholder(inner, raw) {
            Some(segment) => {
                if literal_start < pos {
                    segments.push(Segment::Literal(&template[literal_start..pos]));
                }
                segments.push(segment);
                literal_start = close + 1;
                pos = close + 1;
            }
            // not a placeholder, but it may still wrap one
            None => pos += 1,
        }
    }

    if literal_start < template.len() {
        segments.push(Segment::Literal(&template[literal_start..]));
    }
    segments
}

fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, b) in bytes[open..].iter().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}

fn placeholder<'a>(inner: &'a str, raw: &'a str) -> Option<Segment<'a>> {
    if let Some(list) = inner.strip_prefix('/') {
        let names: SmallVec<[&str; MAX_INLINE_OPTIONAL]> = list.split(',').map(str::trim).collect();
        if names.iter().all(|n| PARAM_NAME.is_match(n)) {
            return Some(Segment::Optional { names, raw });
        }
        return None;
    }

    let body = inner.strip_prefix(':').unwrap_or(inner);
    let (name, inline) = match body.split_once(':') {
        Some((name, pattern)) => (name, Some(pattern)),
        None => (body, None),
    };
    PARAM_NAME
        .is_match(name)
        .then_some(Segment::Param { name, inline, raw })
}

/// Desugar inline placeholder syntax.
///
/// Returns the plain generation template, where every placeholder reads
/// `{name}`, together with the subpatterns that were declared inline.
///
/// ```
/// use routemap::pattern::parse_template;
///
/// let (path, tokens) = parse_template(r"/{:controller}/{:id:(\d+)}");
/// assert_eq!(path, "/{controller}/{id}");
/// assert_eq!(tokens["id"], r"(\d+)");
/// ```
#[must_use]
pub fn parse_template(raw: &str) -> (String, HashMap<String, String>) {
    let mut path = String::with_capacity(raw.len());
    let mut tokens = HashMap::new();

    for segment in scan(raw) {
        match segment {
            Segment::Literal(text) => path.push_str(text),
            Segment::Param { name, inline, .. } => {
                path.push('{');
                path.push_str(name);
                path.push('}');
                if let Some(pattern) = inline {
                    tokens.insert(name.to_string(), pattern.to_string());
                }
            }
            Segment::Optional { raw, .. } => path.push_str(raw),
        }
    }

    (path, tokens)
}

/// Strip every `{...}` span from a template, leaving only its literal text.
///
/// Adjacent slashes are kept, so `/account/foo/{bar}/baz` becomes
/// `/account/foo//baz`. Spans are removed whether or not they hold a valid
/// placeholder. Route specificity is measured on the result.
#[must_use]
pub fn remove_params(path: &str) -> String {
    let bytes = path.as_bytes();
    let mut out = String::with_capacity(path.len());
    let mut literal_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'{' {
            pos += 1;
            continue;
        }
        let Some(close) = matching_brace(bytes, pos) else {
            pos += 1;
            continue;
        };
        out.push_str(&path[literal_start..pos]);
        pos = close + 1;
        literal_start = pos;
    }

    out.push_str(&path[literal_start..]);
    out
}

/// A route template compiled for matching.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    template: String,
    regex: Regex,
    wildcard: Option<String>,
}

impl CompiledPattern {
    /// The plain `{name}` template used for generation
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The anchored match expression
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Name of the trailing wildcard capture, if any
    #[must_use]
    pub fn wildcard(&self) -> Option<&str> {
        self.wildcard.as_deref()
    }
}

/// Compile a route template into an anchored regex.
///
/// Plain placeholders use their token subpattern when one is registered and
/// [`DEFAULT_SUBPATTERN`] otherwise. The first `{/a,b}` group compiles to a
/// nested optional group, so values can only be omitted from the right.
/// A wildcard appends an optional catch-all capture after trimming trailing
/// slashes.
///
/// # Errors
///
/// * [`RouteError::BadSubpattern`] if a subpattern used by the template does
///   not start with `(`
/// * [`RouteError::InvalidRegex`] if the assembled expression does not compile
pub fn compile(
    template: &str,
    tokens: &HashMap<String, String>,
    wildcard: Option<&str>,
) -> Result<CompiledPattern, RouteError> {
    let (template, inline) = parse_template(template);
    let lookup = |name: &str| inline.get(name).or_else(|| tokens.get(name)).map(String::as_str);

    let mut expr = String::with_capacity(template.len() * 2 + 16);
    let mut seen_optional = false;

    for segment in scan(&template) {
        match segment {
            Segment::Literal(text) => expr.push_str(&regex::escape(text)),
            Segment::Param { name, .. } => {
                expr.push_str(&named_group(name, lookup(name))?);
            }
            Segment::Optional { names, raw } => {
                if seen_optional {
                    expr.push_str(&regex::escape(raw));
                    continue;
                }
                seen_optional = true;
                expr.push_str(&optional_group(&names, &lookup)?);
            }
        }
    }

    if let Some(name) = wildcard {
        let trimmed = expr.trim_end_matches('/').len();
        expr.truncate(trimmed);
        if expr.is_empty() {
            // root template: the leading slash stays required
            expr.push_str("/(?P<");
            expr.push_str(name);
            expr.push_str(">.*)");
        } else {
            expr.push_str("(?:/(?P<");
            expr.push_str(name);
            expr.push_str(">.*))?");
        }
    }

    let anchored = format!("^{expr}$");
    debug!(template = %template, regex = %anchored, "Compiled route pattern");

    let regex = Regex::new(&anchored).map_err(|e| RouteError::InvalidRegex {
        path: template.clone(),
        message: e.to_string(),
    })?;

    Ok(CompiledPattern {
        template,
        regex,
        wildcard: wildcard.map(str::to_string),
    })
}

fn named_group(name: &str, subpattern: Option<&str>) -> Result<String, RouteError> {
    let subpattern = subpattern.unwrap_or(DEFAULT_SUBPATTERN);
    match subpattern.strip_prefix('(') {
        Some(rest) => Ok(format!("(?P<{name}>{rest}")),
        None => Err(RouteError::BadSubpattern {
            token: name.to_string(),
            subpattern: subpattern.to_string(),
        }),
    }
}

/// `{/a,b,c}` becomes `(?:/(?P<a>..)(?:/(?P<b>..)(?:/(?P<c>..))?)?)?`
fn optional_group<'a>(
    names: &[&str],
    lookup: &impl Fn(&str) -> Option<&'a str>,
) -> Result<String, RouteError> {
    let mut expr = String::new();
    for name in names {
        expr.push_str("(?:/");
        expr.push_str(&named_group(name, lookup(name))?);
    }
    for _ in names {
        expr.push_str(")?");
    }
    Ok(expr)
}
