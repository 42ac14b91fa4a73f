use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use crate::pattern::{scan, Segment};
use crate::route::Route;
use crate::Values;

/// Render a path for `route`, percent-encoding every substituted value.
///
/// `data` is merged over the route defaults, passed through the route's
/// generate hook, then substituted into the template. Placeholders without a
/// scalar value are left in place.
///
/// ```rust
/// use routemap::{generator, route::Route, Values};
/// use serde_json::json;
///
/// let route = Route::new("edit", r"/blog/{id:(\d+)}/edit");
/// let mut data = Values::new();
/// data.insert("id".into(), json!(42));
/// data.insert("foo".into(), json!("bar"));
/// assert_eq!(generator::generate(&route, &data), "/blog/42/edit");
/// ```
#[must_use]
pub fn generate(route: &Route, data: &Values) -> String {
    render(route, data, true)
}

/// Like [`generate`], but substitutes values verbatim.
#[must_use]
pub fn generate_raw(route: &Route, data: &Values) -> String {
    render(route, data, false)
}

fn render(route: &Route, data: &Values, encode: bool) -> String {
    let data = merged_data(route, data);
    let tokens = token_replacements(&data, encode);
    let template = route.path();

    let mut path = String::with_capacity(template.len() + 32);
    let mut seen_optional = false;

    for segment in scan(template) {
        match segment {
            Segment::Literal(text) => path.push_str(text),
            Segment::Param { name, raw, .. } => match tokens.get(name) {
                Some(value) => path.push_str(value),
                None => path.push_str(raw),
            },
            Segment::Optional { names, raw } => {
                if seen_optional {
                    path.push_str(raw);
                    continue;
                }
                seen_optional = true;
                path.push_str(&optional_replacement(&names, &data, encode));
            }
        }
    }

    if let Some(Value::Array(items)) = route.wildcard().and_then(|name| data.get(name)) {
        let trimmed = path.trim_end_matches('/').len();
        path.truncate(trimmed);
        for item in items {
            if let Some(text) = scalar_text(item) {
                path.push('/');
                path.push_str(&encode_value(&text, encode));
            }
        }
        if path.is_empty() {
            path.push('/');
        }
    }

    debug!(
        route_name = %route.name(),
        template = %template,
        path = %path,
        "Generated path"
    );
    path
}

/// Defaults overlaid with caller data, then handed to the generate hook.
fn merged_data(route: &Route, data: &Values) -> Values {
    let mut merged = route.defaults().clone();
    merged.extend(data.iter().map(|(k, v)| (k.clone(), v.clone())));
    if let Some(hook) = route.generate_hook() {
        hook.generate(route, &mut merged);
    }
    merged
}

/// Encoded text for every scalar or null entry; null renders empty.
fn token_replacements(data: &Values, encode: bool) -> HashMap<&str, String> {
    data.iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::Null => String::new(),
                other => scalar_text(other)?,
            };
            Some((key.as_str(), encode_value(&text, encode)))
        })
        .collect()
}

/// Values for `{/a,b,c}`, stopping at the first name with no data.
fn optional_replacement(names: &[&str], data: &Values, encode: bool) -> String {
    let mut replacement = String::new();
    for name in names {
        let Some(value) = data.get(*name).filter(|v| !v.is_null()) else {
            break;
        };
        if let Some(text) = scalar_text(value) {
            replacement.push('/');
            replacement.push_str(&encode_value(&text, encode));
        }
    }
    replacement
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn encode_value(text: &str, encode: bool) -> String {
    if encode {
        urlencoding::encode(text).into_owned()
    } else {
        text.to_string()
    }
}
