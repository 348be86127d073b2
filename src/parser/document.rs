use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

static LD_JSON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script[^>]*type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#)
        .unwrap()
});
static META_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<meta\s[^>]*>").unwrap());
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)([a-z][a-z0-9:_-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// One HTML document prepared for field extraction: the raw markup plus the
/// JSON-LD node describing the article, when there is a usable one.
#[derive(Debug)]
pub struct Document<'a> {
    pub html: &'a str,
    pub ld: Option<Value>,
}

impl<'a> Document<'a> {
    pub fn parse(html: &'a str) -> Self {
        let ld = LD_JSON_RE
            .captures(html)
            .and_then(|caps| match serde_json::from_str::<Value>(caps[1].trim()) {
                Ok(v) => article_node(v),
                Err(e) => {
                    debug!("ignoring malformed JSON-LD block: {}", e);
                    None
                }
            });
        Document { html, ld }
    }

    /// Non-blank string field of the JSON-LD node.
    pub fn ld_str(&self, key: &str) -> Option<String> {
        self.ld
            .as_ref()?
            .get(key)?
            .as_str()
            .map(clean_text)
            .filter(|s| !s.is_empty())
    }

    pub fn ld_field(&self, key: &str) -> Option<&Value> {
        self.ld.as_ref()?.get(key)
    }

    /// `content` of the first `<meta name="...">` with the given name.
    pub fn meta(&self, name: &str) -> Option<String> {
        META_TAG_RE.find_iter(self.html).find_map(|tag| {
            let attrs = attributes(tag.as_str());
            let matches = attrs
                .iter()
                .any(|(k, v)| k.eq_ignore_ascii_case("name") && v.eq_ignore_ascii_case(name));
            if !matches {
                return None;
            }
            attrs
                .into_iter()
                .find(|(k, _)| k.eq_ignore_ascii_case("content"))
                .map(|(_, v)| clean_text(&v))
                .filter(|v| !v.is_empty())
        })
    }
}

/// Pick the article-like node out of a JSON-LD payload (object, array or `@graph`).
fn article_node(value: Value) -> Option<Value> {
    let mut nodes: Vec<Value> = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("@graph") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                map.insert("@graph".to_string(), other);
                vec![Value::Object(map)]
            }
            None => vec![Value::Object(map)],
        },
        _ => return None,
    };
    nodes.retain(Value::is_object);

    let is_article = |v: &Value| {
        let typed = match v.get("@type") {
            Some(Value::String(t)) => t.contains("Article") || t == "BlogPosting",
            Some(Value::Array(ts)) => ts
                .iter()
                .filter_map(Value::as_str)
                .any(|t| t.contains("Article") || t == "BlogPosting"),
            _ => false,
        };
        typed || v.get("headline").is_some()
    };

    match nodes.iter().position(is_article) {
        Some(i) => Some(nodes.swap_remove(i)),
        None => nodes.into_iter().next(),
    }
}

fn attributes(tag: &str) -> Vec<(String, String)> {
    ATTR_RE
        .captures_iter(tag)
        .map(|c| {
            let value = c.get(2).or_else(|| c.get(3)).map_or("", |m| m.as_str());
            (c[1].to_string(), value.to_string())
        })
        .collect()
}

/// Strip tags, decode the common entities and collapse whitespace.
pub fn clean_text(s: &str) -> String {
    let stripped = TAG_RE.replace_all(s, " ");
    let decoded = decode_entities(&stripped);
    WS_RE.replace_all(decoded.trim(), " ").into_owned()
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Split a comma separated keyword list.
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(clean_text)
        .filter(|t| !t.is_empty())
        .collect()
}
