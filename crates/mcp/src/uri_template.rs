// Level-1 URI templates (`meal-planner://recipes/{id}`)

use std::borrow::Cow;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Variable(String),
}

/// URI template with simple `{name}` placeholders.
///
/// A placeholder matches one non-empty path segment (anything up to the next `/`).
/// Values are percent-encoded on expansion and decoded on match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    source: String,
    parts: Vec<Part>,
}

impl UriTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let mut parts = Vec::new();
        let mut rest = source.as_str();

        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            if start > 0 {
                parts.push(Part::Literal(rest[..start].to_string()));
            }
            parts.push(Part::Variable(rest[start + 1..start + len].to_string()));
            rest = &rest[start + len + 1..];
        }
        if !rest.is_empty() {
            parts.push(Part::Literal(rest.to_string()));
        }

        Self { source, parts }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match a concrete URI, returning the placeholder values.
    pub fn matches(&self, uri: &str) -> Option<HashMap<String, String>> {
        let mut values = HashMap::new();
        let mut rest = uri;

        for (index, part) in self.parts.iter().enumerate() {
            match part {
                Part::Literal(literal) => {
                    rest = rest.strip_prefix(literal.as_str())?;
                }
                Part::Variable(name) => {
                    let end = match self.parts.get(index + 1) {
                        Some(Part::Literal(next)) => rest.find(next.as_str())?,
                        _ => rest.len(),
                    };
                    let value = &rest[..end];
                    if value.is_empty() || value.contains('/') {
                        return None;
                    }
                    let value = urlencoding::decode(value).ok()?;
                    values.insert(name.clone(), value.into_owned());
                    rest = &rest[end..];
                }
            }
        }

        rest.is_empty().then_some(values)
    }

    /// Substitute placeholder values; unknown placeholders expand to nothing.
    pub fn expand(&self, values: &HashMap<&str, &str>) -> String {
        self.parts
            .iter()
            .map(|part| match part {
                Part::Literal(literal) => Cow::Borrowed(literal.as_str()),
                Part::Variable(name) => {
                    urlencoding::encode(values.get(name.as_str()).copied().unwrap_or_default())
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_single_placeholder() {
        let template = UriTemplate::new("meal-planner://recipes/{id}");
        let values = template.matches("meal-planner://recipes/pancakes").unwrap();
        assert_eq!(values.get("id").map(String::as_str), Some("pancakes"));
    }

    #[test]
    fn test_rejects_other_uris() {
        let template = UriTemplate::new("meal-planner://recipes/{id}");
        assert!(template.matches("meal-planner://recipes").is_none());
        assert!(template.matches("meal-planner://recipes/").is_none());
        assert!(template.matches("meal-planner://ingredients/egg").is_none());
        assert!(template.matches("meal-planner://recipes/a/b").is_none());
    }

    #[test]
    fn test_literal_after_placeholder() {
        let template = UriTemplate::new("meal-planner://recipes/{id}/ingredients");
        let values = template.matches("meal-planner://recipes/cake/ingredients").unwrap();
        assert_eq!(values["id"], "cake");
        assert!(template.matches("meal-planner://recipes/cake").is_none());
    }

    #[test]
    fn test_expand() {
        let template = UriTemplate::new("meal-planner://ingredients/{id}");
        let uri = template.expand(&HashMap::from([("id", "egg")]));
        assert_eq!(uri, "meal-planner://ingredients/egg");
    }

    #[test]
    fn test_expand_escapes_reserved_characters() {
        let template = UriTemplate::new("meal-planner://recipes/{id}");
        assert_eq!(template.as_str(), "meal-planner://recipes/{id}");

        let uri = template.expand(&HashMap::from([("id", "a/b c")]));
        assert_eq!(uri, "meal-planner://recipes/a%2Fb%20c");
        assert_eq!(template.matches(&uri).unwrap()["id"], "a/b c");
    }

    #[test]
    fn test_matches_decodes_values() {
        let template = UriTemplate::new("meal-planner://recipes/{id}");
        assert_eq!(template.matches("meal-planner://recipes/a%20b").unwrap()["id"], "a b");
        assert_eq!(template.matches("meal-planner://recipes/a+b").unwrap()["id"], "a+b");
        assert!(template.matches("meal-planner://recipes/%FF").is_none());
    }
}
