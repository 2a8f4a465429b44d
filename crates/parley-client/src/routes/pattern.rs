//! Path patterns such as `/account/:group?`.

use parley_shared::types::{decode_path_segment, encode_path_segment, RouteParams};

use crate::error::NavigationError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param { name: String, optional: bool },
}

/// A route path made of static segments, `:name` parameters and optional
/// `:name?` parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Self {
        let segments = split_path(pattern)
            .map(|segment| match segment.strip_prefix(':') {
                Some(param) => match param.strip_suffix('?') {
                    Some(name) => Segment::Param {
                        name: name.to_string(),
                        optional: true,
                    },
                    None => Segment::Param {
                        name: param.to_string(),
                        optional: false,
                    },
                },
                None => Segment::Static(segment.to_string()),
            })
            .collect();

        Self {
            raw: pattern.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match a path (no query string), returning its decoded parameters.
    ///
    /// A missing optional parameter is simply absent from the result.
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let parts: Vec<&str> = split_path(path).collect();
        let mut params = RouteParams::new();
        let mut consumed = 0;

        for segment in &self.segments {
            let part = parts.get(consumed);
            match segment {
                Segment::Static(expected) => {
                    if part != Some(&expected.as_str()) {
                        return None;
                    }
                    consumed += 1;
                }
                Segment::Param { name, optional } => match part {
                    Some(value) => {
                        params.insert(name.clone(), decode_path_segment(value));
                        consumed += 1;
                    }
                    None if *optional => {}
                    None => return None,
                },
            }
        }

        (consumed == parts.len()).then_some(params)
    }

    /// Build a path from parameters.  Optional parameters may be left out;
    /// everything after the first missing optional parameter is dropped.
    pub fn build(&self, params: &RouteParams) -> Result<String, NavigationError> {
        let mut path = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Static(s) => {
                    path.push('/');
                    path.push_str(s);
                }
                Segment::Param { name, optional } => {
                    match params.get(name).filter(|v| !v.is_empty()) {
                        Some(value) => {
                            path.push('/');
                            path.push_str(&encode_path_segment(value));
                        }
                        None if *optional => break,
                        None => {
                            return Err(NavigationError::MissingParam {
                                route: self.raw.clone(),
                                param: name.clone(),
                            })
                        }
                    }
                }
            }
        }

        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> RouteParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn root_matches_only_root() {
        let p = RoutePattern::parse("/");
        assert_eq!(p.matches("/"), Some(RouteParams::new()));
        assert_eq!(p.matches(""), Some(RouteParams::new()));
        assert_eq!(p.matches("/home"), None);
        assert_eq!(p.build(&RouteParams::new()).unwrap(), "/");
    }

    #[test]
    fn required_params_are_captured() {
        let p = RoutePattern::parse("/room-not-found/:type/:name");
        assert_eq!(
            p.matches("/room-not-found/c/dev%20ops"),
            Some(params(&[("type", "c"), ("name", "dev ops")]))
        );
        assert_eq!(p.matches("/room-not-found/c"), None);
        assert_eq!(p.matches("/room-not-found/c/x/y"), None);
    }

    #[test]
    fn optional_param_may_be_absent() {
        let p = RoutePattern::parse("/account/:group?");
        assert_eq!(p.matches("/account"), Some(RouteParams::new()));
        assert_eq!(p.matches("/account/"), Some(RouteParams::new()));
        assert_eq!(
            p.matches("/account/profile"),
            Some(params(&[("group", "profile")]))
        );
        assert_eq!(p.matches("/accounts"), None);
    }

    #[test]
    fn build_fills_and_encodes() {
        let p = RoutePattern::parse("/channel/:name");
        assert_eq!(
            p.build(&params(&[("name", "dev ops")])).unwrap(),
            "/channel/dev%20ops"
        );

        let err = p.build(&RouteParams::new()).unwrap_err();
        assert_eq!(
            err,
            NavigationError::MissingParam {
                route: "/channel/:name".into(),
                param: "name".into()
            }
        );
    }

    #[test]
    fn build_skips_missing_optional() {
        let p = RoutePattern::parse("/setup-wizard/:step?");
        assert_eq!(p.build(&RouteParams::new()).unwrap(), "/setup-wizard");
        assert_eq!(p.build(&params(&[("step", "2")])).unwrap(), "/setup-wizard/2");
    }
}
