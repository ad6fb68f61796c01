//! Shared flag handling and result rendering.

use std::time::Duration;

use clap::Args;
use serde_json::{json, Value};

use trex::{
    CaptureFilter, CaptureKey, CaptureValue, CaptureValues, Extent, MatchResult, Multiple,
    Options, ReturnForm, SearchResult,
};

use crate::config::Config;
use crate::error::{Result, TrextError};

/// Flags shared by the match/search/generate subcommands.
#[derive(Args, Debug, Clone)]
pub struct RunFlags {
    /// Let `.` match newline
    #[arg(long)]
    pub dotall: bool,

    /// Report every result instead of just the first
    #[arg(long)]
    pub all: bool,

    /// Return matched text instead of (pos, len) indices
    #[arg(long)]
    pub binary: bool,

    /// Executor timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Initial position, in code points
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Captures to expose: all, named, none, or a comma-separated key list
    #[arg(long, value_name = "SPEC")]
    pub capture: Option<String>,
}

/// Fold flags over the configuration defaults into an option record.
pub fn build_options(flags: &RunFlags, config: &Config) -> Result<Options> {
    let capture = match flags.capture.as_deref() {
        None => CaptureFilter::All,
        Some(spec) => parse_capture_spec(spec)?,
    };
    Ok(Options {
        dotall: flags.dotall || config.dotall,
        return_form: if flags.binary || config.binary {
            ReturnForm::Binary
        } else {
            ReturnForm::Index
        },
        capture,
        timeout: Duration::from_millis(flags.timeout.unwrap_or(config.timeout_ms)),
        multiple: if flags.all {
            Multiple::All
        } else {
            Multiple::One
        },
        offset: flags.offset,
        graph_name: None,
    })
}

/// `all`, `named`, `none`, or `1,2,word`-style key lists.
pub fn parse_capture_spec(spec: &str) -> Result<CaptureFilter> {
    match spec {
        "all" => Ok(CaptureFilter::All),
        "named" => Ok(CaptureFilter::Named),
        "none" => Ok(CaptureFilter::None),
        list => {
            let mut keys = Vec::new();
            for part in list.split(',') {
                let part = part.trim();
                if part.is_empty() {
                    return Err(TrextError::Validation(format!(
                        "empty key in capture spec {spec:?}"
                    )));
                }
                match part.parse::<u32>() {
                    Ok(n) => keys.push(CaptureKey::Index(n)),
                    Err(_) => keys.push(CaptureKey::Label(part.to_string())),
                }
            }
            Ok(CaptureFilter::Keys(keys))
        }
    }
}

fn value_to_json(value: &CaptureValue) -> Value {
    match value {
        CaptureValue::NoCapture => Value::Null,
        CaptureValue::Index { pos, len } => json!([pos, len]),
        CaptureValue::Text(text) => json!(text),
    }
}

fn caps_to_json(caps: &CaptureValues) -> Value {
    let map: serde_json::Map<String, Value> = caps
        .iter()
        .map(|(key, value)| (key.to_string(), value_to_json(value)))
        .collect();
    Value::Object(map)
}

fn caps_to_text(caps: &CaptureValues, indent: &str) -> String {
    caps.iter()
        .map(|(key, value)| format!("{indent}{key}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a match result for the terminal or as JSON.
pub fn render_match(result: &MatchResult, as_json: bool) -> Result<String> {
    if as_json {
        let value = match result {
            MatchResult::NoMatch(caps) => json!({"kind": "no_match", "captures": caps_to_json(caps)}),
            MatchResult::Match(caps) => json!({"kind": "match", "captures": caps_to_json(caps)}),
            MatchResult::Matches(all) => json!({
                "kind": "matches",
                "results": all.iter().map(caps_to_json).collect::<Vec<_>>(),
            }),
        };
        return Ok(serde_json::to_string_pretty(&value)?);
    }
    Ok(match result {
        MatchResult::NoMatch(caps) => format!("no match\n{}", caps_to_text(caps, "  ")),
        MatchResult::Match(caps) => format!("match\n{}", caps_to_text(caps, "  ")),
        MatchResult::Matches(all) => {
            let mut out = format!("matches ({})", all.len());
            for caps in all {
                out.push_str("\n-\n");
                out.push_str(&caps_to_text(caps, "  "));
            }
            out
        }
    })
}

fn hit_to_json(extent: &Extent, caps: &CaptureValues) -> Value {
    json!({"pos": extent.pos, "len": extent.len, "captures": caps_to_json(caps)})
}

/// Render a search result for the terminal or as JSON.
pub fn render_search(result: &SearchResult, as_json: bool) -> Result<String> {
    if as_json {
        let value = match result {
            SearchResult::NoMatch(caps) => {
                json!({"kind": "no_match", "captures": caps_to_json(caps)})
            }
            SearchResult::Search(extent, caps) => {
                json!({"kind": "search", "result": hit_to_json(extent, caps)})
            }
            SearchResult::Searches(hits) => json!({
                "kind": "searches",
                "results": hits.iter().map(|(e, c)| hit_to_json(e, c)).collect::<Vec<_>>(),
            }),
        };
        return Ok(serde_json::to_string_pretty(&value)?);
    }
    Ok(match result {
        SearchResult::NoMatch(caps) => format!("no match\n{}", caps_to_text(caps, "  ")),
        SearchResult::Search(extent, caps) => format!(
            "search {{{},{}}}\n{}",
            extent.pos,
            extent.len,
            caps_to_text(caps, "  ")
        ),
        SearchResult::Searches(hits) => {
            let mut out = format!("searches ({})", hits.len());
            for (extent, caps) in hits {
                out.push_str(&format!("\n- {{{},{}}}\n", extent.pos, extent.len));
                out.push_str(&caps_to_text(caps, "  "));
            }
            out
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_spec_keywords() {
        assert_eq!(parse_capture_spec("all").unwrap(), CaptureFilter::All);
        assert_eq!(parse_capture_spec("named").unwrap(), CaptureFilter::Named);
        assert_eq!(parse_capture_spec("none").unwrap(), CaptureFilter::None);
    }

    #[test]
    fn capture_spec_key_list() {
        assert_eq!(
            parse_capture_spec("1,word").unwrap(),
            CaptureFilter::Keys(vec![
                CaptureKey::Index(1),
                CaptureKey::Label("word".to_string())
            ])
        );
    }

    #[test]
    fn capture_spec_rejects_empty_parts() {
        assert!(parse_capture_spec("1,,2").is_err());
    }

    #[test]
    fn match_render_includes_captures() {
        let result = trex::match_once(
            "(ab)|(cd)",
            "cd",
            &Options::default(),
        )
        .unwrap();
        let text = render_match(&result, false).unwrap();
        assert!(text.starts_with("match"));
        assert!(text.contains("0: \"cd\""));
        assert!(text.contains("1: -"));

        let json_text = render_match(&result, true).unwrap();
        let value: Value = serde_json::from_str(&json_text).unwrap();
        assert_eq!(value["kind"], "match");
        assert_eq!(value["captures"]["2"], json!([0, 2]));
    }
}
