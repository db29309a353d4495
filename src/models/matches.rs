use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Nested keys the cricket proxy has been seen wrapping match arrays in.
const WRAPPER_KEYS: [&str; 3] = ["data", "matches", "results"];

/// A third-party match record, kept verbatim and probed on access.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Match(pub Value);

impl Match {
    pub fn id(&self) -> Option<String> {
        ["id", "matchId"]
            .iter()
            .find_map(|key| match self.0.get(key)? {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn status(&self) -> Option<&str> {
        self.str_field("status")
    }

    pub fn venue(&self) -> Option<&str> {
        self.str_field("venue")
    }

    pub fn match_type(&self) -> Option<&str> {
        self.str_field("matchType")
    }

    pub fn teams(&self) -> Vec<String> {
        if let Some(Value::Array(teams)) = self.0.get("teams") {
            return teams
                .iter()
                .filter_map(|t| t.as_str().map(str::to_string))
                .collect();
        }

        match self.0.get("teamInfo") {
            Some(Value::Array(info)) => info
                .iter()
                .filter_map(|t| {
                    t.get("shortname")
                        .or_else(|| t.get("name"))
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Innings lines such as `"India Inning 1: 245/6 (42.3)"`.
    pub fn scores(&self) -> Vec<String> {
        match self.0.get("score") {
            Some(Value::Array(scores)) => scores
                .iter()
                .map(|s| {
                    let inning = s.get("inning").and_then(Value::as_str).unwrap_or("Inning");
                    let runs = s.get("r").and_then(Value::as_i64).unwrap_or(0);
                    let wickets = s.get("w").and_then(Value::as_i64).unwrap_or(0);
                    match s.get("o").and_then(Value::as_f64) {
                        Some(overs) => format!("{}: {}/{} ({})", inning, runs, wickets, overs),
                        None => format!("{}: {}/{}", inning, runs, wickets),
                    }
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchList {
    pub live: Vec<Match>,
    pub upcoming: Vec<Match>,
}

impl MatchList {
    /// Probes `data.live` and `data.upcoming` for an array, either directly or
    /// under one of the wrapper keys. Anything else is an empty list.
    pub fn from_payload(data: &Value) -> Self {
        Self {
            live: extract_list(data.get("live")),
            upcoming: extract_list(data.get("upcoming")),
        }
    }

    pub fn preview(&self, count: usize) -> Self {
        Self {
            live: self.live.iter().take(count).cloned().collect(),
            upcoming: self.upcoming.iter().take(count).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty() && self.upcoming.is_empty()
    }
}

fn extract_list(section: Option<&Value>) -> Vec<Match> {
    let array = match section {
        Some(Value::Array(items)) => Some(items),
        Some(Value::Object(map)) => WRAPPER_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array)),
        _ => None,
    };

    array
        .map(|items| items.iter().cloned().map(Match).collect())
        .unwrap_or_default()
}
