//! Search service response envelope.

use crate::render::{Lookup, engine::value_text};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// `{retval, msg, data}` as returned by the search service.
///
/// `msg` is only meaningful when `retval` is false, `data` only when it is
/// true; both default to empty when absent.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SearchResponse {
    pub retval: bool,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Vec<ResultRecord>,
}

/// One search hit. Its fields are whatever the service sends.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ResultRecord(pub Map<String, Value>);

impl Lookup for ResultRecord {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        self.0.get(name).map(value_text)
    }
}

impl SearchResponse {
    /// The two-record sample the page shipped with while the search request
    /// was stubbed out.
    pub fn sample() -> Self {
        let record = |suffix: &str| {
            let mut map = Map::new();
            map.insert("arranger".into(), format!("arranger{suffix}").into());
            map.insert("composer".into(), format!("composer{suffix}").into());
            map.insert("date_added".into(), "19-01-2019".into());
            map.insert("instruments".into(), Value::Array(Vec::new()));
            map.insert("title".into(), format!("title{suffix}").into());
            ResultRecord(map)
        };

        Self {
            retval: true,
            msg: String::new(),
            data: vec![record(""), record("1")],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_response_without_data() {
        let resp: SearchResponse =
            serde_json::from_str(r#"{"retval": false, "msg": "No results"}"#).unwrap();
        assert!(!resp.retval);
        assert_eq!(resp.msg, "No results");
        assert!(resp.data.is_empty());
    }

    #[test]
    fn records_keep_every_field() {
        let resp: SearchResponse = serde_json::from_str(
            r#"{"retval": true, "msg": "", "data": [
                {"title": "T1", "composer": "C1", "arranger": "A1",
                 "date_added": "19-01-2019", "instruments": ["tuba"], "extra": 1}
            ]}"#,
        )
        .unwrap();
        let rec = &resp.data[0];
        assert_eq!(rec.lookup("title").as_deref(), Some("T1"));
        assert_eq!(rec.lookup("instruments").as_deref(), Some("tuba"));
        assert_eq!(rec.lookup("extra").as_deref(), Some("1"));
        assert_eq!(rec.lookup("missing"), None);
    }

    #[test]
    fn sample_has_two_records() {
        let resp = SearchResponse::sample();
        assert!(resp.retval);
        assert_eq!(resp.data.len(), 2);
        assert_eq!(resp.data[1].0.get("title"), Some(&Value::from("title1")));
    }

    #[test]
    fn non_object_record_is_rejected() {
        assert!(serde_json::from_str::<SearchResponse>(r#"{"retval": true, "data": [1]}"#).is_err());
    }
}
