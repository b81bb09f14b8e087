//! Search form fields and the query built from them.

use serde::Serialize;
use std::collections::HashMap;

/// Ids of the form fields a search reads, in request order.
pub const FIELDS: [&str; 5] = [
    "title",
    "composer",
    "arranger",
    "date_added_min",
    "date_added_max",
];

/// Anything a search form can be read from.
pub trait FormFields {
    /// Current value of the field with id `field`; empty when unset.
    fn value(&self, field: &str) -> String;
}

impl FormFields for HashMap<&str, &str> {
    fn value(&self, field: &str) -> String {
        self.get(field).copied().unwrap_or_default().to_owned()
    }
}

impl FormFields for HashMap<String, String> {
    fn value(&self, field: &str) -> String {
        self.get(field).cloned().unwrap_or_default()
    }
}

/// One search request. Values are sent as typed; the service trims and
/// validates them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub title: String,
    pub composer: String,
    pub arranger: String,
    pub date_added_min: String,
    pub date_added_max: String,
}

impl SearchQuery {
    pub fn from_form<F: FormFields + ?Sized>(form: &F) -> Self {
        let [title, composer, arranger, date_added_min, date_added_max] =
            FIELDS.map(|f| form.value(f));
        Self {
            title,
            composer,
            arranger,
            date_added_min,
            date_added_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_every_field() {
        let form: HashMap<&str, &str> = [
            ("title", "Bolero"),
            ("composer", "Ravel"),
            ("date_added_max", "19-01-2019"),
            ("unrelated", "x"),
        ]
        .into();

        let q = SearchQuery::from_form(&form);
        assert_eq!(q.title, "Bolero");
        assert_eq!(q.composer, "Ravel");
        assert_eq!(q.arranger, "");
        assert_eq!(q.date_added_min, "");
        assert_eq!(q.date_added_max, "19-01-2019");
    }

    #[test]
    fn serializes_with_wire_names() {
        let q = SearchQuery {
            title: "T".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&q).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().map(String::as_str).collect();
        let mut expected = FIELDS.to_vec();
        keys.sort_unstable();
        expected.sort_unstable();
        assert_eq!(keys, expected);
        assert_eq!(json["title"], "T");
    }
}
