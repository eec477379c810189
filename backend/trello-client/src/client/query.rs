//! Query parameters for Trello request URLs.
//!
//! Trello takes all its arguments in the query string. Values are flattened
//! to strings the way the API expects them:
//!
//! | value | encoded as |
//! |---|---|
//! | text | as is |
//! | bool | `true` / `false` |
//! | integer | decimal |
//! | float | decimal, integral floats without a fraction |
//! | list | comma joined (`urls=/a,/b`) |
//! | map | one pair per entry, named `<param>_<key>` (`prefs_permissionLevel`) |

#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Text(String),
    Bool(bool),
    Integer(i64),
    Float(f64),
    List(Vec<String>),
    Map(Vec<(String, QueryValue)>),
}

impl QueryValue {
    fn flatten_into(&self, name: &str, out: &mut Vec<(String, String)>) {
        let encoded = match self {
            QueryValue::Map(entries) => {
                for (key, value) in entries {
                    value.flatten_into(&format!("{name}_{key}"), out);
                }
                return;
            }
            QueryValue::Text(text) => text.clone(),
            QueryValue::Bool(flag) => flag.to_string(),
            QueryValue::Integer(number) => number.to_string(),
            QueryValue::Float(number) => format_float(*number),
            QueryValue::List(items) => items.join(","),
        };
        out.push((name.to_string(), encoded));
    }
}

fn format_float(number: f64) -> String {
    if number.is_finite() && number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        QueryValue::Text(value.clone())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Integer(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Integer(i64::from(value))
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(value: Vec<String>) -> Self {
        QueryValue::List(value)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(value: Vec<&str>) -> Self {
        QueryValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<QueryParams> for QueryValue {
    fn from(value: QueryParams) -> Self {
        QueryValue::Map(value.pairs)
    }
}

/// Ordered query parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, QueryValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<QueryValue>) {
        self.pairs.push((name.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pairs.iter().any(|(key, _)| key == name)
    }

    /// Flatten to `(name, value)` string pairs in insertion order.
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut out = Vec::with_capacity(self.pairs.len());
        for (name, value) in &self.pairs {
            value.flatten_into(name, &mut out);
        }
        out
    }
}
