use std::cmp::Ordering;

/// Field contents read as a missing value, same set pandas uses by default
pub(crate) const MISSING_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single cell
///
/// Null is a missing cell and can live in a column of any type.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "NaN"),
            Self::Integer(num) => write!(f, "{}", num),
            Self::Float(num) => write!(f, "{}", format_float(*num)),
            Self::Boolean(tv) => write!(f, "{}", if *tv { "True" } else { "False" }),
            Self::Text(txt) => write!(f, "{}", txt),
        }
    }
}

impl Value {
    /// Parse raw field as given type
    ///
    /// Missing markers always become Null. Returns None if the text cannot be
    /// represented in the given type.
    pub fn from_str(src: &str, value_type: ValueType) -> Option<Self> {
        if is_missing(src) {
            return Some(Self::Null);
        }
        let value = match value_type {
            ValueType::Integer => Self::Integer(parse_integer(src)?),
            ValueType::Float => Self::Float(parse_float(src)?),
            ValueType::Boolean => Self::Boolean(parse_boolean(src)?),
            ValueType::Text => Self::Text(src.to_string()),
        };
        Some(value)
    }

    /// Parse raw field with the narrowest type that fits it
    pub fn infer(src: &str) -> Self {
        if is_missing(src) {
            return Self::Null;
        }
        ValueType::infer(src)
            .and_then(|value_type| Self::from_str(src, value_type))
            .unwrap_or_else(|| Self::Text(src.to_string()))
    }

    /// Coerce user input so it can be compared against a column of given type
    ///
    /// Unlike from_str, an integer column also accepts whole floats such as "30.0".
    /// Missing markers yield None because a missing cell never equals anything.
    pub fn coerce(src: &str, value_type: ValueType) -> Option<Self> {
        if is_missing(src) {
            return None;
        }
        match value_type {
            ValueType::Integer => match parse_integer(src) {
                Some(num) => Some(Self::Integer(num)),
                None => {
                    let num = parse_float(src)?;
                    if num.fract() == 0.0 && num.abs() < i64::MAX as f64 {
                        Some(Self::Integer(num as i64))
                    } else {
                        None
                    }
                }
            },
            _ => Self::from_str(src, value_type),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Self::Null => None,
            Self::Integer(_) => Some(ValueType::Integer),
            Self::Float(_) => Some(ValueType::Float),
            Self::Boolean(_) => Some(ValueType::Boolean),
            Self::Text(_) => Some(ValueType::Text),
        }
    }

    /// Convert into given type, which must be a widening of the current one
    pub(crate) fn widen(self, value_type: ValueType) -> Self {
        match (self, value_type) {
            (Self::Null, _) => Self::Null,
            (Self::Integer(num), ValueType::Float) => Self::Float(num as f64),
            (value, ValueType::Text) if !matches!(value, Self::Text(_)) => {
                Self::Text(value.to_field())
            }
            (value, _) => value,
        }
    }

    /// Textual form written to a csv field
    pub fn to_field(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Boolean(tv) => tv.to_string(),
            _ => self.to_string(),
        }
    }

    /// Natural ordering of two values from the same column
    ///
    /// Null sorts after every other value.
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Null, _) => Ordering::Greater,
            (_, Self::Null) => Ordering::Less,
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Integer(a), Self::Float(b)) => (*a as f64).total_cmp(b),
            (Self::Float(a), Self::Integer(b)) => a.total_cmp(&(*b as f64)),
            (Self::Boolean(a), Self::Boolean(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (a, b) => a.to_field().cmp(&b.to_field()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueType {
    Integer,
    Float,
    Boolean,
    Text,
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let out = match self {
            Self::Integer => "int64",
            Self::Float => "float64",
            Self::Boolean => "bool",
            Self::Text => "text",
        };
        write!(f, "{}", out)
    }
}

impl Default for ValueType {
    fn default() -> Self {
        Self::Text
    }
}

impl ValueType {
    /// Narrowest type of a single non-missing field
    ///
    /// Tries integer, then float, then boolean. None means text.
    fn infer(src: &str) -> Option<Self> {
        if parse_integer(src).is_some() {
            Some(Self::Integer)
        } else if parse_float(src).is_some() {
            Some(Self::Float)
        } else if parse_boolean(src).is_some() {
            Some(Self::Boolean)
        } else {
            None
        }
    }

    /// Infer a column type from its raw fields
    ///
    /// Missing fields are ignored. A column without any present field is text.
    pub fn infer_column<'a>(fields: impl IntoIterator<Item = &'a str>) -> Self {
        fields
            .into_iter()
            .filter(|field| !is_missing(field))
            .map(|field| Self::infer(field).unwrap_or(Self::Text))
            .reduce(Self::unify)
            .unwrap_or_default()
    }

    /// Smallest type both given types can be represented in
    pub fn unify(self, other: Self) -> Self {
        match (self, other) {
            (a, b) if a == b => a,
            (Self::Integer, Self::Float) | (Self::Float, Self::Integer) => Self::Float,
            _ => Self::Text,
        }
    }
}

pub(crate) fn is_missing(src: &str) -> bool {
    MISSING_MARKERS.contains(&src)
}

fn parse_integer(src: &str) -> Option<i64> {
    src.parse::<i64>().ok()
}

// Rust accepts "inf" or "infinity" as floats, which should stay text.
// Overflowing literals such as "1e400" parse to infinity and are rejected too.
fn parse_float(src: &str) -> Option<f64> {
    if !src.chars().any(|ch| ch.is_ascii_digit()) {
        return None;
    }
    src.parse::<f64>().ok().filter(|num| num.is_finite())
}

fn parse_boolean(src: &str) -> Option<bool> {
    match src.to_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

// Whole floats keep a fraction so the field is read back as a float
fn format_float(num: f64) -> String {
    if num.is_finite() && num.fract() == 0.0 {
        format!("{:.1}", num)
    } else {
        num.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_inference_order() {
        assert_eq!(ValueType::infer_column(["1", "2", "-3"]), ValueType::Integer);
        assert_eq!(ValueType::infer_column(["1", "2.5"]), ValueType::Float);
        assert_eq!(ValueType::infer_column(["True", "false"]), ValueType::Boolean);
        assert_eq!(ValueType::infer_column(["1", "true"]), ValueType::Text);
        assert_eq!(ValueType::infer_column(["inf", "1.0"]), ValueType::Text);
        assert_eq!(ValueType::infer_column(["", "NA", "7"]), ValueType::Integer);
        assert_eq!(ValueType::infer_column(["", "NA"]), ValueType::Text);
        assert_eq!(ValueType::infer_column(["1e400", "2.5"]), ValueType::Text);
        assert_eq!(ValueType::infer_column(["1e300", "2.5"]), ValueType::Float);
    }

    #[test]
    fn missing_markers_read_as_null() {
        for marker in ["n/a", "None", "<NA>", "#N/A", "-nan", "-NaN", "NA", ""] {
            assert_eq!(Value::infer(marker), Value::Null, "marker {:?}", marker);
        }
        assert_eq!(Value::infer("none"), Value::Text("none".to_string()));
        assert_eq!(ValueType::infer_column(["None", "3", "<NA>"]), ValueType::Integer);
    }

    #[test]
    fn coerce_matches_column_type() {
        assert_eq!(Value::coerce("30", ValueType::Integer), Some(Value::Integer(30)));
        assert_eq!(Value::coerce("30.0", ValueType::Integer), Some(Value::Integer(30)));
        assert_eq!(Value::coerce("30.5", ValueType::Integer), None);
        assert_eq!(Value::coerce("TRUE", ValueType::Boolean), Some(Value::Boolean(true)));
        assert_eq!(Value::coerce("", ValueType::Text), None);
    }

    #[test]
    fn nulls_sort_last() {
        let mut values = vec![Value::Null, Value::Integer(3), Value::Integer(1)];
        values.sort_by(|a, b| a.natural_cmp(b));
        assert_eq!(values, vec![Value::Integer(1), Value::Integer(3), Value::Null]);
    }

    #[test]
    fn float_field_keeps_fraction() {
        assert_eq!(Value::Float(3.0).to_field(), "3.0");
        assert_eq!(Value::Float(2.25).to_field(), "2.25");
        assert_eq!(Value::Boolean(true).to_field(), "true");
        assert_eq!(Value::Null.to_field(), "");
    }
}
