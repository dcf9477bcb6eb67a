//! f64 fields of the JSON payload.
//!
//! serde_json writes inf/NaN as `null` and refuses `null` for f64 on the way
//! back, so non-finite values are stored as the strings "inf", "-inf", "NaN".
//! Finite values stay plain JSON numbers.

use serde::{de, Deserialize, Deserializer, Serializer};

pub fn serialize<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
    if v.is_finite() {
        s.serialize_f64(*v)
    } else if v.is_nan() {
        s.serialize_str("NaN")
    } else if v.is_sign_positive() {
        s.serialize_str("inf")
    } else {
        s.serialize_str("-inf")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Num(f64),
    Text(String),
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    match Repr::deserialize(d)? {
        Repr::Num(v) => Ok(v),
        Repr::Text(s) => match s.as_str() {
            "inf" => Ok(f64::INFINITY),
            "-inf" => Ok(f64::NEG_INFINITY),
            "NaN" => Ok(f64::NAN),
            other => Err(de::Error::custom(format!("invalid number '{}'", other))),
        },
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Price {
        #[serde(with = "super")]
        v: f64,
    }

    fn through_json(v: f64) -> f64 {
        let s = serde_json::to_string(&Price { v }).unwrap();
        serde_json::from_str::<Price>(&s).unwrap().v
    }

    #[test]
    fn finite_values_stay_numbers() {
        assert_eq!(serde_json::to_string(&Price { v: 9.5 }).unwrap(), r#"{"v":9.5}"#);
        assert_eq!(through_json(9.5), 9.5);
        assert_eq!(through_json(-0.25), -0.25);
        // integers written by hand still parse
        assert_eq!(serde_json::from_str::<Price>(r#"{"v":12}"#).unwrap().v, 12.0);
    }

    #[test]
    fn non_finite_values_survive() {
        assert_eq!(through_json(f64::INFINITY), f64::INFINITY);
        assert_eq!(through_json(f64::NEG_INFINITY), f64::NEG_INFINITY);
        assert!(through_json(f64::NAN).is_nan());
        assert!(serde_json::from_str::<Price>(r#"{"v":"lots"}"#).is_err());
        assert!(serde_json::from_str::<Price>(r#"{"v":null}"#).is_err());
    }
}
