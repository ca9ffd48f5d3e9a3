// src/probe/measurement.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric reading reported by a probe.
///
/// Non-finite numbers are stored as the strings `"NaN"`, `"inf"` and `"-inf"`
/// since JSON has no representation for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub label: String,
    #[serde(with = "float_repr")]
    pub number: f64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "float_repr::option"
    )]
    pub threshold: Option<f64>,
}

/// Result value of a passed probe.
///
/// `None` is the sentinel for probes that succeed without anything to quantify.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Measurement {
    Reading(Reading),
    #[default]
    None,
}

impl Measurement {
    pub fn new(label: impl Into<String>, number: f64) -> Self {
        Self::Reading(Reading {
            label: label.into(),
            number,
            threshold: None,
        })
    }

    /// Attaches a threshold to a reading. No-op on the `None` sentinel.
    #[must_use]
    pub fn with_threshold(self, threshold: f64) -> Self {
        match self {
            Self::Reading(reading) => Self::Reading(Reading {
                threshold: Some(threshold),
                ..reading
            }),
            Self::None => Self::None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Reading(reading) => &reading.label,
            Self::None => "",
        }
    }

    pub fn number(&self) -> Option<f64> {
        match self {
            Self::Reading(reading) => Some(reading.number),
            Self::None => None,
        }
    }

    pub fn threshold(&self) -> Option<f64> {
        match self {
            Self::Reading(reading) => reading.threshold,
            Self::None => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reading(Reading {
                label,
                number,
                threshold: Some(threshold),
            }) => write!(f, "{label}: {number} (threshold {threshold})"),
            Self::Reading(Reading { label, number, .. }) => write!(f, "{label}: {number}"),
            Self::None => write!(f, "no measurement"),
        }
    }
}

mod float_repr {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    impl Repr {
        fn into_f64(self) -> Result<f64, String> {
            match self {
                Self::Number(number) => Ok(number),
                Self::Text(text) => match text.as_str() {
                    "NaN" => Ok(f64::NAN),
                    "inf" => Ok(f64::INFINITY),
                    "-inf" => Ok(f64::NEG_INFINITY),
                    other => Err(format!("invalid number '{other}'")),
                },
            }
        }
    }

    fn non_finite_text(value: f64) -> Option<&'static str> {
        if value.is_nan() {
            Some("NaN")
        } else if value == f64::INFINITY {
            Some("inf")
        } else if value == f64::NEG_INFINITY {
            Some("-inf")
        } else {
            None
        }
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        match non_finite_text(*value) {
            Some(text) => serializer.serialize_str(text),
            None => serializer.serialize_f64(*value),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Repr::deserialize(deserializer)?
            .into_f64()
            .map_err(D::Error::custom)
    }

    pub mod option {
        use super::Repr;
        use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

        struct Float(f64);

        impl Serialize for Float {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                super::serialize(&self.0, serializer)
            }
        }

        pub fn serialize<S: Serializer>(
            value: &Option<f64>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(number) => serializer.serialize_some(&Float(*number)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<f64>, D::Error> {
            Option::<Repr>::deserialize(deserializer)?
                .map(Repr::into_f64)
                .transpose()
                .map_err(D::Error::custom)
        }
    }
}
