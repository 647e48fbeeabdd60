use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::RecordError;

///
/// The biological origin of an allele, as far as evidence generation is concerned.
///
/// ClinVar uses many more origin labels ("inherited", "de novo", "unknown", ...).
/// Only the two below produce evidence; parsing is case-sensitive.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlleleOrigin {
    Germline,
    Somatic,
}

impl AlleleOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlleleOrigin::Germline => "germline",
            AlleleOrigin::Somatic => "somatic",
        }
    }
}

impl FromStr for AlleleOrigin {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "germline" => Ok(AlleleOrigin::Germline),
            "somatic" => Ok(AlleleOrigin::Somatic),
            _ => Err(RecordError::UnknownAlleleOrigin(s.to_string())),
        }
    }
}

impl Display for AlleleOrigin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
