//! University — owns institutes, hosts theses.

use serde::{Deserialize, Serialize};

use crate::{Result, draft::required_str};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct University {
  pub id:              i64,
  pub university_name: String,
  pub location:        String,
}

/// Unvalidated create/update body for a university.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UniversityDraft {
  pub university_name: Option<String>,
  pub location:        Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUniversity {
  pub university_name: String,
  pub location:        String,
}

impl UniversityDraft {
  pub fn validate(self) -> Result<NewUniversity> {
    Ok(NewUniversity {
      university_name: required_str(self.university_name)?,
      location:        required_str(self.location)?,
    })
  }
}
