//! Institute — a department belonging to one university.

use serde::{Deserialize, Serialize};

use crate::{
  Result,
  draft::{required_id, required_str},
};

/// A stored institute row.
///
/// `university_name` is joined in on the institute list and detail reads and
/// left out when listing the institutes of a known university.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Institute {
  pub id:              i64,
  pub institute_name:  String,
  pub university_id:   i64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub university_name: Option<String>,
}

/// Unvalidated create/update body for an institute.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstituteDraft {
  pub institute_name: Option<String>,
  pub university_id:  Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInstitute {
  pub institute_name: String,
  pub university_id:  i64,
}

impl InstituteDraft {
  pub fn validate(self) -> Result<NewInstitute> {
    Ok(NewInstitute {
      institute_name: required_str(self.institute_name)?,
      university_id:  required_id(self.university_id)?,
    })
  }
}
