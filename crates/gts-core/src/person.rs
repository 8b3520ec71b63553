//! Person — a thesis author.

use serde::{Deserialize, Serialize};

use crate::{
  Result,
  draft::{optional_str, required_str},
};

/// A stored person row, keyed as the API exposes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
  pub id:           i64,
  pub first_name:   String,
  pub second_name:  String,
  pub phone_number: Option<String>,
}

/// Unvalidated create/update body for a person.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonDraft {
  pub first_name:   Option<String>,
  pub second_name:  Option<String>,
  pub phone_number: Option<String>,
}

/// A validated person ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
  pub first_name:   String,
  pub second_name:  String,
  pub phone_number: Option<String>,
}

impl PersonDraft {
  /// Both names are required; a blank phone number is stored as NULL.
  pub fn validate(self) -> Result<NewPerson> {
    Ok(NewPerson {
      first_name:   required_str(self.first_name)?,
      second_name:  required_str(self.second_name)?,
      phone_number: optional_str(self.phone_number),
    })
  }
}
