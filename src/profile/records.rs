use super::null_as_default;
use super::{Area, Responsibilities};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

#[derive(Builder, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[builder(setter(into), default)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationRecord {
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub institution: String,
    /// The accredited degree title
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub level: String,
    /// Broad field of study
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub field: String,
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub start_date: String,
    /// `None` while still studying
    #[builder(setter(into, strip_option))]
    pub end_date: Option<String>,
}

#[derive(Builder, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[builder(setter(into), default)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceRecord {
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub company: String,
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub position: String,
    /// Composite `"id,label"` value, see [`Area`]
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub area: String,
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub start_date: String,
    /// `None` for the current job
    #[builder(setter(into, strip_option))]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub responsibilities: String,
    #[builder(setter(into, strip_option))]
    pub reference_name: Option<String>,
    #[builder(setter(into, strip_option))]
    pub reference_contact: Option<String>,
}

impl ExperienceRecord {
    pub fn area(&self) -> Area {
        Area::parse(&self.area)
    }

    pub fn responsibilities(&self) -> Responsibilities {
        Responsibilities::parse(&self.responsibilities)
    }
}

#[derive(Builder, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[builder(setter(into), default)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseRecord {
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub institution: String,
    #[builder(setter(into, strip_option))]
    pub hours: Option<u32>,
    #[builder(setter(into, strip_option))]
    pub date: Option<String>,
}

#[derive(Builder, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct LanguageRecord {
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub level: String,
}

#[derive(Builder, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct SkillRecord {
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub level: String,
}

#[derive(Builder, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct CompetencyRecord {
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub level: String,
}

#[derive(Builder, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct SocialLink {
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub network: String,
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub url: String,
}

#[derive(Builder, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[builder(setter(into), default)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalReference {
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub name: String,
    #[builder(setter(into, strip_option))]
    pub relationship: Option<String>,
    #[builder(setter(into, strip_option))]
    pub phone: Option<String>,
    #[builder(setter(into, strip_option))]
    pub email: Option<String>,
}
