mod area;
pub use area::*;

pub mod dates;

mod records;
pub use records::*;

mod responsibilities;
pub use responsibilities::*;

mod serde_helpers;
use serde_helpers::null_as_default;

use anyhow::{Context, Result};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Identity fields shown in the header and personal information section.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[builder(setter(into, strip_option), default)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub first_names: Option<String>,
    pub last_names: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub marital_status: Option<String>,
    pub national_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Builder, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[builder(setter(into, strip_option), default)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub province: Option<String>,
    pub canton: Option<String>,
}

/// Everything we know about a job seeker, as returned by the profile endpoint.
///
/// Repeated collections are optional because the backend sends `null` for
/// categories the user never filled in; absent and empty are treated the same
/// when rendering.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileDocument {
    #[builder(setter(into), default)]
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub id: String,
    #[builder(default)]
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub personal: PersonalInfo,
    #[builder(setter(into, strip_option), default)]
    pub presentation: Option<String>,
    #[builder(default)]
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub location: Location,
    /// Where the profile photo lives (a local path or `file://` URL)
    #[builder(setter(into, strip_option), default)]
    pub photo: Option<String>,
    /// URL of the most recently published CV
    #[builder(setter(into, strip_option), default)]
    pub cv_url: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub education: Option<Vec<EducationRecord>>,
    #[builder(setter(into, strip_option), default)]
    pub experience: Option<Vec<ExperienceRecord>>,
    #[builder(setter(into, strip_option), default)]
    pub courses: Option<Vec<CourseRecord>>,
    #[builder(setter(into, strip_option), default)]
    pub languages: Option<Vec<LanguageRecord>>,
    #[builder(setter(into, strip_option), default)]
    pub skills: Option<Vec<SkillRecord>>,
    #[builder(setter(into, strip_option), default)]
    pub competencies: Option<Vec<CompetencyRecord>>,
    #[builder(setter(into, strip_option), default)]
    pub social_links: Option<Vec<SocialLink>>,
    #[builder(setter(into, strip_option), default)]
    pub references: Option<Vec<PersonalReference>>,
}

impl ProfileDocument {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ProfileDocument> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile `{}`", path.display()))?;
        let profile: ProfileDocument = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse profile `{}`", path.display()))?;
        Ok(profile)
    }

    /// First and last names joined, ignoring whichever half is missing.
    pub fn full_name(&self) -> String {
        [&self.personal.first_names, &self.personal.last_names]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<&str>>()
            .join(" ")
    }

    pub fn education(&self) -> &[EducationRecord] {
        self.education.as_deref().unwrap_or_default()
    }

    pub fn experience(&self) -> &[ExperienceRecord] {
        self.experience.as_deref().unwrap_or_default()
    }

    pub fn courses(&self) -> &[CourseRecord] {
        self.courses.as_deref().unwrap_or_default()
    }

    pub fn languages(&self) -> &[LanguageRecord] {
        self.languages.as_deref().unwrap_or_default()
    }

    pub fn skills(&self) -> &[SkillRecord] {
        self.skills.as_deref().unwrap_or_default()
    }

    pub fn competencies(&self) -> &[CompetencyRecord] {
        self.competencies.as_deref().unwrap_or_default()
    }

    pub fn social_links(&self) -> &[SocialLink] {
        self.social_links.as_deref().unwrap_or_default()
    }

    pub fn references(&self) -> &[PersonalReference] {
        self.references.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn null_and_missing_collections_read_as_empty() {
        let json = r#"{
            "id": "42",
            "personal": { "firstNames": "Ana", "lastNames": "Vera" },
            "education": null,
            "languages": [{ "name": "English", "level": "B2" }]
        }"#;
        let profile: ProfileDocument = serde_json::from_str(json).expect("can parse profile");

        assert!(profile.education().is_empty());
        assert!(profile.experience().is_empty());
        assert_eq!(profile.languages().len(), 1);
        assert_eq!(profile.languages()[0].level, "B2");
    }

    #[test]
    fn null_objects_and_fields_read_as_missing() {
        let json = r#"{
            "id": "43",
            "personal": null,
            "location": null,
            "presentation": null,
            "education": [{ "institution": "UCE", "title": null, "field": null }],
            "experience": [{ "company": null, "position": "Clerk", "area": null }],
            "socialLinks": [{ "network": "LinkedIn", "url": null }]
        }"#;
        let profile: ProfileDocument = serde_json::from_str(json).expect("can parse profile");

        assert_eq!(profile.personal, PersonalInfo::default());
        assert_eq!(profile.location, Location::default());
        assert_eq!(profile.education()[0].institution, "UCE");
        assert_eq!(profile.education()[0].title, "");
        assert_eq!(profile.experience()[0].company, "");
        assert_eq!(profile.experience()[0].area().label, "");
        assert_eq!(profile.social_links()[0].url, "");

        let profile: ProfileDocument =
            serde_json::from_str(r#"{ "id": null }"#).expect("can parse profile");
        assert_eq!(profile.id, "");
    }

    #[test]
    fn full_name_skips_missing_parts() {
        let profile = ProfileDocumentBuilder::default()
            .personal(
                PersonalInfoBuilder::default()
                    .first_names("  María José ")
                    .build()
                    .expect("can build personal info"),
            )
            .build()
            .expect("can build profile");
        assert_eq!(profile.full_name(), "María José");

        let profile = ProfileDocument::default();
        assert_eq!(profile.full_name(), "");
    }

    #[test]
    fn can_load_profile_from_disk() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let path = dir.path().join("profile.json");
        std::fs::write(
            &path,
            r#"{ "id": "7", "personal": { "firstNames": "Luis" }, "cvUrl": "file:///tmp/a.pdf" }"#,
        )
        .expect("can write profile");

        let profile = ProfileDocument::load(&path).expect("can load profile");
        assert_eq!(profile.id, "7");
        assert_eq!(profile.cv_url.as_deref(), Some("file:///tmp/a.pdf"));
    }
}
