//! Generating a CV and making it available.
//!
//! The pipeline runs strictly in order and never retries:
//!
//! 1. claim the profile so no other generation for it runs concurrently
//! 2. load the photo, aborting if it can't be decoded
//! 3. lay out and serialize the PDF
//! 4. upload it under a name derived from the job seeker's name
//! 5. point the profile at the uploaded URL
//!
//! A failure after step 4 leaves an uploaded CV the profile doesn't know about;
//! [`PublishError::MetadataSync`] carries its URL so the caller can repair the
//! link or clean up.

mod guard;
pub use guard::*;

mod local;
pub use local::*;

use crate::profile::ProfileDocument;
use crate::sinks::pdf::{ProfilePhoto, RenderStats, PDF};
use indicatif::ProgressBar;

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("failed to load profile photo `{location}`")]
    ImageLoad {
        location: String,
        #[source]
        source: image::ImageError,
    },
    #[error("a CV is already being generated for profile `{0}`")]
    GenerationInProgress(String),
    #[error("failed to render the CV")]
    Render(#[source] anyhow::Error),
    #[error("failed to upload `{name}`")]
    Upload {
        name: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("uploaded the CV to {url} but failed to link it to profile `{profile}`")]
    MetadataSync {
        url: String,
        profile: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Somewhere to put finished CVs.
pub trait BlobStore {
    /// Store `bytes` under `name`, replacing any previous blob, and return its URL.
    fn put(&self, name: &str, bytes: &[u8]) -> anyhow::Result<String>;
}

/// The system of record for profiles.
pub trait ProfileRegistry {
    fn set_cv_url(&self, profile_id: &str, url: &str) -> anyhow::Result<()>;
}

/// A CV that was rendered and linked to its profile.
pub struct Published {
    pub url: String,
    pub name: String,
    pub stats: RenderStats,
}

/// Deterministic blob name, `cv-<ascii-slug-of-full-name>.pdf`.
///
/// Falls back to the profile id when the name has nothing to slug.
pub fn blob_name(profile: &ProfileDocument) -> String {
    let slug = slugify(&profile.full_name());
    if slug.is_empty() {
        format!("cv-{}.pdf", slugify(&profile.id))
    } else {
        format!("cv-{slug}.pdf")
    }
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        _ => c,
    }
}

fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars().flat_map(char::to_lowercase).map(fold_accent) {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Load the photo (if any) and render the CV.
///
/// `photo_override` replaces the photo location stored on the profile. The
/// profile is claimed for the duration of the render.
pub fn generate(
    config: &PDF,
    profile: &ProfileDocument,
    photo_override: Option<&str>,
    progress: &ProgressBar,
) -> Result<(Vec<u8>, RenderStats), PublishError> {
    let ticket = GenerationTicket::acquire(&profile.id)?;
    generate_claimed(&ticket, config, profile, photo_override, progress)
}

fn generate_claimed(
    ticket: &GenerationTicket,
    config: &PDF,
    profile: &ProfileDocument,
    photo_override: Option<&str>,
    progress: &ProgressBar,
) -> Result<(Vec<u8>, RenderStats), PublishError> {
    let location = photo_override.or(profile.photo.as_deref());
    let photo = match location {
        Some(location) => Some(ProfilePhoto::load(location).map_err(|source| {
            PublishError::ImageLoad {
                location: location.to_string(),
                source,
            }
        })?),
        None => {
            log::debug!("Profile `{}` has no photo", ticket.profile_id());
            None
        }
    };

    config
        .render(profile, photo.as_ref(), progress)
        .map_err(PublishError::Render)
}

/// Render, upload and link a CV for `profile`.
///
/// The profile stays claimed until the link is written.
pub fn publish<B: BlobStore, R: ProfileRegistry>(
    config: &PDF,
    profile: &ProfileDocument,
    photo_override: Option<&str>,
    blobs: &B,
    registry: &R,
    progress: &ProgressBar,
) -> Result<Published, PublishError> {
    let ticket = GenerationTicket::acquire(&profile.id)?;

    let (bytes, stats) = generate_claimed(&ticket, config, profile, photo_override, progress)?;

    let name = blob_name(profile);
    let url = blobs
        .put(&name, &bytes)
        .map_err(|source| PublishError::Upload {
            name: name.clone(),
            source,
        })?;

    registry
        .set_cv_url(&profile.id, &url)
        .map_err(|source| PublishError::MetadataSync {
            url: url.clone(),
            profile: profile.id.clone(),
            source,
        })?;

    log::info!("Published CV for profile `{}` at {url}", ticket.profile_id());
    Ok(Published { url, name, stats })
}
