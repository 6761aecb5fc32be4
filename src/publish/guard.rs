use super::PublishError;
use std::collections::BTreeSet;
use std::sync::Mutex;

static IN_FLIGHT: Mutex<BTreeSet<String>> = Mutex::new(BTreeSet::new());

/// Proof that this process is the only one generating a CV for a profile.
///
/// The profile is released when the ticket drops, whether generation
/// succeeded or not.
#[derive(Debug)]
pub struct GenerationTicket {
    profile_id: String,
}

impl GenerationTicket {
    pub fn acquire(profile_id: &str) -> Result<GenerationTicket, PublishError> {
        let mut in_flight = IN_FLIGHT.lock().unwrap_or_else(|e| e.into_inner());
        if !in_flight.insert(profile_id.to_string()) {
            return Err(PublishError::GenerationInProgress(profile_id.to_string()));
        }
        log::debug!("Started generation for profile `{profile_id}`");
        Ok(GenerationTicket {
            profile_id: profile_id.to_string(),
        })
    }

    pub fn profile_id(&self) -> &str {
        &self.profile_id
    }
}

impl Drop for GenerationTicket {
    fn drop(&mut self) {
        let mut in_flight = IN_FLIGHT.lock().unwrap_or_else(|e| e.into_inner());
        in_flight.remove(&self.profile_id);
    }
}
