//! Upgrade policy gate
//!
//! Decides once per process whether any quality profile lets Sonarr replace
//! an imported release with a better one. The answer is returned as a plain
//! value and handed to whatever selects canonical history events.

use crate::client::{QualityProfile, SonarrApi, SonarrError};

/// Query every quality profile and report whether upgrades can happen
pub async fn detect_upgrades_allowed(api: &dyn SonarrApi) -> Result<bool, SonarrError> {
    let profiles = api.get_all_quality_profiles().await?;
    let allowed = upgrades_allowed(&profiles);

    for profile in profiles.iter().filter(|p| permits_upgrades(p)) {
        tracing::debug!(
            profile_id = profile.id,
            profile = %profile.name,
            "Quality profile permits upgrades"
        );
    }

    tracing::info!(
        profiles = profiles.len(),
        upgrades_allowed = allowed,
        "Evaluated Sonarr quality profiles"
    );

    Ok(allowed)
}

/// True iff some profile has ranked items and permits upgrades
pub fn upgrades_allowed(profiles: &[QualityProfile]) -> bool {
    profiles.iter().any(permits_upgrades)
}

fn permits_upgrades(profile: &QualityProfile) -> bool {
    !profile.items.is_empty() && profile.upgrade_allowed
}
