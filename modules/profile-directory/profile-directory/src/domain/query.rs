//! Read filters shared by every store backend.
//!
//! Matching is done in process with Unicode case folding so that all backends
//! agree on results regardless of database collation.

use std::collections::BTreeSet;

use profile_directory_sdk::Profile;

/// True if any searchable field contains `needle`. `needle` must already be lowercase.
pub fn matches_search(profile: &Profile, needle: &str) -> bool {
    [
        &profile.name,
        &profile.location,
        &profile.company,
        &profile.title,
        &profile.description,
    ]
    .into_iter()
    .any(|field| field.to_lowercase().contains(needle))
}

/// True if the location equals `location` ignoring case. `location` must already be lowercase.
pub fn matches_location(profile: &Profile, location: &str) -> bool {
    profile.location.to_lowercase() == location
}

pub fn search(profiles: Vec<Profile>, query: &str) -> Vec<Profile> {
    if query.is_empty() {
        return profiles;
    }
    let needle = query.to_lowercase();
    profiles
        .into_iter()
        .filter(|p| matches_search(p, &needle))
        .collect()
}

pub fn filter_by_location(profiles: Vec<Profile>, location: &str) -> Vec<Profile> {
    if location.is_empty() {
        return profiles;
    }
    let wanted = location.to_lowercase();
    profiles
        .into_iter()
        .filter(|p| matches_location(p, &wanted))
        .collect()
}

pub fn distinct_locations(profiles: &[Profile]) -> Vec<String> {
    profiles
        .iter()
        .map(|p| p.location.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
