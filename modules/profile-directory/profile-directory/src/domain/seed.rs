//! Sample profiles used to populate an empty directory.

use profile_directory_sdk::NewProfile;

use crate::domain::error::DomainError;
use crate::domain::repo::ProfileStore;

struct Sample {
    name: &'static str,
    title: &'static str,
    company: &'static str,
    location: &'static str,
    description: &'static str,
    email: &'static str,
    phone: &'static str,
    website: &'static str,
    linkedin: &'static str,
    experience: &'static str,
    latitude: f64,
    longitude: f64,
    image_url: &'static str,
}

const SAMPLES: [Sample; 4] = [
    Sample {
        name: "John Doe",
        title: "Senior Software Developer",
        company: "Acme Inc.",
        location: "New York",
        description: "Senior Software Developer with 8+ years of experience in frontend and backend technologies. Specialized in building scalable web applications using React, Node.js, and cloud services.",
        email: "john.doe@example.com",
        phone: "(555) 123-4567",
        website: "johndoe.com",
        linkedin: "linkedin.com/in/johndoe",
        experience: "8+ years",
        latitude: 40.7128,
        longitude: -74.0060,
        image_url: "https://randomuser.me/api/portraits/men/1.jpg",
    },
    Sample {
        name: "Emily Johnson",
        title: "UX/UI Designer",
        company: "Design Studio",
        location: "San Francisco",
        description: "UX/UI Designer passionate about creating intuitive and accessible user experiences for web and mobile applications.",
        email: "emily.j@example.com",
        phone: "(555) 234-5678",
        website: "emilyjdesign.com",
        linkedin: "linkedin.com/in/emilyjohnson",
        experience: "5 years",
        latitude: 37.7749,
        longitude: -122.4194,
        image_url: "https://randomuser.me/api/portraits/women/2.jpg",
    },
    Sample {
        name: "Michael Chang",
        title: "Product Manager",
        company: "Global Finance",
        location: "London",
        description: "Product Manager with extensive experience in fintech and e-commerce platforms. Strong focus on data-driven decisions and user-centered design.",
        email: "michael.c@example.com",
        phone: "(555) 345-6789",
        website: "michaelchang.io",
        linkedin: "linkedin.com/in/michaelchang",
        experience: "6 years",
        latitude: 51.5074,
        longitude: -0.1278,
        image_url: "https://randomuser.me/api/portraits/men/3.jpg",
    },
    Sample {
        name: "Sarah Martinez",
        title: "Data Scientist",
        company: "Tech Solutions",
        location: "Berlin",
        description: "Data Scientist specializing in machine learning algorithms and predictive modeling. Experienced in implementing solutions for business intelligence and analytics.",
        email: "sarah.m@example.com",
        phone: "(555) 456-7890",
        website: "sarahmartinez.dev",
        linkedin: "linkedin.com/in/sarahmartinez",
        experience: "4 years",
        latitude: 52.5200,
        longitude: 13.4050,
        image_url: "https://randomuser.me/api/portraits/women/4.jpg",
    },
];

/// The fixed demo set: New York, San Francisco, London, Berlin.
#[must_use]
pub fn sample_profiles() -> Vec<NewProfile> {
    SAMPLES
        .iter()
        .map(|s| NewProfile {
            name: s.name.to_owned(),
            title: s.title.to_owned(),
            company: s.company.to_owned(),
            location: s.location.to_owned(),
            description: s.description.to_owned(),
            email: s.email.to_owned(),
            phone: Some(s.phone.to_owned()),
            website: Some(s.website.to_owned()),
            linkedin: Some(s.linkedin.to_owned()),
            experience: Some(s.experience.to_owned()),
            latitude: s.latitude,
            longitude: s.longitude,
            image_url: s.image_url.to_owned(),
        })
        .collect()
}

/// Insert the sample profiles if the store holds none. Returns how many were inserted.
///
/// # Errors
/// Propagates storage faults from the store.
pub async fn seed_if_empty(store: &dyn ProfileStore) -> Result<usize, DomainError> {
    if !store.list_profiles().await?.is_empty() {
        tracing::debug!("Profile store already populated, skipping seed");
        return Ok(0);
    }

    let samples = sample_profiles();
    let count = samples.len();
    for profile in samples {
        store.create_profile(profile).await?;
    }

    tracing::info!(count, "Seeded profile store with sample profiles");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::storage::InMemoryProfileStore;

    #[tokio::test]
    async fn seeds_empty_store_once() {
        let store = InMemoryProfileStore::new();

        assert_eq!(seed_if_empty(&store).await.unwrap(), 4);
        assert_eq!(seed_if_empty(&store).await.unwrap(), 0);

        let names: Vec<_> = store
            .list_profiles()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(
            names,
            ["John Doe", "Emily Johnson", "Michael Chang", "Sarah Martinez"]
        );
    }

    #[test]
    fn samples_have_valid_coordinates() {
        for p in sample_profiles() {
            assert!((-90.0..=90.0).contains(&p.latitude), "{}", p.name);
            assert!((-180.0..=180.0).contains(&p.longitude), "{}", p.name);
        }
    }
}
