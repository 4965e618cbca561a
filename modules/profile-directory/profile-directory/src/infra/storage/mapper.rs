use profile_directory_sdk::{NewProfile, NewUser, Profile, User};
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};

use crate::infra::storage::entity::{profile, user};

impl From<profile::Model> for Profile {
    fn from(m: profile::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            title: m.title,
            company: m.company,
            location: m.location,
            description: m.description,
            email: m.email,
            phone: m.phone,
            website: m.website,
            linkedin: m.linkedin,
            experience: m.experience,
            latitude: m.latitude,
            longitude: m.longitude,
            image_url: m.image_url,
        }
    }
}

impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            password: m.password,
        }
    }
}

/// Insert model; the database assigns the id.
pub fn new_profile_model(p: NewProfile) -> profile::ActiveModel {
    profile::ActiveModel {
        id: NotSet,
        name: Set(p.name),
        title: Set(p.title),
        company: Set(p.company),
        location: Set(p.location),
        description: Set(p.description),
        email: Set(p.email),
        phone: Set(p.phone),
        website: Set(p.website),
        linkedin: Set(p.linkedin),
        experience: Set(p.experience),
        latitude: Set(p.latitude),
        longitude: Set(p.longitude),
        image_url: Set(p.image_url),
    }
}

/// Full-row update model keyed by the existing id.
pub fn profile_update_model(p: Profile) -> profile::ActiveModel {
    profile::ActiveModel {
        id: Unchanged(p.id),
        name: Set(p.name),
        title: Set(p.title),
        company: Set(p.company),
        location: Set(p.location),
        description: Set(p.description),
        email: Set(p.email),
        phone: Set(p.phone),
        website: Set(p.website),
        linkedin: Set(p.linkedin),
        experience: Set(p.experience),
        latitude: Set(p.latitude),
        longitude: Set(p.longitude),
        image_url: Set(p.image_url),
    }
}

pub fn new_user_model(u: NewUser) -> user::ActiveModel {
    user::ActiveModel {
        id: NotSet,
        username: Set(u.username),
        password: Set(u.password),
    }
}
