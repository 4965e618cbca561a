//! Public models for the profile directory.
//!
//! These are transport-agnostic data structures that define the contract
//! between the profile store and its consumers.

use std::fmt;

/// Identifier of a stored profile. Assigned by the store, never reused.
pub type ProfileId = i32;

/// Identifier of a stored user.
pub type UserId = i32;

/// A directory record describing one person.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub experience: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: String,
}

/// Data for creating a new profile. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProfile {
    pub name: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub experience: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: String,
}

impl NewProfile {
    /// Attach a store-assigned id.
    #[must_use]
    pub fn with_id(self, id: ProfileId) -> Profile {
        Profile {
            id,
            name: self.name,
            title: self.title,
            company: self.company,
            location: self.location,
            description: self.description,
            email: self.email,
            phone: self.phone,
            website: self.website,
            linkedin: self.linkedin,
            experience: self.experience,
            latitude: self.latitude,
            longitude: self.longitude,
            image_url: self.image_url,
        }
    }
}

/// Partial update data for a profile.
///
/// Required fields are `Some` only when supplied. Optional fields carry three
/// states: `None` leaves the field untouched, `Some(None)` clears it and
/// `Some(Some(v))` sets it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub linkedin: Option<Option<String>>,
    pub experience: Option<Option<String>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
}

impl ProfilePatch {
    /// True when no field is supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge supplied fields onto `profile`. The id is never touched.
    pub fn apply_to(self, profile: &mut Profile) {
        if let Some(v) = self.name {
            profile.name = v;
        }
        if let Some(v) = self.title {
            profile.title = v;
        }
        if let Some(v) = self.company {
            profile.company = v;
        }
        if let Some(v) = self.location {
            profile.location = v;
        }
        if let Some(v) = self.description {
            profile.description = v;
        }
        if let Some(v) = self.email {
            profile.email = v;
        }
        if let Some(v) = self.phone {
            profile.phone = v;
        }
        if let Some(v) = self.website {
            profile.website = v;
        }
        if let Some(v) = self.linkedin {
            profile.linkedin = v;
        }
        if let Some(v) = self.experience {
            profile.experience = v;
        }
        if let Some(v) = self.latitude {
            profile.latitude = v;
        }
        if let Some(v) = self.longitude {
            profile.longitude = v;
        }
        if let Some(v) = self.image_url {
            profile.image_url = v;
        }
    }
}

/// An account record. Not used by any profile workflow yet.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password: String,
}

/// Data for creating a new user.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

impl NewUser {
    #[must_use]
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            username: self.username,
            password: self.password,
        }
    }
}

// Passwords are opaque and must never end up in logs.
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
