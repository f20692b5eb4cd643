//! Shared DTOs for the identity provider and backend boundaries.
//!
//! DESIGN
//! ======
//! `BackendProfile` mirrors the backend login response (camelCase JSON). Every
//! field is optional so a partially populated profile still decodes; a profile
//! with no fields at all is treated as an empty (untrusted) login response.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

const FALLBACK_DISPLAY_NAME: &str = "User";
const FALLBACK_ROLE: &str = "User";
const FALLBACK_PLAN: &str = "ANONYMOUS";

/// Plain-data snapshot of a federated identity, safe to share through context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederatedUser {
    /// Stable identity-provider identifier.
    pub uid: String,
    /// Email asserted by the identity provider, if any.
    pub email: Option<String>,
    /// Display name asserted by the identity provider, if any.
    pub display_name: Option<String>,
}

impl FederatedUser {
    #[must_use]
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into(), email: None, display_name: None }
    }
}

/// Authoritative application profile returned by a successful backend login.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackendProfile {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    /// Subscription tier name (e.g. `"explorer"`).
    pub subscription: Option<String>,
    pub photo_url: Option<String>,
}

impl BackendProfile {
    /// True when the backend sent no usable profile fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [&self.display_name, &self.email, &self.role, &self.subscription, &self.photo_url]
            .iter()
            .all(|field| field.as_deref().is_none_or(|v| v.trim().is_empty()))
    }

    /// Name to greet the user with: display name, then email local part, then `"User"`.
    #[must_use]
    pub fn display_name_or_default(&self) -> String {
        if let Some(name) = non_blank(self.display_name.as_deref()) {
            return name.to_owned();
        }
        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .and_then(|local| non_blank(Some(local)))
            .unwrap_or(FALLBACK_DISPLAY_NAME)
            .to_owned()
    }

    /// Up to two uppercase initials derived from the display name.
    #[must_use]
    pub fn initials(&self) -> String {
        self.display_name_or_default()
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }

    #[must_use]
    pub fn role_or_default(&self) -> &str {
        non_blank(self.role.as_deref()).unwrap_or(FALLBACK_ROLE)
    }

    /// Subscription plan label, uppercased, `ANONYMOUS` when missing.
    #[must_use]
    pub fn plan(&self) -> String {
        non_blank(self.subscription.as_deref())
            .unwrap_or(FALLBACK_PLAN)
            .to_uppercase()
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}
