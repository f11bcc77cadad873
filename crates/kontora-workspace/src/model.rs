//! Domain types: users, workspaces, quota records and subscription tiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// An authenticated user, as reported by the authentication collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable user identifier.
    pub id: Uuid,
    /// Email address, when the provider exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    /// A user with only an identifier.
    pub fn new(id: Uuid) -> Self {
        Self { id, email: None }
    }

    /// Attach an email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// A workspace as seen by the application.
///
/// `id` and `slug` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Workspace {
    /// Store-generated identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// URL-safe, unique slug.
    pub slug: String,
}

// ============================================================================
// Entity kinds
// ============================================================================

/// Entities whose creation is gated by a workspace quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// CRM contacts.
    Contacts,
    /// Sales deals.
    Deals,
    /// Workspace members.
    Users,
}

impl EntityKind {
    /// All gated kinds.
    pub const ALL: [EntityKind; 3] = [Self::Contacts, Self::Deals, Self::Users];

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contacts => "contacts",
            Self::Deals => "deals",
            Self::Users => "users",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unrecognized entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown entity kind: {0}")]
pub struct UnknownEntityKind(pub String);

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contacts" => Ok(Self::Contacts),
            "deals" => Ok(Self::Deals),
            "users" => Ok(Self::Users),
            other => Err(UnknownEntityKind(other.to_string())),
        }
    }
}

// ============================================================================
// Limits
// ============================================================================

/// Whether one more entity fits: `current < max`.
///
/// Every quota decision goes through this function.
pub fn within_limit(current: i64, max: i64) -> bool {
    current < max
}

/// A `{current, max}` pair for one entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Entities that exist now.
    pub current: i64,
    /// Allowed maximum.
    pub max: i64,
}

impl Usage {
    /// Whether one more entity fits.
    pub fn has_room(&self) -> bool {
        within_limit(self.current, self.max)
    }
}

/// Per-workspace usage counters.
///
/// Counters are maintained outside this crate; here they are only read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct QuotaRecord {
    /// Workspace the counters belong to.
    pub workspace_id: Uuid,
    /// Contacts in use.
    pub current_contacts: i64,
    /// Contact limit.
    pub max_contacts: i64,
    /// Deals in use.
    pub current_deals: i64,
    /// Deal limit.
    pub max_deals: i64,
    /// Members in use.
    pub current_users: i64,
    /// Member limit.
    pub max_users: i64,
}

impl QuotaRecord {
    /// A zeroed record carrying the limits of `tier`.
    pub fn initial(workspace_id: Uuid, tier: Tier) -> Self {
        let limits = TierLimits::for_tier(tier);
        Self {
            workspace_id,
            current_contacts: 0,
            max_contacts: limits.max_contacts,
            current_deals: 0,
            max_deals: limits.max_deals,
            current_users: 0,
            max_users: limits.max_users,
        }
    }

    /// The `{current, max}` pair for `kind`.
    pub fn usage(&self, kind: EntityKind) -> Usage {
        match kind {
            EntityKind::Contacts => Usage {
                current: self.current_contacts,
                max: self.max_contacts,
            },
            EntityKind::Deals => Usage {
                current: self.current_deals,
                max: self.max_deals,
            },
            EntityKind::Users => Usage {
                current: self.current_users,
                max: self.max_users,
            },
        }
    }
}

// ============================================================================
// Tiers
// ============================================================================

/// Subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Free plan.
    #[default]
    Free,
    /// Entry paid plan.
    Starter,
    /// Team plan.
    Professional,
    /// Custom contracts.
    Enterprise,
}

impl Tier {
    /// All tiers, cheapest first.
    pub const ALL: [Tier; 4] = [
        Self::Free,
        Self::Starter,
        Self::Professional,
        Self::Enterprise,
    ];

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Starter => "starter",
            Self::Professional => "professional",
            Self::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unrecognized tier name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tier: {0}")]
pub struct UnknownTier(pub String);

impl FromStr for Tier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tier::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTier(s.to_string()))
    }
}

/// Static maximum counts for a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierLimits {
    /// Contact limit.
    pub max_contacts: i64,
    /// Deal limit.
    pub max_deals: i64,
    /// Member limit.
    pub max_users: i64,
}

impl TierLimits {
    /// The reference limits for `tier`.
    pub const fn for_tier(tier: Tier) -> Self {
        match tier {
            Tier::Free => Self {
                max_contacts: 100,
                max_deals: 25,
                max_users: 1,
            },
            Tier::Starter => Self {
                max_contacts: 1_000,
                max_deals: 250,
                max_users: 3,
            },
            Tier::Professional => Self {
                max_contacts: 10_000,
                max_deals: 2_500,
                max_users: 10,
            },
            Tier::Enterprise => Self {
                max_contacts: 100_000,
                max_deals: 25_000,
                max_users: 50,
            },
        }
    }

    /// The limit for `kind`.
    pub fn max(&self, kind: EntityKind) -> i64 {
        match kind {
            EntityKind::Contacts => self.max_contacts,
            EntityKind::Deals => self.max_deals,
            EntityKind::Users => self.max_users,
        }
    }

    /// Whether `current` entities of `kind` leave room for one more.
    pub fn allows(&self, kind: EntityKind, current: i64) -> bool {
        within_limit(current, self.max(kind))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_within_limit() {
        assert!(within_limit(4, 5));
        assert!(!within_limit(5, 5));
        assert!(!within_limit(6, 5));
        assert!(!within_limit(0, 0));
    }

    #[test]
    fn test_entity_kind_parse() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.as_str().parse::<EntityKind>().unwrap(), kind);
        }
        let err = "invoices".parse::<EntityKind>().unwrap_err();
        assert_eq!(err, UnknownEntityKind("invoices".into()));
        assert!("Contacts".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_tier_parse_and_display() {
        assert_eq!("professional".parse::<Tier>().unwrap(), Tier::Professional);
        assert_eq!(Tier::Starter.to_string(), "starter");
        assert!("platinum".parse::<Tier>().is_err());
        assert_eq!(Tier::default(), Tier::Free);
    }

    #[test]
    fn test_tier_serde_lowercase() {
        let json = serde_json::to_string(&Tier::Enterprise).unwrap();
        assert_eq!(json, "\"enterprise\"");
        let tier: Tier = serde_json::from_str("\"starter\"").unwrap();
        assert_eq!(tier, Tier::Starter);
    }

    #[test]
    fn test_tier_limits_grow_with_tier() {
        for pair in Tier::ALL.windows(2) {
            let lower = TierLimits::for_tier(pair[0]);
            let higher = TierLimits::for_tier(pair[1]);
            for kind in EntityKind::ALL {
                assert!(higher.max(kind) > lower.max(kind));
            }
        }
    }

    #[test]
    fn test_tier_limits_allows() {
        let free = TierLimits::for_tier(Tier::Free);
        assert!(free.allows(EntityKind::Contacts, 99));
        assert!(!free.allows(EntityKind::Contacts, 100));
        assert!(free.allows(EntityKind::Users, 0));
        assert!(!free.allows(EntityKind::Users, 1));
    }

    #[test]
    fn test_quota_record_initial() {
        let id = Uuid::new_v4();
        let record = QuotaRecord::initial(id, Tier::Starter);
        assert_eq!(record.workspace_id, id);
        assert_eq!(
            record.usage(EntityKind::Deals),
            Usage {
                current: 0,
                max: 250
            }
        );
        assert!(EntityKind::ALL.iter().all(|k| record.usage(*k).has_room()));
    }

    #[test]
    fn test_quota_record_usage_selects_kind() {
        let record = QuotaRecord {
            workspace_id: Uuid::new_v4(),
            current_contacts: 5,
            max_contacts: 5,
            current_deals: 1,
            max_deals: 10,
            current_users: 2,
            max_users: 3,
        };
        assert!(!record.usage(EntityKind::Contacts).has_room());
        assert!(record.usage(EntityKind::Deals).has_room());
        assert_eq!(record.usage(EntityKind::Users).current, 2);
    }

    #[test]
    fn test_workspace_serialization() {
        let ws = Workspace {
            id: Uuid::nil(),
            name: "Acme Legal".into(),
            slug: "acme-legal".into(),
        };
        let json = serde_json::to_value(&ws).unwrap();
        assert_eq!(json["name"], "Acme Legal");
        assert_eq!(json["slug"], "acme-legal");
    }

    #[test]
    fn test_user_builder() {
        let user = User::new(Uuid::nil()).with_email("owner@example.com");
        assert_eq!(user.email.as_deref(), Some("owner@example.com"));
    }
}
