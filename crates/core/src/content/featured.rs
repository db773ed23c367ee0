//! Homepage curation: featured slots and section layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::ContentError;

/// What a featured slot points at.
///
/// Most variants reference another document; `Collection` is a
/// free-form curated link, e.g. a seasonal landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FeaturedTarget {
    Review { review_id: Uuid },
    Venue { venue_id: Uuid },
    Category { category_id: Uuid },
    Guide { guide_id: Uuid },
    Collection { title: String, url: String },
}

impl FeaturedTarget {
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::Review { .. } => "review",
            Self::Venue { .. } => "venue",
            Self::Category { .. } => "category",
            Self::Guide { .. } => "guide",
            Self::Collection { .. } => "collection",
        }
    }
}

/// A curated homepage slot with an optional publication window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedItem {
    pub id: Uuid,
    #[serde(flatten)]
    pub target: FeaturedTarget,
    pub position: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl FeaturedItem {
    pub fn new(target: FeaturedTarget) -> Self {
        Self {
            id: Uuid::new_v4(),
            target,
            position: 0,
            publish_at: None,
            expire_at: None,
            updated_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_position(mut self, position: u32) -> Self {
        self.position = position;
        self
    }

    pub fn with_window(
        mut self,
        publish_at: Option<DateTime<Utc>>,
        expire_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.publish_at = publish_at;
        self.expire_at = expire_at;
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    /// Whether the slot is visible at `now`: at or past `publish_at`
    /// and strictly before `expire_at`.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        if let Some(publish_at) = self.publish_at {
            if now < publish_at {
                return false;
            }
        }
        if let Some(expire_at) = self.expire_at {
            if now >= expire_at {
                return false;
            }
        }
        true
    }
}

/// A featured slot resolved against its target document, ready for
/// rendering: the card's own title and destination URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedCard {
    pub kind: String,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

/// Homepage section kinds the editor can arrange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Featured,
    LatestReviews,
    TopVenues,
    Categories,
    Guides,
}

/// One configurable block of the homepage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomepageSection {
    pub id: Uuid,
    pub kind: SectionKind,
    pub title: String,
    /// How many items the section shows at most.
    pub item_limit: u32,
    pub enabled: bool,
    pub position: u32,
    pub updated_at: DateTime<Utc>,
}

impl HomepageSection {
    pub fn new(kind: SectionKind, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            item_limit: 6,
            enabled: true,
            position: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_item_limit(mut self, item_limit: u32) -> Self {
        self.item_limit = item_limit;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_position(mut self, position: u32) -> Self {
        self.position = position;
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.title.trim().is_empty() {
            return Err(ContentError::MissingField { field: "title" });
        }
        if !(1..=24).contains(&self.item_limit) {
            return Err(ContentError::InvalidData(
                "El límite de elementos debe estar entre 1 y 24".to_string(),
            ));
        }
        Ok(())
    }
}

/// Featured slots that are live at `now`, ordered by position.
pub fn live_featured(items: &[FeaturedItem], now: DateTime<Utc>) -> Vec<&FeaturedItem> {
    let mut live: Vec<&FeaturedItem> = items.iter().filter(|item| item.is_live(now)).collect();
    live.sort_by_key(|item| item.position);
    live
}

/// Enabled homepage sections, ordered by position.
pub fn visible_sections(sections: &[HomepageSection]) -> Vec<&HomepageSection> {
    let mut visible: Vec<&HomepageSection> =
        sections.iter().filter(|section| section.enabled).collect();
    visible.sort_by_key(|section| section.position);
    visible
}
