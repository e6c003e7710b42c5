//! Comic record types.
//!
//! Wire names are camelCase (`bookName`, `yearOfPublication`, ...) to match
//! the published API; Rust field names stay snake_case via serde renames.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Physical condition of a comic book.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    New,
    Used,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Used => "used",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "new" => Some(Self::New),
            "used" => Some(Self::Used),
            _ => None,
        }
    }
}

/// A comic book as persisted in the store.
///
/// `id` is assigned by the store and immutable; `created_at`/`updated_at`
/// are maintained by the store on write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comic {
    pub id: Uuid,
    pub book_name: String,
    pub author_name: String,
    pub year_of_publication: i64,
    pub price: f64,
    pub discount: f64,
    pub number_of_pages: u32,
    pub condition: Condition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comic {
    /// Materializes a validated creation payload into a stored record.
    pub fn create(new: NewComic) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            book_name: new.book_name,
            author_name: new.author_name,
            year_of_publication: new.year_of_publication,
            price: new.price,
            discount: new.discount,
            number_of_pages: new.number_of_pages,
            condition: new.condition,
            description: new.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Bumps the modification timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Validated payload for creating a comic.
///
/// Produced by the validator, never deserialized straight off the wire:
/// type errors must surface as field-level violations, not serde failures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewComic {
    pub book_name: String,
    pub author_name: String,
    pub year_of_publication: i64,
    pub price: f64,
    #[serde(default)]
    pub discount: f64,
    pub number_of_pages: u32,
    pub condition: Condition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Typed partial update: `None` leaves the field untouched.
///
/// Id and timestamps are deliberately absent: they cannot be patched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComicPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_of_publication: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_pages: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ComicPatch {
    /// Returns true when the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.book_name.is_none()
            && self.author_name.is_none()
            && self.year_of_publication.is_none()
            && self.price.is_none()
            && self.discount.is_none()
            && self.number_of_pages.is_none()
            && self.condition.is_none()
            && self.description.is_none()
    }

    /// Merges the present fields into `comic`, leaving the rest untouched.
    pub fn apply(&self, comic: &mut Comic) {
        if let Some(ref v) = self.book_name {
            comic.book_name = v.clone();
        }
        if let Some(ref v) = self.author_name {
            comic.author_name = v.clone();
        }
        if let Some(v) = self.year_of_publication {
            comic.year_of_publication = v;
        }
        if let Some(v) = self.price {
            comic.price = v;
        }
        if let Some(v) = self.discount {
            comic.discount = v;
        }
        if let Some(v) = self.number_of_pages {
            comic.number_of_pages = v;
        }
        if let Some(v) = self.condition {
            comic.condition = v;
        }
        if let Some(ref v) = self.description {
            comic.description = Some(v.clone());
        }
    }
}
