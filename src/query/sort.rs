//! Result ordering for inventory queries.
//!
//! Sort keys form a closed set; an unrecognized key is a caller error, not
//! a silent no-op. Sorting is stable and deterministic.

use std::cmp::Ordering;

use crate::model::Comic;

/// Fields the inventory can be ordered by, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    BookName,
    AuthorName,
    YearOfPublication,
    Price,
    Discount,
    NumberOfPages,
    Condition,
    Description,
    CreatedAt,
    UpdatedAt,
}

impl SortKey {
    pub fn from_str(raw: &str) -> Option<Self> {
        match raw {
            "id" => Some(Self::Id),
            "bookName" => Some(Self::BookName),
            "authorName" => Some(Self::AuthorName),
            "yearOfPublication" => Some(Self::YearOfPublication),
            "price" => Some(Self::Price),
            "discount" => Some(Self::Discount),
            "numberOfPages" => Some(Self::NumberOfPages),
            "condition" => Some(Self::Condition),
            "description" => Some(Self::Description),
            "createdAt" => Some(Self::CreatedAt),
            "updatedAt" => Some(Self::UpdatedAt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::BookName => "bookName",
            Self::AuthorName => "authorName",
            Self::YearOfPublication => "yearOfPublication",
            Self::Price => "price",
            Self::Discount => "discount",
            Self::NumberOfPages => "numberOfPages",
            Self::Condition => "condition",
            Self::Description => "description",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// A sort key paired with a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Desc,
        }
    }

    /// Compares two records under this spec.
    ///
    /// Ties compare equal, so a stable sort preserves insertion order for
    /// equal keys. Records without a description sort before records with
    /// one.
    pub fn compare(&self, a: &Comic, b: &Comic) -> Ordering {
        let ordering = match self.key {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::BookName => a.book_name.cmp(&b.book_name),
            SortKey::AuthorName => a.author_name.cmp(&b.author_name),
            SortKey::YearOfPublication => a.year_of_publication.cmp(&b.year_of_publication),
            SortKey::Price => compare_f64(a.price, b.price),
            SortKey::Discount => compare_f64(a.discount, b.discount),
            SortKey::NumberOfPages => a.number_of_pages.cmp(&b.number_of_pages),
            SortKey::Condition => a.condition.as_str().cmp(b.condition.as_str()),
            SortKey::Description => {
                compare_optional(a.description.as_deref(), b.description.as_deref())
            }
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        };

        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl Default for SortSpec {
    /// Listing without an explicit sort key orders by title, ascending.
    fn default() -> Self {
        Self::asc(SortKey::BookName)
    }
}

fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn compare_optional(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, NewComic};

    fn comic(book_name: &str, price: f64) -> Comic {
        Comic::create(NewComic {
            book_name: book_name.to_string(),
            author_name: "Author".to_string(),
            year_of_publication: 2000,
            price,
            discount: 0.0,
            number_of_pages: 32,
            condition: Condition::New,
            description: None,
        })
    }

    #[test]
    fn test_every_wire_name_round_trips() {
        for raw in [
            "id",
            "bookName",
            "authorName",
            "yearOfPublication",
            "price",
            "discount",
            "numberOfPages",
            "condition",
            "description",
            "createdAt",
            "updatedAt",
        ] {
            let key = SortKey::from_str(raw).unwrap();
            assert_eq!(key.as_str(), raw);
        }
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert_eq!(SortKey::from_str("publisher"), None);
        assert_eq!(SortKey::from_str("BOOKNAME"), None);
        assert_eq!(SortKey::from_str(""), None);
    }

    #[test]
    fn test_sort_ascending_and_descending() {
        let a = comic("Akira", 10.0);
        let b = comic("Bone", 20.0);

        let spec = SortSpec::asc(SortKey::Price);
        assert_eq!(spec.compare(&a, &b), Ordering::Less);

        let spec = SortSpec::desc(SortKey::Price);
        assert_eq!(spec.compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn test_default_orders_by_title() {
        let spec = SortSpec::default();
        assert_eq!(spec.key, SortKey::BookName);
        assert_eq!(spec.direction, SortDirection::Asc);

        let a = comic("Akira", 20.0);
        let b = comic("Bone", 10.0);
        assert_eq!(spec.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_ties_compare_equal() {
        let a = comic("Akira", 10.0);
        let b = comic("Bone", 10.0);

        let spec = SortSpec::asc(SortKey::Price);
        assert_eq!(spec.compare(&a, &b), Ordering::Equal);
    }

    #[test]
    fn test_missing_description_sorts_first() {
        let mut a = comic("Akira", 10.0);
        let b = comic("Bone", 10.0);
        a.description = Some("cyberpunk".to_string());

        let spec = SortSpec::asc(SortKey::Description);
        assert_eq!(spec.compare(&b, &a), Ordering::Less);
    }
}
