use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::errors::AppError;

/// Garment categories shown in the gallery filter bar
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Suits,
    Formal,
    Traditional,
    Business,
    Casual,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Suits,
        Category::Formal,
        Category::Traditional,
        Category::Business,
        Category::Casual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Suits => "suits",
            Category::Formal => "formal",
            Category::Traditional => "traditional",
            Category::Business => "business",
            Category::Casual => "casual",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == value.trim())
            .ok_or_else(|| AppError::validation_failed(format!("Unknown category: {}", value)))
    }
}

/// Filter selection of the public gallery page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, item: &GalleryItem) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => item.category == *category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim() == "all" {
            Ok(CategoryFilter::All)
        } else {
            value.parse().map(CategoryFilter::Only)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    /// Opaque image payload, usually a data URI or an absolute URL
    #[serde(alias = "imageUrl")]
    pub image_data: String,
    pub created_at: NaiveDate,
}

/// Fields an admin fills in to publish a new gallery item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewGalleryItem {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(alias = "imageUrl")]
    pub image_data: String,
}

impl NewGalleryItem {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        image_data: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: category.into(),
            image_data: image_data.into(),
        }
    }
}

impl GalleryItem {
    /// Creates a gallery item with a fresh ID and today's date
    pub fn new(
        title: String,
        description: String,
        category: Category,
        image_data: String,
    ) -> Self {
        GalleryItem {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            category,
            image_data,
            created_at: Utc::now().date_naive(),
        }
    }
}

fn seed_item(
    id: &str,
    title: &str,
    description: &str,
    image_url: &str,
    category: Category,
    (year, month, day): (i32, u32, u32),
) -> GalleryItem {
    GalleryItem {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category,
        image_data: image_url.to_string(),
        created_at: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
    }
}

/// Items shown before an admin has touched the gallery
pub fn seed_gallery() -> Vec<GalleryItem> {
    vec![
        seed_item(
            "1",
            "Custom Tailored Suit",
            "Premium wool suit with perfect fit",
            "https://images.unsplash.com/photo-1594938298603-c8148c4dae35?w=800&q=80",
            Category::Suits,
            (2025, 1, 15),
        ),
        seed_item(
            "2",
            "Traditional Kebaya",
            "Elegant traditional Indonesian wear",
            "https://images.unsplash.com/photo-1617127365659-c47fa864d8bc?w=800&q=80",
            Category::Traditional,
            (2025, 1, 14),
        ),
        seed_item(
            "3",
            "Wedding Dress",
            "Bespoke wedding gown with intricate details",
            "https://images.unsplash.com/photo-1595777216528-071e0127ccf4?w=800&q=80",
            Category::Formal,
            (2025, 1, 13),
        ),
        seed_item(
            "4",
            "Business Blazer",
            "Sharp professional blazer",
            "https://images.unsplash.com/photo-1507679799987-c73779587ccf?w=800&q=80",
            Category::Business,
            (2025, 1, 12),
        ),
        seed_item(
            "5",
            "Evening Gown",
            "Stunning evening dress for special occasions",
            "https://images.unsplash.com/photo-1566174053879-31528523f8ae?w=800&q=80",
            Category::Formal,
            (2025, 1, 11),
        ),
        seed_item(
            "6",
            "Casual Shirt",
            "Perfectly fitted casual wear",
            "https://images.unsplash.com/photo-1602810316498-ab67cf68c8e1?w=800&q=80",
            Category::Casual,
            (2025, 1, 10),
        ),
    ]
}
