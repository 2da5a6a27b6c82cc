//! Service catalog: the static list of quizzable items
//!
//! A catalog is loaded once at startup, either from the built-in AWS service
//! list or from a JSON file, and is never mutated afterwards. Items can be
//! grouped by category so a game can restrict its questions to one group.

mod builtin;

use std::{fs, path::Path};

use garde::Validate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{constants, options::CategoryFilter};

/// Reference to the icon of a service: a URL or a file name
///
/// File names are resolved relative to the configured icons directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(transparent)]
#[garde(transparent)]
pub struct IconReference(
    #[garde(length(min = 1, max = constants::catalog::MAX_ICON_LENGTH))] String,
);

impl IconReference {
    /// Creates a reference from a file name or URL
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Returns the raw reference string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this reference points to a remote resource
    pub fn is_remote(&self) -> bool {
        self.0.starts_with("http://") || self.0.starts_with("https://")
    }
}

/// A single quizzable service
///
/// Identity is by value: two items are the same question when all their
/// fields match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
pub struct ServiceItem {
    /// Service name shown on the answer button
    #[garde(length(min = 1, max = constants::catalog::MAX_NAME_LENGTH))]
    name: String,
    /// Icon shown in the question panel
    #[garde(dive)]
    icon: IconReference,
    /// Optional category key, e.g. `compute`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(length(min = 1, max = constants::catalog::MAX_CATEGORY_LENGTH))]
    category: Option<String>,
}

impl ServiceItem {
    /// Creates an uncategorized item
    pub fn new(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: IconReference::new(icon),
            category: None,
        }
    }

    /// Sets the category of this item
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// The service name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The icon reference
    pub fn icon(&self) -> &IconReference {
        &self.icon
    }

    /// The category key, if any
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// Errors that can occur when loading a catalog
#[derive(Error, Debug)]
pub enum Error {
    /// The catalog file could not be read
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    /// The catalog file is not valid JSON for a catalog
    #[error("failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),
    /// The catalog parsed but breaks a validation rule
    #[error("catalog is invalid: {0}")]
    Invalid(#[from] garde::Report),
}

/// Rejects catalogs where two items share a name
fn validate_unique_names(items: &[ServiceItem], _ctx: &()) -> garde::Result {
    match items.iter().map(ServiceItem::name).duplicates().next() {
        None => Ok(()),
        Some(name) => Err(garde::Error::new(format!("duplicate service name {name:?}"))),
    }
}

/// Serialization helper for Catalog struct
#[derive(Deserialize)]
struct CatalogSerde {
    items: Vec<ServiceItem>,
}

/// Ordered, immutable collection of service items
///
/// Besides the flat item list, the catalog keeps a per-category index in
/// order of first appearance. The index is rebuilt on deserialization and
/// is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(from = "CatalogSerde")]
pub struct Catalog {
    /// All items in load order
    #[garde(dive, custom(|items: &Vec<ServiceItem>, ctx| validate_unique_names(items, ctx)))]
    items: Vec<ServiceItem>,

    /// Category key to item positions (not serialized)
    #[serde(skip_serializing)]
    #[garde(skip)]
    categories: Vec<(String, Vec<usize>)>,
}

impl From<CatalogSerde> for Catalog {
    /// Rebuilds the category index from the item list
    fn from(serde: CatalogSerde) -> Self {
        let CatalogSerde { items } = serde;
        let mut categories: Vec<(String, Vec<usize>)> = Vec::new();
        for (position, item) in items.iter().enumerate() {
            let Some(category) = item.category() else {
                continue;
            };
            match categories.iter_mut().find(|(name, _)| name == category) {
                Some((_, positions)) => positions.push(position),
                None => categories.push((category.to_owned(), vec![position])),
            }
        }
        Self { items, categories }
    }
}

impl Catalog {
    /// Builds a catalog from items after validating them
    ///
    /// # Errors
    ///
    /// Returns `Error::Invalid` if an item has an empty or oversized field
    /// or if two items share a name.
    pub fn new(items: Vec<ServiceItem>) -> Result<Self, Error> {
        let catalog = Self::from(CatalogSerde { items });
        catalog.validate()?;
        Ok(catalog)
    }

    /// The built-in AWS service catalog
    pub fn builtin() -> Self {
        Self::from(CatalogSerde {
            items: builtin::SERVICES
                .iter()
                .map(|(name, icon, category)| ServiceItem::new(*name, *icon).with_category(*category))
                .collect(),
        })
    }

    /// Parses and validates a catalog from its JSON form
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` if the text is not a catalog document and
    /// `Error::Invalid` if it breaks a validation rule.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        let catalog: Self = serde_json::from_str(text)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reads a catalog file
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read, otherwise the errors
    /// of [`Catalog::from_json`].
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)?;
        let catalog = Self::from_json(&text)?;
        tracing::info!(
            path = %path.display(),
            items = catalog.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// All items in load order
    pub fn items(&self) -> &[ServiceItem] {
        &self.items
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Category keys in order of first appearance
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }

    /// Items belonging to one category, empty if the category is unknown
    pub fn category(&self, name: &str) -> Vec<&ServiceItem> {
        self.categories
            .iter()
            .find(|(category, _)| category == name)
            .map(|(_, positions)| positions.iter().map(|p| &self.items[*p]).collect())
            .unwrap_or_default()
    }

    /// The first item shown with this icon
    pub fn by_icon(&self, icon: &IconReference) -> Option<&ServiceItem> {
        self.items.iter().find(|item| item.icon() == icon)
    }

    /// The items a game with the given filter draws questions from
    pub fn pool(&self, filter: &CategoryFilter) -> Vec<&ServiceItem> {
        match filter {
            CategoryFilter::All => self.items.iter().collect(),
            CategoryFilter::Named(name) => self.category(name),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn create_test_catalog() -> Catalog {
        Catalog::new(vec![
            ServiceItem::new("Amazon EC2", "ec2.png").with_category("compute"),
            ServiceItem::new("Amazon S3", "s3.png").with_category("storage"),
            ServiceItem::new("AWS Lambda", "lambda.png").with_category("compute"),
            ServiceItem::new("Amazon Lightsail", "lightsail.png"),
        ])
        .unwrap()
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.len(), 56);
        assert_eq!(catalog.categories().count(), 11);
    }

    #[test]
    fn test_by_icon() {
        let catalog = create_test_catalog();
        let item = catalog.by_icon(&IconReference::new("lambda.png")).unwrap();
        assert_eq!(item.name(), "AWS Lambda");
        assert!(catalog.by_icon(&IconReference::new("sqs.png")).is_none());
    }

    #[test]
    fn test_builtin_catalog_category_sizes() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.category("compute").len(), 8);
        assert_eq!(catalog.category("networking").len(), 6);
        assert_eq!(catalog.category("api").len(), 2);
    }

    #[test]
    fn test_category_index_order() {
        let catalog = create_test_catalog();
        assert_eq!(catalog.categories().collect_vec(), ["compute", "storage"]);
        let compute = catalog.category("compute");
        assert_eq!(
            compute.iter().map(|i| i.name()).collect_vec(),
            ["Amazon EC2", "AWS Lambda"]
        );
    }

    #[test]
    fn test_unknown_category_is_empty() {
        let catalog = create_test_catalog();
        assert!(catalog.category("quantum").is_empty());
        assert!(
            catalog
                .pool(&CategoryFilter::Named("quantum".to_owned()))
                .is_empty()
        );
    }

    #[test]
    fn test_pool_all() {
        let catalog = create_test_catalog();
        assert_eq!(catalog.pool(&CategoryFilter::All).len(), 4);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = Catalog::new(vec![
            ServiceItem::new("Amazon S3", "s3.png"),
            ServiceItem::new("Amazon S3", "s3-other.png"),
        ]);
        assert!(matches!(result, Err(Error::Invalid(_))));
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = Catalog::new(vec![ServiceItem::new("", "s3.png")]);
        assert!(matches!(result, Err(Error::Invalid(_))));
    }

    #[test]
    fn test_empty_icon_rejected() {
        let result = Catalog::new(vec![ServiceItem::new("Amazon S3", "")]);
        assert!(matches!(result, Err(Error::Invalid(_))));
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = Catalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_from_json() {
        let catalog = Catalog::from_json(
            r#"{"items": [
                {"name": "Amazon EC2", "icon": "https://example.com/ec2.png", "category": "compute"},
                {"name": "Amazon S3", "icon": "s3.png"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.items()[0].icon().is_remote());
        assert!(!catalog.items()[1].icon().is_remote());
        assert_eq!(catalog.items()[1].category(), None);
        assert_eq!(catalog.category("compute").len(), 1);
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            Catalog::from_json("{\"items\": 3}"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_from_json_duplicate() {
        let result = Catalog::from_json(
            r#"{"items": [
                {"name": "Amazon EC2", "icon": "a.png"},
                {"name": "Amazon EC2", "icon": "b.png"}
            ]}"#,
        );
        assert!(matches!(result, Err(Error::Invalid(_))));
    }

    #[test]
    fn test_serialization_round_trip_rebuilds_index() {
        let catalog = create_test_catalog();
        let text = serde_json::to_string(&catalog).unwrap();
        assert!(!text.contains("categories"));

        let restored = Catalog::from_json(&text).unwrap();
        assert_eq!(restored.items(), catalog.items());
        assert_eq!(restored.category("compute").len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Catalog::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(
            &path,
            r#"{"items": [{"name": "Amazon VPC", "icon": "vpc.png", "category": "networking"}]}"#,
        )
        .unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.items()[0].name(), "Amazon VPC");
    }
}
