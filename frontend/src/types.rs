//! Common types used across the frontend application.
//!
//! This module centralizes the shapes exchanged with the catalog
//! backend so services and components agree on them.
//!
//! # Categories
//!
//! - **Catalog Types** - Products and categories
//! - **API Types** - Paged search results and import reports
//! - **Error Types** - Transport-level failures

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Catalog Types
// =============================================================================

/// Lifecycle status of a product.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    Active,
    Inactive,
    Discontinued,
}

impl ProductStatus {
    /// All statuses, in the order the filter lists them.
    pub const ALL: [ProductStatus; 3] = [
        ProductStatus::Active,
        ProductStatus::Inactive,
        ProductStatus::Discontinued,
    ];

    /// Wire value, as sent in the `status` query parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            ProductStatus::Active => "ACTIVE",
            ProductStatus::Inactive => "INACTIVE",
            ProductStatus::Discontinued => "DISCONTINUED",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ProductStatus::Active => "Active",
            ProductStatus::Inactive => "Inactive",
            ProductStatus::Discontinued => "Discontinued",
        }
    }

    /// Get CSS class for the status badge.
    pub fn css_class(&self) -> &'static str {
        match self {
            ProductStatus::Active => "status status-active",
            ProductStatus::Inactive => "status status-inactive",
            ProductStatus::Discontinued => "status status-discontinued",
        }
    }
}

/// A catalog entry as returned by the search endpoint.
///
/// Never mutated client-side; changes only happen through import.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub product_code: String,
    pub product_name: String,
    /// Category display name
    pub category: String,
    pub price: f64,
    pub stock_quantity: i64,
    pub status: ProductStatus,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Reference data used to populate the category filter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub category_code: String,
    pub category_name: String,
    pub sort_order: i32,
}

// =============================================================================
// API Response Types
// =============================================================================

/// One page of search results.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    /// Rows of the current page
    pub data: Vec<T>,
    /// Size of the whole filtered set
    pub total: u64,
    pub success: bool,
    /// Echoed 1-based page number
    pub current: u32,
    /// Echoed page size
    pub page_size: u32,
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            total: 0,
            success: true,
            current: 1,
            page_size: crate::config::DEFAULT_PAGE_SIZE,
        }
    }
}

impl<T> PageResult<T> {
    /// Number of pages needed to show `total` rows.
    pub fn page_count(&self) -> u32 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.page_size)) as u32
    }
}

/// A single row-level validation failure reported by import.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRowError {
    /// Spreadsheet row number
    pub row: u32,
    /// Column the error refers to
    pub field: String,
    pub message: String,
}

impl ImportRowError {
    /// Display key for the error table. Not guaranteed unique.
    pub fn key(&self) -> String {
        format!("{}-{}", self.row, self.field)
    }
}

/// Report returned by the import endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    #[serde(default)]
    pub success: bool,
    pub total_rows: u32,
    pub inserted_count: u32,
    pub updated_count: u32,
    pub error_count: u32,
    #[serde(default)]
    pub errors: Vec<ImportRowError>,
}

impl ImportOutcome {
    /// A clean import has no errors at all.
    pub fn is_clean(&self) -> bool {
        self.error_count == 0
    }

    /// One-line summary shown in the result alert.
    pub fn summary(&self) -> String {
        let mut line = format!(
            "Processed: {} rows / Inserted: {} / Updated: {}",
            self.total_rows, self.inserted_count, self.updated_count
        );
        if self.error_count > 0 {
            line.push_str(&format!(" / Errors: {}", self.error_count));
        }
        line
    }

    /// Lists the ways this report disagrees with itself.
    ///
    /// An inconsistent report is still displayed; the problems are only
    /// logged.
    pub fn inconsistencies(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let accounted =
            u64::from(self.inserted_count) + u64::from(self.updated_count) + u64::from(self.error_count);
        if accounted > u64::from(self.total_rows) {
            problems.push(format!(
                "inserted + updated + errors ({}) exceeds total rows ({})",
                accounted, self.total_rows
            ));
        }
        if self.errors.len() != self.error_count as usize {
            problems.push(format!(
                "errorCount is {} but {} errors were listed",
                self.error_count,
                self.errors.len()
            ));
        }
        problems
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Transport-level failures.
///
/// Domain failures (rows rejected by import) are not errors; they arrive
/// inside an [`ImportOutcome`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum AppError {
    /// Request could not be sent or the connection failed.
    #[error("{0}")]
    Network(String),

    /// Request exceeded the configured timeout.
    #[error("Request timed out after {0} seconds")]
    Timeout(u32),

    /// Backend answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Request could not be built.
    #[error("Failed to build request: {0}")]
    Request(String),

    /// A browser API was unavailable or refused the call.
    #[error("Browser error: {0}")]
    Browser(String),
}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserialization() {
        let json = r#"{
            "id": 7,
            "productCode": "P-0007",
            "productName": "Widget",
            "category": "Electronics",
            "price": 1980,
            "stockQuantity": 12,
            "status": "DISCONTINUED",
            "createdAt": "2024-03-01T09:30:00",
            "updatedAt": "2024-04-02T18:05:59"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.product_code, "P-0007");
        assert_eq!(product.status, ProductStatus::Discontinued);
        assert_eq!(product.price, 1980.0);
        assert!(product.description.is_none());
        assert_eq!(product.updated_at.to_string(), "2024-04-02 18:05:59");
    }

    #[test]
    fn test_page_result_deserialization() {
        let json = r#"{
            "data": [
                {"id": 1, "categoryCode": "ELEC", "categoryName": "Electronics", "sortOrder": 1}
            ],
            "total": 41,
            "success": true,
            "current": 2,
            "pageSize": 20
        }"#;

        let page: PageResult<Category> = serde_json::from_str(json).unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.total, 41);
        assert_eq!(page.page_count(), 3);
        assert_eq!(page.data[0].category_name, "Electronics");
    }

    #[test]
    fn test_import_outcome_clean() {
        let json = r#"{
            "success": true,
            "totalRows": 10,
            "insertedCount": 8,
            "updatedCount": 2,
            "errorCount": 0,
            "errors": []
        }"#;

        let outcome: ImportOutcome = serde_json::from_str(json).unwrap();
        assert!(outcome.is_clean());
        assert!(outcome.inconsistencies().is_empty());
        assert_eq!(outcome.summary(), "Processed: 10 rows / Inserted: 8 / Updated: 2");
    }

    #[test]
    fn test_import_outcome_missing_errors_defaults_empty() {
        let json = r#"{"totalRows": 3, "insertedCount": 3, "updatedCount": 0, "errorCount": 0}"#;

        let outcome: ImportOutcome = serde_json::from_str(json).unwrap();
        assert!(outcome.errors.is_empty());
        assert!(!outcome.success);
        assert!(outcome.is_clean());
    }

    #[test]
    fn test_import_outcome_inconsistencies() {
        let outcome = ImportOutcome {
            success: false,
            total_rows: 2,
            inserted_count: 2,
            updated_count: 0,
            error_count: 1,
            errors: vec![],
        };

        let problems = outcome.inconsistencies();
        assert_eq!(problems.len(), 2);
        assert!(!outcome.is_clean());
        assert!(outcome.summary().ends_with(" / Errors: 1"));
    }

    #[test]
    fn test_row_error_key() {
        let error = ImportRowError {
            row: 4,
            field: "category".to_string(),
            message: "unknown category".to_string(),
        };
        assert_eq!(error.key(), "4-category");
    }

    #[test]
    fn test_status_error_displays_message() {
        let error = AppError::Status {
            status: 400,
            message: "pageSize must be at most 100".to_string(),
        };
        assert_eq!(error.to_string(), "pageSize must be at most 100");
        assert_eq!(AppError::Timeout(30).to_string(), "Request timed out after 30 seconds");
    }
}
