//! Typed façade over the catalog backend.
//!
//! | Operation      | Endpoint                    |
//! |----------------|-----------------------------|
//! | [`search`]     | `GET /products`             |
//! | [`export`]     | `GET /products/export`      |
//! | [`import`]     | `POST /products/import`     |
//! | [`categories`] | `GET /categories`           |
//!
//! [`search`]: CatalogService::search
//! [`export`]: CatalogService::export
//! [`import`]: CatalogService::import
//! [`categories`]: CatalogService::categories

use web_sys::File;

use crate::config::EXPORT_MIME;
use crate::services::download::{export_file_name, save_bytes};
use crate::services::http::{HttpClient, ResponsePolicy};
use crate::state::{ExportQuery, Notifier, SearchQuery};
use crate::types::{AppResult, Category, ImportOutcome, PageResult, Product};

#[derive(Clone, Copy)]
pub struct CatalogService {
    http: HttpClient,
}

impl CatalogService {
    pub fn new(notifier: Notifier) -> Self {
        Self {
            http: HttpClient::new(notifier),
        }
    }

    pub fn notifier(&self) -> Notifier {
        self.http.notifier()
    }

    /// One page of products matching `query`.
    pub async fn search(&self, query: &SearchQuery) -> AppResult<PageResult<Product>> {
        log::debug!("🔍 Searching products: {:?}", query);
        self.http.get_json("/products", &query.query_pairs()).await
    }

    /// Spreadsheet bytes for the whole filtered set.
    pub async fn export(&self, query: &ExportQuery) -> AppResult<Vec<u8>> {
        log::info!("📥 Exporting products: {:?}", query);
        self.http.get_bytes("/products/export", &query.query_pairs()).await
    }

    /// Uploads `file` for bulk upsert.
    ///
    /// Row-level rejections come back inside the outcome, even when the
    /// backend pairs them with an error status.
    pub async fn import(&self, file: &File) -> AppResult<ImportOutcome> {
        log::info!("📤 Importing {}", file.name());
        self.http
            .post_file("/products/import", "file", file, ResponsePolicy::AcceptDomainBody)
            .await
    }

    /// Category reference data, ordered by `sortOrder`.
    pub async fn categories(&self) -> AppResult<Vec<Category>> {
        let mut categories: Vec<Category> = self.http.get_json("/categories", &[]).await?;
        categories.sort_by_key(|c| c.sort_order);
        Ok(categories)
    }

    /// Exports `query` and saves it as a timestamped file.
    ///
    /// Returns the file name on success.
    pub async fn export_and_download(&self, query: &ExportQuery) -> AppResult<String> {
        let bytes = self.export(query).await?;
        let file_name = export_file_name(chrono::Local::now().naive_local());
        if let Err(e) = save_bytes(&bytes, &file_name, EXPORT_MIME) {
            log::error!("❌ Could not save {}: {}", file_name, e);
            self.notifier().error(e.to_string());
            return Err(e);
        }
        log::info!("✅ Saved {} ({} bytes)", file_name, bytes.len());
        self.notifier().success(format!("Excel download complete: {}", file_name));
        Ok(file_name)
    }
}
