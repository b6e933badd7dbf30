// Document-number series.

use hrdesk_api::models::{DocumentKind, DocumentPreview, DocumentSettings};
use tracing::info;

use crate::console::Console;
use crate::error::CoreError;
use crate::store::ListMutation;

impl Console {
    pub async fn fetch_document_settings(
        &self,
        kind: DocumentKind,
    ) -> Result<DocumentSettings, CoreError> {
        self.store()
            .document_settings
            .track(
                "fetch_document_settings",
                self.client().get_document_settings(kind),
                |s| ListMutation::Insert(s.clone()),
            )
            .await
    }

    pub async fn update_document_settings(
        &self,
        settings: &DocumentSettings,
    ) -> Result<DocumentSettings, CoreError> {
        self.store()
            .document_settings
            .track(
                "update_document_settings",
                self.client().update_document_settings(settings),
                |s| ListMutation::Insert(s.clone()),
            )
            .await
    }

    /// Preview the next number in a series. A series that was never set up
    /// answers 404; it is initialized with defaults and the preview retried
    /// once.
    pub async fn preview_document_number(
        &self,
        kind: DocumentKind,
    ) -> Result<DocumentPreview, CoreError> {
        self.store()
            .document_previews
            .track(
                "preview_document_number",
                self.preview_or_initialize(kind),
                |p| ListMutation::Insert(p.clone()),
            )
            .await
    }

    async fn preview_or_initialize(&self, kind: DocumentKind) -> Result<DocumentPreview, CoreError> {
        match self.client().preview_document_number(kind).await {
            Err(e) if e.is_not_found() => {
                info!(kind = kind.as_ref(), "document series missing; creating defaults");
                self.client().create_default_document_settings(kind).await?;
                Ok(self.client().preview_document_number(kind).await?)
            }
            other => other.map_err(CoreError::from),
        }
    }
}
