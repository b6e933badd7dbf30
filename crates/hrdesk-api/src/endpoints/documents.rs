// Document-number series (invoices, quotations, ...).

use crate::client::{HrClient, Service};
use crate::error::Error;
use crate::models::{DocumentKind, DocumentPreview, DocumentSettings};

impl HrClient {
    fn document_path(&self, kind: DocumentKind) -> String {
        format!(
            "document-settings/company/{}/{}",
            self.company_id(),
            kind.as_ref()
        )
    }

    pub async fn get_document_settings(
        &self,
        kind: DocumentKind,
    ) -> Result<DocumentSettings, Error> {
        self.get(Service::Api, &self.document_path(kind)).await
    }

    pub async fn update_document_settings(
        &self,
        settings: &DocumentSettings,
    ) -> Result<DocumentSettings, Error> {
        self.put(Service::Api, &self.document_path(settings.kind), settings)
            .await
    }

    /// Initialize a series with default settings.
    pub async fn create_default_document_settings(
        &self,
        kind: DocumentKind,
    ) -> Result<DocumentSettings, Error> {
        self.post(
            Service::Api,
            &format!("{}/default", self.document_path(kind)),
            &DocumentSettings::defaults_for(kind),
            None,
        )
        .await
    }

    /// Preview the next document number. Answers 404 when the series has
    /// never been initialized.
    pub async fn preview_document_number(
        &self,
        kind: DocumentKind,
    ) -> Result<DocumentPreview, Error> {
        self.get(
            Service::Api,
            &format!("{}/preview", self.document_path(kind)),
        )
        .await
    }
}
