// Asset inventory and assignment.

use reqwest::Method;
use serde::Serialize;

use crate::client::{HrClient, Service};
use crate::error::Error;
use crate::models::{Asset, AssetRequest};
use crate::upload::Attachment;

/// Multipart field carrying the JSON-stringified asset metadata.
const ASSET_DATA_FIELD: &str = "assetData";

impl HrClient {
    pub async fn list_assets(&self) -> Result<Vec<Asset>, Error> {
        self.get(
            Service::Api,
            &format!("api/assets/company/{}", self.company_id()),
        )
        .await
    }

    pub async fn get_asset(&self, asset_id: &str) -> Result<Asset, Error> {
        self.get(Service::Api, &format!("api/assets/asset/{asset_id}"))
            .await
    }

    pub async fn create_asset(&self, body: &AssetRequest) -> Result<Asset, Error> {
        self.post(Service::Api, "api/assets", body, None).await
    }

    /// Create an asset with its purchase invoice attached (`invoiceFile`).
    pub async fn create_asset_with_invoice(
        &self,
        body: &AssetRequest,
        invoice: Attachment,
    ) -> Result<Asset, Error> {
        self.send_multipart(
            Method::POST,
            "api/assets",
            ASSET_DATA_FIELD,
            body,
            vec![invoice],
        )
        .await
    }

    pub async fn update_asset(&self, asset_id: &str, body: &AssetRequest) -> Result<Asset, Error> {
        self.put(Service::Api, &format!("api/assets/asset/{asset_id}"), body)
            .await
    }

    pub async fn delete_asset(&self, asset_id: &str) -> Result<(), Error> {
        self.delete(Service::Api, &format!("api/assets/asset/{asset_id}"))
            .await
    }

    /// Assign an asset to an employee, or release it with `None`.
    pub async fn assign_asset(
        &self,
        asset_id: &str,
        employee_id: Option<&str>,
    ) -> Result<Asset, Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            employee_id: Option<&'a str>,
        }

        self.patch(
            Service::Api,
            &format!("api/assets/asset/{asset_id}/assign"),
            &Body { employee_id },
        )
        .await
    }
}
