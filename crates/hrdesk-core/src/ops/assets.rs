// Asset inventory.

use hrdesk_api::Attachment;
use hrdesk_api::models::{Asset, AssetRequest};

use crate::console::Console;
use crate::error::CoreError;
use crate::store::ListMutation;

impl Console {
    pub async fn fetch_assets(&self) -> Result<Vec<Asset>, CoreError> {
        self.store()
            .assets
            .track("fetch_assets", self.client().list_assets(), |items| {
                ListMutation::Replace(items.clone())
            })
            .await
    }

    pub async fn fetch_asset(&self, asset_id: &str) -> Result<Asset, CoreError> {
        self.store()
            .assets
            .track("fetch_asset", self.client().get_asset(asset_id), |a| {
                ListMutation::Select(a.clone())
            })
            .await
    }

    /// Create an asset, optionally with its purchase invoice.
    pub async fn create_asset(
        &self,
        body: &AssetRequest,
        invoice: Option<Attachment>,
    ) -> Result<Asset, CoreError> {
        let client = self.client();
        let op = async {
            match invoice {
                Some(file) => client.create_asset_with_invoice(body, file).await,
                None => client.create_asset(body).await,
            }
        };
        self.store()
            .assets
            .track("create_asset", op, |a| ListMutation::Insert(a.clone()))
            .await
    }

    pub async fn update_asset(
        &self,
        asset_id: &str,
        body: &AssetRequest,
    ) -> Result<Asset, CoreError> {
        self.store()
            .assets
            .track(
                "update_asset",
                self.client().update_asset(asset_id, body),
                |a| ListMutation::Update(a.clone()),
            )
            .await
    }

    pub async fn delete_asset(&self, asset_id: &str) -> Result<(), CoreError> {
        self.store()
            .assets
            .track(
                "delete_asset",
                self.client().delete_asset(asset_id),
                |_| ListMutation::Remove(asset_id.to_owned()),
            )
            .await
    }

    /// Assign to an employee, or release with `None`.
    pub async fn assign_asset(
        &self,
        asset_id: &str,
        employee_id: Option<&str>,
    ) -> Result<Asset, CoreError> {
        self.store()
            .assets
            .track(
                "assign_asset",
                self.client().assign_asset(asset_id, employee_id),
                |a| ListMutation::Update(a.clone()),
            )
            .await
    }
}
