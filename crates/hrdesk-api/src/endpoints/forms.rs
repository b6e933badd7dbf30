// Custom forms. Payloads stay untyped here: the backend has shipped several
// shapes over time and `hrdesk-core` canonicalizes them.

use serde_json::Value;

use crate::client::{HrClient, Service};
use crate::error::Error;

impl HrClient {
    pub async fn list_forms(&self) -> Result<Vec<Value>, Error> {
        self.get(Service::Api, &format!("forms/company/{}", self.company_id()))
            .await
    }

    pub async fn get_form(&self, form_id: &str) -> Result<Value, Error> {
        self.get(Service::Api, &format!("forms/{form_id}")).await
    }

    pub async fn create_form(&self, body: &Value) -> Result<Value, Error> {
        self.post(Service::Api, "forms", body, None).await
    }

    pub async fn update_form(&self, form_id: &str, body: &Value) -> Result<Value, Error> {
        self.put(Service::Api, &format!("forms/{form_id}"), body)
            .await
    }

    pub async fn delete_form(&self, form_id: &str) -> Result<(), Error> {
        self.delete(Service::Api, &format!("forms/{form_id}")).await
    }

    pub async fn submit_form(&self, form_id: &str, answers: &Value) -> Result<(), Error> {
        self.post_no_response(
            Service::Api,
            &format!("forms/{form_id}/submissions"),
            answers,
        )
        .await
    }
}
