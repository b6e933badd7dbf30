// Custom forms. Every payload passes through `convert` on the way in and
// out so the slice only ever holds canonical `CustomForm`s.

use chrono::Utc;
use serde_json::Value;

use crate::console::Console;
use crate::convert::{canonicalize_form, canonicalize_forms, form_payload};
use crate::error::CoreError;
use crate::model::CustomForm;
use crate::store::ListMutation;

impl Console {
    pub async fn fetch_forms(&self) -> Result<Vec<CustomForm>, CoreError> {
        let client = self.client();
        let op = async {
            let raw = client.list_forms().await?;
            Ok::<_, CoreError>(canonicalize_forms(&raw, Utc::now()))
        };
        self.store()
            .forms
            .track("fetch_forms", op, |items: &Vec<CustomForm>| {
                ListMutation::Replace(items.clone())
            })
            .await
    }

    pub async fn fetch_form(&self, form_id: &str) -> Result<CustomForm, CoreError> {
        let client = self.client();
        let op = async {
            let raw = client.get_form(form_id).await?;
            Ok::<_, CoreError>(canonicalize_form(&raw, Utc::now()))
        };
        self.store()
            .forms
            .track("fetch_form", op, |f| ListMutation::Select(f.clone()))
            .await
    }

    pub async fn create_form(&self, form: &CustomForm) -> Result<CustomForm, CoreError> {
        let client = self.client();
        let body = form_payload(form, self.company_id());
        let op = async {
            let raw = client.create_form(&body).await?;
            Ok::<_, CoreError>(canonicalize_form(&raw, Utc::now()))
        };
        self.store()
            .forms
            .track("create_form", op, |f| ListMutation::Insert(f.clone()))
            .await
    }

    pub async fn update_form(&self, form: &CustomForm) -> Result<CustomForm, CoreError> {
        let client = self.client();
        let body = form_payload(form, self.company_id());
        let op = async {
            let raw = client.update_form(&form.form_id, &body).await?;
            Ok::<_, CoreError>(canonicalize_form(&raw, Utc::now()))
        };
        self.store()
            .forms
            .track("update_form", op, |f| ListMutation::Update(f.clone()))
            .await
    }

    pub async fn delete_form(&self, form_id: &str) -> Result<(), CoreError> {
        self.store()
            .forms
            .track("delete_form", self.client().delete_form(form_id), |_| {
                ListMutation::Remove(form_id.to_owned())
            })
            .await
    }

    /// Submit answers to a form. The form list itself is unchanged.
    pub async fn submit_form(&self, form_id: &str, answers: &Value) -> Result<(), CoreError> {
        self.store()
            .forms
            .track(
                "submit_form",
                self.client().submit_form(form_id, answers),
                |_| ListMutation::Keep(Some("Form submitted".into())),
            )
            .await
    }
}
