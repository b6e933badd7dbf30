// Leads, activities, notes, tags and customers.
//
// Some deployments do not implement the notes endpoints and answer 405.
// That surfaces as `CoreError::FeatureUnavailable` unless the console is
// configured with `notes_local_fallback`, in which case the change is
// applied to the local slice only.

use chrono::Utc;
use hrdesk_api::models::{
    Activity, ActivityRequest, Customer, CustomerRequest, Lead, LeadRequest, LeadStatus, Note,
    NoteRequest, Tag, TagRequest,
};
use tracing::warn;

use crate::console::Console;
use crate::error::CoreError;
use crate::store::{GroupMutation, ListMutation};

const NOTES_FEATURE: &str = "Lead notes";

impl Console {
    // ── Leads ────────────────────────────────────────────────────────

    pub async fn fetch_leads(&self) -> Result<Vec<Lead>, CoreError> {
        self.store()
            .leads
            .track("fetch_leads", self.client().list_leads(), |items| {
                ListMutation::Replace(items.clone())
            })
            .await
    }

    pub async fn fetch_lead(&self, lead_id: &str) -> Result<Lead, CoreError> {
        self.store()
            .leads
            .track("fetch_lead", self.client().get_lead(lead_id), |l| {
                ListMutation::Select(l.clone())
            })
            .await
    }

    pub async fn create_lead(&self, body: &LeadRequest) -> Result<Lead, CoreError> {
        self.store()
            .leads
            .track("create_lead", self.client().create_lead(body), |l| {
                ListMutation::Insert(l.clone())
            })
            .await
    }

    pub async fn update_lead(&self, lead_id: &str, body: &LeadRequest) -> Result<Lead, CoreError> {
        self.store()
            .leads
            .track(
                "update_lead",
                self.client().update_lead(lead_id, body),
                |l| ListMutation::Update(l.clone()),
            )
            .await
    }

    /// Move a lead through the pipeline.
    pub async fn update_lead_status(
        &self,
        lead_id: &str,
        status: LeadStatus,
    ) -> Result<Lead, CoreError> {
        self.store()
            .leads
            .track(
                "update_lead_status",
                self.client().update_lead_status(lead_id, status),
                |l| ListMutation::Update(l.clone()),
            )
            .await
    }

    pub async fn delete_lead(&self, lead_id: &str) -> Result<(), CoreError> {
        self.store()
            .leads
            .track("delete_lead", self.client().delete_lead(lead_id), |_| {
                ListMutation::Remove(lead_id.to_owned())
            })
            .await
    }

    // ── Activities ───────────────────────────────────────────────────

    pub async fn fetch_activities(&self, lead_id: &str) -> Result<Vec<Activity>, CoreError> {
        self.store()
            .activities
            .track(
                "fetch_activities",
                self.client().list_activities(lead_id),
                |items| GroupMutation::Replace {
                    parent: lead_id.to_owned(),
                    items: items.clone(),
                },
            )
            .await
    }

    pub async fn create_activity(
        &self,
        lead_id: &str,
        body: &ActivityRequest,
    ) -> Result<Activity, CoreError> {
        self.store()
            .activities
            .track(
                "create_activity",
                self.client().create_activity(lead_id, body),
                |a| GroupMutation::Insert(a.clone()),
            )
            .await
    }

    pub async fn complete_activity(
        &self,
        lead_id: &str,
        activity_id: &str,
    ) -> Result<Activity, CoreError> {
        self.store()
            .activities
            .track(
                "complete_activity",
                self.client().complete_activity(lead_id, activity_id),
                |a| GroupMutation::Update(a.clone()),
            )
            .await
    }

    pub async fn delete_activity(&self, lead_id: &str, activity_id: &str) -> Result<(), CoreError> {
        self.store()
            .activities
            .track(
                "delete_activity",
                self.client().delete_activity(lead_id, activity_id),
                |_| GroupMutation::Remove {
                    parent: lead_id.to_owned(),
                    key: activity_id.to_owned(),
                },
            )
            .await
    }

    // ── Notes ────────────────────────────────────────────────────────

    /// Decide what a 405 from the notes endpoints means for this console.
    fn notes_fallback(&self, operation: &'static str) -> Result<(), CoreError> {
        if self.config().notes_local_fallback {
            warn!(operation, "notes endpoint answered 405; applying change locally only");
            Ok(())
        } else {
            Err(CoreError::FeatureUnavailable {
                feature: NOTES_FEATURE.into(),
            })
        }
    }

    fn cached_note(&self, lead_id: &str, note_id: &str) -> Option<Note> {
        self.store()
            .notes
            .snapshot()
            .children(lead_id)
            .iter()
            .find(|n| n.note_id == note_id)
            .cloned()
    }

    async fn list_notes_or_cached(&self, lead_id: &str) -> Result<Vec<Note>, CoreError> {
        match self.client().list_notes(lead_id).await {
            Err(e) if e.is_method_not_allowed() => {
                self.notes_fallback("fetch_notes")?;
                Ok(self.store().notes.snapshot().children(lead_id).to_vec())
            }
            other => other.map_err(CoreError::from),
        }
    }

    async fn create_note_or_local(&self, lead_id: &str, content: &str) -> Result<Note, CoreError> {
        let body = NoteRequest {
            content: content.to_owned(),
        };
        match self.client().create_note(lead_id, &body).await {
            Err(e) if e.is_method_not_allowed() => {
                self.notes_fallback("create_note")?;
                let now = Utc::now();
                Ok(Note {
                    note_id: format!(
                        "local-{}-{}",
                        now.timestamp_millis(),
                        self.next_local_seq()
                    ),
                    lead_id: lead_id.to_owned(),
                    content: content.to_owned(),
                    created_by: self.client().employee_id().map(str::to_owned),
                    created_at: Some(now.to_rfc3339()),
                })
            }
            other => other.map_err(CoreError::from),
        }
    }

    async fn update_note_or_local(
        &self,
        lead_id: &str,
        note_id: &str,
        content: &str,
    ) -> Result<Note, CoreError> {
        let body = NoteRequest {
            content: content.to_owned(),
        };
        match self.client().update_note(lead_id, note_id, &body).await {
            Err(e) if e.is_method_not_allowed() => {
                self.notes_fallback("update_note")?;
                let mut note = self
                    .cached_note(lead_id, note_id)
                    .ok_or_else(|| CoreError::NotFound {
                        entity_type: "Note".into(),
                        identifier: note_id.to_owned(),
                    })?;
                content.clone_into(&mut note.content);
                Ok(note)
            }
            other => other.map_err(CoreError::from),
        }
    }

    async fn delete_note_or_local(&self, lead_id: &str, note_id: &str) -> Result<(), CoreError> {
        match self.client().delete_note(lead_id, note_id).await {
            Err(e) if e.is_method_not_allowed() => self.notes_fallback("delete_note"),
            other => other.map_err(CoreError::from),
        }
    }

    pub async fn fetch_notes(&self, lead_id: &str) -> Result<Vec<Note>, CoreError> {
        self.store()
            .notes
            .track("fetch_notes", self.list_notes_or_cached(lead_id), |items| {
                GroupMutation::Replace {
                    parent: lead_id.to_owned(),
                    items: items.clone(),
                }
            })
            .await
    }

    pub async fn create_note(&self, lead_id: &str, content: &str) -> Result<Note, CoreError> {
        self.store()
            .notes
            .track(
                "create_note",
                self.create_note_or_local(lead_id, content),
                |n| GroupMutation::Insert(n.clone()),
            )
            .await
    }

    pub async fn update_note(
        &self,
        lead_id: &str,
        note_id: &str,
        content: &str,
    ) -> Result<Note, CoreError> {
        self.store()
            .notes
            .track(
                "update_note",
                self.update_note_or_local(lead_id, note_id, content),
                |n| GroupMutation::Update(n.clone()),
            )
            .await
    }

    pub async fn delete_note(&self, lead_id: &str, note_id: &str) -> Result<(), CoreError> {
        self.store()
            .notes
            .track(
                "delete_note",
                self.delete_note_or_local(lead_id, note_id),
                |_| GroupMutation::Remove {
                    parent: lead_id.to_owned(),
                    key: note_id.to_owned(),
                },
            )
            .await
    }

    // ── Tags ─────────────────────────────────────────────────────────

    pub async fn fetch_tags(&self) -> Result<Vec<Tag>, CoreError> {
        self.store()
            .tags
            .track("fetch_tags", self.client().list_tags(), |items| {
                ListMutation::Replace(items.clone())
            })
            .await
    }

    pub async fn create_tag(&self, body: &TagRequest) -> Result<Tag, CoreError> {
        self.store()
            .tags
            .track("create_tag", self.client().create_tag(body), |t| {
                ListMutation::Insert(t.clone())
            })
            .await
    }

    pub async fn delete_tag(&self, tag_id: &str) -> Result<(), CoreError> {
        self.store()
            .tags
            .track("delete_tag", self.client().delete_tag(tag_id), |_| {
                ListMutation::Remove(tag_id.to_owned())
            })
            .await
    }

    // ── Customers ────────────────────────────────────────────────────

    pub async fn fetch_customers(&self) -> Result<Vec<Customer>, CoreError> {
        self.store()
            .customers
            .track("fetch_customers", self.client().list_customers(), |items| {
                ListMutation::Replace(items.clone())
            })
            .await
    }

    pub async fn fetch_customer(&self, customer_id: &str) -> Result<Customer, CoreError> {
        self.store()
            .customers
            .track(
                "fetch_customer",
                self.client().get_customer(customer_id),
                |c| ListMutation::Select(c.clone()),
            )
            .await
    }

    pub async fn create_customer(&self, body: &CustomerRequest) -> Result<Customer, CoreError> {
        self.store()
            .customers
            .track("create_customer", self.client().create_customer(body), |c| {
                ListMutation::Insert(c.clone())
            })
            .await
    }

    pub async fn update_customer(
        &self,
        customer_id: &str,
        body: &CustomerRequest,
    ) -> Result<Customer, CoreError> {
        self.store()
            .customers
            .track(
                "update_customer",
                self.client().update_customer(customer_id, body),
                |c| ListMutation::Update(c.clone()),
            )
            .await
    }

    pub async fn delete_customer(&self, customer_id: &str) -> Result<(), CoreError> {
        self.store()
            .customers
            .track(
                "delete_customer",
                self.client().delete_customer(customer_id),
                |_| ListMutation::Remove(customer_id.to_owned()),
            )
            .await
    }
}
