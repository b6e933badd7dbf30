// Leads, their activities and notes, tags, and customers.

use serde::Serialize;

use crate::client::{HrClient, Service};
use crate::error::Error;
use crate::models::{
    Activity, ActivityRequest, Customer, CustomerRequest, Lead, LeadRequest, LeadStatus, Note,
    NoteRequest, Tag, TagRequest,
};

impl HrClient {
    // ── Leads ────────────────────────────────────────────────────────

    pub async fn list_leads(&self) -> Result<Vec<Lead>, Error> {
        self.get(Service::Api, &format!("leads/company/{}", self.company_id()))
            .await
    }

    pub async fn get_lead(&self, lead_id: &str) -> Result<Lead, Error> {
        self.get(Service::Api, &format!("leads/{lead_id}")).await
    }

    pub async fn create_lead(&self, body: &LeadRequest) -> Result<Lead, Error> {
        self.post(Service::Api, "leads", body, None).await
    }

    pub async fn update_lead(&self, lead_id: &str, body: &LeadRequest) -> Result<Lead, Error> {
        self.put(Service::Api, &format!("leads/{lead_id}"), body)
            .await
    }

    pub async fn update_lead_status(
        &self,
        lead_id: &str,
        status: LeadStatus,
    ) -> Result<Lead, Error> {
        #[derive(Serialize)]
        struct Body {
            status: LeadStatus,
        }

        self.patch(
            Service::Api,
            &format!("leads/{lead_id}/status"),
            &Body { status },
        )
        .await
    }

    pub async fn delete_lead(&self, lead_id: &str) -> Result<(), Error> {
        self.delete(Service::Api, &format!("leads/{lead_id}")).await
    }

    // ── Activities ───────────────────────────────────────────────────

    pub async fn list_activities(&self, lead_id: &str) -> Result<Vec<Activity>, Error> {
        self.get(Service::Api, &format!("leads/{lead_id}/activities"))
            .await
    }

    pub async fn create_activity(
        &self,
        lead_id: &str,
        body: &ActivityRequest,
    ) -> Result<Activity, Error> {
        self.post(
            Service::Api,
            &format!("leads/{lead_id}/activities"),
            body,
            None,
        )
        .await
    }

    pub async fn complete_activity(
        &self,
        lead_id: &str,
        activity_id: &str,
    ) -> Result<Activity, Error> {
        #[derive(Serialize)]
        struct Body {
            completed: bool,
        }

        self.patch(
            Service::Api,
            &format!("leads/{lead_id}/activities/{activity_id}"),
            &Body { completed: true },
        )
        .await
    }

    pub async fn delete_activity(&self, lead_id: &str, activity_id: &str) -> Result<(), Error> {
        self.delete(
            Service::Api,
            &format!("leads/{lead_id}/activities/{activity_id}"),
        )
        .await
    }

    // ── Notes ────────────────────────────────────────────────────────

    pub async fn list_notes(&self, lead_id: &str) -> Result<Vec<Note>, Error> {
        self.get(Service::Api, &format!("leads/{lead_id}/notes"))
            .await
    }

    pub async fn create_note(&self, lead_id: &str, body: &NoteRequest) -> Result<Note, Error> {
        self.post(Service::Api, &format!("leads/{lead_id}/notes"), body, None)
            .await
    }

    pub async fn update_note(
        &self,
        lead_id: &str,
        note_id: &str,
        body: &NoteRequest,
    ) -> Result<Note, Error> {
        self.put(
            Service::Api,
            &format!("leads/{lead_id}/notes/{note_id}"),
            body,
        )
        .await
    }

    pub async fn delete_note(&self, lead_id: &str, note_id: &str) -> Result<(), Error> {
        self.delete(Service::Api, &format!("leads/{lead_id}/notes/{note_id}"))
            .await
    }

    // ── Tags ─────────────────────────────────────────────────────────

    pub async fn list_tags(&self) -> Result<Vec<Tag>, Error> {
        self.get(Service::Api, &format!("tags/company/{}", self.company_id()))
            .await
    }

    pub async fn create_tag(&self, body: &TagRequest) -> Result<Tag, Error> {
        self.post(Service::Api, "tags", body, None).await
    }

    pub async fn delete_tag(&self, tag_id: &str) -> Result<(), Error> {
        self.delete(Service::Api, &format!("tags/{tag_id}")).await
    }

    // ── Customers ────────────────────────────────────────────────────

    pub async fn list_customers(&self) -> Result<Vec<Customer>, Error> {
        self.get(
            Service::Api,
            &format!("customers/company/{}", self.company_id()),
        )
        .await
    }

    pub async fn get_customer(&self, customer_id: &str) -> Result<Customer, Error> {
        self.get(Service::Api, &format!("customers/{customer_id}"))
            .await
    }

    pub async fn create_customer(&self, body: &CustomerRequest) -> Result<Customer, Error> {
        self.post(Service::Api, "customers", body, None).await
    }

    pub async fn update_customer(
        &self,
        customer_id: &str,
        body: &CustomerRequest,
    ) -> Result<Customer, Error> {
        self.put(Service::Api, &format!("customers/{customer_id}"), body)
            .await
    }

    pub async fn delete_customer(&self, customer_id: &str) -> Result<(), Error> {
        self.delete(Service::Api, &format!("customers/{customer_id}"))
            .await
    }
}
