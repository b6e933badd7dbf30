// ── Multi-tab onboarding wizard ──
//
// Errors are always computed from the whole draft, but only surface for
// keys the operator has touched. `next()` touches the current tab and only
// advances when that tab is clean; `submit()` touches everything.

use std::collections::HashSet;

use strum::IntoEnumIterator;

use super::draft::{EmployeeDraft, Errors, Field, FormKey, Tab};
use super::validation::FieldError;

/// Why the wizard refused to move on.
#[derive(Debug, Clone, PartialEq)]
pub struct Blocked {
    pub tab: Tab,
    pub errors: Errors,
}

#[derive(Debug, Clone)]
pub struct OnboardingForm {
    draft: EmployeeDraft,
    tab: Tab,
    touched: HashSet<FormKey>,
}

impl OnboardingForm {
    pub fn new(draft: EmployeeDraft) -> Self {
        Self {
            draft,
            tab: Tab::Personal,
            touched: HashSet::new(),
        }
    }

    pub fn draft(&self) -> &EmployeeDraft {
        &self.draft
    }

    pub fn into_draft(self) -> EmployeeDraft {
        self.draft
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Edit a field; editing marks it touched.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
        self.touched.insert(field.into());
    }

    pub fn set_pf_enrolled(&mut self, enrolled: bool) {
        self.draft.pf_enrolled = enrolled;
    }

    pub fn attach(&mut self, attachment: hrdesk_api::Attachment) {
        self.touched.insert(attachment.field.into());
        self.draft.attach(attachment);
    }

    pub fn touch(&mut self, key: impl Into<FormKey>) {
        self.touched.insert(key.into());
    }

    pub fn is_touched(&self, key: impl Into<FormKey>) -> bool {
        self.touched.contains(&key.into())
    }

    /// Errors the operator should currently see.
    pub fn visible_errors(&self) -> Errors {
        self.draft
            .validate()
            .into_iter()
            .filter(|(key, _)| self.touched.contains(key))
            .collect()
    }

    pub fn error_for(&self, key: impl Into<FormKey>) -> Option<FieldError> {
        let key = key.into();
        if !self.touched.contains(&key) {
            return None;
        }
        self.draft.validate().shift_remove(&key)
    }

    fn tab_errors(&self, tab: Tab) -> Errors {
        self.draft
            .validate()
            .into_iter()
            .filter(|(key, _)| key.tab() == tab)
            .collect()
    }

    /// Validate the current tab and advance when it is clean.
    ///
    /// On the last tab a clean `next()` stays put.
    pub fn next(&mut self) -> Result<Tab, Blocked> {
        let tab = self.tab;
        self.touched.extend(FormKey::on_tab(tab));
        let errors = self.tab_errors(tab);
        if !errors.is_empty() {
            return Err(Blocked { tab, errors });
        }
        if let Some(next) = Tab::iter().skip_while(|t| *t != tab).nth(1) {
            self.tab = next;
        }
        Ok(self.tab)
    }

    /// Always moves back; stays on the first tab.
    pub fn back(&mut self) -> Tab {
        if let Some(prev) = Tab::iter().take_while(|t| *t != self.tab).last() {
            self.tab = prev;
        }
        self.tab
    }

    /// Validate everything. On failure, jumps to the first tab with errors.
    pub fn submit(&mut self) -> Result<&EmployeeDraft, Blocked> {
        for tab in Tab::iter() {
            self.touched.extend(FormKey::on_tab(tab));
        }
        let errors = self.draft.validate();
        if let Some(first) = errors.keys().map(|k| k.tab()).min() {
            self.tab = first;
            return Err(Blocked { tab: first, errors });
        }
        Ok(&self.draft)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn personal() -> EmployeeDraft {
        EmployeeDraft::new()
            .with(Field::FirstName, "Asha")
            .with(Field::LastName, "Rao")
            .with(Field::Email, "asha@example.com")
            .with(Field::Phone, "9876543210")
    }

    #[test]
    fn untouched_errors_stay_hidden() {
        let mut form = OnboardingForm::new(EmployeeDraft::new());
        assert!(form.visible_errors().is_empty());

        form.set(Field::Phone, "12345");
        let visible = form.visible_errors();
        assert_eq!(visible.len(), 1);
        assert_eq!(
            visible.get(&FormKey::Field(Field::Phone)),
            Some(&FieldError::InvalidPhone)
        );
    }

    #[test]
    fn next_blocks_on_dirty_tab_and_touches_it() {
        let mut form = OnboardingForm::new(EmployeeDraft::new());
        let blocked = form.next().unwrap_err();
        assert_eq!(blocked.tab, Tab::Personal);
        assert_eq!(form.tab(), Tab::Personal);
        assert!(form.is_touched(Field::FirstName));
        assert_eq!(form.error_for(Field::Email), Some(FieldError::Required));
        // Employment errors exist but are not on this tab.
        assert!(!blocked.errors.contains_key(&FormKey::Field(Field::JoiningDate)));
    }

    #[test]
    fn next_and_back_walk_the_tabs() {
        let mut form = OnboardingForm::new(personal());
        assert_eq!(form.next().unwrap(), Tab::Identity);
        assert_eq!(form.next().unwrap(), Tab::Employment);
        assert_eq!(form.back(), Tab::Identity);
        assert_eq!(form.back(), Tab::Personal);
        assert_eq!(form.back(), Tab::Personal);
    }

    #[test]
    fn submit_jumps_to_first_dirty_tab() {
        let mut form = OnboardingForm::new(personal());
        form.next().unwrap();
        form.next().unwrap();
        let blocked = form.submit().unwrap_err();
        assert_eq!(blocked.tab, Tab::Employment);
        assert_eq!(form.tab(), Tab::Employment);
    }

    #[test]
    fn submit_passes_complete_draft() {
        let draft = personal()
            .with(Field::DepartmentId, "D1")
            .with(Field::DesignationId, "G1")
            .with(Field::JoiningDate, "2026-11-02")
            .with(Field::AnnualCtc, "480000")
            .with(Field::BasicSalary, "16000");
        let mut form = OnboardingForm::new(draft);
        assert!(form.submit().is_ok());
    }
}
