//! Native forms that batch actions piggyback on.

use std::fmt;

/// Forms on the management page that receive injected fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormId {
    Disposition,
    Event,
    Comment,
    Tag,
    AssignOwnership,
}

impl FormId {
    pub const ALL: [FormId; 5] = [
        FormId::Disposition,
        FormId::Event,
        FormId::Comment,
        FormId::Tag,
        FormId::AssignOwnership,
    ];

    /// Path the form posts to, relative to the console base.
    pub fn action(self) -> &'static str {
        match self {
            FormId::Disposition => "set_disposition",
            FormId::Event => "add_to_event",
            FormId::Comment => "add_comment",
            FormId::Tag => "add_tag",
            FormId::AssignOwnership => "assign_ownership",
        }
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FormId::Disposition => "disposition-form",
            FormId::Event => "event-form",
            FormId::Comment => "comment-form",
            FormId::Tag => "tag-form",
            FormId::AssignOwnership => "assign-ownership-form",
        };
        f.write_str(s)
    }
}

/// What gets posted when a form is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub action: String,
    pub fields: Vec<(String, String)>,
}

impl FormSubmission {
    /// First value posted under `name`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    id: FormId,
    /// Fields the user filled in
    fields: Vec<(String, String)>,
    /// Fields added at submit time; never persisted across a page load
    hidden: Vec<(String, String)>,
}

impl Form {
    pub fn new(id: FormId) -> Self {
        Self {
            id,
            fields: Vec::new(),
            hidden: Vec::new(),
        }
    }

    pub fn id(&self) -> FormId {
        self.id
    }

    /// Set a user-visible field, replacing any previous value.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Add a submit-time field, replacing an earlier one of the same name.
    pub fn inject_hidden(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.hidden.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => self.hidden.push((name.to_string(), value)),
        }
    }

    /// Drop every submit-time field left by an earlier attempt.
    pub fn clear_hidden(&mut self) {
        self.hidden.clear();
    }

    pub fn hidden(&self) -> &[(String, String)] {
        &self.hidden
    }

    pub fn submission(&self) -> FormSubmission {
        FormSubmission {
            action: self.id.action().to_string(),
            fields: self
                .fields
                .iter()
                .chain(self.hidden.iter())
                .cloned()
                .collect(),
        }
    }
}

/// All batch-action forms on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forms {
    forms: Vec<Form>,
}

impl Default for Forms {
    fn default() -> Self {
        Self {
            forms: FormId::ALL.iter().copied().map(Form::new).collect(),
        }
    }
}

impl Forms {
    pub fn get(&self, id: FormId) -> &Form {
        // every FormId is present from construction
        &self.forms[Self::index(id)]
    }

    pub fn get_mut(&mut self, id: FormId) -> &mut Form {
        &mut self.forms[Self::index(id)]
    }

    fn index(id: FormId) -> usize {
        FormId::ALL
            .iter()
            .position(|f| *f == id)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_carries_fields_then_hidden() {
        let mut form = Form::new(FormId::Disposition);
        form.set_field("disposition", "FALSE_POSITIVE");
        form.inject_hidden("alert_uuids", "uuid-1,uuid-3");

        let submission = form.submission();
        assert_eq!(submission.action, "set_disposition");
        assert_eq!(
            submission.fields,
            vec![
                ("disposition".to_string(), "FALSE_POSITIVE".to_string()),
                ("alert_uuids".to_string(), "uuid-1,uuid-3".to_string()),
            ]
        );
    }

    #[test]
    fn test_set_field_replaces() {
        let mut form = Form::new(FormId::Event);
        form.set_field("event_disposition", "DELIVERY");
        form.set_field("event_disposition", "C2");
        assert_eq!(form.field("event_disposition"), Some("C2"));
        assert_eq!(form.submission().fields.len(), 1);
    }

    #[test]
    fn test_inject_hidden_replaces_and_clears() {
        let mut form = Form::new(FormId::Disposition);
        form.inject_hidden("alert_uuids", "uuid-1");
        form.inject_hidden("alert_uuids", "uuid-2");
        assert_eq!(
            form.hidden(),
            &[("alert_uuids".to_string(), "uuid-2".to_string())]
        );

        form.clear_hidden();
        assert!(form.hidden().is_empty());
    }

    #[test]
    fn test_forms_lookup() {
        let mut forms = Forms::default();
        forms.get_mut(FormId::Tag).inject_hidden("redirect", "management");
        assert_eq!(forms.get(FormId::Tag).hidden().len(), 1);
        assert!(forms.get(FormId::Comment).hidden().is_empty());
        assert_eq!(forms.get(FormId::AssignOwnership).id(), FormId::AssignOwnership);
    }
}
