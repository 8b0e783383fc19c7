use wortschatz_core::KeyValueStore;
use wortschatz_types::{DraftField, View, WordDraft};

use super::Effect;
use crate::router::Model;

/// Marks the form busy and asks for an assist request. Blank hints send nothing.
///
/// A newer request supersedes any answer still in flight for this form.
pub fn handle_assist<S: KeyValueStore>(model: &mut Model<S>, hint: &str) -> Option<Effect> {
    let hint = hint.trim();
    if model.current_view() != View::Create {
        return None;
    }

    if hint.is_empty() {
        tracing::debug!("Blank assist hint ignored");
        return None;
    }

    let request = model.next_request_id();
    let form = model.form_mut()?;
    form.hint = hint.to_string();
    form.pending = Some(request);
    Some(Effect::Assist {
        request,
        hint: hint.to_string(),
    })
}

/// Merges a finished assist into the form that asked for it.
///
/// Answers for a form that is gone or has a newer request pending are dropped.
/// A failed request leaves every field as it was.
pub fn handle_assist_finished<S: KeyValueStore>(
    model: &mut Model<S>,
    request: u64,
    hint: &str,
    result: Result<WordDraft, String>,
) {
    let Some(form) = model.form_mut().filter(|form| form.pending == Some(request)) else {
        tracing::debug!("Dropping stale assist result #{request} for '{hint}'");
        return;
    };

    form.pending = None;
    match result {
        Ok(suggestion) => {
            tracing::info!("Assist filled the form for '{hint}'");
            form.apply_suggestion(suggestion);
        }
        Err(e) => {
            tracing::warn!("Assist for '{hint}' failed: {e}");
            model.notice = Some("AI fill failed, fields unchanged".to_string());
        }
    }
}

pub fn handle_set_field<S: KeyValueStore>(model: &mut Model<S>, field: DraftField, value: &str) {
    let Some(form) = model.form_mut() else {
        return;
    };

    if let Err(e) = form.set_field(field, value) {
        model.notice = Some(e.to_string());
    }
}

pub fn handle_save<S: KeyValueStore>(model: &mut Model<S>) {
    let Some(form) = model.form_mut() else {
        return;
    };

    let Some(new_entry) = form.submit() else {
        tracing::debug!("Form has {} validation errors", form.errors.len());
        return;
    };

    let term = new_entry.source_term.clone();
    model.store.insert(new_entry);
    model.navigate(View::Library);
    model.notice = Some(format!("Saved '{term}'"));
}

pub fn handle_cancel<S: KeyValueStore>(model: &mut Model<S>) {
    if model.form_mut().is_some() {
        model.navigate(View::Library);
    }
}
