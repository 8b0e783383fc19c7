use wortschatz_core::KeyValueStore;
use wortschatz_types::EntryId;

use crate::router::Model;

pub fn handle_search<S: KeyValueStore>(model: &mut Model<S>, text: String) {
    tracing::debug!("Search: '{}'", text);
    model.search = text;
}

pub fn handle_delete<S: KeyValueStore>(model: &mut Model<S>, id: &EntryId) {
    let term = model.store.get(id).map(|e| e.source_term.clone());

    if model.store.remove(id) {
        if let Some(term) = term {
            model.notice = Some(format!("Deleted '{term}'"));
        }
    } else {
        tracing::debug!("Delete of unknown entry {id}");
    }
}
