use wortschatz_core::{KeyValueStore, StudyStep};
use wortschatz_types::View;

use crate::router::Model;

pub fn handle_flip<S: KeyValueStore>(model: &mut Model<S>) {
    if let Some((session, _)) = model.study_mut() {
        session.flip();
    }
}

pub fn handle_next<S: KeyValueStore>(model: &mut Model<S>) {
    let Some((session, _)) = model.study_mut() else {
        return;
    };

    let step = session.advance();
    finish_if_done(model, step);
}

pub fn handle_previous<S: KeyValueStore>(model: &mut Model<S>) {
    if let Some((session, _)) = model.study_mut() {
        session.retreat();
    }
}

/// `+1` for "I know it", `-1` for "I forgot".
pub fn handle_grade<S: KeyValueStore>(model: &mut Model<S>, delta: i32) {
    let Some((session, store)) = model.study_mut() else {
        tracing::debug!("Grade outside a study session ignored");
        return;
    };

    let step = session.grade(store, delta);
    finish_if_done(model, step);
}

fn finish_if_done<S: KeyValueStore>(model: &mut Model<S>, step: StudyStep) {
    if step == StudyStep::Finished {
        tracing::info!("Study session finished");
        model.navigate(View::Library);
        model.notice = Some("Session complete".to_string());
    }
}
