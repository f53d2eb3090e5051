//! Replays a [`Script`] against a [`Whiteboard`] and writes the results.

use crate::script::{Script, ScriptError, Step};
use logicboard_core::surface::encode_png;
use logicboard_core::{
    Annotation, BoardConfig, BoardEvent, Recognizer, SurfaceError, VariableBindings, Whiteboard,
};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Client(#[from] logicboard_client::ClientError),
    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },
}

/// Annotations file contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub annotations: Vec<Annotation>,
    pub dict_of_vars: VariableBindings,
    /// Number of recognition requests that failed.
    pub failed_requests: usize,
}

/// Board config for a script, with size overrides taking precedence.
pub fn board_config(script: &Script, base: BoardConfig) -> BoardConfig {
    let width = script.width.unwrap_or(base.width);
    let height = script.height.unwrap_or(base.height);
    base.with_size(width, height)
}

/// Replay every step. Recognition failures are counted, not fatal.
pub async fn run(
    script: &Script,
    board: &mut Whiteboard,
    recognizer: &dyn Recognizer,
) -> Result<SessionReport, AppError> {
    let mut failed_requests = 0;
    for (index, step) in script.steps.iter().enumerate() {
        log::debug!("Step {}: {:?}", index, step);
        if *step == Step::Calculate {
            if !board.can_submit() {
                log::warn!("Step {}: calculate ignored, a result is awaiting placement", index);
            } else {
                board.calculate(recognizer).await;
            }
        } else {
            for action in step.actions(index)? {
                board.apply(action);
            }
        }
        for event in board.drain_events() {
            if matches!(event, BoardEvent::RecognitionFailed { .. }) {
                failed_requests += 1;
            }
            log_event(&event);
        }
    }

    if let Some(pending) = board.pending_placement() {
        log::warn!(
            "Session ended with '{} = {}' still awaiting placement",
            pending.result.expression,
            pending.result.answer
        );
    }

    Ok(SessionReport {
        annotations: board.annotations().to_vec(),
        dict_of_vars: board.bindings().clone(),
        failed_requests,
    })
}

fn log_event(event: &BoardEvent) {
    match event {
        BoardEvent::InkChanged | BoardEvent::AnnotationDragged(_) => log::trace!("{:?}", event),
        BoardEvent::RecognitionFailed { message } => log::warn!("Recognition failed: {}", message),
        _ => log::info!("{:?}", event),
    }
}

/// Write the background+ink composite as PNG.
pub fn write_png(board: &Whiteboard, path: &Path) -> Result<(), AppError> {
    let composite = board.surface().composite();
    let png = encode_png(composite.as_raw(), composite.width(), composite.height())?;
    std::fs::write(path, png).map_err(|e| write_error(path, e))?;
    log::info!("Wrote {}x{} composite to {}", composite.width(), composite.height(), path.display());
    Ok(())
}

/// Write the report as pretty JSON.
pub fn write_report(report: &SessionReport, path: &Path) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(report).map_err(|e| write_error(path, e))?;
    std::fs::write(path, json).map_err(|e| write_error(path, e))?;
    log::info!("Wrote {} annotations to {}", report.annotations.len(), path.display());
    Ok(())
}

fn write_error(path: &Path, e: impl std::fmt::Display) -> AppError {
    AppError::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
