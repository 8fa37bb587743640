use std::io;

use thiserror::Error;

/// Failures while loading or validating the immutable data tables.
///
/// Everything here is a configuration-time defect: the tables are static for
/// the process lifetime, so a bad table must fail the load, never a
/// per-record call.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("rule pattern '{pattern}' is not a valid regex: {source}")]
    BadPattern {
        pattern: String,
        source: regex::Error,
    },
    #[error(
        "template '{template}' references {slots} positional slot(s) but \
         pattern '{pattern}' captures only {groups} group(s)"
    )]
    MalformedTemplate {
        pattern: String,
        template: String,
        slots: usize,
        groups: usize,
    },
    #[error("tag table '{table}' has no fallback tag")]
    MissingFallback { table: String },
    #[error("tag table '{table}' has more than one fallback tag")]
    DuplicateFallback { table: String },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("malformed table file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while translating a single record.
///
/// These are surfaced to the caller so the batch layer can log and skip the
/// record; returning text with a marker still in it would be a user-visible
/// defect.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("placeholder '{{{{{payload}}}}}' could not be resolved to a known species")]
    UnresolvedPlaceholder { payload: String },
}

/// Failures at the per-source pipeline level: reading an extract file,
/// assembling a record, writing artifacts. A record-level variant is logged
/// and skipped by the pipeline; it never aborts sibling records.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Translate(#[from] TranslateError),
    #[error("dex number {no} is not in the species table")]
    UnknownSpecies { no: u32 },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("malformed extract file: {0}")]
    Json(#[from] serde_json::Error),
}
