// src/runner.rs
//! One pipeline run: documents → records → XML artifact → upload.
//!
//! Only local I/O failures (listing documents, writing the artifact) abort a run.
//! An upload that is not configured or fails still leaves the artifact on disk and
//! comes back as a `RunStatus`.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, error, info, warn};

use crate::{
    assemble::assemble_view,
    config::{DealerProfile, Settings},
    data::VehicleRecord,
    error::Result,
    file::write_artifact,
    progress::Progress,
    source::DocumentSource,
    specs::vehicle::ListingView,
    transfer::Transfer,
};

/// What a run looked at and produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunCounts {
    /// Documents returned by the source.
    pub documents: usize,
    /// Vehicles written to the artifact.
    pub records: usize,
    /// Documents that failed the listing filter.
    pub skipped: usize,
}

#[derive(Debug)]
pub enum RunStatus {
    Uploaded { artifact: PathBuf, counts: RunCounts, destination: String },
    TransferSkipped { artifact: PathBuf, counts: RunCounts },
    TransferFailed { artifact: PathBuf, counts: RunCounts, message: String },
}

impl RunStatus {
    pub fn artifact(&self) -> &Path {
        match self {
            Self::Uploaded { artifact, .. }
            | Self::TransferSkipped { artifact, .. }
            | Self::TransferFailed { artifact, .. } => artifact,
        }
    }

    pub fn counts(&self) -> RunCounts {
        match self {
            Self::Uploaded { counts, .. }
            | Self::TransferSkipped { counts, .. }
            | Self::TransferFailed { counts, .. } => *counts,
        }
    }

    pub fn is_uploaded(&self) -> bool {
        matches!(self, Self::Uploaded { .. })
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uploaded { counts, destination, .. } => write!(
                f,
                "XML generated and uploaded successfully to {destination} ({} vehicles)",
                counts.records
            ),
            Self::TransferSkipped { artifact, counts } => write!(
                f,
                "XML generated to {} ({} vehicles); FTP credentials not configured, upload skipped",
                artifact.display(),
                counts.records
            ),
            Self::TransferFailed { artifact, message, .. } => write!(
                f,
                "XML generated to {}; upload failed: {message}",
                artifact.display()
            ),
        }
    }
}

/// Read every document and assemble the listings, in source order.
pub fn collect_records(
    source: &dyn DocumentSource,
    dealer: &DealerProfile,
    mut progress: Option<&mut dyn Progress>,
) -> Result<(Vec<VehicleRecord>, RunCounts)> {
    let documents = source.list_documents()?;
    let mut counts = RunCounts { documents: documents.len(), ..Default::default() };

    if let Some(p) = progress.as_deref_mut() {
        p.begin(documents.len());
    }

    let mut records = Vec::with_capacity(documents.len());
    for doc in &documents {
        let view = ListingView::of(doc);
        if !view.is_listing() {
            debug!(id = doc.id, title = %view.title, "not a listing, skipped");
            counts.skipped += 1;
            if let Some(p) = progress.as_deref_mut() {
                p.item_skipped(doc.id);
            }
            continue;
        }

        let attachments = source.attached_images(doc.id).unwrap_or_else(|e| {
            warn!(id = doc.id, error = %e, "attachment lookup failed, using inline images only");
            Vec::new()
        });

        let record = assemble_view(&view, doc.id, &attachments, dealer);
        debug!(id = doc.id, vin = %record.vin, "record assembled");
        records.push(record);
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(doc.id);
        }
    }
    counts.records = records.len();
    Ok((records, counts))
}

/// Run the whole pipeline once.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run_once(
    settings: &Settings,
    source: &dyn DocumentSource,
    transfer: &dyn Transfer,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunStatus> {
    let result = run_inner(settings, source, transfer, progress.as_mut().map(|p| &mut **p as &mut dyn Progress));
    if let Some(p) = progress.as_deref_mut() {
        match &result {
            Ok(status) => p.log(&status.to_string()),
            Err(e) => p.log(&e.to_string()),
        }
        p.finish();
    }
    result
}

fn run_inner(
    settings: &Settings,
    source: &dyn DocumentSource,
    transfer: &dyn Transfer,
    progress: Option<&mut dyn Progress>,
) -> Result<RunStatus> {
    let (records, counts) = collect_records(source, &settings.dealer, progress)?;

    let (artifact, _) = write_artifact(&settings.out_dir, &Local::now(), &records)?;
    info!(
        path = %artifact.display(),
        documents = counts.documents,
        records = counts.records,
        skipped = counts.skipped,
        "feed written"
    );

    let dest = &settings.destination;
    if !dest.is_configured() {
        info!("transfer destination not configured, upload skipped");
        return Ok(RunStatus::TransferSkipped { artifact, counts });
    }

    match transfer.upload(&artifact, dest) {
        Ok(()) => Ok(RunStatus::Uploaded {
            artifact,
            counts,
            destination: join!(dest.host.trim(), &dest.remote_path),
        }),
        Err(e) => {
            error!(error = %e, path = %artifact.display(), "upload failed, artifact kept");
            Ok(RunStatus::TransferFailed { artifact, counts, message: e.to_string() })
        }
    }
}
