use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use ens_core::errors::ErrorInfo;
use ens_core::EnsError;
use serde::{Deserialize, Serialize};

use crate::restorable::Restorable;

/// Fixed-layout header preceding the opaque payload in every state file.
///
/// Serialized with fixed-width little-endian integers, so the on-disk layout
/// is exactly `[finished: 1 byte][next_index: 8 bytes][payload]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointHeader {
    /// Whether the last simulation of the owning span has completed.
    pub finished: bool,
    /// Index of the most recently completed simulation.
    pub next_index: u64,
}

/// Writes a checkpoint: header first, then the simulation's opaque payload.
///
/// The file is overwritten in place. Any I/O failure is fatal and propagated.
pub fn write_checkpoint<S: Restorable + ?Sized>(
    path: &Path,
    finished: bool,
    next_index: u64,
    simulation: &S,
) -> Result<(), EnsError> {
    let file = File::create(path).map_err(|err| {
        EnsError::Checkpoint(
            ErrorInfo::new("checkpoint-create", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    let mut writer = BufWriter::new(file);
    let header = CheckpointHeader {
        finished,
        next_index,
    };
    bincode::serialize_into(&mut writer, &header).map_err(|err| {
        EnsError::Checkpoint(
            ErrorInfo::new("checkpoint-header-write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    simulation.store_state(&mut writer)?;
    writer.flush().map_err(|err| {
        EnsError::Checkpoint(
            ErrorInfo::new("checkpoint-flush", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    Ok(())
}

/// Reads a checkpoint: returns the header and replaces the simulation state
/// with the stored payload (`clear` followed by a join).
///
/// A truncated or corrupt file is a fatal error, never silently ignored.
pub fn read_checkpoint<S: Restorable + ?Sized>(
    path: &Path,
    simulation: &mut S,
) -> Result<CheckpointHeader, EnsError> {
    let mut reader = open_reader(path)?;
    let header = read_header(&mut reader, path)?;
    simulation.clear();
    simulation.join_restored_state(&mut reader)?;
    Ok(header)
}

/// Reads only the header, leaving the payload untouched.
pub fn peek_header(path: &Path) -> Result<CheckpointHeader, EnsError> {
    let mut reader = open_reader(path)?;
    read_header(&mut reader, path)
}

/// Skips the header and joins the payload into the simulation's current state.
pub fn absorb_payload<S: Restorable + ?Sized>(
    path: &Path,
    simulation: &mut S,
) -> Result<(), EnsError> {
    let mut reader = open_reader(path)?;
    read_header(&mut reader, path)?;
    simulation.join_restored_state(&mut reader)
}

fn open_reader(path: &Path) -> Result<BufReader<File>, EnsError> {
    let file = File::open(path).map_err(|err| {
        EnsError::Checkpoint(
            ErrorInfo::new("checkpoint-open", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    Ok(BufReader::new(file))
}

fn read_header(
    reader: &mut BufReader<File>,
    path: &Path,
) -> Result<CheckpointHeader, EnsError> {
    bincode::deserialize_from(&mut *reader).map_err(|err| {
        EnsError::Checkpoint(
            ErrorInfo::new("checkpoint-header-read", err.to_string())
                .with_context("path", path.display().to_string())
                .with_hint("the state file is truncated or corrupt; remove it to start over"),
        )
    })
}
