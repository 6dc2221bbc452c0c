use std::fs;
use std::path::{Path, PathBuf};

use ens_core::errors::ErrorInfo;
use ens_core::EnsError;

/// Builds the state file name for a signature and simulation tag.
pub fn state_file_name(signature: &str, tag: &str) -> String {
    format!("{signature}_state_{tag}.dat")
}

/// Builds the full state file path inside the working directory.
pub fn state_file_path(working_dir: &Path, signature: &str, tag: &str) -> PathBuf {
    working_dir.join(state_file_name(signature, tag))
}

/// A state file discovered in the working directory, with the span it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiblingFile {
    /// First simulation index (inclusive) covered by the file.
    pub from: u64,
    /// Final simulation index (exclusive) covered by the file.
    pub to: u64,
    /// Location of the file.
    pub path: PathBuf,
}

/// Matcher for state files written by workers sharing one signature.
///
/// A signature such as `N.8_K.8_from.0_to.2_term.value` embeds the span of
/// one particular worker. The pattern generalizes the `from.{from}` and
/// `to.{to}` tokens of *this* worker into wildcards, so files written by
/// workers owning other spans (including this worker's own file) all match,
/// and their spans can be parsed back out of the file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateFilePattern {
    prefix: String,
    infix: String,
    suffix: String,
}

impl StateFilePattern {
    /// Builds a pattern from the signature, this worker's span and the tag.
    ///
    /// Fails if the signature does not embed the `from.{from}` and `to.{to}`
    /// tokens, since without them sibling files cannot be told apart.
    pub fn new(signature: &str, from: u64, to: u64, tag: &str) -> Result<Self, EnsError> {
        let from_token = format!("from.{from}");
        let to_token = format!("to.{to}");
        let from_pos = find_token(signature, &from_token, 0).ok_or_else(|| {
            missing_token_error(signature, &from_token)
        })?;
        let after_from = from_pos + from_token.len();
        let to_pos = find_token(signature, &to_token, after_from).ok_or_else(|| {
            missing_token_error(signature, &to_token)
        })?;
        Ok(Self {
            prefix: format!("{}from.", &signature[..from_pos]),
            infix: format!("{}to.", &signature[after_from..to_pos]),
            suffix: format!(
                "{}_state_{}.dat",
                &signature[to_pos + to_token.len()..],
                tag
            ),
        })
    }

    /// Parses the span encoded in a file name, if the name matches.
    pub fn parse(&self, file_name: &str) -> Option<(u64, u64)> {
        let rest = file_name.strip_prefix(&self.prefix)?;
        let (from, rest) = take_number(rest)?;
        let rest = rest.strip_prefix(&self.infix)?;
        let (to, rest) = take_number(rest)?;
        if rest == self.suffix {
            Some((from, to))
        } else {
            None
        }
    }
}

/// Scans the working directory for every state file matching the pattern.
///
/// The caller's own file matches as well. The result is sorted by span.
pub fn discover_siblings(
    working_dir: &Path,
    pattern: &StateFilePattern,
) -> Result<Vec<SiblingFile>, EnsError> {
    let entries = fs::read_dir(working_dir).map_err(|err| {
        EnsError::StateFile(
            ErrorInfo::new("state-dir-read", err.to_string())
                .with_context("path", working_dir.display().to_string()),
        )
    })?;
    let mut siblings = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| {
            EnsError::StateFile(
                ErrorInfo::new("state-dir-entry", err.to_string())
                    .with_context("path", working_dir.display().to_string()),
            )
        })?;
        let file_name = entry.file_name();
        let name = match file_name.to_str() {
            Some(name) => name,
            None => continue,
        };
        if let Some((from, to)) = pattern.parse(name) {
            siblings.push(SiblingFile {
                from,
                to,
                path: entry.path(),
            });
        }
    }
    siblings.sort_by_key(|sibling| (sibling.from, sibling.to));
    Ok(siblings)
}

/// Finds `token` inside `signature` starting at `start`, requiring that the
/// occurrence is not immediately followed by another digit ("from.1" must not
/// match inside "from.12").
fn find_token(signature: &str, token: &str, start: usize) -> Option<usize> {
    let mut search_from = start;
    while let Some(relative) = signature[search_from..].find(token) {
        let pos = search_from + relative;
        let end = pos + token.len();
        let at_boundary = signature[end..]
            .chars()
            .next()
            .map_or(true, |next| !next.is_ascii_digit());
        if at_boundary {
            return Some(pos);
        }
        search_from = pos + 1;
    }
    None
}

fn take_number(input: &str) -> Option<(u64, &str)> {
    let end = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    if end == 0 {
        return None;
    }
    let value = input[..end].parse().ok()?;
    Some((value, &input[end..]))
}

fn missing_token_error(signature: &str, token: &str) -> EnsError {
    EnsError::StateFile(
        ErrorInfo::new("signature-missing-span", "signature does not embed the span token")
            .with_context("signature", signature)
            .with_context("token", token)
            .with_hint("split workloads require a signature containing from.{from} and to.{to}"),
    )
}
