//! Manual sub-parsing for `--configure-bucket`.
//!
//! Each occurrence of the flag takes one bucket name followed by a
//! variable-length list of configuration files. The generic option schema
//! cannot express that arity, so the raw token sequence is re-scanned
//! here with a small left-to-right grammar:
//!
//! ```text
//! group := FLAG name file*
//! ```
//!
//! where `name` and `file` are any tokens not beginning with a dash, and
//! each group ends at the next dash-leading token or end of input.

use crate::config::{BucketConfig, ConfigError};

const FLAG: &str = "--configure-bucket";

/// Recover every `--configure-bucket` group from the raw argument vector,
/// reading each listed file into bytes.
///
/// Groups are returned in encounter order, one entry per occurrence; a
/// group with no files is valid and still registers the bucket. Duplicate
/// names are kept as separate entries.
pub fn extract(args: &[String]) -> Result<Vec<BucketConfig>, ConfigError> {
    let mut buckets = Vec::new();
    let mut idx = 0;

    while idx < args.len() {
        let token = &args[idx];
        idx += 1;

        let name = if token == FLAG {
            // Name arrives as the next token.
            match args.get(idx) {
                Some(next) if !next.starts_with('-') => {
                    idx += 1;
                    next.clone()
                }
                _ => return Err(ConfigError::MissingBucketName),
            }
        } else if let Some(inline) = token.strip_prefix(FLAG).and_then(|r| r.strip_prefix('=')) {
            // `--configure-bucket=NAME` form.
            if inline.is_empty() {
                return Err(ConfigError::MissingBucketName);
            }
            inline.to_string()
        } else {
            continue;
        };

        let mut configs = Vec::new();
        while idx < args.len() && !args[idx].starts_with('-') {
            let path = &args[idx];
            idx += 1;
            let contents = std::fs::read(path).map_err(|source| ConfigError::BucketConfigRead {
                path: path.clone(),
                source,
            })?;
            configs.push(contents);
        }

        buckets.push(BucketConfig { name, configs });
    }

    Ok(buckets)
}
