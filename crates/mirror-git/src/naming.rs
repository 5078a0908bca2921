//! Remote naming for the local mirror

/// Name of the remote that points at the upstream project.
pub const UPSTREAM_REMOTE: &str = "origin";

/// Prefix shared by every destination remote (`backup0`, `backup1`, ...).
pub const DESTINATION_PREFIX: &str = "backup";

/// Remote name for the destination at `index` in the configured list.
pub fn destination_remote_name(index: usize) -> String {
    format!("{DESTINATION_PREFIX}{index}")
}

/// Whether `name` lives in the destination namespace managed by the mirror.
///
/// Anything starting with the prefix counts, including malformed names such
/// as `backup-old` or `backup07`, so leftovers get cleaned up as well.
pub fn is_destination_remote(name: &str) -> bool {
    name.starts_with(DESTINATION_PREFIX)
}

/// Parse the position out of a canonical destination remote name.
///
/// Returns `None` for names that [`destination_remote_name`] would never
/// produce.
pub fn destination_index(name: &str) -> Option<usize> {
    let digits = name.strip_prefix(DESTINATION_PREFIX)?;
    let index: usize = digits.parse().ok()?;
    (index.to_string() == digits).then_some(index)
}
