//! Legacy status normalization.
//!
//! Older deployments wrote free-form status strings that no current enum
//! carries. Every read path and the consistency sweep go through this one
//! table, so the mapping is applied uniformly instead of opportunistically.

/// status strings written by pre-0.4 versions, punches side.
pub const LEGACY_PUNCH_STATUSES: &[(&str, &str)] = &[
    ("awaiting", "pending"),
    ("awaiting_authorization", "pending"),
    ("authorized", "closed"),
    ("approved", "closed"),
    ("denied", "rejected"),
    ("unpaired", "open"),
];

/// status strings written by pre-0.4 versions, justifications side.
pub const LEGACY_JUSTIFICATION_STATUSES: &[(&str, &str)] = &[
    ("awaiting", "pending"),
    ("awaiting_authorization", "pending"),
    ("authorized", "approved"),
    ("denied", "rejected"),
];

fn lookup<'a>(table: &[(&'a str, &'a str)], s: &'a str) -> &'a str {
    table
        .iter()
        .find(|(old, _)| *old == s)
        .map(|(_, new)| *new)
        .unwrap_or(s)
}

/// Map a raw punch status string to its current equivalent.
/// Unknown values pass through untouched (the caller decides what to do).
pub fn normalize_punch_status(s: &str) -> &str {
    lookup(LEGACY_PUNCH_STATUSES, s)
}

/// Map a raw justification status string to its current equivalent.
pub fn normalize_justification_status(s: &str) -> &str {
    lookup(LEGACY_JUSTIFICATION_STATUSES, s)
}

/// True when the stored string differs from its normalized form, meaning a
/// persisted repair is due.
pub fn punch_status_is_legacy(s: &str) -> bool {
    normalize_punch_status(s) != s
}

pub fn justification_status_is_legacy(s: &str) -> bool {
    normalize_justification_status(s) != s
}
