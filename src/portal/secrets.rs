//! Shared section passwords.
//!
//! These are placeholders for a real per-user credential service; every user of a
//! section shares the same key.

use super::Section;

/// Expected credential for a section
pub fn expected_secret(section: Section) -> &'static str {
    match section {
        Section::HeadOffice => "HO123",
        Section::Factory => "PKS123",
    }
}

/// Exact, case-sensitive comparison against the section's secret
pub fn matches(section: Section, candidate: &str) -> bool {
    candidate == expected_secret(section)
}
