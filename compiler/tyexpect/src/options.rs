//! Checker options.

/// Which directives are checked, and whether snapshot fixes are offered.
///
/// With the `serde` feature, hosts can read this from camelCase settings;
/// missing keys take their default.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct ExpectOptions {
    /// Check `$ExpectError`.
    pub expect_error: bool,
    /// Check `$ExpectType` and `^?` carets.
    pub expect_type: bool,
    /// Check `$ExpectTypeSnapshot`.
    pub expect_type_snapshot: bool,
    /// Report snapshot mismatches without offering to rewrite the snapshot.
    pub disable_snapshot_fix: bool,
}

impl Default for ExpectOptions {
    fn default() -> Self {
        ExpectOptions {
            expect_error: true,
            expect_type: true,
            expect_type_snapshot: true,
            disable_snapshot_fix: false,
        }
    }
}
