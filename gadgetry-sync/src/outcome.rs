//! Pass outcome and process exit mapping.

/// How a pass went, from the caller's point of view.
///
/// Ordered by severity so partial results can be folded together: a pass
/// that saved nine files and failed one is [`PassOutcome::FileFailures`]
/// regardless of the order the failures arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum PassOutcome {
    /// Every attempted step succeeded (skips included).
    #[default]
    Clean,
    /// At least one per-file step failed; the pass kept going.
    FileFailures,
    /// The gadget definition could not be updated.
    ManifestFailure,
}

impl PassOutcome {
    /// Process exit code for this outcome.
    pub fn exit_code(self) -> u8 {
        match self {
            PassOutcome::Clean => 0,
            PassOutcome::FileFailures => 1,
            PassOutcome::ManifestFailure => 2,
        }
    }

    /// Fold in another outcome, keeping the worse of the two.
    pub fn worsen(&mut self, other: PassOutcome) {
        *self = (*self).max(other);
    }
}
