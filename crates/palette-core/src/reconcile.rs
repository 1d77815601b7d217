//! Exact positional reconciliation of two palettes.
//!
//! Every reference entry claims at most one rendered entry with an equal
//! [`Signature`]. Rendered signatures are tracked as a count map that is
//! decremented when claimed, so duplicates are consumed one at a time and
//! nothing is removed from a collection while it is being walked.

use std::collections::HashMap;
use std::fmt;

use crate::entry::Signature;
use crate::palette::Palette;

/// Report severity for a validation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-way partition of a reference and a rendered palette.
///
/// `matched` and `reference_only` are in reference palette order,
/// `rendered_only` is in rendered palette order. The three are pairwise
/// disjoint as multisets of claimed entries: `matched.len() +
/// reference_only.len()` equals the reference length and `matched.len() +
/// rendered_only.len()` equals the rendered length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reconciliation {
    pub matched: Vec<Signature>,
    pub reference_only: Vec<Signature>,
    pub rendered_only: Vec<Signature>,
    outcomes: Vec<(Signature, bool)>,
}

impl Reconciliation {
    /// Process exit status: the number of rendered-only colors.
    pub fn exit_status(&self) -> usize {
        self.rendered_only.len()
    }

    /// True when every rendered color is accounted for by the reference.
    pub fn is_clean(&self) -> bool {
        self.rendered_only.is_empty()
    }

    /// `Error` if the render contains colors the styling does not declare.
    pub fn severity(&self) -> Severity {
        if self.is_clean() {
            Severity::Info
        } else {
            Severity::Error
        }
    }

    /// Each reference signature with whether it found a rendered match,
    /// in reference order.
    pub fn outcomes(&self) -> impl Iterator<Item = (Signature, bool)> + '_ {
        self.outcomes.iter().copied()
    }

    /// Operator summary with the three partition counts.
    pub fn summary(&self) -> String {
        format!(
            "Summary:\nMatched colors: {}\nColors found only in colormap: {}\nColors found only in image: {}\n",
            self.matched.len(),
            self.reference_only.len(),
            self.rendered_only.len()
        )
    }
}

/// Partition `reference` and `rendered` by exact signature.
///
/// Greedy in reference order; there is no failure mode and empty inputs
/// produce a degenerate partition.
pub fn reconcile(reference: &Palette, rendered: &Palette) -> Reconciliation {
    let mut unclaimed: HashMap<Signature, usize> = HashMap::with_capacity(rendered.len());
    for sig in rendered.signatures() {
        *unclaimed.entry(sig).or_default() += 1;
    }

    let mut result = Reconciliation::default();
    for sig in reference.signatures() {
        let claimed = match unclaimed.get_mut(&sig) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                true
            }
            _ => false,
        };
        if claimed {
            result.matched.push(sig);
        } else {
            result.reference_only.push(sig);
        }
        result.outcomes.push((sig, claimed));
    }

    for sig in rendered.signatures() {
        if let Some(remaining) = unclaimed.get_mut(&sig) {
            if *remaining > 0 {
                *remaining -= 1;
                result.rendered_only.push(sig);
            }
        }
    }

    result
}
