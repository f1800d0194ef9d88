use crate::spec::encoding::Channel;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A channel that already had a definition was overwritten
    ReplacedEncoding { channel: Channel },

    /// A repeat node kept its first child and discarded the rest
    DroppedRepeatChildren { kept: usize, dropped: usize },

    /// A root-only property was supplied to a nested node and ignored
    TopLevelOnly { property: &'static str },
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::ReplacedEncoding { channel } => {
                write!(f, "replacing existing encoding for channel `{channel}`")
            }
            DiagnosticKind::DroppedRepeatChildren { kept, dropped } => {
                write!(
                    f,
                    "repeat keeps {kept} child spec, dropping {dropped} additional child spec(s)"
                )
            }
            DiagnosticKind::TopLevelOnly { property } => {
                write!(f, "`{property}` is only valid on the root spec and was ignored")
            }
        }
    }
}

/// A non-fatal note produced while assembling a spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,

    /// Child index path of the node the diagnostic refers to. Empty for the
    /// root, and for diagnostics raised outside the builder.
    pub path: Vec<u32>,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} (at {:?})", self.kind, self.path)
        }
    }
}

/// Collector threaded through encoding and builder operations.
///
/// Every recorded diagnostic is also logged at warn level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    path: Vec<u32>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: DiagnosticKind) {
        let diagnostic = Diagnostic {
            kind,
            path: self.path.clone(),
        };
        warn!("{diagnostic}");
        self.entries.push(diagnostic);
    }

    pub fn replaced_encoding(&mut self, channel: Channel) {
        self.push(DiagnosticKind::ReplacedEncoding { channel })
    }

    /// Run `f` with `index` appended to the current node path
    pub(crate) fn scoped<R>(&mut self, index: u32, f: impl FnOnce(&mut Self) -> R) -> R {
        self.path.push(index);
        let result = f(self);
        self.path.pop();
        result
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.entries.iter().map(|d| d.kind.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.replaced_encoding(Channel::Color);
        diagnostics.scoped(2, |d| {
            d.push(DiagnosticKind::TopLevelOnly { property: "config" })
        });

        let messages: Vec<_> = diagnostics.entries().iter().map(|d| d.to_string()).collect();
        assert_eq!(
            messages,
            vec![
                "replacing existing encoding for channel `color`".to_string(),
                "`config` is only valid on the root spec and was ignored (at [2])".to_string(),
            ]
        );
    }
}
