//! Per-family instruction-set hierarchies and target resolution.
//!
//! A [`Catalog`] is built once and never mutated. Construction rejects any
//! identifier that appears twice (within a family or across families), so
//! every identifier maps to exactly one `(family, position)` pair and
//! resolution never has to pick between families.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{Result, TargetError};
use crate::isa::{CpuFamily, InstructionSet};

/// Built-in x86 hierarchy, weakest first.
const X86_BUILTIN: &[&str] = &[
    "sse2",
    "sse3",
    "ssse3",
    "sse4_1",
    "sse4_2",
    "avx",
    "avx2",
    "avx512bw",
    "avx512cd",
    "avx512dq",
    "avx512f",
    "fma3<xs::avx>",
    "fma3<xs::avx2>",
    "fma3<xs::sse4_2>",
    "fma4",
];

/// Built-in ARM hierarchy, weakest first.
const ARM_BUILTIN: &[&str] = &["neon", "neon64"];

/// Ordered instruction-set lists for every supported CPU family.
#[derive(Debug, Clone)]
pub struct Catalog {
    x86: Vec<InstructionSet>,
    arm: Vec<InstructionSet>,
    index: HashMap<String, (CpuFamily, usize)>,
}

/// Result of resolving a target: the target and every weaker instruction set
/// in its family, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedArchitectures {
    /// Family the target belongs to.
    pub family: CpuFamily,
    /// Catalog prefix ending at the target. Never empty.
    pub architectures: Vec<InstructionSet>,
}

impl ResolvedArchitectures {
    /// The requested target (the strongest entry).
    pub fn target(&self) -> &InstructionSet {
        // A resolved list always holds at least the target itself.
        &self.architectures[self.architectures.len() - 1]
    }

    /// Iterate the architectures weakest first.
    pub fn iter(&self) -> std::slice::Iter<'_, InstructionSet> {
        self.architectures.iter()
    }

    /// Number of resolved architectures.
    pub fn len(&self) -> usize {
        self.architectures.len()
    }

    /// Always false for a list produced by [`Catalog::resolve`].
    pub fn is_empty(&self) -> bool {
        self.architectures.is_empty()
    }

    /// Identifiers in order.
    pub fn names(&self) -> Vec<&str> {
        self.architectures.iter().map(InstructionSet::name).collect()
    }
}

impl<'a> IntoIterator for &'a ResolvedArchitectures {
    type Item = &'a InstructionSet;
    type IntoIter = std::slice::Iter<'a, InstructionSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Catalog {
    /// Build a catalog from explicit per-family lists.
    ///
    /// Fails if an identifier is empty, repeated anywhere in the catalog, or
    /// shares its file tag with another identifier.
    pub fn new(x86: Vec<InstructionSet>, arm: Vec<InstructionSet>) -> Result<Self> {
        let mut index: HashMap<String, (CpuFamily, usize)> = HashMap::new();
        let mut tags: HashMap<String, String> = HashMap::new();

        for (family, sets) in [(CpuFamily::X86, &x86), (CpuFamily::Arm, &arm)] {
            for (pos, set) in sets.iter().enumerate() {
                let tag = set.file_tag();
                if set.name().trim().is_empty() || tag.is_empty() {
                    return Err(TargetError::EmptyIdentifier {
                        family: family.to_string(),
                    });
                }
                if let Some((first, _)) = index.get(set.name()) {
                    return Err(TargetError::DuplicateInstructionSet {
                        name: set.name().to_string(),
                        first: first.to_string(),
                        second: family.to_string(),
                    });
                }
                if let Some(other) = tags.get(&tag) {
                    return Err(TargetError::FileTagCollision {
                        tag,
                        first: other.clone(),
                        second: set.name().to_string(),
                    });
                }
                tags.insert(tag, set.name().to_string());
                index.insert(set.name().to_string(), (family, pos));
            }
        }

        Ok(Self { x86, arm, index })
    }

    /// The catalog of every instruction set the runtime SIMD layer supports.
    pub fn builtin() -> Self {
        Self {
            x86: to_sets(X86_BUILTIN),
            arm: to_sets(ARM_BUILTIN),
            index: X86_BUILTIN
                .iter()
                .enumerate()
                .map(|(pos, name)| (name.to_string(), (CpuFamily::X86, pos)))
                .chain(
                    ARM_BUILTIN
                        .iter()
                        .enumerate()
                        .map(|(pos, name)| (name.to_string(), (CpuFamily::Arm, pos))),
                )
                .collect(),
        }
    }

    /// Built-in lists for a family.
    pub fn builtin_family(family: CpuFamily) -> Vec<InstructionSet> {
        match family {
            CpuFamily::X86 => to_sets(X86_BUILTIN),
            CpuFamily::Arm => to_sets(ARM_BUILTIN),
        }
    }

    /// Ordered instruction sets of one family.
    pub fn family(&self, family: CpuFamily) -> &[InstructionSet] {
        match family {
            CpuFamily::X86 => &self.x86,
            CpuFamily::Arm => &self.arm,
        }
    }

    /// Every family with its ordered instruction sets.
    pub fn families(&self) -> impl Iterator<Item = (CpuFamily, &[InstructionSet])> {
        CpuFamily::ALL.into_iter().map(|f| (f, self.family(f)))
    }

    /// Family and position of an identifier, if catalogued.
    pub fn locate(&self, name: &str) -> Option<(CpuFamily, usize)> {
        self.index.get(name).copied()
    }

    /// Resolve `target` to itself plus every weaker instruction set of its
    /// family, weakest first.
    pub fn resolve(&self, target: &str) -> Result<ResolvedArchitectures> {
        let (family, pos) = self
            .locate(target)
            .ok_or_else(|| TargetError::UnknownArchitecture {
                requested: target.to_string(),
                x86: names(&self.x86),
                arm: names(&self.arm),
            })?;

        Ok(ResolvedArchitectures {
            family,
            architectures: self.family(family)[..=pos].to_vec(),
        })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn to_sets(names: &[&str]) -> Vec<InstructionSet> {
    names.iter().map(|n| InstructionSet::new(*n)).collect()
}

fn names(sets: &[InstructionSet]) -> Vec<String> {
    sets.iter().map(|s| s.name().to_string()).collect()
}
