//! Explicit instantiations of a kernel's call operator.

use std::fmt;

use simdgen_targets::InstructionSet;

use crate::options::{ElementType, EmitOptions};

/// One `(architecture, element type)` specialization of a metric kernel.
///
/// `Display` renders the defining form; [`Instantiation::extern_decl`] the
/// declaration placed in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instantiation {
    functor: String,
    arch_tag: String,
    element: ElementType,
}

impl Instantiation {
    pub fn new(metric: &str, arch: &InstructionSet, element: ElementType, options: &EmitOptions) -> Self {
        Self {
            functor: functor_name(metric),
            arch_tag: arch.cpp_tag(&options.simd_namespace),
            element,
        }
    }

    /// Both element-type instantiations for one architecture, float first.
    pub fn for_arch(metric: &str, arch: &InstructionSet, options: &EmitOptions) -> Vec<Self> {
        ElementType::ALL
            .into_iter()
            .map(|element| Self::new(metric, arch, element, options))
            .collect()
    }

    pub fn element(&self) -> ElementType {
        self.element
    }

    pub fn arch_tag(&self) -> &str {
        &self.arch_tag
    }

    /// `extern` declaration suppressing implicit instantiation in includers.
    pub fn extern_decl(&self) -> String {
        format!("extern {self}")
    }
}

impl fmt::Display for Instantiation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ty = self.element.c_name();
        write!(
            f,
            "template {ty} {functor}::operator()<{arch}, {ty}>({arch}, const {ty}*, const {ty}*, const std::size_t);",
            functor = self.functor,
            arch = self.arch_tag,
        )
    }
}

/// Name of the functor struct generated for a metric.
pub(crate) fn functor_name(metric: &str) -> String {
    format!("_{metric}")
}
