//! The per-metric header: generic kernel plus `extern` instantiations.

use std::fmt;

use simdgen_defs::MetricSpec;
use simdgen_targets::ResolvedArchitectures;

use crate::instantiation::{functor_name, Instantiation};
use crate::options::EmitOptions;

/// Indentation applied to fragment text inside the generated code.
const INDENT: &str = "    ";

/// Structured contents of `<metric>.hpp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderArtifact {
    file_name: String,
    guard: String,
    support_header: String,
    functor: String,
    setup_macro: String,
    body_macro: String,
    setup: Vec<String>,
    body: Vec<String>,
    remainder: Vec<String>,
    batch_template: String,
    loop_macro: String,
    arch_blocks: Vec<ArchBlock>,
}

/// The `extern` declarations of one architecture, under a comment banner.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ArchBlock {
    banner: String,
    declarations: Vec<Instantiation>,
}

impl HeaderArtifact {
    /// Build the header for `spec`, declaring instantiations for every
    /// architecture of `resolved` in list order.
    pub fn build(spec: &MetricSpec, resolved: &ResolvedArchitectures, options: &EmitOptions) -> Self {
        let metric = spec.name();
        let upper = metric.to_uppercase();

        let arch_blocks = resolved
            .iter()
            .map(|arch| ArchBlock {
                banner: arch.banner(),
                declarations: Instantiation::for_arch(metric, arch, options),
            })
            .collect();

        Self {
            file_name: options.header_file_name(metric),
            guard: format!("{upper}_HPP"),
            support_header: options.support_header.clone(),
            functor: functor_name(metric),
            setup_macro: format!("{upper}_SETUP"),
            body_macro: format!("{upper}_BODY"),
            setup: macro_lines(spec.setup()),
            body: macro_lines(spec.body()),
            remainder: indented_lines(spec.remainder()),
            batch_template: options.qualify("batch"),
            loop_macro: options.loop_macro.clone(),
            arch_blocks,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Every `extern` declaration, in emission order.
    pub fn declarations(&self) -> impl Iterator<Item = &Instantiation> {
        self.arch_blocks.iter().flat_map(|b| b.declarations.iter())
    }
}

/// Lines of a macro body: trailing whitespace and any author-written
/// continuation removed, trailing blank lines dropped, non-blank lines
/// indented.
fn macro_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text
        .lines()
        .map(|line| {
            let line = line.trim_end().trim_end_matches('\\').trim_end();
            if line.is_empty() {
                String::new()
            } else {
                format!("{INDENT}{line}")
            }
        })
        .collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// Lines of plain statements: non-blank lines indented, whitespace-only lines
/// kept as written.
fn indented_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{INDENT}{line}")
            }
        })
        .collect()
}

fn write_macro(f: &mut fmt::Formatter<'_>, name: &str, lines: &[String]) -> fmt::Result {
    if lines.is_empty() {
        return writeln!(f, "#define {name}(ITER)");
    }
    writeln!(f, "#define {name}(ITER) \\")?;
    for (i, line) in lines.iter().enumerate() {
        if i + 1 < lines.len() {
            writeln!(f, "{line} \\")?;
        } else {
            writeln!(f, "{line}")?;
        }
    }
    Ok(())
}

impl fmt::Display for HeaderArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#ifndef {}", self.guard)?;
        writeln!(f, "#define {}", self.guard)?;
        writeln!(f, "#include \"{}\"", self.support_header)?;
        writeln!(f)?;

        writeln!(f, "struct {} {{", self.functor)?;
        writeln!(f, "{INDENT}template <class Arch, typename Type>")?;
        writeln!(
            f,
            "{INDENT}Type operator()(Arch, const Type* a, const Type* b, const std::size_t size);"
        )?;
        writeln!(f, "}};")?;
        writeln!(f)?;

        write_macro(f, &self.setup_macro, &self.setup)?;
        write_macro(f, &self.body_macro, &self.body)?;
        writeln!(f)?;

        writeln!(f, "template <class Arch, typename Type>")?;
        writeln!(
            f,
            "Type {}::operator()(Arch, const Type* a, const Type* b, const std::size_t size) {{",
            self.functor
        )?;
        writeln!(f, "{INDENT}using batch_type = {}<Type, Arch>;", self.batch_template)?;
        writeln!(
            f,
            "{INDENT}{}({}, {}, batch_type)",
            self.loop_macro, self.setup_macro, self.body_macro
        )?;
        writeln!(f)?;
        for line in &self.remainder {
            writeln!(f, "{line}")?;
        }
        writeln!(f, "}}")?;

        for block in &self.arch_blocks {
            writeln!(f)?;
            writeln!(f, "// {}", block.banner)?;
            for decl in &block.declarations {
                writeln!(f, "{}", decl.extern_decl())?;
            }
        }

        writeln!(f)?;
        writeln!(f, "#endif // {}", self.guard)
    }
}
