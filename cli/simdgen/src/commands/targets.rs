//! `simdgen targets` / `simdgen resolve` — catalog listing and resolution.

use anyhow::Result;
use simdgen_targets::{Catalog, CpuFamily};

/// CPU family filter accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FamilyArg {
    X86,
    Arm,
}

impl From<FamilyArg> for CpuFamily {
    fn from(arg: FamilyArg) -> Self {
        match arg {
            FamilyArg::X86 => CpuFamily::X86,
            FamilyArg::Arm => CpuFamily::Arm,
        }
    }
}

/// List the catalog, weakest instruction set first.
pub fn list(catalog: &Catalog, family: Option<FamilyArg>) -> Result<()> {
    print!("{}", render_list(catalog, family.map(CpuFamily::from)));
    Ok(())
}

fn render_list(catalog: &Catalog, only: Option<CpuFamily>) -> String {
    let mut out = String::new();
    for (family, sets) in catalog.families() {
        if only.is_some_and(|f| f != family) {
            continue;
        }
        out.push_str(&format!("{family}:\n"));
        for (pos, set) in sets.iter().enumerate() {
            out.push_str(&format!("  {pos:>2}  {:<20} {}\n", set.name(), set.file_tag()));
        }
    }
    out
}

/// Print what a target resolves to.
pub fn resolve(catalog: &Catalog, target: &str) -> Result<()> {
    let resolved = catalog.resolve(target)?;
    println!("{target} ({}):", resolved.family);
    for set in &resolved {
        println!("  {set}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_all_families() {
        let text = render_list(&Catalog::builtin(), None);
        assert!(text.starts_with("x86:\n"));
        assert!(text.contains("arm:\n"));
        assert!(text.contains("fma3_avx2"));
    }

    #[test]
    fn list_one_family() {
        let text = render_list(&Catalog::builtin(), Some(CpuFamily::Arm));
        assert!(!text.contains("x86:"));
        assert!(text.contains("neon64"));
    }

    #[test]
    fn resolve_known_and_unknown() {
        assert!(resolve(&Catalog::builtin(), "ssse3").is_ok());
        assert!(resolve(&Catalog::builtin(), "nonexistent").is_err());
    }
}
