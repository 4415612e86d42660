use std::collections::BTreeMap;

use anyhow::{bail, Result};
use tracing::debug;

use crate::ast::Module;
use crate::diagnostics::Diagnostics;
use crate::options::AnalyzerOptions;
use crate::source::SourceFile;
use crate::typechecker::{Type, TypeChecker};

#[derive(Debug, Default, Clone)]
pub struct CompileOptions {
    pub analyzer: AnalyzerOptions,
}

/// Module-level bindings and named types of a module that checked cleanly.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub bindings: BTreeMap<String, Type>,
    pub types: BTreeMap<String, Type>,
}

impl Compilation {
    pub fn binding(&self, name: &str) -> Option<&Type> {
        self.bindings.get(name)
    }

    pub fn named_type(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }
}

pub struct Compiler {
    diagnostics: Diagnostics,
    options: CompileOptions,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            diagnostics: Diagnostics::new(),
            options,
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn check(&mut self, source: &SourceFile, module: &Module) -> Result<Compilation> {
        self.options.analyzer.validate()?;

        let mut checker = TypeChecker::with_options(source.path(), self.options.analyzer.clone());
        checker.check_module(module);

        let root = checker.environment().scope(checker.root_scope());
        let compilation = Compilation {
            bindings: root
                .bindings()
                .map(|(name, ty)| (name.clone(), ty.clone()))
                .collect(),
            types: root
                .declared_types()
                .map(|(name, ty)| (name.clone(), ty.clone()))
                .collect(),
        };

        let diagnostics = checker.into_diagnostics();
        let has_errors = diagnostics.has_errors();
        self.diagnostics.extend(diagnostics);

        if has_errors {
            debug!(
                path = %source.path().display(),
                diagnostics = self.diagnostics.len(),
                "type checking failed"
            );
            bail!("Type checking failed");
        }

        Ok(compilation)
    }
}
