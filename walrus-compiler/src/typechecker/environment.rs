//! Lexical scopes for the type checker.
//!
//! Scopes live in an arena owned by [`TypeEnvironment`] and refer to their
//! parent by [`ScopeId`]. A parent never knows its children; a child never
//! mutates its parent. Scopes created for a construct are dropped with
//! [`TypeEnvironment::truncate`] once the construct has been checked.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, trace};

use super::types::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

impl ScopeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Module,
    Function,
    Method,
    Block,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    #[error("'{name}' is already declared in this scope")]
    AlreadyDeclared { name: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("'{name}' is not declared in this scope")]
    NotDeclared { name: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    parent: Option<ScopeId>,
    kind: ScopeKind,
    label: String,
    variables: HashMap<String, Type>,
    constants: HashMap<String, bool>,
    types: HashMap<String, Type>,
    file_path: PathBuf,
}

impl Scope {
    fn new(parent: Option<ScopeId>, kind: ScopeKind, label: String, file_path: PathBuf) -> Self {
        Self {
            parent,
            kind,
            label,
            variables: HashMap::new(),
            constants: HashMap::new(),
            types: HashMap::new(),
            file_path,
        }
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn binding(&self, name: &str) -> Option<&Type> {
        self.variables.get(name)
    }

    pub fn is_const(&self, name: &str) -> bool {
        self.constants.get(name).copied().unwrap_or(false)
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&String, &Type)> {
        self.variables.iter()
    }

    pub fn declared_type(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }

    pub fn declared_types(&self) -> impl Iterator<Item = (&String, &Type)> {
        self.types.iter()
    }
}

#[derive(Debug, Clone)]
pub struct TypeEnvironment {
    scopes: Vec<Scope>,
}

impl TypeEnvironment {
    /// Creates the environment with its module scope in place.
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        let root = Scope::new(None, ScopeKind::Module, "module".to_string(), file_path.into());
        Self { scopes: vec![root] }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn file_path(&self, id: ScopeId) -> &Path {
        self.scope(id).file_path()
    }

    pub fn push_scope(&mut self, parent: ScopeId, kind: ScopeKind, label: &str) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        let file_path = self.scope(parent).file_path.clone();
        self.scopes.push(Scope::new(
            Some(parent),
            kind,
            label.to_string(),
            file_path,
        ));
        debug!(scope = id.0, parent = parent.0, ?kind, label, "push scope");
        id
    }

    /// Position to later [`truncate`](Self::truncate) back to.
    pub fn mark(&self) -> usize {
        self.scopes.len()
    }

    /// Drops every scope created after `mark`. The module scope always stays.
    pub fn truncate(&mut self, mark: usize) {
        let keep = mark.max(1);
        if keep < self.scopes.len() {
            debug!(dropped = self.scopes.len() - keep, "truncate scopes");
            self.scopes.truncate(keep);
        }
    }

    /// Detached copy of a scope, used by method descriptors.
    pub fn snapshot(&self, id: ScopeId) -> Scope {
        self.scope(id).clone()
    }

    pub fn declare(
        &mut self,
        scope: ScopeId,
        name: &str,
        ty: Type,
        is_const: bool,
    ) -> Result<(), DeclarationError> {
        let target = &mut self.scopes[scope.0];
        if target.variables.contains_key(name) {
            return Err(DeclarationError::AlreadyDeclared {
                name: name.to_string(),
            });
        }

        debug!(scope = scope.0, name, ty = %ty, is_const, "declare");
        target.variables.insert(name.to_string(), ty);
        target.constants.insert(name.to_string(), is_const);
        Ok(())
    }

    /// Finds the scope that owns `name`, walking outward to the module scope.
    pub fn resolve(&self, scope: ScopeId, name: &str) -> Result<ScopeId, ResolutionError> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let candidate = self.scope(id);
            if candidate.variables.contains_key(name) {
                trace!(name, from = scope.0, owner = id.0, "resolved");
                return Ok(id);
            }
            current = candidate.parent;
        }

        Err(ResolutionError::NotDeclared {
            name: name.to_string(),
        })
    }

    pub fn binding_type(&self, owner: ScopeId, name: &str) -> Option<&Type> {
        self.scope(owner).binding(name)
    }

    pub fn is_const(&self, owner: ScopeId, name: &str) -> bool {
        self.scope(owner).is_const(name)
    }

    /// Replaces the type of a binding that `owner` already holds.
    pub fn rebind(&mut self, owner: ScopeId, name: &str, ty: Type) -> Result<(), ResolutionError> {
        match self.scopes[owner.0].variables.get_mut(name) {
            Some(slot) => {
                debug!(scope = owner.0, name, ty = %ty, "rebind");
                *slot = ty;
                Ok(())
            }
            None => Err(ResolutionError::NotDeclared {
                name: name.to_string(),
            }),
        }
    }

    /// Reserved for nominal struct registration. Accepts everything.
    pub fn declare_struct(
        &mut self,
        scope: ScopeId,
        name: &str,
        _ty: Type,
    ) -> Result<(), DeclarationError> {
        trace!(scope = scope.0, name, "declare_struct is not implemented");
        Ok(())
    }

    pub fn declare_type(
        &mut self,
        scope: ScopeId,
        name: &str,
        ty: Type,
    ) -> Result<(), DeclarationError> {
        let target = &mut self.scopes[scope.0];
        if target.types.contains_key(name) {
            return Err(DeclarationError::AlreadyDeclared {
                name: name.to_string(),
            });
        }

        debug!(scope = scope.0, name, "declare type");
        target.types.insert(name.to_string(), ty);
        Ok(())
    }

    /// Overwrites a named type declared in `scope`, e.g. once an interface
    /// registered ahead of its body has been fully built.
    pub fn replace_type(&mut self, scope: ScopeId, name: &str, ty: Type) {
        self.scopes[scope.0].types.insert(name.to_string(), ty);
    }

    pub fn resolve_type(&self, scope: ScopeId, name: &str) -> Option<&Type> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let candidate = self.scope(id);
            if let Some(ty) = candidate.types.get(name) {
                return Some(ty);
            }
            current = candidate.parent;
        }
        None
    }
}
