//! An in-memory [`Host`](crate::Host) built from a compilation [`Snapshot`].
//!
//! Loading lowers the declarative snapshot into the shapes the suppressor
//! queries: qualified names become [`TypeId`]s, every name in a switch gets a
//! [`NodeId`], and the binding a real compiler would perform (type names,
//! property names, `Deconstruct` overload selection) is precomputed into a
//! node → symbol table.

use std::collections::BTreeMap;
use std::path::Path;

use cth_common::{Diagnostic, FileId, Location, Span};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::AnalyzerConfig;
use crate::error::SnapshotError;
use crate::host::{OptionsProvider, SemanticModel, SyntaxQueries, TypeQueries};
use crate::snapshot::{
    CaseDecl, ConstantDecl, FileDecl, GoverningDecl, LabelDecl, PatternDecl, Snapshot, SwitchDecl,
    SymbolDecl, TypeDecl,
};
use crate::symbol::{DeconstructMethod, Symbol};
use crate::syntax::{
    ConstantValue, Expr, Guard, MatchCase, NodeId, Pattern, PositionalClause, PropertySubpattern,
    RecursivePattern, SwitchExpression, SwitchLabel, SwitchSection, SwitchStatement,
};
use crate::ty::{Constructor, TypeId, TypeInfo};

/// Types every snapshot can reference without declaring them.
const BUILTIN_TYPES: &[(&str, bool)] = &[
    ("object", false),
    ("string", true),
    ("int", true),
    ("bool", true),
];

#[derive(Debug)]
struct TypeEntry {
    name: String,
    is_abstract: bool,
    sealed: bool,
    base: Option<TypeId>,
    interfaces: Vec<TypeId>,
    constructors: Vec<Constructor>,
    nested: Vec<TypeId>,
    members: FxHashSet<String>,
    properties: Vec<(String, Option<TypeId>)>,
    deconstructors: Vec<Vec<Option<TypeId>>>,
}

impl TypeEntry {
    fn named(name: &str, sealed: bool) -> Self {
        TypeEntry {
            name: name.to_string(),
            is_abstract: false,
            sealed,
            base: None,
            interfaces: Vec::new(),
            constructors: Vec::new(),
            nested: Vec::new(),
            members: FxHashSet::default(),
            properties: Vec::new(),
            deconstructors: Vec::new(),
        }
    }
}

/// One source file of the snapshot.
#[derive(Debug)]
pub struct SourceFile {
    pub path: String,
    pub text: Option<String>,
    options: BTreeMap<String, String>,
    expressions: Vec<SwitchExpression>,
    statements: Vec<SwitchStatement>,
}

impl SourceFile {
    pub fn switch_expressions(&self) -> &[SwitchExpression] {
        &self.expressions
    }

    pub fn switch_statements(&self) -> &[SwitchStatement] {
        &self.statements
    }
}

/// A host whose entire compilation lives in memory.
#[derive(Debug)]
pub struct MemoryHost {
    types: Vec<TypeEntry>,
    type_ids: FxHashMap<String, TypeId>,
    extensions: Vec<(TypeId, Vec<Option<TypeId>>)>,
    files: Vec<SourceFile>,
    type_infos: FxHashMap<NodeId, TypeInfo>,
    symbols: FxHashMap<NodeId, Symbol>,
    diagnostics: Vec<Diagnostic>,
    config: AnalyzerConfig,
    next_node: u32,
}

impl MemoryHost {
    pub fn from_file(path: &Path) -> Result<MemoryHost, SnapshotError> {
        let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<MemoryHost, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(content)?;
        Self::from_snapshot(snapshot)
    }

    pub fn from_value(value: serde_json::Value) -> Result<MemoryHost, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_value(value)?;
        Self::from_snapshot(snapshot)
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Result<MemoryHost, SnapshotError> {
        let mut host = MemoryHost {
            types: Vec::new(),
            type_ids: FxHashMap::default(),
            extensions: Vec::new(),
            files: Vec::new(),
            type_infos: FxHashMap::default(),
            symbols: FxHashMap::default(),
            diagnostics: Vec::new(),
            config: AnalyzerConfig::default(),
            next_node: 0,
        };

        for &(name, sealed) in BUILTIN_TYPES {
            host.type_ids.insert(name.to_string(), TypeId(host.types.len() as u32));
            host.types.push(TypeEntry::named(name, sealed));
        }

        // Names first so declarations may reference types declared later.
        let mut declared = Vec::new();
        for decl in &snapshot.types {
            host.declare_type(decl, None, &mut declared)?;
        }
        for (id, decl) in declared {
            host.define_type(id, decl)?;
        }
        host.check_base_chains()?;

        for extension in &snapshot.extensions {
            let receiver = host.require_type(&extension.receiver, "extension Deconstruct")?;
            let mut parameters = vec![Some(receiver)];
            for param in &extension.parameters {
                parameters.push(host.require_optional_type(param.as_deref(), &extension.receiver)?);
            }
            host.extensions.push((receiver, parameters));
        }

        for file in snapshot.files {
            host.lower_file(file)?;
        }

        for decl in snapshot.diagnostics {
            let file = host
                .file_id(&decl.file)
                .ok_or_else(|| SnapshotError::UnknownFile(decl.file.clone()))?;
            check_span(decl.span, &decl.file)?;
            host.diagnostics
                .push(Diagnostic::new(decl.id, Location::new(file, decl.span), decl.message));
        }

        Ok(host)
    }

    /// Attach an analyzer configuration consulted after per-file options.
    pub fn with_config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    /// The diagnostics the snapshot reports.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn file(&self, file: FileId) -> Option<&SourceFile> {
        self.files.get(file.0 as usize)
    }

    pub fn file_id(&self, path: &str) -> Option<FileId> {
        self.files
            .iter()
            .position(|f| f.path == path)
            .map(|idx| FileId(idx as u32))
    }

    pub fn files(&self) -> impl Iterator<Item = (FileId, &SourceFile)> {
        self.files
            .iter()
            .enumerate()
            .map(|(idx, file)| (FileId(idx as u32), file))
    }

    /// Look up a type by qualified name.
    pub fn type_by_name(&self, name: &str) -> Option<TypeId> {
        self.type_ids.get(name).copied()
    }

    // ── Type lowering ──────────────────────────────────────────────────

    fn declare_type<'d>(
        &mut self,
        decl: &'d TypeDecl,
        parent: Option<&str>,
        declared: &mut Vec<(TypeId, &'d TypeDecl)>,
    ) -> Result<TypeId, SnapshotError> {
        let name = match parent {
            Some(parent) => format!("{}.{}", parent, decl.name),
            None => decl.name.clone(),
        };
        if self.type_ids.contains_key(&name) {
            return Err(SnapshotError::DuplicateType(name));
        }
        let id = TypeId(self.types.len() as u32);
        self.type_ids.insert(name.clone(), id);
        self.types.push(TypeEntry::named(&name, decl.sealed));
        declared.push((id, decl));

        let mut nested = Vec::with_capacity(decl.nested.len());
        for child in &decl.nested {
            nested.push(self.declare_type(child, Some(&name), declared)?);
        }
        self.types[id.0 as usize].nested = nested;
        Ok(id)
    }

    fn define_type(&mut self, id: TypeId, decl: &TypeDecl) -> Result<(), SnapshotError> {
        let owner = self.types[id.0 as usize].name.clone();

        let base = match &decl.base {
            Some(base) => Some(self.require_type(base, &owner)?),
            None => None,
        };
        let interfaces = decl
            .interfaces
            .iter()
            .map(|name| self.require_type(name, &owner))
            .collect::<Result<Vec<_>, _>>()?;
        let mut constructors = Vec::with_capacity(decl.constructors.len());
        for ctor in &decl.constructors {
            let parameters = ctor
                .parameters
                .iter()
                .map(|param| self.require_optional_type(param.as_deref(), &owner))
                .collect::<Result<Vec<_>, _>>()?;
            constructors.push(Constructor::new(ctor.accessibility, parameters));
        }
        let mut properties = Vec::with_capacity(decl.properties.len());
        for prop in &decl.properties {
            let ty = self.require_optional_type(prop.ty.as_deref(), &owner)?;
            properties.push((prop.name.clone(), ty));
        }
        let mut deconstructors = Vec::with_capacity(decl.deconstructors.len());
        for params in &decl.deconstructors {
            let params = params
                .iter()
                .map(|param| self.require_optional_type(param.as_deref(), &owner))
                .collect::<Result<Vec<_>, _>>()?;
            deconstructors.push(params);
        }

        let entry = &mut self.types[id.0 as usize];
        entry.is_abstract = decl.is_abstract;
        entry.base = base;
        entry.interfaces = interfaces;
        entry.constructors = constructors;
        entry.members = decl.members.iter().cloned().collect();
        entry.properties = properties;
        entry.deconstructors = deconstructors;
        Ok(())
    }

    /// Every base chain must end; lookups walk them without a visited set.
    fn check_base_chains(&self) -> Result<(), SnapshotError> {
        for (idx, entry) in self.types.iter().enumerate() {
            let mut seen = FxHashSet::default();
            let mut current = Some(TypeId(idx as u32));
            while let Some(ty) = current {
                if !seen.insert(ty) {
                    return Err(SnapshotError::CyclicBase {
                        name: entry.name.clone(),
                    });
                }
                current = self.entry(ty).base;
            }
        }
        Ok(())
    }

    fn require_type(&self, name: &str, referenced_by: &str) -> Result<TypeId, SnapshotError> {
        self.type_by_name(name).ok_or_else(|| SnapshotError::UnknownType {
            name: name.to_string(),
            referenced_by: referenced_by.to_string(),
        })
    }

    fn require_optional_type(
        &self,
        name: Option<&str>,
        referenced_by: &str,
    ) -> Result<Option<TypeId>, SnapshotError> {
        name.map(|name| self.require_type(name, referenced_by)).transpose()
    }

    fn entry(&self, ty: TypeId) -> &TypeEntry {
        &self.types[ty.0 as usize]
    }

    /// `ty` followed by its base types.
    fn base_chain(&self, ty: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        std::iter::successors(Some(ty), move |&t| self.entry(t).base)
    }

    fn find_property(&self, ty: TypeId, name: &str) -> Option<Option<TypeId>> {
        self.base_chain(ty).find_map(|t| {
            self.entry(t)
                .properties
                .iter()
                .find(|(prop, _)| prop == name)
                .map(|(_, prop_ty)| *prop_ty)
        })
    }

    /// Overload resolution for a positional pattern of `arity` elements:
    /// instance methods win over extension methods.
    fn find_deconstruct(&self, ty: TypeId, arity: usize) -> Option<DeconstructMethod> {
        let instance = self.base_chain(ty).find_map(|t| {
            self.entry(t)
                .deconstructors
                .iter()
                .find(|params| params.len() == arity)
        });
        if let Some(params) = instance {
            return Some(DeconstructMethod {
                is_extension: false,
                parameters: params.clone(),
            });
        }
        self.extensions
            .iter()
            .find(|(receiver, params)| {
                params.len() == arity + 1 && self.has_implicit_conversion(ty, *receiver)
            })
            .map(|(_, params)| DeconstructMethod {
                is_extension: true,
                parameters: params.clone(),
            })
    }

    // ── Syntax lowering ────────────────────────────────────────────────

    fn fresh_node(&mut self) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        id
    }

    fn lower_file(&mut self, decl: FileDecl) -> Result<(), SnapshotError> {
        let mut expressions = Vec::new();
        let mut statements = Vec::new();
        for switch in &decl.switches {
            match switch {
                SwitchDecl::Expression {
                    span,
                    governing,
                    arms,
                } => {
                    check_span(*span, &decl.path)?;
                    check_span(governing.span, &decl.path)?;
                    let (governing, input) = self.lower_governing(governing);
                    let arms = arms.iter().map(|arm| self.lower_case(arm, input)).collect();
                    expressions.push(SwitchExpression {
                        span: *span,
                        governing,
                        arms,
                    });
                }
                SwitchDecl::Statement {
                    span,
                    governing,
                    sections,
                } => {
                    check_span(*span, &decl.path)?;
                    check_span(governing.span, &decl.path)?;
                    let (governing, input) = self.lower_governing(governing);
                    let sections = sections
                        .iter()
                        .map(|section| SwitchSection {
                            labels: section
                                .labels
                                .iter()
                                .map(|label| self.lower_label(label, input))
                                .collect(),
                        })
                        .collect();
                    statements.push(SwitchStatement {
                        span: *span,
                        governing,
                        sections,
                    });
                }
            }
        }
        self.files.push(SourceFile {
            path: decl.path,
            text: decl.text,
            options: decl.options,
            expressions,
            statements,
        });
        Ok(())
    }

    fn lower_governing(&mut self, decl: &GoverningDecl) -> (Expr, Option<TypeId>) {
        let node = self.fresh_node();
        let ty = decl.ty.as_deref().and_then(|name| self.type_by_name(name));
        self.type_infos.insert(
            node,
            TypeInfo {
                ty,
                nullability: decl.nullability,
            },
        );
        if let Some(symbol) = &decl.symbol {
            let symbol = match symbol {
                SymbolDecl::Parameter { annotation } => Symbol::Parameter {
                    annotation: *annotation,
                },
                SymbolDecl::Local { annotation } => Symbol::Local {
                    annotation: *annotation,
                },
                SymbolDecl::Other => Symbol::Other,
            };
            self.symbols.insert(node, symbol);
        }
        (
            Expr {
                node,
                span: decl.span,
            },
            ty,
        )
    }

    fn lower_case(&mut self, decl: &CaseDecl, input: Option<TypeId>) -> MatchCase {
        MatchCase {
            pattern: self.lower_pattern(&decl.pattern, input),
            guard: decl.guard.then_some(Guard { span: decl.span }),
            span: decl.span,
        }
    }

    fn lower_label(&mut self, decl: &LabelDecl, input: Option<TypeId>) -> SwitchLabel {
        match decl {
            LabelDecl::Case { value, span } => SwitchLabel::Case {
                value: self.lower_constant(value),
                span: *span,
            },
            LabelDecl::Pattern {
                pattern,
                guard,
                span,
            } => SwitchLabel::Pattern(MatchCase {
                pattern: self.lower_pattern(pattern, input),
                guard: guard.then_some(Guard { span: *span }),
                span: *span,
            }),
            LabelDecl::Default { span } => SwitchLabel::Default { span: *span },
        }
    }

    fn lower_constant(&mut self, decl: &ConstantDecl) -> ConstantValue {
        match decl {
            ConstantDecl::Null => ConstantValue::Null,
            ConstantDecl::Literal(text) => ConstantValue::Literal(text.clone()),
            ConstantDecl::Name(name) => ConstantValue::Name(self.type_name_node(name)),
        }
    }

    /// A node for a type name, bound when the name is declared.
    fn type_name_node(&mut self, name: &str) -> NodeId {
        let node = self.fresh_node();
        if let Some(ty) = self.type_by_name(name) {
            self.symbols.insert(node, Symbol::Type(ty));
        }
        node
    }

    /// `input` is the static type of the value the pattern is applied to; it
    /// drives property lookup and `Deconstruct` selection.
    fn lower_pattern(&mut self, decl: &PatternDecl, input: Option<TypeId>) -> Pattern {
        match decl {
            PatternDecl::Constant { value } => Pattern::Constant(self.lower_constant(value)),
            PatternDecl::Type { ty } => Pattern::Type {
                ty: self.type_name_node(ty),
            },
            PatternDecl::Declaration { ty, designation } => Pattern::Declaration {
                ty: self.type_name_node(ty),
                designation: designation.clone(),
            },
            PatternDecl::Recursive {
                ty,
                positional,
                properties,
                designation,
            } => {
                let narrowed = ty
                    .as_deref()
                    .and_then(|name| self.type_by_name(name))
                    .or(input);
                let ty = ty.as_deref().map(|name| self.type_name_node(name));

                let positional = positional.as_ref().map(|subpatterns| {
                    let node = self.fresh_node();
                    let method = narrowed.and_then(|t| self.find_deconstruct(t, subpatterns.len()));
                    let subpatterns = subpatterns
                        .iter()
                        .enumerate()
                        .map(|(idx, sub)| {
                            let element = method.as_ref().and_then(|m| m.element_type(idx));
                            self.lower_pattern(sub, element)
                        })
                        .collect();
                    if let Some(method) = method {
                        self.symbols.insert(node, Symbol::Deconstruct(method));
                    }
                    PositionalClause { node, subpatterns }
                });

                let properties = properties.as_ref().map(|subpatterns| {
                    subpatterns
                        .iter()
                        .map(|sub| {
                            let member = self.fresh_node();
                            let prop_ty = narrowed.and_then(|t| self.find_property(t, &sub.name));
                            if let Some(prop_ty) = prop_ty {
                                self.symbols.insert(member, Symbol::Property { ty: prop_ty });
                            }
                            PropertySubpattern {
                                member,
                                pattern: self.lower_pattern(&sub.pattern, prop_ty.flatten()),
                            }
                        })
                        .collect()
                });

                Pattern::Recursive(RecursivePattern {
                    ty,
                    positional,
                    properties,
                    designation: designation.clone(),
                })
            }
            PatternDecl::Discard => Pattern::Discard,
            PatternDecl::Var { designation } => Pattern::Var {
                designation: designation.clone(),
            },
            PatternDecl::Relational { op, value } => Pattern::Relational {
                op: (*op).into(),
                value: self.lower_constant(value),
            },
            PatternDecl::Opaque => Pattern::Opaque,
        }
    }
}

fn check_span(span: Span, file: &str) -> Result<(), SnapshotError> {
    if span.start > span.end {
        return Err(SnapshotError::InvertedSpan {
            file: file.to_string(),
            start: span.start,
            end: span.end,
        });
    }
    Ok(())
}

/// Innermost item whose span contains `span`.
fn innermost<T>(items: &[T], span: Span, span_of: impl Fn(&T) -> Span) -> Option<&T> {
    items
        .iter()
        .filter(|item| span_of(*item).contains(span))
        .min_by_key(|item| span_of(*item).len())
}

impl TypeQueries for MemoryHost {
    fn type_name(&self, ty: TypeId) -> &str {
        &self.entry(ty).name
    }

    fn is_abstract(&self, ty: TypeId) -> bool {
        self.entry(ty).is_abstract
    }

    fn is_sealed(&self, ty: TypeId) -> bool {
        self.entry(ty).sealed
    }

    fn constructors(&self, ty: TypeId) -> &[Constructor] {
        &self.entry(ty).constructors
    }

    fn nested_types(&self, ty: TypeId) -> &[TypeId] {
        &self.entry(ty).nested
    }

    fn base_type(&self, ty: TypeId) -> Option<TypeId> {
        self.entry(ty).base
    }

    fn has_member(&self, ty: TypeId, name: &str) -> bool {
        self.entry(ty).members.contains(name)
    }

    /// Identity, a conversion to `object`, or a reference conversion along
    /// base types and implemented interfaces.
    fn has_implicit_conversion(&self, from: TypeId, to: TypeId) -> bool {
        if from == to || self.type_ids.get("object") == Some(&to) {
            return true;
        }
        let mut seen = FxHashSet::default();
        let mut pending = vec![from];
        while let Some(ty) = pending.pop() {
            if ty == to {
                return true;
            }
            if !seen.insert(ty) {
                continue;
            }
            let entry = self.entry(ty);
            pending.extend(entry.base);
            pending.extend(entry.interfaces.iter().copied());
        }
        false
    }
}

impl SemanticModel for MemoryHost {
    fn type_info(&self, node: NodeId) -> TypeInfo {
        self.type_infos.get(&node).copied().unwrap_or_default()
    }

    fn symbol_info(&self, node: NodeId) -> Option<Symbol> {
        self.symbols.get(&node).cloned()
    }
}

impl SyntaxQueries for MemoryHost {
    fn switch_expression_at(&self, location: &Location) -> Option<&SwitchExpression> {
        let file = self.file(location.file)?;
        innermost(&file.expressions, location.span, |e| e.span).or_else(|| {
            file.expressions
                .iter()
                .find(|e| location.span.contains(e.span))
        })
    }

    fn switch_statement_at(&self, location: &Location) -> Option<&SwitchStatement> {
        let file = self.file(location.file)?;
        innermost(&file.statements, location.span, |s| s.span)
    }
}

impl OptionsProvider for MemoryHost {
    fn option(&self, file: FileId, key: &str) -> Option<&str> {
        let file = self.file(file)?;
        file.options
            .get(key)
            .map(String::as_str)
            .or_else(|| self.config.lookup(&file.path, key))
    }
}
