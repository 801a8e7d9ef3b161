use serde::{Deserialize, Serialize};

use crate::{Namespace, Symbol, TypeSegment, hint::HintWriter};

/// A declaration discovered by the frontend that a generator runs for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeclarationSite {
    #[serde(default)]
    pub namespace: Namespace,
    /// Containing types of the target, outermost first.
    #[serde(default)]
    pub ancestors: Vec<TypeSegment>,
    pub target: TypeSegment,
    /// Fully-qualified spellings of types visible by short name at the
    /// generated position, e.g. from implicit imports.
    #[serde(default)]
    pub ambient_names: Vec<String>,
    /// Import directives to reproduce in the generated file header.
    #[serde(default)]
    pub imports: Vec<String>,
    /// Whether every type in the chain is declared in a mergeable form.
    #[serde(default = "default_true")]
    pub is_partial: bool,
    /// Set when the generator targets a member rather than the type itself.
    #[serde(default)]
    pub member: Option<MemberSignature>,
}

fn default_true() -> bool {
    true
}

impl DeclarationSite {
    /// A partial site for `target` in the global namespace, with no
    /// ancestors, ambient names or imports.
    pub fn new(target: TypeSegment) -> Self {
        Self {
            namespace: Namespace::global(),
            ancestors: Vec::new(),
            target,
            ambient_names: Vec::new(),
            imports: Vec::new(),
            is_partial: true,
            member: None,
        }
    }

    /// Set the enclosing namespace.
    pub fn in_namespace(mut self, namespace: impl Into<Namespace>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the containing types, outermost first.
    pub fn nested_in(mut self, ancestors: impl IntoIterator<Item = TypeSegment>) -> Self {
        self.ancestors = ancestors.into_iter().collect();
        self
    }

    /// Replace the ambient names with fully-qualified spellings visible at
    /// the generated position.
    pub fn ambient(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.ambient_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the import directives copied into the header.
    pub fn imports(mut self, imports: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.imports = imports.into_iter().map(Into::into).collect();
        self
    }

    /// Record whether the whole chain can be merged with generated text.
    pub fn partial(mut self, is_partial: bool) -> Self {
        self.is_partial = is_partial;
        self
    }

    /// Target a member of the type instead of the type itself.
    pub fn member(mut self, member: MemberSignature) -> Self {
        self.member = Some(member);
        self
    }

    /// The full containment chain, outermost ancestor first and target last.
    pub fn chain(&self) -> impl Iterator<Item = &TypeSegment> {
        self.ancestors.iter().chain(std::iter::once(&self.target))
    }

    /// The target as a symbol, for referencing it from generated text.
    pub fn target_symbol(&self) -> Symbol {
        Symbol::from_segment(
            self.namespace.clone(),
            self.ancestors.clone(),
            self.target.clone(),
        )
    }

    /// Human-readable location used in diagnostics.
    pub fn display_name(&self) -> String {
        let mut name = self.target_symbol().qualified_name();
        if let Some(member) = &self.member {
            name.push('.');
            name.push_str(&member.name);
        }
        name
    }

    /// Suggested identifier for the generated unit:
    /// `{prefix}{ns}.{Ancestor`n+}{Target`n}[.{Member}({P1-P2})]{suffix}.{extension}`.
    pub fn preferred_hint_name(&self, prefix: &str, suffix: &str, extension: &str) -> String {
        let mut writer = HintWriter::new(prefix);
        writer
            .namespace(&self.namespace)
            .ancestors(&self.ancestors)
            .target(&self.target)
            .member(self.member.as_ref());
        writer.finish(suffix, extension)
    }
}

/// Signature of a member-level target, used only for hint names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberSignature {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterType>,
}

impl MemberSignature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    /// Append a parameter type.
    pub fn parameter(mut self, parameter: ParameterType) -> Self {
        self.parameters.push(parameter);
        self
    }
}

/// Parameter type as it appears in a hint name: simple name plus arity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterType {
    pub name: String,
    #[serde(default)]
    pub arity: usize,
}

impl ParameterType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arity: 0,
        }
    }

    /// Set the number of generic arguments.
    pub fn arity(mut self, arity: usize) -> Self {
        self.arity = arity;
        self
    }
}
