//! Hint-name composition.
//!
//! A hint name identifies one generated unit to the host, e.g.
//! ``N1.Outer`1+Target.Run(String-List`1).g.cs``.

use crate::{MemberSignature, Namespace, TypeSegment};

/// Accumulates the pieces of a hint name in order.
#[derive(Debug, Default)]
pub(crate) struct HintWriter {
    buf: String,
}

impl HintWriter {
    pub fn new(prefix: &str) -> Self {
        Self {
            buf: prefix.to_string(),
        }
    }

    pub fn namespace(&mut self, namespace: &Namespace) -> &mut Self {
        if !namespace.is_global() {
            self.buf.push_str(&namespace.to_string());
            self.buf.push('.');
        }
        self
    }

    pub fn ancestors(&mut self, ancestors: &[TypeSegment]) -> &mut Self {
        for ancestor in ancestors {
            self.name(&ancestor.name, ancestor.arity());
            self.buf.push('+');
        }
        self
    }

    pub fn target(&mut self, target: &TypeSegment) -> &mut Self {
        self.name(&target.name, target.arity())
    }

    pub fn member(&mut self, member: Option<&MemberSignature>) -> &mut Self {
        let Some(member) = member else {
            return self;
        };
        self.buf.push('.');
        self.buf.push_str(&member.name);
        self.buf.push('(');
        for (i, param) in member.parameters.iter().enumerate() {
            if i > 0 {
                self.buf.push('-');
            }
            self.name(&param.name, param.arity);
        }
        self.buf.push(')');
        self
    }

    pub fn finish(mut self, suffix: &str, extension: &str) -> String {
        self.buf.push_str(suffix);
        if !extension.is_empty() {
            self.buf.push('.');
            self.buf.push_str(extension.trim_start_matches('.'));
        }
        self.buf
    }

    fn name(&mut self, name: &str, arity: usize) -> &mut Self {
        self.buf.push_str(name);
        if arity > 0 {
            self.buf.push('`');
            self.buf.push_str(&arity.to_string());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParameterType, TypeKind};

    #[test]
    fn test_global_type_without_member() {
        let mut writer = HintWriter::new("");
        writer
            .namespace(&Namespace::global())
            .ancestors(&[])
            .target(&TypeSegment::new("Foo", TypeKind::Class))
            .member(None);
        assert_eq!(writer.finish("", "cs"), "Foo.cs");
    }

    #[test]
    fn test_member_parameters_joined_with_dash() {
        let member = MemberSignature {
            name: "Run".into(),
            parameters: vec![
                ParameterType::new("String"),
                ParameterType::new("List").arity(1),
            ],
        };
        let mut writer = HintWriter::new("Gen-");
        writer
            .namespace(&Namespace::from("N1"))
            .ancestors(&[TypeSegment::with_arity("Outer", TypeKind::Class, 1)])
            .target(&TypeSegment::new("Target", TypeKind::Class))
            .member(Some(&member));
        assert_eq!(
            writer.finish(".g", "cs"),
            "Gen-N1.Outer`1+Target.Run(String-List`1).g.cs"
        );
    }
}
