use crate::region::Region;
use std::fmt::Display;

/// Selects what a directive does with its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// `!` - keep the body when the value is truthy.
    Show,
    /// `?` - keep the body when the value is falsy.
    Hide,
    /// `*` - repeat the body once per element of a non-empty sequence.
    Repeat,
}

impl TryFrom<char> for Marker {
    type Error = char;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '!' => Ok(Marker::Show),
            '?' => Ok(Marker::Hide),
            '*' => Ok(Marker::Repeat),
            other => Err(other),
        }
    }
}

impl Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Marker::Show => write!(f, "!"),
            Marker::Hide => write!(f, "?"),
            Marker::Repeat => write!(f, "*"),
        }
    }
}

/// Formatting applied to a placeholder value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// Render the value as is.
    Plain,
    /// `-` - lower-case the first character.
    Lowercase,
    /// `#` - join a sequence of text with `", "`.
    Join,
}

impl Modifier {
    /// Split a leading modifier character from placeholder text.
    pub fn split(text: &str) -> (Self, &str) {
        match text.chars().next() {
            Some('-') => (Modifier::Lowercase, &text[1..]),
            Some('#') => (Modifier::Join, &text[1..]),
            _ => (Modifier::Plain, text),
        }
    }
}

/// A dot-separated chain of property names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Split the given text on `.` into a [`Path`].
    ///
    /// No validation happens here, see [`Path::is_valid`].
    pub fn parse(text: &str) -> Self {
        Self {
            segments: text.split('.').map(str::to_string).collect(),
        }
    }

    #[inline]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Return true if every segment is an identifier.
    pub fn is_valid(&self) -> bool {
        self.segments.iter().all(|segment| is_identifier(segment))
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// A conditional or repeated directive.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    /// Area of the source text from the opening tag to the closing tag.
    pub origin: Region,
    pub marker: Marker,
    pub path: Path,
}

/// A substitution site.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    /// Area of the source text covered by the parentheses.
    pub origin: Region,
    pub modifier: Modifier,
    pub path: Path,
}

impl Placeholder {
    /// Create a [`Placeholder`] from the parenthesized [`Region`] of the source.
    pub fn new(source: &str, origin: Region) -> Self {
        let (modifier, path) = Modifier::split(&source[origin.inner()]);

        Self {
            origin,
            modifier,
            path: Path::parse(path),
        }
    }
}

/// Contexts and placeholders that are resolved against the same object.
///
/// The root [`Scope`] is resolved against the data given to the renderer,
/// and the scope of a [`Marker::Repeat`] node against each element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    /// Ids of the placeholders resolved in this scope, in document order.
    pub placeholders: Vec<usize>,
    /// Child contexts, in document order.
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Id of the context.
    pub id: usize,
    /// Nested contexts, and for a repeat, the placeholders of its body.
    pub scope: Scope,
}

/// Build the [`Scope`] tree for the given contexts and placeholders.
///
/// Contexts must be sorted by the beginning of their origin, and nest
/// properly.
pub fn build(contexts: &[Context], placeholders: &[Placeholder]) -> Scope {
    let mut parents = Vec::with_capacity(contexts.len());
    let mut stack: Vec<usize> = vec![];
    for (id, context) in contexts.iter().enumerate() {
        while let Some(&top) = stack.last() {
            if contexts[top].origin.contains(context.origin) {
                break;
            }
            stack.pop();
        }
        parents.push(stack.last().copied());
        stack.push(id);
    }

    // Each placeholder belongs to the innermost repeat around it.
    let owners: Vec<Option<usize>> = placeholders
        .iter()
        .map(|placeholder| {
            contexts
                .iter()
                .enumerate()
                .filter(|(_, context)| {
                    context.marker == Marker::Repeat && context.origin.contains(placeholder.origin)
                })
                .map(|(id, _)| id)
                .last()
        })
        .collect();

    build_scope(None, contexts, &parents, &owners)
}

fn build_scope(
    owner: Option<usize>,
    contexts: &[Context],
    parents: &[Option<usize>],
    owners: &[Option<usize>],
) -> Scope {
    let placeholders = owners
        .iter()
        .enumerate()
        .filter(|(_, o)| **o == owner)
        .map(|(id, _)| id)
        .collect();

    Scope {
        placeholders,
        nodes: build_nodes(owner, contexts, parents, owners),
    }
}

fn build_nodes(
    parent: Option<usize>,
    contexts: &[Context],
    parents: &[Option<usize>],
    owners: &[Option<usize>],
) -> Vec<Node> {
    parents
        .iter()
        .enumerate()
        .filter(|(_, p)| **p == parent)
        .map(|(id, _)| {
            let scope = match contexts[id].marker {
                Marker::Repeat => build_scope(Some(id), contexts, parents, owners),
                Marker::Show | Marker::Hide => Scope {
                    placeholders: vec![],
                    nodes: build_nodes(Some(id), contexts, parents, owners),
                },
            };

            Node { id, scope }
        })
        .collect()
}

/// Return true if the given text is a single identifier.
fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if is_ident_start(c) => chars.all(is_ident_continue),
        _ => false,
    }
}

/// Return true if the given character is a recognized beginning identifier,
/// meaning '_' or an `xid_start`.
fn is_ident_start(c: char) -> bool {
    c == '_' || unicode_ident::is_xid_start(c)
}

/// Return true if the given character is a recognized continue identifier,
/// meaning an `xid_continue`.
fn is_ident_continue(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(range: std::ops::Range<usize>, marker: Marker) -> Context {
        Context {
            origin: range.into(),
            marker,
            path: Path::parse("a"),
        }
    }

    fn placeholder(range: std::ops::Range<usize>) -> Placeholder {
        Placeholder {
            origin: range.into(),
            modifier: Modifier::Plain,
            path: Path::parse("b"),
        }
    }

    #[test]
    fn test_path_validity() {
        assert!(Path::parse("member.type.name").is_valid());
        assert!(Path::parse("_private").is_valid());
        assert!(!Path::parse("").is_valid());
        assert!(!Path::parse("a..b").is_valid());
        assert!(!Path::parse("a b").is_valid());
        assert!(!Path::parse("1st").is_valid());
    }

    #[test]
    fn test_modifier_split() {
        assert_eq!(Modifier::split("-name"), (Modifier::Lowercase, "name"));
        assert_eq!(Modifier::split("#tags"), (Modifier::Join, "tags"));
        assert_eq!(Modifier::split("name"), (Modifier::Plain, "name"));
    }

    #[test]
    fn test_marker_from_char() {
        assert_eq!(Marker::try_from('*'), Ok(Marker::Repeat));
        assert_eq!(Marker::try_from('$'), Err('$'));
    }

    #[test]
    fn test_build_flat() {
        let contexts = vec![context(0..5, Marker::Show), context(6..10, Marker::Hide)];
        let placeholders = vec![placeholder(1..3), placeholder(11..14)];
        let scope = build(&contexts, &placeholders);

        assert_eq!(scope.placeholders, vec![0, 1]);
        assert_eq!(scope.nodes.len(), 2);
        assert!(scope.nodes.iter().all(|node| node.scope == Scope::default()));
    }

    #[test]
    fn test_build_nested_repeat() {
        // *( !( *( ) ) )
        let contexts = vec![
            context(0..40, Marker::Repeat),
            context(5..30, Marker::Show),
            context(10..20, Marker::Repeat),
        ];
        let placeholders = vec![placeholder(2..4), placeholder(6..8), placeholder(12..14)];
        let scope = build(&contexts, &placeholders);

        assert!(scope.placeholders.is_empty());
        let outer = &scope.nodes[0];
        assert_eq!(outer.id, 0);
        assert_eq!(outer.scope.placeholders, vec![0, 1]);

        let show = &outer.scope.nodes[0];
        assert_eq!(show.id, 1);
        assert!(show.scope.placeholders.is_empty());

        let inner = &show.scope.nodes[0];
        assert_eq!(inner.id, 2);
        assert_eq!(inner.scope.placeholders, vec![2]);
    }
}
