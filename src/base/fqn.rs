//! Fully-qualified names.
//!
//! An [`FqName`] is a root-relative dotted path identifying a declaration
//! uniquely within the resolution universe. Segments that collide with
//! reserved words (or are not plain identifiers) are rendered backtick-quoted.

use smol_str::SmolStr;

/// Reserved words of the source language. A name segment equal to one of
/// these must be backtick-quoted to be usable as an identifier.
pub const KEYWORDS: &[&str] = &["import", "package", "as", "this", "super"];

/// Marker segment used to force root-relative resolution when a local scope
/// shadows the first segment of a qualified name.
pub const ROOT_PREFIX: &str = "_root_";

/// Check whether `text` is a plain (unquoted) identifier.
pub fn is_plain_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if unicode_ident::is_xid_start(c) || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| unicode_ident::is_xid_continue(c))
}

/// Strip one layer of backtick quoting, if present.
pub fn unquote(name: &str) -> &str {
    name.strip_prefix('`')
        .and_then(|rest| rest.strip_suffix('`'))
        .unwrap_or(name)
}

fn needs_quoting(segment: &str) -> bool {
    KEYWORDS.contains(&segment) || !is_plain_identifier(segment)
}

/// A fully-qualified name: an ordered sequence of name segments.
///
/// The empty sequence is the root name. Segments are stored unquoted;
/// quoting is a rendering concern handled by [`FqName::quote_if_needed`]
/// and [`std::fmt::Display`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FqName {
    segments: Vec<SmolStr>,
}

impl FqName {
    /// The root (empty) name.
    pub const ROOT: FqName = FqName {
        segments: Vec::new(),
    };

    pub fn new(segments: Vec<SmolStr>) -> Self {
        Self { segments }
    }

    /// Parse a dotted path such as `a.b.c` or `a.`import`.c`.
    /// Backticks group a segment; dots inside backticks do not split.
    pub fn from_dotted(text: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut quoted = false;
        for c in text.chars() {
            match c {
                '`' => quoted = !quoted,
                '.' if !quoted => {
                    if !current.is_empty() {
                        segments.push(SmolStr::new(&current));
                        current.clear();
                    }
                }
                _ => current.push(c),
            }
        }
        if !current.is_empty() {
            segments.push(SmolStr::new(&current));
        }
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_one_segment(&self) -> bool {
        self.segments.len() == 1
    }

    pub fn segments(&self) -> &[SmolStr] {
        &self.segments
    }

    /// All but the last segment. The parent of the root is the root.
    pub fn parent(&self) -> FqName {
        match self.segments.split_last() {
            Some((_, init)) => FqName {
                segments: init.to_vec(),
            },
            None => FqName::ROOT,
        }
    }

    /// The last segment.
    ///
    /// Returns `None` for the root name.
    pub fn short_name(&self) -> Option<&SmolStr> {
        self.segments.last()
    }

    pub fn child(&self, name: impl Into<SmolStr>) -> FqName {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        FqName { segments }
    }

    /// Identity on the stored segments; kept as an explicit step so call
    /// sites mirror where quoting is decided. Rendering applies quoting.
    pub fn quote_if_needed(&self) -> FqName {
        self.clone()
    }

    /// Render one segment, quoting when it collides with a reserved word
    /// or is not a plain identifier.
    pub fn render_segment(segment: &str) -> String {
        if needs_quoting(segment) {
            format!("`{segment}`")
        } else {
            segment.to_string()
        }
    }

    /// Prepend the explicit root marker segment.
    pub fn with_root_prefix(&self) -> FqName {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.push(SmolStr::new(ROOT_PREFIX));
        segments.extend(self.segments.iter().cloned());
        FqName { segments }
    }

    /// Whether the first segment is the explicit root marker.
    pub fn has_root_prefix(&self) -> bool {
        self.segments.first().is_some_and(|s| s == ROOT_PREFIX)
    }
}

impl std::fmt::Display for FqName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(&Self::render_segment(segment))?;
        }
        Ok(())
    }
}

impl From<&str> for FqName {
    fn from(text: &str) -> Self {
        Self::from_dotted(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_name() {
        assert!(FqName::ROOT.is_root());
        assert!(FqName::from_dotted("").is_root());
        assert_eq!(FqName::ROOT.parent(), FqName::ROOT);
        assert_eq!(FqName::ROOT.short_name(), None);
    }

    #[test]
    fn parse_and_render() {
        let fq = FqName::from_dotted("a.b.c");
        assert_eq!(fq.segments().len(), 3);
        assert_eq!(fq.short_name().unwrap(), "c");
        assert_eq!(fq.parent().to_string(), "a.b");
        assert_eq!(fq.to_string(), "a.b.c");
        assert!(!fq.is_one_segment());
        assert!(FqName::from_dotted("a").is_one_segment());
    }

    #[test]
    fn quoted_segments() {
        let fq = FqName::from_dotted("a.`import`.c");
        assert_eq!(fq.segments()[1], "import");
        assert_eq!(fq.to_string(), "a.`import`.c");
    }

    #[test]
    fn reserved_word_is_quoted_on_render() {
        let fq = FqName::ROOT.child("pkg").child("as");
        assert_eq!(fq.to_string(), "pkg.`as`");
    }

    #[test]
    fn unquote_strips_one_layer() {
        assert_eq!(unquote("`foo`"), "foo");
        assert_eq!(unquote("foo"), "foo");
        assert_eq!(unquote("``"), "");
    }

    #[test]
    fn root_prefix() {
        let fq = FqName::from_dotted("a.b").with_root_prefix();
        assert!(fq.has_root_prefix());
        assert_eq!(fq.to_string(), "_root_.a.b");
    }
}
