//! The text under active rendering, together with the positions of every
//! directive and placeholder inside of it.
//!
//! All mutation of the text goes through [`Document`], which remaps both
//! ledgers in the same step. A ledger entry of `None` marks a span that an
//! earlier edit consumed entirely; it is never resolved again.
use crate::region::Region;

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// The working text.
    text: String,
    /// Position of each context, indexed by context id.
    contexts: Vec<Option<Region>>,
    /// Position of each placeholder, indexed by placeholder id.
    placeholders: Vec<Option<Region>>,
}

impl Document {
    /// Create a new [`Document`] over the given text and spans.
    pub fn new<T>(text: T, contexts: Vec<Region>, placeholders: Vec<Region>) -> Self
    where
        T: Into<String>,
    {
        Self {
            text: text.into(),
            contexts: contexts.into_iter().map(Some).collect(),
            placeholders: placeholders.into_iter().map(Some).collect(),
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn into_text(self) -> String {
        self.text
    }

    /// Return the current position of the context with the given id, or `None`
    /// if it is gone.
    #[inline]
    pub fn context(&self, id: usize) -> Option<Region> {
        self.contexts.get(id).copied().flatten()
    }

    /// Return the current position of the placeholder with the given id, or
    /// `None` if it is gone.
    #[inline]
    pub fn placeholder(&self, id: usize) -> Option<Region> {
        self.placeholders.get(id).copied().flatten()
    }

    /// Remove `length` bytes of text beginning at `at`.
    ///
    /// Spans entirely inside the removed range become gone. Spans after it
    /// move left, and spans straddling it keep their beginning while their
    /// ending moves left.
    pub fn remove(&mut self, at: usize, length: usize) {
        if length == 0 {
            return;
        }
        debug_assert!(at + length <= self.text.len(), "removal must be in bounds");

        self.text.replace_range(at..at + length, "");
        for span in self.spans_mut() {
            *span = span.and_then(|region| shift_removed(region, at, length));
        }
    }

    /// Insert the given text at `at`.
    ///
    /// Spans beginning at or after `at` move right, spans that surround `at`
    /// grow, and spans ending at or before it are untouched.
    pub fn insert(&mut self, at: usize, text: &str) {
        if text.is_empty() {
            return;
        }

        self.text.insert_str(at, text);
        let length = text.len();
        for span in self.spans_mut() {
            *span = span.map(|region| shift_inserted(region, at, length));
        }
    }

    /// Replace the text covered by `region` with the given text.
    pub fn replace(&mut self, region: Region, text: &str) {
        self.remove(region.begin, region.len());
        self.insert(region.begin, text);
    }

    /// Return an independent [`Document`] holding only the text inside
    /// `region`.
    ///
    /// Spans lying entirely inside `region` are carried over, relative to the
    /// beginning of the excerpt. Every other span is gone in the copy.
    pub fn excerpt(&self, region: Region) -> Document {
        let carry = |span: &Option<Region>| {
            span.filter(|inner| region.contains(*inner))
                .map(|inner| inner.rebase(region.begin))
        };

        Document {
            text: self.text.as_str()[region].to_string(),
            contexts: self.contexts.iter().map(carry).collect(),
            placeholders: self.placeholders.iter().map(carry).collect(),
        }
    }

    fn spans_mut(&mut self) -> impl Iterator<Item = &mut Option<Region>> {
        self.contexts.iter_mut().chain(self.placeholders.iter_mut())
    }
}

/// Remap a span after `length` bytes were removed at `at`.
fn shift_removed(region: Region, at: usize, length: usize) -> Option<Region> {
    let until = at + length;
    if region.begin >= at && region.end <= until {
        return None;
    }

    let begin = if region.begin >= until {
        region.begin - length
    } else if region.begin > at {
        at
    } else {
        region.begin
    };
    let end = if region.end >= until {
        region.end - length
    } else if region.end > at {
        at
    } else {
        region.end
    };

    Some(Region { begin, end })
}

/// Remap a span after `length` bytes were inserted at `at`.
fn shift_inserted(region: Region, at: usize, length: usize) -> Region {
    if region.begin >= at {
        Region {
            begin: region.begin + length,
            end: region.end + length,
        }
    } else if region.end > at {
        Region {
            begin: region.begin,
            end: region.end + length,
        }
    } else {
        region
    }
}

#[cfg(test)]
mod tests {
    use super::Document;
    use crate::region::Region;

    fn helper_document() -> Document {
        // {Hello (name)} (tail)
        // 0      7     13 15   20
        Document::new(
            "{Hello (name)} (tail)",
            vec![Region::new(0..14)],
            vec![Region::new(7..13), Region::new(15..21)],
        )
    }

    #[test]
    fn test_remove_shifts_following_spans() {
        let mut document = helper_document();
        document.remove(1, 6);

        assert_eq!(document.text(), "{(name)} (tail)");
        assert_eq!(document.context(0), Some(Region::new(0..8)));
        assert_eq!(document.placeholder(0), Some(Region::new(1..7)));
        assert_eq!(document.placeholder(1), Some(Region::new(9..15)));
    }

    #[test]
    fn test_remove_consumes_inner_spans() {
        let mut document = helper_document();
        document.remove(0, 14);

        assert_eq!(document.text(), " (tail)");
        assert_eq!(document.context(0), None);
        assert_eq!(document.placeholder(0), None);
        assert_eq!(document.placeholder(1), Some(Region::new(1..7)));
    }

    #[test]
    fn test_remove_straddling_keeps_begin() {
        let mut document = helper_document();
        // Drop the closing brace of the context only.
        document.remove(13, 1);

        assert_eq!(document.text(), "{Hello (name) (tail)");
        assert_eq!(document.context(0), Some(Region::new(0..13)));
        assert_eq!(document.placeholder(0), Some(Region::new(7..13)));
    }

    #[test]
    fn test_insert_grows_surrounding_spans() {
        let mut document = helper_document();
        document.remove(7, 6);
        document.insert(7, "Taylor");

        assert_eq!(document.text(), "{Hello Taylor} (tail)");
        assert_eq!(document.context(0), Some(Region::new(0..14)));
        assert_eq!(document.placeholder(0), None);
        assert_eq!(document.placeholder(1), Some(Region::new(15..21)));
    }

    #[test]
    fn test_insert_at_span_begin_moves_span() {
        let mut document = helper_document();
        document.insert(15, "--");

        assert_eq!(document.placeholder(1), Some(Region::new(17..23)));
        assert_eq!(document.context(0), Some(Region::new(0..14)));
    }

    #[test]
    fn test_replace() {
        let mut document = helper_document();
        document.replace(Region::new(15..21), "x");

        assert_eq!(document.text(), "{Hello (name)} x");
        assert_eq!(document.placeholder(1), None);
        assert_eq!(document.context(0), Some(Region::new(0..14)));
    }

    #[test]
    fn test_excerpt_is_independent() {
        let document = helper_document();
        let mut copy = document.excerpt(Region::new(1..13));

        assert_eq!(copy.text(), "Hello (name)");
        assert_eq!(copy.context(0), None);
        assert_eq!(copy.placeholder(0), Some(Region::new(6..12)));
        assert_eq!(copy.placeholder(1), None);

        copy.replace(Region::new(6..12), "Ann");
        assert_eq!(copy.text(), "Hello Ann");
        assert_eq!(document.text(), "{Hello (name)} (tail)");
        assert_eq!(document.placeholder(0), Some(Region::new(7..13)));
    }
}
