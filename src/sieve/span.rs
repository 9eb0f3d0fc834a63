use tree_sitter::Node;

/// Half-open byte range `[start, end)` into one specific text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this span can be used to slice `text`.
    pub fn fits(&self, text: &str) -> bool {
        self.start <= self.end
            && self.end <= text.len()
            && text.is_char_boundary(self.start)
            && text.is_char_boundary(self.end)
    }

    /// The covered text, or `None` if the span does not fit.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        if !self.fits(text) {
            return None;
        }
        text.get(self.start..self.end)
    }
}

impl From<(usize, usize)> for Span {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Anything occupying a byte range of a text
pub trait Extent {
    fn start_byte(&self) -> usize;
    fn end_byte(&self) -> usize;
}

impl Extent for Node<'_> {
    fn start_byte(&self) -> usize {
        Node::start_byte(self)
    }

    fn end_byte(&self) -> usize {
        Node::end_byte(self)
    }
}

impl Extent for Span {
    fn start_byte(&self) -> usize {
        self.start
    }

    fn end_byte(&self) -> usize {
        self.end
    }
}
