//! Line diff to byte spans
//!
//! Diffs two texts line by line and converts every non-equal line range into
//! a byte span of the text it belongs to.

use similar::{capture_diff_slices, Algorithm, DiffTag};

use crate::sieve::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpTag {
    Replace,
    Delete,
    Insert,
}

/// A non-equal region of a line diff, as byte spans into both texts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub tag: OpTag,
    pub src: Span,
    pub tgt: Span,
}

impl Opcode {
    /// True when either side covers no bytes (pure insertions and deletions).
    pub fn is_collapsed(&self) -> bool {
        self.src.is_empty() || self.tgt.is_empty()
    }
}

/// Split after every `\n`, keeping the terminator on each line.
pub fn split_lines_keepends(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// `offsets[k]` is the number of bytes in `lines[..k]`; the result has
/// `lines.len() + 1` entries.
pub fn line_offsets(lines: &[&str]) -> Vec<usize> {
    std::iter::once(0)
        .chain(lines.iter().scan(0, |total, line| {
            *total += line.len();
            Some(*total)
        }))
        .collect()
}

/// Every replace/delete/insert region between `src` and `tgt`.
pub fn opcodes(src: &str, tgt: &str) -> Vec<Opcode> {
    let src_lines = split_lines_keepends(src);
    let tgt_lines = split_lines_keepends(tgt);
    let src_offsets = line_offsets(&src_lines);
    let tgt_offsets = line_offsets(&tgt_lines);

    capture_diff_slices(Algorithm::Myers, &src_lines, &tgt_lines)
        .iter()
        .filter_map(|op| {
            let (tag, old, new) = op.as_tag_tuple();
            let tag = match tag {
                DiffTag::Equal => return None,
                DiffTag::Replace => OpTag::Replace,
                DiffTag::Delete => OpTag::Delete,
                DiffTag::Insert => OpTag::Insert,
            };
            let src = Span::new(*src_offsets.get(old.start)?, *src_offsets.get(old.end)?);
            let tgt = Span::new(*tgt_offsets.get(new.start)?, *tgt_offsets.get(new.end)?);
            Some(Opcode { tag, src, tgt })
        })
        .collect()
}

/// The opcodes that can be granulated on both sides.
///
/// Regions that collapse to an empty span on either side have nothing to
/// anchor on and are dropped.
pub fn changed_spans(src: &str, tgt: &str) -> Vec<Opcode> {
    let all = opcodes(src, tgt);
    let total = all.len();
    let kept: Vec<Opcode> = all.into_iter().filter(|op| !op.is_collapsed()).collect();
    if kept.len() < total {
        tracing::trace!(skipped = total - kept.len(), "collapsed opcodes dropped");
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_keeps_terminators() {
        assert_eq!(split_lines_keepends("a\nbb\r\nc"), vec!["a\n", "bb\r\n", "c"]);
        assert!(split_lines_keepends("").is_empty());
    }

    #[test]
    fn test_line_offsets() {
        let lines = split_lines_keepends("ab\n\ncde\n");
        assert_eq!(line_offsets(&lines), vec![0, 3, 4, 8]);
        assert_eq!(line_offsets(&[]), vec![0]);
    }

    #[test]
    fn test_single_replace() {
        let ops = opcodes("a\nb\nc\n", "a\nB\nc\n");
        assert_eq!(
            ops,
            vec![Opcode {
                tag: OpTag::Replace,
                src: Span::new(2, 4),
                tgt: Span::new(2, 4),
            }]
        );
    }

    #[test]
    fn test_identical_texts_have_no_opcodes() {
        assert!(opcodes("x\ny\n", "x\ny\n").is_empty());
        assert!(opcodes("", "").is_empty());
    }

    #[test]
    fn test_insert_and_delete_are_collapsed() {
        let ops = opcodes("a\nc\n", "a\nb\nc\n");
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].tag, OpTag::Insert);
        assert_eq!(ops[0].src, Span::new(2, 2));
        assert_eq!(ops[0].tgt, Span::new(2, 4));
        assert!(ops[0].is_collapsed());
        assert!(changed_spans("a\nc\n", "a\nb\nc\n").is_empty());

        let ops = opcodes("a\nb\nc\n", "a\nc\n");
        assert_eq!(ops[0].tag, OpTag::Delete);
        assert!(changed_spans("a\nb\nc\n", "a\nc\n").is_empty());
    }

    #[test]
    fn test_spans_and_equal_regions_rebuild_both_texts() {
        let src = "fn a() {}\nfn b() {}\nkeep\nfn c() {}\ntail\nold end\n";
        let tgt = "fn a() {}\nkeep\nfn c() { 1 }\nnew line\ntail\nnew end";
        let ops = opcodes(src, tgt);
        assert!(!ops.is_empty());

        let (mut src_at, mut tgt_at) = (0, 0);
        let (mut src_rebuilt, mut tgt_rebuilt) = (String::new(), String::new());
        for op in &ops {
            let src_equal = &src[src_at..op.src.start];
            let tgt_equal = &tgt[tgt_at..op.tgt.start];
            assert_eq!(src_equal, tgt_equal);

            src_rebuilt.push_str(src_equal);
            src_rebuilt.push_str(op.src.slice(src).unwrap());
            tgt_rebuilt.push_str(tgt_equal);
            tgt_rebuilt.push_str(op.tgt.slice(tgt).unwrap());
            src_at = op.src.end;
            tgt_at = op.tgt.end;
        }
        assert_eq!(&src[src_at..], &tgt[tgt_at..]);
        src_rebuilt.push_str(&src[src_at..]);
        tgt_rebuilt.push_str(&tgt[tgt_at..]);

        assert_eq!(src_rebuilt, src);
        assert_eq!(tgt_rebuilt, tgt);
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let src = "naïve = 1\nx = 2\n";
        let tgt = "naïve = 1\nx = 3\n";
        let ops = changed_spans(src, tgt);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].src.slice(src), Some("x = 2\n"));
        assert_eq!(ops[0].tgt.slice(tgt), Some("x = 3\n"));
    }
}
