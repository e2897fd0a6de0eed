//! Document tree construction from the YAML event stream.
//!
//! `yaml-rust2` supplies the "parse document text, or report a
//! location-tagged syntax error" capability; this module folds its marked
//! events into a small node tree that conversion consumes, keeping the
//! scalar style (quoting) and source position of every node.

use ps_types::{PsError, PsResult, Span};
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

/// How a scalar was written in the source. Interpolation holes are detected
/// only in `Plain` and `DoubleQuoted` scalars; everything else is literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScalarStyle {
    Plain,
    SingleQuoted,
    DoubleQuoted,
    /// Block scalars (literal `|` and folded `>`), always inert.
    Block,
}

#[derive(Debug)]
pub(crate) enum DocKind {
    Scalar { text: String, style: ScalarStyle },
    Seq(Vec<DocNode>),
    Map(Vec<(DocNode, DocNode)>),
}

#[derive(Debug)]
pub(crate) struct DocNode {
    pub kind: DocKind,
    pub span: Span,
}

enum Frame {
    Seq {
        items: Vec<DocNode>,
        span: Span,
    },
    Map {
        entries: Vec<(DocNode, DocNode)>,
        pending_key: Option<DocNode>,
        span: Span,
    },
}

#[derive(Default)]
struct DocBuilder {
    stack: Vec<Frame>,
    root: Option<DocNode>,
    error: Option<(String, Span)>,
}

fn span_of(mark: Marker) -> Span {
    // Marker lines are 1-based, columns 0-based.
    Span::new(mark.line() as u32, mark.col() as u32 + 1)
}

impl DocBuilder {
    fn emit(&mut self, node: DocNode) {
        match self.stack.last_mut() {
            Some(Frame::Seq { items, .. }) => items.push(node),
            Some(Frame::Map {
                entries,
                pending_key,
                ..
            }) => match pending_key.take() {
                None => *pending_key = Some(node),
                Some(key) => entries.push((key, node)),
            },
            // Only the first document's root is kept.
            None => {
                if self.root.is_none() {
                    self.root = Some(node);
                }
            }
        }
    }
}

impl MarkedEventReceiver for DocBuilder {
    fn on_event(&mut self, ev: Event, mark: Marker) {
        let span = span_of(mark);
        match ev {
            Event::Scalar(text, style, ..) => {
                let style = match style {
                    TScalarStyle::Plain => ScalarStyle::Plain,
                    TScalarStyle::SingleQuoted => ScalarStyle::SingleQuoted,
                    TScalarStyle::DoubleQuoted => ScalarStyle::DoubleQuoted,
                    _ => ScalarStyle::Block,
                };
                self.emit(DocNode {
                    kind: DocKind::Scalar { text, style },
                    span,
                });
            }
            Event::SequenceStart(..) => self.stack.push(Frame::Seq {
                items: Vec::new(),
                span,
            }),
            Event::SequenceEnd => {
                if let Some(Frame::Seq { items, span }) = self.stack.pop() {
                    self.emit(DocNode {
                        kind: DocKind::Seq(items),
                        span,
                    });
                }
            }
            Event::MappingStart(..) => self.stack.push(Frame::Map {
                entries: Vec::new(),
                pending_key: None,
                span,
            }),
            Event::MappingEnd => {
                if let Some(Frame::Map { entries, span, .. }) = self.stack.pop() {
                    self.emit(DocNode {
                        kind: DocKind::Map(entries),
                        span,
                    });
                }
            }
            Event::Alias(..) => {
                if self.error.is_none() {
                    self.error = Some(("aliases are not supported".to_string(), span));
                }
            }
            _ => {}
        }
    }
}

/// Parse document text into a node tree.
pub(crate) fn load(source: &str, filename: &str) -> PsResult<DocNode> {
    let mut parser = Parser::new_from_str(source);
    let mut builder = DocBuilder::default();
    parser.load(&mut builder, false).map_err(|e| {
        let span = span_of(*e.marker());
        PsError::syntax(filename, e.to_string(), Some(span))
    })?;
    if let Some((message, span)) = builder.error {
        return Err(PsError::syntax(filename, message, Some(span)));
    }
    builder
        .root
        .ok_or_else(|| PsError::syntax(filename, "empty document", None))
}
