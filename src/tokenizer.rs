//! Streaming markup tokenizer.
//!
//! Wraps `html5ever`'s tokenizer (without the tree builder) and exposes the
//! tokens as a forward-only iterator of [`MarkupToken`]s read from any
//! [`Read`] source. No DOM is built; memory use is bounded by the read buffer
//! and the largest single token.
//!
//! Consecutive character runs are coalesced so that each text node between
//! two pieces of markup arrives as exactly one [`MarkupToken::Text`],
//! regardless of how the input was split into reads.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{ErrorKind, Read};

use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use tendril::StrTendril;

use crate::encoding::StreamDecoder;
use crate::error::Result;

/// Default number of bytes requested per read.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 8 * 1024;

/// One unit of markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupToken {
    /// `<!DOCTYPE ...>`
    Doctype,

    /// Opening tag with its attributes in source order. Names are lowercase.
    StartTag {
        /// Tag name.
        name: String,
        /// `(name, value)` pairs; valueless attributes have an empty value.
        attrs: Vec<(String, String)>,
    },

    /// Closing tag.
    EndTag {
        /// Tag name.
        name: String,
    },

    /// Comment body, untrimmed.
    Comment(String),

    /// A run of character data with entities decoded.
    Text(String),
}

impl MarkupToken {
    /// Value of an attribute on a start tag.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Self::StartTag { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    /// Whether a start tag carries an attribute, with or without a value.
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }
}

/// Token sink that converts and queues tokens for the iterator.
#[derive(Default)]
struct Collector {
    ready: RefCell<VecDeque<MarkupToken>>,
    text: RefCell<String>,
}

impl Collector {
    fn flush_text(&self) {
        let mut text = self.text.borrow_mut();
        if !text.is_empty() {
            self.ready
                .borrow_mut()
                .push_back(MarkupToken::Text(std::mem::take(&mut *text)));
        }
    }

    fn emit(&self, token: MarkupToken) {
        self.flush_text();
        self.ready.borrow_mut().push_back(token);
    }

    fn pop(&self) -> Option<MarkupToken> {
        self.ready.borrow_mut().pop_front()
    }
}

impl TokenSink for Collector {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::CharacterTokens(text) => self.text.borrow_mut().push_str(&text),
            Token::TagToken(tag) => {
                let name = tag.name.to_string();
                match tag.kind {
                    TagKind::StartTag => {
                        let attrs = tag
                            .attrs
                            .iter()
                            .map(|a| (a.name.local.to_string(), a.value.to_string()))
                            .collect();
                        let next_state = if tag.self_closing {
                            None
                        } else {
                            raw_text_state(&name)
                        };
                        self.emit(MarkupToken::StartTag { name, attrs });
                        if let Some(state) = next_state {
                            return state;
                        }
                    }
                    TagKind::EndTag => self.emit(MarkupToken::EndTag { name }),
                }
            }
            Token::CommentToken(text) => self.emit(MarkupToken::Comment(text.to_string())),
            Token::DoctypeToken(_) => self.emit(MarkupToken::Doctype),
            Token::EOFToken => self.flush_text(),
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

/// Tokenizer state for elements whose content is not markup.
///
/// Without a tree builder the tokenizer does not switch states by itself, so
/// the sink has to ask for it.
fn raw_text_state(tag: &str) -> Option<TokenSinkResult<()>> {
    match tag {
        "script" => Some(TokenSinkResult::RawData(RawKind::ScriptData)),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
            Some(TokenSinkResult::RawData(RawKind::Rawtext))
        }
        "textarea" | "title" => Some(TokenSinkResult::RawData(RawKind::Rcdata)),
        "plaintext" => Some(TokenSinkResult::Plaintext),
        _ => None,
    }
}

/// Forward-only stream of markup tokens over a borrowed reader.
///
/// The reader is never closed or dropped by the stream. Iteration ends with
/// `None` at clean end of input; a read error is yielded once as `Err` and
/// ends the stream.
pub struct TokenStream<'r, R: Read + ?Sized> {
    reader: &'r mut R,
    tokenizer: Tokenizer<Collector>,
    input: BufferQueue,
    decoder: StreamDecoder,
    buf: Vec<u8>,
    done: bool,
}

impl<'r, R: Read + ?Sized> TokenStream<'r, R> {
    /// Tokenize `reader`, requesting `buffer_size` bytes per read.
    pub fn new(reader: &'r mut R, buffer_size: usize) -> Self {
        Self {
            reader,
            tokenizer: Tokenizer::new(Collector::default(), TokenizerOpts::default()),
            input: BufferQueue::default(),
            decoder: StreamDecoder::new(),
            buf: vec![0; buffer_size.max(1)],
            done: false,
        }
    }

    fn fill(&mut self) -> std::io::Result<()> {
        let read = loop {
            match self.reader.read(&mut self.buf) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        };

        if read == 0 {
            let rest = self.decoder.finish();
            self.feed(rest);
            self.tokenizer.end();
            self.done = true;
        } else {
            let text = self.decoder.decode(&self.buf[..read]);
            self.feed(text);
        }
        Ok(())
    }

    fn feed(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        self.input.push_back(StrTendril::from(text));
        // The sink never returns a script handle, so feeding always runs to
        // the end of the queued input.
        let _ = self.tokenizer.feed(&self.input);
    }
}

impl<R: Read + ?Sized> Iterator for TokenStream<'_, R> {
    type Item = Result<MarkupToken>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.tokenizer.sink.pop() {
                return Some(Ok(token));
            }
            if self.done {
                return None;
            }
            if let Err(e) = self.fill() {
                self.done = true;
                return Some(Err(e.into()));
            }
        }
    }
}
