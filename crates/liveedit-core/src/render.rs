//! Render engine - composes snippet blobs into one preview document
//!
//! The document shape is fixed: a style block in the head, the markup as the
//! body, and a trailing script block so the script runs after the markup is
//! attached. Blobs are inserted verbatim; nothing is escaped or validated.

use std::ops::Range;
use std::sync::{Arc, RwLock};

use crate::SnippetParts;

const DOCUMENT_HEAD: &str = "<!DOCTYPE html>\n\
<html>\n\
<head>\n\
<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
<style>";
const HEAD_TO_BODY: &str = "</style>\n</head>\n<body>\n";
const BODY_TO_SCRIPT: &str = "\n<script>";
const DOCUMENT_TAIL: &str = "</script>\n</body>\n</html>\n";

/// A composed preview document
///
/// Keeps the byte ranges of the three inserted sections so callers can get
/// back exactly what went in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    html: String,
    style: Range<usize>,
    body: Range<usize>,
    script: Range<usize>,
}

impl RenderedDocument {
    pub fn as_html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    /// Contents of the `<style>` block
    pub fn style_block(&self) -> &str {
        &self.html[self.style.clone()]
    }

    /// Markup placed inside `<body>`, before the script block
    pub fn body_markup(&self) -> &str {
        &self.html[self.body.clone()]
    }

    /// Contents of the trailing `<script>` block
    pub fn script_block(&self) -> &str {
        &self.html[self.script.clone()]
    }
}

/// A display target whose whole content is swapped on every render
pub trait PreviewSurface {
    /// Discard whatever the surface shows and display `document` instead.
    fn replace(&mut self, document: RenderedDocument);
}

/// Main render engine
pub struct RenderEngine {}

impl RenderEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// Compose the preview document for `snippet`
    ///
    /// Pure: the same three inputs always give the same document.
    pub fn compose<S: SnippetParts + ?Sized>(&self, snippet: &S) -> RenderedDocument {
        let (markup, style, script) = (snippet.markup(), snippet.style(), snippet.script());

        let mut html = String::with_capacity(
            DOCUMENT_HEAD.len()
                + HEAD_TO_BODY.len()
                + BODY_TO_SCRIPT.len()
                + DOCUMENT_TAIL.len()
                + markup.len()
                + style.len()
                + script.len(),
        );

        html.push_str(DOCUMENT_HEAD);
        let style_range = push_section(&mut html, style);
        html.push_str(HEAD_TO_BODY);
        let body_range = push_section(&mut html, markup);
        html.push_str(BODY_TO_SCRIPT);
        let script_range = push_section(&mut html, script);
        html.push_str(DOCUMENT_TAIL);

        RenderedDocument {
            html,
            style: style_range,
            body: body_range,
            script: script_range,
        }
    }

    /// Compose `snippet` and hand the document to `surface`, replacing its content
    pub fn render<S, P>(&self, snippet: &S, surface: &mut P)
    where
        S: SnippetParts + ?Sized,
        P: PreviewSurface + ?Sized,
    {
        surface.replace(self.compose(snippet));
    }
}

impl Default for RenderEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn push_section(html: &mut String, section: &str) -> Range<usize> {
    let start = html.len();
    html.push_str(section);
    start..html.len()
}

/// Shared, clonable surface holding the latest rendered document
///
/// Clones point at the same slot. Each render replaces the slot wholesale.
#[derive(Debug, Clone, Default)]
pub struct PreviewSlot {
    current: Arc<RwLock<Option<RenderedDocument>>>,
}

impl PreviewSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently rendered document, if any
    pub fn current(&self) -> Option<RenderedDocument> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl PreviewSurface for PreviewSlot {
    fn replace(&mut self, document: RenderedDocument) {
        match self.current.write() {
            Ok(mut guard) => *guard = Some(document),
            Err(poisoned) => *poisoned.into_inner() = Some(document),
        }
    }
}
