//! Output rendering for streamed chat turns.
//!
//! The session re-segments the whole accumulated response after every delta
//! and hands the renderer a full `(reasoning, answer)` snapshot. Renderers
//! own presentation entirely, including pacing: the session imposes no
//! artificial delay between snapshots.

use std::io::{self, Stdout, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::segment::Segments;

/// ANSI escape code for dim text (used for reasoning).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for italic text (used for reasoning).
const ANSI_ITALIC: &str = "\x1b[3m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// Trait for rendering streaming output.
///
/// This abstraction allows for different rendering strategies: plain text
/// with ANSI styling, unstyled text for piping, or a widget surface that
/// replaces its content wholesale on every snapshot.
pub trait Renderer: Send {
    /// Render the latest segmentation of the in-flight response.
    ///
    /// Called once per delta with the segmentation of the entire accumulator,
    /// replacing whatever was rendered for the previous snapshot.
    fn render_segments(&mut self, segments: &Segments);

    /// Called when a response is complete.
    ///
    /// Used to ensure proper newlines and cleanup after streaming.
    fn finish_response(&mut self);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Called when the stream is interrupted by the user.
    fn print_interrupted(&mut self) {}

    /// Returns true if streaming should be interrupted.
    fn should_interrupt(&self) -> bool {
        false
    }
}

/// Plain text renderer with optional ANSI styling.
///
/// Terminals cannot replace already-printed text, so successive snapshots are
/// diffed: text that extends the previous snapshot is printed incrementally,
/// and the one non-monotonic step (when the close tag arrives and the answer
/// collapses from raw text to the extracted answer) triggers a redraw on a
/// fresh line.
///
/// Generic over the output sink so the diffing can be exercised against an
/// in-memory buffer; the default sink is stdout.
pub struct PlainTextRenderer<W: Write = Stdout> {
    out: W,
    use_color: bool,
    last: Segments,
    in_reasoning: bool,
    interrupted: Option<Arc<AtomicBool>>,
}

impl PlainTextRenderer<Stdout> {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self::with_sink(io::stdout(), use_color)
    }
}

impl<W: Write> PlainTextRenderer<W> {
    /// Creates a renderer writing to the given sink.
    pub fn with_sink(out: W, use_color: bool) -> Self {
        Self {
            out,
            use_color,
            last: Segments::default(),
            in_reasoning: false,
            interrupted: None,
        }
    }

    /// Attaches an interrupt flag to the renderer.
    pub fn with_interrupt(mut self, interrupted: Arc<AtomicBool>) -> Self {
        self.interrupted = Some(interrupted);
        self
    }

    /// Consumes the renderer and returns its sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Flushes the sink to ensure immediate display of streamed content.
    fn flush(&mut self) {
        let _ = self.out.flush();
    }

    fn write(&mut self, text: &str) {
        let _ = self.out.write_all(text.as_bytes());
    }

    fn enter_reasoning(&mut self) {
        if !self.in_reasoning {
            if self.use_color {
                self.write(ANSI_DIM);
                self.write(ANSI_ITALIC);
            } else {
                self.write("[thinking] ");
            }
            self.in_reasoning = true;
        }
    }

    fn leave_reasoning(&mut self) {
        if self.in_reasoning {
            if self.use_color {
                self.write(ANSI_RESET);
            }
            self.write("\n");
            self.in_reasoning = false;
        }
    }

    fn write_reasoning(&mut self, segments: &Segments) {
        if segments.reasoning == self.last.reasoning {
            return;
        }
        self.enter_reasoning();
        if let Some(suffix) = segments.reasoning.strip_prefix(self.last.reasoning.as_str()) {
            self.write(suffix);
        } else {
            self.write("\n");
            self.write(&segments.reasoning);
        }
    }

    fn write_answer(&mut self, segments: &Segments) {
        if segments.answer == self.last.answer {
            return;
        }
        self.leave_reasoning();
        if let Some(suffix) = segments.answer.strip_prefix(self.last.answer.as_str()) {
            self.write(suffix);
        } else {
            // The close tag landed: what was printed as raw text has been
            // re-segmented, so start the extracted answer on its own line.
            self.write("\n");
            self.write(&segments.answer);
        }
    }
}

impl Default for PlainTextRenderer<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> Renderer for PlainTextRenderer<W> {
    fn render_segments(&mut self, segments: &Segments) {
        self.write_reasoning(segments);
        self.write_answer(segments);
        self.last = segments.clone();
        self.flush();
    }

    fn finish_response(&mut self) {
        self.leave_reasoning();
        self.write("\n");
        self.last = Segments::default();
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        self.leave_reasoning();
        eprintln!("\nError: {error}");
    }

    fn print_info(&mut self, info: &str) {
        self.leave_reasoning();
        self.write(info);
        self.write("\n");
        self.flush();
    }

    fn print_interrupted(&mut self) {
        self.leave_reasoning();
        self.write("\n[interrupted]\n");
        self.last = Segments::default();
        self.flush();
    }

    fn should_interrupt(&self) -> bool {
        self.interrupted
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}
