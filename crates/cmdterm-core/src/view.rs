//! The host seam for console side effects.

/// Side effects the console performs on its host surface.
///
/// In the browser this is backed by the form, input, and output elements.
/// [`MemoryView`] backs it with plain fields for headless hosts and tests.
pub trait ConsoleView {
    /// Current raw value of the input field.
    fn input_value(&self) -> String;

    /// Append an HTML fragment to the output container.
    fn append_markup(&mut self, markup: &str);

    /// Scroll the output container so the newest entry is visible.
    fn scroll_to_bottom(&mut self);

    fn clear_input(&mut self);

    /// Mark the input as waiting on an exchange (or not).
    fn set_busy(&mut self, busy: bool);
}

/// In-memory [`ConsoleView`].
///
/// Scroll geometry is measured in entries: each appended fragment adds one
/// unit of scroll height.
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    input: String,
    fragments: Vec<String>,
    scroll_top: usize,
    busy: bool,
}

impl MemoryView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_input(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    /// Simulate the user typing into the input field.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Appended fragments, oldest first.
    #[must_use]
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    #[must_use]
    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    #[must_use]
    pub fn scroll_height(&self) -> usize {
        self.fragments.len()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }
}

impl ConsoleView for MemoryView {
    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn append_markup(&mut self, markup: &str) {
        self.fragments.push(markup.to_owned());
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_top = self.scroll_height();
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }
}
