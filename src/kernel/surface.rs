/// The editable text the document core sits on top of.
///
/// The core never looks inside the text: it snapshots it for saving and
/// replaces it wholesale on load/new. `set_full_text` and `clear` are
/// programmatic and must not be reported as user edits; the implementor's
/// own edit entry points report changes (see `DocumentController::edit`).
pub trait TextSurface {
    fn full_text(&self) -> String;

    fn set_full_text(&mut self, text: &str);

    fn clear(&mut self);
}

impl TextSurface for String {
    fn full_text(&self) -> String {
        self.clone()
    }

    fn set_full_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }

    fn clear(&mut self) {
        String::clear(self);
    }
}
