//! Plain-text rendering of the users list.

use std::fmt;

use crate::domain::{EditBuffer, EditField, RecordView, UserRecord};

/// Display adapter that draws a [`RecordView`] as the list screen.
///
/// ```rust,ignore
/// println!("{}", ListScreen::new(manager.view()));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ListScreen<'a> {
    view: &'a RecordView,
}

impl<'a> ListScreen<'a> {
    /// Wrap a view for display.
    pub const fn new(view: &'a RecordView) -> Self {
        Self { view }
    }
}

impl fmt::Display for ListScreen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Users List")?;
        if let Some(message) = self.view.error_message() {
            writeln!(f, "! {message}")?;
        }
        writeln!(f)?;

        if self.view.records().is_empty() {
            writeln!(f, "  (no users)")?;
        }
        let editing = self.view.edit_buffer();
        for record in self.view.records() {
            write_card(f, record, editing.filter(|buffer| buffer.target() == record.id()))?;
        }

        writeln!(f)?;
        let bounds = self.view.bounds();
        write!(f, "{bounds}")?;
        if bounds.previous().is_some() {
            write!(f, "  [prev]")?;
        }
        if bounds.next().is_some() {
            write!(f, "  [next]")?;
        }
        writeln!(f)
    }
}

fn write_card(
    f: &mut fmt::Formatter<'_>,
    record: &UserRecord,
    edit: Option<&EditBuffer>,
) -> fmt::Result {
    writeln!(
        f,
        "#{} {} <{}>",
        record.id(),
        record.full_name(),
        record.email()
    )?;
    writeln!(f, "    avatar: {}", record.avatar())?;
    if let Some(buffer) = edit {
        writeln!(f, "    editing:")?;
        for field in EditField::ALL {
            writeln!(f, "      {}: {}", field.label(), buffer.draft().get(field))?;
        }
    }
    Ok(())
}
