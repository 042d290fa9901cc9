use quizcards_core::model::Face;

use super::CardKey;

/// Inline formatting forwarded to the rich-text widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    ForeColor(String),
    BackColor(String),
    Undo,
    Redo,
}

impl FormatCommand {
    /// Name and argument of the matching editing command.
    #[must_use]
    pub fn exec_args(&self) -> (&'static str, Option<&str>) {
        match self {
            FormatCommand::Bold => ("bold", None),
            FormatCommand::Italic => ("italic", None),
            FormatCommand::Underline => ("underline", None),
            FormatCommand::ForeColor(color) => ("foreColor", Some(color.as_str())),
            FormatCommand::BackColor(color) => ("hiliteColor", Some(color.as_str())),
            FormatCommand::Undo => ("undo", None),
            FormatCommand::Redo => ("redo", None),
        }
    }

    /// Colour commands style with CSS rather than `<font>` tags.
    #[must_use]
    pub fn styles_with_css(&self) -> bool {
        matches!(self, FormatCommand::ForeColor(_) | FormatCommand::BackColor(_))
    }
}

/// Face editor addressed by a formatting request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceTarget {
    pub card: CardKey,
    pub face: Face,
}

impl FaceTarget {
    /// Element id of the face's editable region.
    #[must_use]
    pub fn element_id(&self) -> String {
        format!("card-{}-{}", self.card.value(), self.face.as_str())
    }
}

/// The WYSIWYG widget that owns the face editors.
pub trait RichTextWidget {
    fn focus(&mut self, target: FaceTarget);
    fn exec(&mut self, command: &FormatCommand);
}
