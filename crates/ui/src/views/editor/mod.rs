mod card;
mod view;
mod widget;

pub use view::EditorView;
pub use widget::ScriptWidget;
