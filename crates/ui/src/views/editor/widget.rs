use services::editor::FaceTarget;
use services::{FormatCommand, RichTextWidget};

use crate::views::scripts::exec_command_script;

/// Collects editing scripts for the face editors; run them with
/// [`crate::views::scripts::run_scripts`].
#[derive(Debug, Default)]
pub struct ScriptWidget {
    focused: Option<String>,
    scripts: Vec<String>,
}

impl ScriptWidget {
    #[must_use]
    pub fn into_scripts(self) -> Vec<String> {
        self.scripts
    }
}

impl RichTextWidget for ScriptWidget {
    fn focus(&mut self, target: FaceTarget) {
        self.focused = Some(target.element_id());
    }

    fn exec(&mut self, command: &FormatCommand) {
        let Some(element_id) = self.focused.as_deref() else {
            return;
        };
        let (name, value) = command.exec_args();
        self.scripts.push(exec_command_script(
            element_id,
            name,
            value,
            command.styles_with_css(),
        ));
    }
}
