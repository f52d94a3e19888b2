mod panel_vm;
mod placeholder_vm;

pub use panel_vm::{
    AnswerInputVm, FeedbackTone, PROCEED_TEXT, PanelBodyVm, QuestionVm, QuizVm, feedback_line,
    map_panel, map_quiz,
};
pub use placeholder_vm::{EXAMPLE_PROMPTS, PlaceholderTicker};
