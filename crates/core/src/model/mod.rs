mod ids;
mod question;
mod quiz;
mod state;

pub use ids::{QuestionId, RequestToken, SessionId};
pub use question::{MAX_OPTIONS, MIN_OPTIONS, Question, QuestionError, QuestionKind};
pub use quiz::{CodeBlock, Quiz, QuizError};
pub use state::{Answer, Feedback, HINT_THRESHOLD, QuestionPhase, QuestionState, Verdict};
