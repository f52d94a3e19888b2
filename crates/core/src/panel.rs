//! Panel controller: owns what the panel shows and turns inbound events into
//! outbound effects.
//!
//! `Panel::dispatch` is synchronous and performs no I/O. Round trips to the
//! generator and the judge are described by `Effect::RequestGeneration` and
//! `Effect::RequestJudgment`; their results come back as
//! `PanelEvent::GenerationFinished` and `PanelEvent::JudgmentFinished`.

use chrono::{DateTime, Utc};

use crate::error::{CollaboratorFailure, PanelError};
use crate::gate::ImplementRequest;
use crate::grading::{self, GradeReport, SubmitOutcome};
use crate::judgment::JudgeRequest;
use crate::model::{Answer, QuestionId, RequestToken, SessionId};
use crate::parser::{ParsedResponse, parse_response};
use crate::session::QuizSession;

/// Inbound events, processed one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    Prompt(String),
    GenerationFinished {
        request: RequestToken,
        result: Result<String, CollaboratorFailure>,
    },
    SubmitAnswer {
        question_id: QuestionId,
        answer: Answer,
    },
    JudgmentFinished {
        session_id: SessionId,
        question_id: QuestionId,
        token: RequestToken,
        result: Result<String, CollaboratorFailure>,
    },
    RevealHint(QuestionId),
    Implement,
}

impl PanelEvent {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            PanelEvent::Prompt(_) => "prompt",
            PanelEvent::GenerationFinished { .. } => "generation_finished",
            PanelEvent::SubmitAnswer { .. } => "submit_answer",
            PanelEvent::JudgmentFinished { .. } => "judgment_finished",
            PanelEvent::RevealHint(_) => "reveal_hint",
            PanelEvent::Implement => "implement",
        }
    }
}

/// What a generation round trip turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseView {
    Quiz {
        session_id: SessionId,
        question_count: usize,
        raw: String,
    },
    /// Reply that did not decode as a quiz, shown verbatim.
    Text(String),
    /// Generation failure, already formatted as `Error: <detail>`.
    Failed(String),
}

impl ResponseView {
    /// Text forwarded to a host for this response.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            ResponseView::Quiz { raw, .. } => raw,
            ResponseView::Text(text) | ResponseView::Failed(text) => text,
        }
    }
}

/// Outbound effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    RequestGeneration {
        request: RequestToken,
        prompt: String,
    },
    RequestJudgment(JudgeRequest),
    Response(ResponseView),
    Graded(GradeReport),
    SimilarityResult {
        question_id: QuestionId,
        is_correct: bool,
    },
    Hint {
        question_id: QuestionId,
        explanation: String,
    },
    Rejected {
        question_id: Option<QuestionId>,
        reason: PanelError,
    },
    Implement(ImplementRequest),
}

/// Current panel contents.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PanelView {
    #[default]
    Idle,
    Working {
        request: RequestToken,
        prompt: String,
    },
    Quiz(QuizSession),
    Text(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    view: PanelView,
    next_request: RequestToken,
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel {
    #[must_use]
    pub fn new() -> Self {
        Self {
            view: PanelView::Idle,
            next_request: RequestToken::first(),
        }
    }

    #[must_use]
    pub fn view(&self) -> &PanelView {
        &self.view
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        match &self.view {
            PanelView::Quiz(session) => Some(session),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_working(&self) -> bool {
        matches!(self.view, PanelView::Working { .. })
    }

    pub fn dispatch(&mut self, event: PanelEvent, now: DateTime<Utc>) -> Vec<Effect> {
        tracing::debug!(kind = event.kind(), "panel event");
        match event {
            PanelEvent::Prompt(text) => self.on_prompt(text),
            PanelEvent::GenerationFinished { request, result } => {
                self.on_generation_finished(request, result, now)
            }
            PanelEvent::SubmitAnswer {
                question_id,
                answer,
            } => self.on_submit(question_id, answer, now),
            PanelEvent::JudgmentFinished {
                session_id,
                question_id,
                token,
                result,
            } => self.on_judgment_finished(session_id, &question_id, token, &result, now),
            PanelEvent::RevealHint(question_id) => self.on_reveal_hint(question_id),
            PanelEvent::Implement => self.on_implement(),
        }
    }

    fn on_prompt(&mut self, text: String) -> Vec<Effect> {
        if text.trim().is_empty() {
            return vec![rejected(None, PanelError::EmptyPrompt)];
        }

        let request = self.next_request;
        self.next_request = request.next();
        self.view = PanelView::Working {
            request,
            prompt: text.clone(),
        };
        vec![Effect::RequestGeneration {
            request,
            prompt: text,
        }]
    }

    fn on_generation_finished(
        &mut self,
        request: RequestToken,
        result: Result<String, CollaboratorFailure>,
        now: DateTime<Utc>,
    ) -> Vec<Effect> {
        let current = matches!(&self.view, PanelView::Working { request: r, .. } if *r == request);
        if !current {
            tracing::debug!(request = %request, "dropping superseded generation");
            return Vec::new();
        }

        let response = match result {
            Ok(raw) => match parse_response(&raw) {
                ParsedResponse::Quiz(quiz) => {
                    let session = QuizSession::new(quiz, now);
                    let response = ResponseView::Quiz {
                        session_id: session.id(),
                        question_count: session.quiz().len(),
                        raw,
                    };
                    self.view = PanelView::Quiz(session);
                    response
                }
                ParsedResponse::Text(text) => {
                    self.view = PanelView::Text(text.clone());
                    ResponseView::Text(text)
                }
            },
            Err(failure) => {
                let message = format!("Error: {failure}");
                self.view = PanelView::Failed(message.clone());
                ResponseView::Failed(message)
            }
        };
        vec![Effect::Response(response)]
    }

    fn on_submit(
        &mut self,
        question_id: QuestionId,
        answer: Answer,
        now: DateTime<Utc>,
    ) -> Vec<Effect> {
        let PanelView::Quiz(session) = &mut self.view else {
            return vec![rejected(Some(question_id), PanelError::NoActiveQuiz)];
        };

        match grading::submit(session, &question_id, answer, now) {
            Ok(SubmitOutcome::Graded(report)) => vec![Effect::Graded(report)],
            Ok(SubmitOutcome::NeedsJudgment(request)) => vec![Effect::RequestJudgment(request)],
            Err(err) => vec![rejected(Some(question_id), err.into())],
        }
    }

    fn on_judgment_finished(
        &mut self,
        session_id: SessionId,
        question_id: &QuestionId,
        token: RequestToken,
        result: &Result<String, CollaboratorFailure>,
        now: DateTime<Utc>,
    ) -> Vec<Effect> {
        let PanelView::Quiz(session) = &mut self.view else {
            tracing::debug!(question = %question_id, "judgment arrived without a quiz");
            return Vec::new();
        };
        if session.id() != session_id {
            tracing::debug!(question = %question_id, "judgment for a replaced quiz");
            return Vec::new();
        }

        match grading::resolve_judgment(session, question_id, token, result, now) {
            Ok(Some(report)) => vec![
                Effect::SimilarityResult {
                    question_id: question_id.clone(),
                    is_correct: report.verdict.is_correct(),
                },
                Effect::Graded(report),
            ],
            Ok(None) => Vec::new(),
            Err(err) => vec![rejected(Some(question_id.clone()), err.into())],
        }
    }

    fn on_reveal_hint(&mut self, question_id: QuestionId) -> Vec<Effect> {
        let PanelView::Quiz(session) = &mut self.view else {
            return vec![rejected(Some(question_id), PanelError::NoActiveQuiz)];
        };

        match grading::reveal_hint(session, &question_id) {
            Ok(explanation) => vec![Effect::Hint {
                question_id,
                explanation,
            }],
            Err(err) => vec![rejected(Some(question_id), err.into())],
        }
    }

    fn on_implement(&self) -> Vec<Effect> {
        let Some(session) = self.session() else {
            return vec![rejected(None, PanelError::NoActiveQuiz)];
        };
        match session.proceed() {
            Ok(request) => vec![Effect::Implement(request)],
            Err(err) => vec![rejected(None, err.into())],
        }
    }
}

fn rejected(question_id: Option<QuestionId>, reason: PanelError) -> Effect {
    Effect::Rejected {
        question_id,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::GateError;
    use crate::grading::GradingError;
    use crate::model::{QuestionPhase, Verdict};
    use crate::time::fixed_now;

    const QUIZ: &str = r#"{
        "code": "```js\nconst sum = (a, b) => a + b;\n```",
        "questions": [
            {"id": "q1", "type": "multiple-choice", "text": "What does sum return?",
             "options": ["A", "B", "C"], "correct_answer_index": 1, "explanation": "It adds."},
            {"id": "q2", "type": "free-response", "text": "Describe sum.",
             "reference_answer": "adds two numbers", "explanation": "Read the arrow body."}
        ]
    }"#;

    fn start(panel: &mut Panel, prompt: &str) -> RequestToken {
        match panel.dispatch(PanelEvent::Prompt(prompt.into()), fixed_now()).as_slice() {
            [Effect::RequestGeneration { request, .. }] => *request,
            other => panic!("unexpected effects {other:?}"),
        }
    }

    fn finish(
        panel: &mut Panel,
        request: RequestToken,
        result: Result<String, CollaboratorFailure>,
    ) -> Vec<Effect> {
        panel.dispatch(PanelEvent::GenerationFinished { request, result }, fixed_now())
    }

    fn quiz_panel() -> Panel {
        let mut panel = Panel::new();
        let request = start(&mut panel, "write a sum function");
        finish(&mut panel, request, Ok(QUIZ.into()));
        panel
    }

    fn submit(panel: &mut Panel, id: &str, answer: Answer) -> Vec<Effect> {
        panel.dispatch(
            PanelEvent::SubmitAnswer {
                question_id: QuestionId::new(id),
                answer,
            },
            fixed_now(),
        )
    }

    #[test]
    fn blank_prompt_is_rejected_without_a_request() {
        let mut panel = Panel::new();
        let effects = panel.dispatch(PanelEvent::Prompt("   \n".into()), fixed_now());
        assert_eq!(effects, vec![rejected(None, PanelError::EmptyPrompt)]);
        assert_eq!(panel.view(), &PanelView::Idle);
    }

    #[test]
    fn prompt_is_forwarded_unmodified_and_panel_is_working() {
        let mut panel = Panel::new();
        let effects = panel.dispatch(PanelEvent::Prompt("  sort a list  ".into()), fixed_now());
        assert!(matches!(
            effects.as_slice(),
            [Effect::RequestGeneration { prompt, .. }] if prompt == "  sort a list  "
        ));
        assert!(panel.is_working());
    }

    #[test]
    fn quiz_reply_creates_fresh_session() {
        let mut panel = Panel::new();
        let request = start(&mut panel, "sum");
        let effects = finish(&mut panel, request, Ok(QUIZ.into()));

        let session = panel.session().expect("quiz shown");
        assert_eq!(
            effects,
            vec![Effect::Response(ResponseView::Quiz {
                session_id: session.id(),
                question_count: 2,
                raw: QUIZ.into(),
            })]
        );
        assert!(session.entries().all(|(_, state)| state.attempts() == 0));

        let first_id = session.id();
        let request = start(&mut panel, "again");
        finish(&mut panel, request, Ok(QUIZ.into()));
        assert_ne!(panel.session().unwrap().id(), first_id);
    }

    #[test]
    fn plain_reply_and_failure_are_text() {
        let mut panel = Panel::new();
        let request = start(&mut panel, "hi");
        finish(&mut panel, request, Ok("just prose".into()));
        assert_eq!(panel.view(), &PanelView::Text("just prose".into()));

        let request = start(&mut panel, "hi");
        let effects = finish(&mut panel, request, Err(CollaboratorFailure::new("HTTP 500")));
        assert_eq!(
            effects,
            vec![Effect::Response(ResponseView::Failed("Error: HTTP 500".into()))]
        );
        assert!(panel.session().is_none());
    }

    #[test]
    fn only_latest_generation_lands() {
        let mut panel = Panel::new();
        let old = start(&mut panel, "first");
        let new = start(&mut panel, "second");

        assert!(finish(&mut panel, old, Ok(QUIZ.into())).is_empty());
        assert!(panel.is_working());
        assert_eq!(finish(&mut panel, new, Ok("text".into())).len(), 1);
        assert_eq!(panel.view(), &PanelView::Text("text".into()));
    }

    #[test]
    fn multiple_choice_is_graded_without_collaborator() {
        let mut panel = quiz_panel();
        let effects = submit(&mut panel, "q1", Answer::Choice(0));
        assert!(matches!(
            effects.as_slice(),
            [Effect::Graded(report)] if report.verdict == Verdict::Incorrect && report.attempts == 1
        ));
    }

    #[test]
    fn free_response_round_trip_reports_similarity() {
        let mut panel = quiz_panel();
        let session_id = panel.session().unwrap().id();
        let request = match submit(&mut panel, "q2", Answer::Text("it adds".into())).as_slice() {
            [Effect::RequestJudgment(request)] => request.clone(),
            other => panic!("unexpected effects {other:?}"),
        };
        assert_eq!(request.session_id, session_id);
        assert_eq!(request.reference_answer, "adds two numbers");

        let effects = panel.dispatch(
            PanelEvent::JudgmentFinished {
                session_id,
                question_id: request.question_id.clone(),
                token: request.token,
                result: Ok("Correct\n".into()),
            },
            fixed_now(),
        );
        assert_eq!(effects.len(), 2);
        assert_eq!(
            effects[0],
            Effect::SimilarityResult {
                question_id: QuestionId::new("q2"),
                is_correct: true
            }
        );
        let state = panel.session().unwrap().state(&QuestionId::new("q2")).unwrap();
        assert_eq!(state.phase(), QuestionPhase::Correct);
    }

    #[test]
    fn judgment_for_replaced_quiz_is_dropped() {
        let mut panel = quiz_panel();
        let old_session = panel.session().unwrap().id();
        let request = match submit(&mut panel, "q2", Answer::Text("x".into())).as_slice() {
            [Effect::RequestJudgment(request)] => request.clone(),
            other => panic!("unexpected effects {other:?}"),
        };

        let next = start(&mut panel, "another");
        finish(&mut panel, next, Ok(QUIZ.into()));

        let effects = panel.dispatch(
            PanelEvent::JudgmentFinished {
                session_id: old_session,
                question_id: request.question_id,
                token: request.token,
                result: Ok("correct".into()),
            },
            fixed_now(),
        );
        assert!(effects.is_empty());
        let state = panel.session().unwrap().state(&QuestionId::new("q2")).unwrap();
        assert_eq!(state.attempts(), 0);
    }

    #[test]
    fn implement_is_gated() {
        let mut panel = quiz_panel();
        assert_eq!(
            panel.dispatch(PanelEvent::Implement, fixed_now()),
            vec![rejected(None, PanelError::Gate(GateError::Locked))]
        );

        submit(&mut panel, "q1", Answer::Choice(1));
        let request = match submit(&mut panel, "q2", Answer::Text("adds".into())).as_slice() {
            [Effect::RequestJudgment(request)] => request.clone(),
            other => panic!("unexpected effects {other:?}"),
        };
        let effects = panel.dispatch(
            PanelEvent::JudgmentFinished {
                session_id: request.session_id,
                question_id: request.question_id,
                token: request.token,
                result: Ok("correct".into()),
            },
            fixed_now(),
        );
        assert!(matches!(&effects[1], Effect::Graded(report) if report.completion.is_some()));

        match panel.dispatch(PanelEvent::Implement, fixed_now()).as_slice() {
            [Effect::Implement(request)] => {
                assert_eq!(request.code.language(), Some("js"));
                assert_eq!(request.code.source(), "const sum = (a, b) => a + b;");
            }
            other => panic!("unexpected effects {other:?}"),
        }
    }

    #[test]
    fn events_without_quiz_are_rejected() {
        let mut panel = Panel::new();
        assert_eq!(
            submit(&mut panel, "q1", Answer::Choice(0)),
            vec![rejected(Some(QuestionId::new("q1")), PanelError::NoActiveQuiz)]
        );
        assert_eq!(
            panel.dispatch(PanelEvent::Implement, fixed_now()),
            vec![rejected(None, PanelError::NoActiveQuiz)]
        );
    }

    #[test]
    fn hint_is_rejected_before_threshold() {
        let mut panel = quiz_panel();
        let id = QuestionId::new("q1");
        assert_eq!(
            panel.dispatch(PanelEvent::RevealHint(id.clone()), fixed_now()),
            vec![rejected(
                Some(id.clone()),
                PanelError::Grading(GradingError::HintLocked(id.clone()))
            )]
        );

        for _ in 0..3 {
            submit(&mut panel, "q1", Answer::Choice(2));
        }
        assert_eq!(
            panel.dispatch(PanelEvent::RevealHint(id.clone()), fixed_now()),
            vec![Effect::Hint {
                question_id: id,
                explanation: "It adds.".into()
            }]
        );
    }
}
