use dioxus::prelude::ReadableExt;
use services::ScriptedCollaborator;
use vibely_core::model::{Answer, QuestionId};
use vibely_core::panel::PanelEvent;

use super::test_harness::{ViewHarness, setup_panel_harness};

const QUIZ: &str = r#"{"code": "```python\ndef top(xs):\n    return max(set(xs), key=xs.count)\n```",
 "questions": [
  {"id": "q1", "type": "multiple-choice", "text": "What does top return?",
   "options": ["The smallest item", "The most frequent item", "A list"],
   "correct_answer_index": 1, "explanation": "max with key=count picks the most frequent."},
  {"id": "q2", "type": "free-response", "text": "Why wrap xs in set()?",
   "reference_answer": "to avoid counting duplicates twice"}
 ]}"#;

async fn quiz_harness(judge: ScriptedCollaborator) -> ViewHarness {
    let mut harness = setup_panel_harness(ScriptedCollaborator::replying(QUIZ), judge);
    harness.dispatch(PanelEvent::Prompt("most frequent element".into()));
    harness.settle().await;
    harness
}

fn choose(harness: &mut ViewHarness, id: &str, index: usize) {
    harness.dispatch(PanelEvent::SubmitAnswer {
        question_id: QuestionId::new(id),
        answer: Answer::Choice(index),
    });
}

#[tokio::test(flavor = "current_thread")]
async fn idle_panel_renders_prompt_form() {
    let harness = setup_panel_harness(ScriptedCollaborator::new(), ScriptedCollaborator::new());
    let html = harness.render();
    assert!(html.contains("prompt-input"), "missing prompt box in {html}");
    assert!(html.contains("Generate"), "missing button in {html}");
    assert!(html.contains("Describe the code you want"), "missing intro in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn prompt_renders_code_window_and_numbered_questions() {
    let harness = quiz_harness(ScriptedCollaborator::new()).await;
    let html = harness.render();
    assert!(html.contains("language-python"), "missing code class in {html}");
    assert!(html.contains("def top(xs):"), "missing code in {html}");
    assert!(html.contains("Q1:"), "missing Q1 in {html}");
    assert!(html.contains("Q2:"), "missing Q2 in {html}");
    assert!(html.contains("0/2 correct"), "missing progress in {html}");
    assert!(!html.contains("Congrats"), "proceed shown too early in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn blank_prompt_shows_notice_without_generating() {
    let generator = ScriptedCollaborator::replying(QUIZ);
    let mut harness = setup_panel_harness(generator.clone(), ScriptedCollaborator::new());
    harness.dispatch(PanelEvent::Prompt("   ".into()));
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("prompt is empty"), "missing notice in {html}");
    assert!(generator.calls().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn generation_failure_is_shown_as_text() {
    let generator = ScriptedCollaborator::new().then_fail("connection refused");
    let mut harness = setup_panel_harness(generator, ScriptedCollaborator::new());
    harness.dispatch(PanelEvent::Prompt("anything".into()));
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Error: "), "missing failure text in {html}");
    assert!(html.contains("connection refused"), "missing detail in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn plain_reply_is_shown_verbatim() {
    let reply = "def f(*args, **kw):\n    return 1";
    let generator = ScriptedCollaborator::replying(reply);
    let mut harness = setup_panel_harness(generator, ScriptedCollaborator::new());
    harness.dispatch(PanelEvent::Prompt("anything".into()));
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("<pre class=\"panel-text\">"), "missing pre block in {html}");
    assert!(html.contains(reply), "layout lost in {html}");
    assert!(!html.contains("<em>"), "reply interpreted as markup in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn feedback_and_hint_follow_attempts() {
    let mut harness = quiz_harness(ScriptedCollaborator::new()).await;

    choose(&mut harness, "q1", 0);
    let html = harness.render();
    assert!(html.contains("Incorrect. Try again."), "missing feedback in {html}");
    assert!(!html.contains("Show Hint"), "hint too early in {html}");

    choose(&mut harness, "q1", 2);
    choose(&mut harness, "q1", 0);
    let html = harness.render();
    assert!(html.contains("Show Hint"), "missing hint button in {html}");

    harness.dispatch(PanelEvent::RevealHint(QuestionId::new("q1")));
    let html = harness.render();
    assert!(
        html.contains("💡 Hint: max with key=count picks the most frequent."),
        "missing hint in {html}"
    );
    assert!(html.contains("Show Hint"), "hint button hidden after reveal in {html}");

    choose(&mut harness, "q1", 1);
    let html = harness.render();
    assert!(html.contains("✅ Correct!"), "missing correct feedback in {html}");
    assert!(html.contains("1/2 correct"), "missing progress in {html}");
    assert!(html.contains("Show Hint"), "hint button hidden after answer in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn finishing_the_quiz_unlocks_implement() {
    let judge = ScriptedCollaborator::new().then_reply("correct");
    let mut harness = quiz_harness(judge.clone()).await;

    choose(&mut harness, "q1", 1);
    harness.dispatch(PanelEvent::SubmitAnswer {
        question_id: QuestionId::new("q2"),
        answer: Answer::Text("so each value is counted once".into()),
    });
    assert!(harness.render().contains("Checking your answer"));
    harness.settle().await;

    let html = harness.render();
    assert_eq!(judge.calls(), vec!["so each value is counted once".to_string()]);
    assert!(html.contains("2/2 correct"), "missing progress in {html}");
    assert!(html.contains("Want to implement this code?"), "missing proceed in {html}");
    assert!(html.contains("Completed in 0s"), "missing completion banner in {html}");
    let panel = harness.panel();
    let complete = harness
        .dom
        .in_runtime(|| panel.read().session().is_some_and(|session| session.is_complete()));
    assert!(complete);

    harness.dispatch(PanelEvent::Implement);
    harness.settle().await;

    let received = harness.host.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].code.language(), Some("python"));
    let html = harness.render();
    assert!(html.contains("Code sent to the editor."), "missing notice in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn judge_failure_counts_as_incorrect() {
    let judge = ScriptedCollaborator::new().then_fail("judge offline");
    let mut harness = quiz_harness(judge).await;

    harness.dispatch(PanelEvent::SubmitAnswer {
        question_id: QuestionId::new("q2"),
        answer: Answer::Text("no idea".into()),
    });
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Incorrect. Try again."), "missing feedback in {html}");
    assert!(html.contains("0/2 correct"), "missing progress in {html}");
}
