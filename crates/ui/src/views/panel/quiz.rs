use dioxus::prelude::*;

use vibely_core::model::{Answer, QuestionId};

use crate::vm::{AnswerInputVm, PROCEED_TEXT, QuestionVm, QuizVm};

#[component]
pub(super) fn QuizView(
    quiz: QuizVm,
    on_answer: EventHandler<(QuestionId, Answer)>,
    on_hint: EventHandler<QuestionId>,
    on_implement: EventHandler<()>,
) -> Element {
    let language = quiz.language.clone().unwrap_or_else(|| "text".to_string());
    let code_class = format!("language-{language}");

    rsx! {
        section { class: "quiz",
            div { class: "code-window",
                div { class: "code-window__bar",
                    span { class: "code-window__language", "{language}" }
                }
                pre { code { class: "{code_class}", "{quiz.code}" } }
            }
            p { class: "quiz__progress", "{quiz.progress_label}" }
            for question in quiz.questions.iter().cloned() {
                QuestionCard {
                    key: "{question.key}",
                    question: question.clone(),
                    on_answer,
                    on_hint,
                }
            }
            if let Some(completed_in) = &quiz.completed_in {
                p { class: "quiz__completed", "{completed_in}" }
            }
            if quiz.complete {
                button {
                    id: "quiz-proceed",
                    class: "btn btn-primary quiz__proceed",
                    r#type: "button",
                    onclick: move |_| on_implement.call(()),
                    "{PROCEED_TEXT}"
                }
            }
        }
    }
}

#[component]
fn QuestionCard(
    question: QuestionVm,
    on_answer: EventHandler<(QuestionId, Answer)>,
    on_hint: EventHandler<QuestionId>,
) -> Element {
    let mut selected = use_signal(|| None::<usize>);
    let mut text = use_signal(String::new);

    let has_input = match &question.input {
        AnswerInputVm::Choice { .. } => selected().is_some(),
        AnswerInputVm::Free => !text.read().trim().is_empty(),
    };
    let submit_disabled = !question.can_submit || !has_input;
    let locked = question.answered;

    let submit_id = question.id.clone();
    let hint_id = question.id.clone();
    let is_choice = matches!(question.input, AnswerInputVm::Choice { .. });
    let on_submit = move |_| {
        let answer = if is_choice {
            match selected() {
                Some(index) => Answer::Choice(index),
                None => return,
            }
        } else {
            Answer::Text(text.peek().clone())
        };
        on_answer.call((submit_id.clone(), answer));
    };

    rsx! {
        article { class: "question",
            p { class: "question__text",
                strong { "{question.label} " }
                "{question.text}"
            }
            match &question.input {
                AnswerInputVm::Choice { options } => rsx! {
                    div { class: "question__options",
                        for (index, option) in options.iter().enumerate() {
                            label { class: "question__option",
                                input {
                                    r#type: "radio",
                                    name: "{question.key}",
                                    checked: selected() == Some(index),
                                    disabled: locked,
                                    onchange: move |_| selected.set(Some(index)),
                                }
                                " {option}"
                            }
                        }
                    }
                },
                AnswerInputVm::Free => rsx! {
                    textarea {
                        class: "question__answer",
                        rows: "3",
                        placeholder: "Type your answer…",
                        disabled: locked,
                        value: "{text}",
                        oninput: move |evt| text.set(evt.value()),
                    }
                },
            }
            div { class: "question__actions",
                button {
                    class: "btn",
                    r#type: "button",
                    disabled: submit_disabled,
                    onclick: on_submit,
                    "Submit"
                }
                if question.show_hint_button {
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: move |_| on_hint.call(hint_id.clone()),
                        "Show Hint"
                    }
                }
            }
            if let Some((tone, line)) = &question.feedback {
                p { class: tone.class(), "{line}" }
            }
        }
    }
}
