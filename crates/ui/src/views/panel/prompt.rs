use dioxus::prelude::*;

use crate::vm::PlaceholderTicker;

fn submits(key: &Key, modifiers: Modifiers) -> bool {
    let command = modifiers.contains(Modifiers::CONTROL) || modifiers.contains(Modifiers::META);
    *key == Key::Enter && command
}

#[component]
pub(super) fn PromptForm(working: bool, on_submit: EventHandler<String>) -> Element {
    let mut text = use_signal(String::new);
    let mut placeholder = use_signal(String::new);

    use_future(move || async move {
        let mut ticker = PlaceholderTicker::new();
        loop {
            if text.read().is_empty() {
                let delay = ticker.step();
                placeholder.set(ticker.text());
                tokio::time::sleep(delay).await;
            } else {
                ticker.reset();
                if !placeholder.peek().is_empty() {
                    placeholder.set(String::new());
                }
                tokio::time::sleep(std::time::Duration::from_millis(250)).await;
            }
        }
    });

    let submit = use_callback(move |()| {
        if working {
            return;
        }
        on_submit.call(text.peek().clone());
    });

    rsx! {
        form {
            class: "prompt-form",
            onsubmit: move |evt| {
                evt.prevent_default();
                submit.call(());
            },
            textarea {
                id: "prompt-input",
                class: "prompt-input",
                rows: "4",
                placeholder: "{placeholder}",
                value: "{text}",
                oninput: move |evt| text.set(evt.value()),
                onkeydown: move |evt| {
                    if submits(&evt.data.key(), evt.data.modifiers()) {
                        evt.prevent_default();
                        submit.call(());
                    }
                },
            }
            button {
                id: "prompt-generate",
                class: "btn btn-primary",
                r#type: "submit",
                disabled: working,
                if working { "Generating…" } else { "Generate" }
            }
        }
    }
}
