use leptos::ev::SubmitEvent;
use leptos::logging::{error, log};
use leptos::prelude::*;
use leptos::task::spawn_local;
use newsletter::external::NewsletterClient;
use newsletter::{run_submission, FormHandle, FormState, Notification, Tone};

use crate::content::NewsletterCopy;
use crate::icons::{Icon, IconKind};
use crate::recaptcha::{Recaptcha, WIDGET_CONTAINER_ID};

/// Form state held in a reactive signal
#[derive(Clone, Copy)]
struct SignalForm(RwSignal<FormState>);

impl FormHandle for SignalForm {
    fn update<R>(&self, f: impl FnOnce(&mut FormState) -> R) -> Option<R> {
        self.0.try_update(f)
    }
}

#[component]
pub fn NewsletterSignup(
    copy: NewsletterCopy,
    client: NewsletterClient,
    challenge: Recaptcha,
) -> impl IntoView {
    let form = RwSignal::new(FormState::new());

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let client = client.clone();
        let challenge = challenge.clone();
        spawn_local(async move {
            let outcome = run_submission(SignalForm(form), &challenge, &client, |dismiss, delay| {
                set_timeout(dismiss, delay)
            })
            .await;

            match outcome {
                Some(Ok(response)) => log!("API response: {}", response),
                Some(Err(e)) => error!("Error: {}", e),
                None => {}
            }
        });
    };

    let loading = move || form.with(FormState::is_loading);
    let NewsletterCopy {
        heading,
        placeholder,
        submit: submit_label,
        submitting,
    } = copy;

    view! {
        <div class="max-w-md mx-auto">
            <h2 class="text-xl text-white mb-4">{heading}</h2>
            <form on:submit=on_submit class="flex gap-2">
                <div id=WIDGET_CONTAINER_ID></div>
                <button
                    type="submit"
                    disabled=loading
                    class=move || {
                        format!(
                            "px-6 py-3 rounded-lg bg-gradient-to-r from-blue-500 to-violet-500 text-white font-medium hover:opacity-90 transition-opacity flex items-center gap-2 {}",
                            if loading() { "opacity-50 cursor-not-allowed" } else { "" },
                        )
                    }
                >
                    {move || if loading() { submitting.clone() } else { submit_label.clone() }}
                    <Icon kind=IconKind::ArrowLeft class="w-4 h-4" />
                </button>
                <div class="relative flex-1">
                    <Icon
                        kind=IconKind::Mail
                        class="absolute right-3 top-1/2 transform -translate-y-1/2 text-slate-400 w-5 h-5"
                    />
                    <input
                        type="email"
                        required
                        placeholder=placeholder
                        prop:value=move || form.with(|f| f.email().to_string())
                        on:input=move |ev| form.update(|f| f.set_email(event_target_value(&ev)))
                        class="w-full pr-10 pl-4 py-3 rounded-lg bg-slate-800/50 border border-slate-700 focus:border-blue-400 focus:ring-1 focus:ring-blue-400 text-white placeholder-slate-400 outline-none transition-all"
                    />
                </div>
            </form>
            {move || form.with(|f| f.notification().cloned()).map(|notification| view! { <Toast notification=notification /> })}
        </div>
    }
}

#[component]
fn Toast(notification: Notification) -> impl IntoView {
    let colors = match notification.tone() {
        Tone::Success => "bg-gradient-to-r from-green-500 to-green-600",
        Tone::Failure => "bg-gradient-to-r from-red-500 to-red-600",
    };

    view! {
        <div
            role="status"
            aria-live="polite"
            class=format!("fixed bottom-4 left-4 z-50 max-w-sm rounded-lg p-4 shadow-lg text-white border-none {}", colors)
        >
            <div class="flex flex-col items-start gap-1">
                <div class="text-lg font-bold">{notification.title}</div>
                <div class="text-sm">{notification.description}</div>
            </div>
        </div>
    }
}
