use leptos::prelude::*;
use serde::Deserialize;

/// Outline icons used on the page, drawn after the lucide set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    Box,
    Target,
    Globe,
    Sparkles,
    Mail,
    ArrowLeft,
}

#[component]
pub fn Icon(kind: IconKind, #[prop(into)] class: String) -> impl IntoView {
    let paths = match kind {
        IconKind::Box => view! {
            <path d="M21 8a2 2 0 0 0-1-1.73l-7-4a2 2 0 0 0-2 0l-7 4A2 2 0 0 0 3 8v8a2 2 0 0 0 1 1.73l7 4a2 2 0 0 0 2 0l7-4A2 2 0 0 0 21 16Z" />
            <path d="m3.3 7 8.7 5 8.7-5" />
            <path d="M12 22V12" />
        }
        .into_any(),
        IconKind::Target => view! {
            <circle cx="12" cy="12" r="10" />
            <circle cx="12" cy="12" r="6" />
            <circle cx="12" cy="12" r="2" />
        }
        .into_any(),
        IconKind::Globe => view! {
            <circle cx="12" cy="12" r="10" />
            <path d="M12 2a14.5 14.5 0 0 0 0 20 14.5 14.5 0 0 0 0-20" />
            <path d="M2 12h20" />
        }
        .into_any(),
        IconKind::Sparkles => view! {
            <path d="M9.937 15.5A2 2 0 0 0 8.5 14.063l-6.135-1.582a.5.5 0 0 1 0-.962L8.5 9.936A2 2 0 0 0 9.937 8.5l1.582-6.135a.5.5 0 0 1 .963 0L14.063 8.5A2 2 0 0 0 15.5 9.937l6.135 1.581a.5.5 0 0 1 0 .964L15.5 14.063a2 2 0 0 0-1.437 1.437l-1.582 6.135a.5.5 0 0 1-.963 0z" />
            <path d="M20 3v4" />
            <path d="M22 5h-4" />
        }
        .into_any(),
        IconKind::Mail => view! {
            <rect x="2" y="4" width="20" height="16" rx="2" />
            <path d="m22 7-8.97 5.7a1.94 1.94 0 0 1-2.06 0L2 7" />
        }
        .into_any(),
        // Points left, the forward direction in a right-to-left layout
        IconKind::ArrowLeft => view! {
            <path d="M19 12H5" />
            <path d="m12 19-7-7 7-7" />
        }
        .into_any(),
    };

    view! {
        <svg
            xmlns="http://www.w3.org/2000/svg"
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            class=class
            aria-hidden="true"
        >
            {paths}
        </svg>
    }
}
