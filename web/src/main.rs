use chrono::Datelike;
use leptos::logging::error;
use leptos::prelude::*;
use newsletter::external::NewsletterClient;
use newsletter::Settings;

mod content;
mod icons;
mod recaptcha;
mod signup;

use content::{Feature, PageContent};
use icons::{Icon, IconKind};
use recaptcha::Recaptcha;
use signup::NewsletterSignup;

#[component]
fn App(content: PageContent) -> impl IntoView {
    let settings = Settings::new(env!("API_URL"), env!("RECAPTCHA_SITE_KEY"));

    let challenge = Recaptcha::new(settings.recaptcha_site_key.clone());
    if let Err(e) = challenge.mount() {
        error!("reCAPTCHA could not be mounted: {:?}", e);
    }
    let client = NewsletterClient::new(&settings);

    let PageContent {
        brand,
        tagline,
        copyright,
        newsletter,
        features,
    } = content;

    view! {
        <div dir="rtl" class="min-h-screen bg-gradient-to-br from-slate-900 via-slate-800 to-slate-900">
            <div class="container mx-auto px-4 py-16 md:py-32">
                <div class="max-w-4xl mx-auto text-center">
                    <div class="flex items-center justify-center mb-8">
                        <Icon kind=IconKind::Box class="w-12 h-12 text-violet-400 animate-pulse" />
                    </div>

                    <h1 class="text-4xl md:text-6xl font-bold text-white mb-6 tracking-tight">
                        <span class="bg-clip-text text-transparent bg-gradient-to-r from-blue-400 to-violet-400">
                            {brand.clone()}
                        </span>
                    </h1>

                    <p class="text-xl md:text-2xl text-slate-300 mb-8">{tagline}</p>

                    <div class="grid md:grid-cols-3 gap-8 mb-12">
                        {features
                            .into_iter()
                            .map(|feature| view! { <FeatureCard feature=feature /> })
                            .collect::<Vec<_>>()}
                    </div>

                    <NewsletterSignup copy=newsletter client=client challenge=challenge />

                    <Footer brand=brand copyright=copyright />
                </div>
            </div>
        </div>
    }
}

#[component]
fn FeatureCard(feature: Feature) -> impl IntoView {
    view! {
        <div class="p-6 rounded-xl bg-slate-800/50 backdrop-blur-sm">
            <Icon kind=feature.icon class="w-8 h-8 text-blue-400 mx-auto mb-4" />
            <h3 class="text-lg font-semibold text-white mb-2">{feature.title}</h3>
            <p class="text-slate-400">{feature.description}</p>
        </div>
    }
}

#[component]
fn Footer(brand: String, copyright: String) -> impl IntoView {
    let year = chrono::Utc::now().year();

    view! {
        <div class="mt-16 text-slate-400">
            <p>{format!("© {} {}. {}", year, brand, copyright)}</p>
        </div>
    }
}

fn main() {
    match content::load() {
        Ok(content) => leptos::mount::mount_to_body(move || view! { <App content=content /> }),
        Err(e) => error!("Page content is invalid: {}", e),
    }
}
