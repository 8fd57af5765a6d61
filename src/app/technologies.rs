use leptos::prelude::*;

use super::browser::{device_profile, BrowserScheduler, JsRandom};
use crate::{
    highlight::{AnimationConfig, HighlightState, TechAnimations},
    portfolio::{tech_names, TECHNOLOGIES},
};

#[component]
pub fn TechGrid() -> impl IntoView {
    let config = AnimationConfig::default();
    let highlight = RwSignal::new(HighlightState::idle(&config.default_label));
    let animations = StoredValue::new(TechAnimations::new(
        BrowserScheduler,
        config,
        tech_names(),
        JsRandom,
        move |state: &HighlightState| highlight.set(state.clone()),
    ));

    // small screens get the autonomous cycle until the first click
    Effect::new(move |_| {
        if let Some(profile) = device_profile() {
            animations.with_value(|a| a.begin_engagement(&profile));
        }
    });
    on_cleanup(move || animations.with_value(|a| a.teardown()));

    view! {
        <section id="skills" class="text-gray-100 px-4 sm:px-10 flex flex-col items-center mt-20">
            <h1 class="text-4xl sm:text-6xl font-bold mb-20 text-center min-h-[1.2em]">
                {move || highlight.with(|s| s.active_label.clone())}
            </h1>
            <div class="grid grid-cols-3 sm:grid-cols-4 md:grid-cols-5 lg:grid-cols-6 gap-8 sm:gap-10 md:gap-12 w-full max-w-6xl">
                {TECHNOLOGIES
                    .iter()
                    .map(|tech| {
                        let name = tech.name;
                        let is_active = move || highlight.with(|s| s.is_active(name));
                        view! {
                            <button
                                class="group flex flex-col items-center space-y-2 focus:outline-none"
                                aria-label=name
                                on:mouseenter=move |_| animations.with_value(|a| a.hover_start(name))
                                on:mouseleave=move |_| animations.with_value(|a| a.hover_end())
                                on:click=move |_| animations.with_value(|a| a.click(name))
                            >
                                <i class=move || {
                                    let emphasis = if is_active() {
                                        format!("scale-110 {}", tech.hover_class)
                                    } else {
                                        format!("grayscale group-hover:grayscale-0 group-hover:{}", tech.hover_class)
                                    };
                                    format!(
                                        "{} text-6xl sm:text-7xl transition-all duration-300 {emphasis}",
                                        tech.icon,
                                    )
                                }></i>
                                <span class="text-sm sm:text-base font-medium">{name}</span>
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
