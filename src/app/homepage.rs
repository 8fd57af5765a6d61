use leptos::prelude::*;
use leptos_meta::Title;

use super::technologies::TechGrid;
use crate::portfolio::{Project, PROFILE, PROJECTS};

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Title text="Portfolio" />
        <Hero />
        <TechGrid />
        <Projects />
    }
}

#[component]
fn Hero() -> impl IntoView {
    view! {
        <section
            id="about"
            class="relative h-screen w-full overflow-hidden flex items-center justify-center hero-gradient"
        >
            <div class="relative z-20 text-center px-4 max-w-4xl mx-auto">
                <h1 class="font-bold text-4xl sm:text-5xl md:text-7xl lg:text-8xl mb-4 gradient-text">
                    {PROFILE.name}
                </h1>
                <h2 class="text-2xl sm:text-3xl md:text-4xl mt-2 mb-8 text-gray-100 font-light tracking-wide">
                    {PROFILE.title}
                </h2>
                <div class="mt-10 flex flex-col sm:flex-row items-center justify-center gap-6 sm:gap-8">
                    <a
                        href=PROFILE.resume
                        target="_blank"
                        rel="noopener noreferrer"
                        class="px-8 py-4 bg-[#7928CA] hover:bg-[#8A3DD9] text-white rounded-md transition-all duration-300 hover:scale-105 shadow-lg flex items-center justify-center space-x-2 w-48 sm:w-auto font-medium"
                        aria-label="View Resume"
                    >
                        <i class="fas fa-file-alt"></i>
                        <span>"View Resume"</span>
                    </a>
                    <a
                        href="#projects"
                        class="px-8 py-4 bg-white/10 text-white rounded-md border border-white/20 hover:bg-white/20 transition-all duration-300 hover:scale-105 shadow-lg flex items-center justify-center space-x-2 w-48 sm:w-auto"
                        aria-label="View Projects"
                    >
                        <i class="fas fa-code"></i>
                        <span>"View Projects"</span>
                    </a>
                </div>
                <div class="mt-8 flex justify-center gap-6">
                    <a
                        href=PROFILE.github
                        target="_blank"
                        rel="noopener noreferrer"
                        class="text-gray-100 hover:text-gray-300 text-4xl"
                        aria-label="GitHub Profile"
                    >
                        <i class="devicon-github-original"></i>
                    </a>
                    <a
                        href=PROFILE.linkedin
                        target="_blank"
                        rel="noopener noreferrer"
                        class="text-gray-100 hover:text-gray-300 text-4xl"
                        aria-label="LinkedIn Profile"
                    >
                        <i class="devicon-linkedin-plain"></i>
                    </a>
                </div>
            </div>
        </section>
    }
}

#[component]
fn Projects() -> impl IntoView {
    view! {
        <section id="projects" class="text-white px-4 sm:px-10 py-8 sm:mt-40">
            <h2 class="text-4xl sm:text-6xl font-bold mb-20 text-center">"Projects"</h2>
            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-8">
                {PROJECTS.iter().map(|p| view! { <ProjectCard project=*p /> }).collect_view()}
            </div>
        </section>
    }
}

#[component]
fn ProjectCard(project: Project) -> impl IntoView {
    view! {
        <a
            href=project.link
            target="_blank"
            rel="noopener noreferrer"
            class="group relative overflow-hidden rounded-lg shadow-lg transition-all duration-300 hover:scale-105 hover:shadow-2xl"
        >
            <div class="absolute inset-0 z-0 overflow-hidden">
                <img
                    src=project.image
                    alt=project.title
                    class="w-full h-full object-cover scale-110 transition-transform duration-300 group-hover:scale-125"
                />
                <div class="absolute inset-0 bg-black opacity-60"></div>
            </div>
            <div class="relative z-10 p-6 pt-48 h-full flex flex-col justify-end">
                <h3 class="text-2xl font-bold mb-4">{project.title}</h3>
                <div class="flex flex-wrap items-center gap-4 mb-2 text-xs sm:text-sm">
                    {project
                        .technologies
                        .iter()
                        .map(|tech| {
                            view! {
                                <div class="flex items-center space-x-2">
                                    <i class=format!("{} text-3xl sm:text-4xl", tech.icon)></i>
                                    <span>{tech.name}</span>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </a>
    }
}
