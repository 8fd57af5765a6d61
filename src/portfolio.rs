#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    pub name: &'static str,
    pub title: &'static str,
    pub github: &'static str,
    pub linkedin: &'static str,
    pub resume: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TechItem {
    pub name: &'static str,
    pub icon: &'static str,
    pub hover_class: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectTech {
    pub name: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub link: &'static str,
    pub image: &'static str,
    pub technologies: &'static [ProjectTech],
}

pub const PROFILE: Profile = Profile {
    name: "Ibrahim Elsawalhi",
    title: "Full Stack Developer",
    github: "https://github.com/IbrahimElsa",
    linkedin: "https://linkedin.com/in/ibrahim-elsawalhi",
    resume: "/IbrahimElsawalhiResume.pdf",
};

pub const TECHNOLOGIES: &[TechItem] = &[
    TechItem {
        name: "HTML5",
        icon: "devicon-html5-plain",
        hover_class: "text-orange-500",
    },
    TechItem {
        name: "CSS3",
        icon: "devicon-css3-plain",
        hover_class: "text-blue-500",
    },
    TechItem {
        name: "JavaScript",
        icon: "devicon-javascript-plain",
        hover_class: "text-yellow-400",
    },
    TechItem {
        name: "React",
        icon: "devicon-react-original",
        hover_class: "text-cyan-400",
    },
    TechItem {
        name: "Python",
        icon: "devicon-python-plain",
        hover_class: "text-blue-600",
    },
    TechItem {
        name: "Node.js",
        icon: "devicon-nodejs-plain",
        hover_class: "text-green-500",
    },
    TechItem {
        name: "MongoDB",
        icon: "devicon-mongodb-plain",
        hover_class: "text-green-600",
    },
    TechItem {
        name: "MySQL",
        icon: "devicon-mysql-plain",
        hover_class: "text-blue-400",
    },
    TechItem {
        name: "Firebase",
        icon: "devicon-firebase-plain",
        hover_class: "text-yellow-500",
    },
    TechItem {
        name: "Tailwind CSS",
        icon: "devicon-tailwindcss-plain",
        hover_class: "text-cyan-500",
    },
    TechItem {
        name: "Bootstrap",
        icon: "devicon-bootstrap-plain",
        hover_class: "text-purple-500",
    },
    TechItem {
        name: "C#",
        icon: "devicon-csharp-plain",
        hover_class: "text-purple-600",
    },
];

const HTML: ProjectTech = ProjectTech {
    name: "HTML",
    icon: "devicon-html5-plain",
};
const CSS: ProjectTech = ProjectTech {
    name: "CSS",
    icon: "devicon-css3-plain",
};
const JAVASCRIPT: ProjectTech = ProjectTech {
    name: "JavaScript",
    icon: "devicon-javascript-plain",
};

pub const PROJECTS: &[Project] = &[
    Project {
        title: "Gym E-commerce Page",
        link: "https://rossthesloth-gym.netlify.app",
        image: "/Gym-page.png",
        technologies: &[
            HTML,
            CSS,
            JAVASCRIPT,
            ProjectTech {
                name: "Bootstrap",
                icon: "devicon-bootstrap-plain",
            },
            ProjectTech {
                name: "MongoDB",
                icon: "devicon-mongodb-plain",
            },
        ],
    },
    Project {
        title: "Fitness Tracker",
        link: "https://fitness-app-00.web.app",
        image: "/LogoFitnessApp.webp",
        technologies: &[
            ProjectTech {
                name: "React",
                icon: "devicon-react-original",
            },
            CSS,
            JAVASCRIPT,
            ProjectTech {
                name: "Tailwind",
                icon: "devicon-tailwindcss-original",
            },
            ProjectTech {
                name: "Firebase",
                icon: "devicon-firebase-plain",
            },
        ],
    },
    Project {
        title: "Stocks Analysis Chart",
        link: "https://github.com/IbrahimElsa/Project1_Stocks",
        image: "/StocksProjectSS.png",
        technologies: &[ProjectTech {
            name: "C#",
            icon: "devicon-csharp-plain",
        }],
    },
];

pub fn tech_names() -> Vec<String> {
    TECHNOLOGIES.iter().map(|t| t.name.to_string()).collect()
}
