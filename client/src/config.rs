//! Static portfolio content.
//!
//! Everything the pages display about the site owner lives here. Edit this
//! file and rebuild to update the site.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

#[derive(Clone, Copy, Debug)]
pub struct PortfolioConfig {
    pub name: &'static str,
    pub role: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub profile_image: &'static str,
    pub hero: HeroCopy,
    pub bio: Bio,
    pub timeline: &'static [TimelineEntry],
    pub projects: &'static [Project],
    pub skills: &'static [&'static str],
}

#[derive(Clone, Copy, Debug)]
pub struct HeroCopy {
    /// Typed forward on the first row.
    pub lead: &'static str,
    /// Typed in reverse on the second row.
    pub trail: &'static str,
    pub tagline: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct Bio {
    pub heading: &'static str,
    /// Paragraphs equal to [`crate::util::rich_text::DIVIDER`] render as rules.
    pub paragraphs: &'static [&'static str],
    pub keywords: &'static [&'static str],
    /// Large initials drawn behind the About page.
    pub monogram: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct TimelineEntry {
    pub year: &'static str,
    pub title: &'static str,
    pub desc: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct Project {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    /// `"#"` while the project has no public page.
    pub link: &'static str,
    pub image: &'static str,
}

impl Project {
    #[must_use]
    pub fn has_link(&self) -> bool {
        !self.link.is_empty() && self.link != "#"
    }
}

pub const PROJECTS_TITLE: &str = "Selected ProJects.";
pub const PROJECTS_SUBTITLE: &str = "Personal work exploring AI, systems, and computation.";

pub const PORTFOLIO: PortfolioConfig = PortfolioConfig {
    name: "Anto Bredly",
    role: "Student • AI / ML",
    email: "antotheprogrammer@gmail.com",
    phone: "+917092208939",
    profile_image: "/profile.jpg",
    hero: HeroCopy {
        lead: "Exploring",
        trail: "Intelligence.",
        tagline: "I’m exploring how intelligence can be built, understood, and improved through code and math.",
    },
    bio: Bio {
        heading: "About Me.",
        paragraphs: &[
            "I'm a student interested in understanding how intelligence works — not just at a high level, but at the level of systems, code, and math.",
            "I enjoy building small projects that help me explore ideas in artificial intelligence and machine learning. I'm especially drawn to problems where logic, algorithms, and structure matter.",
            "This portfolio is a place where I document what I build, what I learn, and how my thinking evolves over time.",
            "— — —",
            "Right now, my focus is on strengthening my foundations in programming, algorithms, and mathematics, while gradually moving deeper into machine learning concepts through hands-on work.",
            "— — —",
            "I'm still learning — and that's the point.",
        ],
        keywords: &["intelligence", "systems", "code", "math", "logic", "algorithms", "structure", "learning"],
        monogram: "AB",
    },
    timeline: &[
        TimelineEntry {
            year: "2020",
            title: "Started Programming",
            desc: "Began learning programming through online courses and self-exploration.",
        },
        TimelineEntry {
            year: "2023",
            title: "Web & Competitions",
            desc: "Designed and built websites, including projects for competitions.",
        },
        TimelineEntry {
            year: "2025",
            title: "Current Focus",
            desc: "In 12th grade, preparing to study AI & ML and build stronger systems.",
        },
    ],
    projects: &[
        Project {
            id: "1",
            title: "Aura Intelligence",
            description: "Generative UI systems adapting to user biometrics in real-time.",
            tags: &["GenAI", "Biometric", "WebGPU"],
            link: "#",
            image: "https://images.unsplash.com/photo-1618005198919-d3d4b5a92ead?auto=format&fit=crop&q=80&w=1200",
        },
        Project {
            id: "2",
            title: "Kinetic Studio",
            description: "High-performance motion engine for interactive brand narratives.",
            tags: &["Rust", "GLSL", "WebGL"],
            link: "#",
            image: "https://images.unsplash.com/photo-1634017839464-5c339ebe3cb4?auto=format&fit=crop&q=80&w=1200",
        },
        Project {
            id: "3",
            title: "Prism Vision",
            description: "Spatial computing interfaces for the modern web browser.",
            tags: &["Three.js", "React", "Canvas"],
            link: "#",
            image: "https://images.unsplash.com/photo-1633167606207-d840b5070fc2?auto=format&fit=crop&q=80&w=1200",
        },
    ],
    skills: &["Python / NumPy", "Algorithms & DS", "React / TypeScript", "Linear Algebra"],
};
