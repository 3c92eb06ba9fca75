//! Desktop-side static data: icon table, start-menu entries, the quote
//! rotation, and the overlay blocks that have no terminal-command twin.

use yos_shell::content;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    About,
    Projects,
    LinkedIn,
    Experience,
    Education,
    Contact,
    Skills,
    Resume,
}

pub struct DesktopIcon {
    pub label: &'static str,
    pub kind: ContentKind,
}

pub const DESKTOP_ICONS: [DesktopIcon; 8] = [
    DesktopIcon { label: "About Me", kind: ContentKind::About },
    DesktopIcon { label: "Projects", kind: ContentKind::Projects },
    DesktopIcon { label: "LinkedIn", kind: ContentKind::LinkedIn },
    DesktopIcon { label: "Experience", kind: ContentKind::Experience },
    DesktopIcon { label: "Education", kind: ContentKind::Education },
    DesktopIcon { label: "Contact", kind: ContentKind::Contact },
    DesktopIcon { label: "Skills", kind: ContentKind::Skills },
    DesktopIcon { label: "Resume", kind: ContentKind::Resume },
];

pub const START_MENU_ITEMS: [&str; 9] = [
    "About YohannesOS",
    "Change Wallpaper",
    "Snake Game",
    "Tetris Game",
    "Checkers Game",
    "High Scores",
    "Quote of the Day",
    "Terminal",
    "Power Off",
];

pub const QUOTES: [&str; 7] = [
    "Code is poetry written in logic.",
    "The best way to predict the future is to create it.",
    "Simplicity is the ultimate sophistication.",
    "Innovation distinguishes between a leader and a follower.",
    "The only way to do great work is to love what you do.",
    "Stay hungry, stay foolish.",
    "Design is not just what it looks like - design is how it works.",
];

pub const ABOUT_SYSTEM: &[&str] = &[
    "╭─────────────────────────────────────────╮",
    "│             About YohannesOS            │",
    "╰─────────────────────────────────────────╯",
    "",
    "Version: 2.1.0",
    "Features: Desktop environment, Terminal, Mini-games",
    "Creator: Yohannes - Full-stack developer passionate about",
    "creating unique digital experiences",
    "",
    "This portfolio OS showcases an interactive desktop-like",
    "interface inside your terminal.",
    "",
];

pub const EXPERIENCE: &[&str] = &[
    "╭─────────────────────────────────────────╮",
    "│          Professional Experience        │",
    "╰─────────────────────────────────────────╯",
    "",
    "Content Director — Gojo Digitals",
    "  May 2025 - Present · Seattle, Washington",
    "  Founded a digital media brand covering ESFNA 2025,",
    "  growing TikTok and Instagram to nearly 20K followers.",
    "",
    "Undergraduate Research Assistant — BCI Lab, SCSU",
    "  Jan 2025 - May 2025 · Minnesota",
    "  EEG preprocessing pipelines and real-time ML classifiers",
    "  with sub-second latency for attention-state detection.",
    "",
    "Software Engineer Intern — Kibur College",
    "  May 2024 - Aug 2024",
    "  Flask REST API automating enrollment reporting;",
    "  reporting efficiency improved by ~80%.",
    "",
    "SI PASS Leader — UMBC Training Centers",
    "  Aug 2023 - May 2024 · Baltimore County, Maryland",
    "  Led 20+ peer-assisted study sessions for Python",
    "  fundamentals, recursion, and data structures.",
    "",
    "Assistant for Events and Programs — UMBC",
    "  Jul 2023 - May 2024 · Baltimore County, Maryland",
    "  Automated attendance tracking for 100+ scholars with",
    "  Python and the Google Sheets API.",
    "",
];

pub const RESUME: &[&str] = &[
    "╭─────────────────────────────────────────╮",
    "│                  Resume                 │",
    "╰─────────────────────────────────────────╯",
    "",
    "Yohannes — CS (AI/ML) & Economics, St. Cloud State University",
    "",
    "Highlights:",
    "• Backend systems, RESTful APIs, and applied ML projects",
    "• Research experience in EEG-driven attention prediction",
    "• Community impact through digital media and mentoring",
    "",
    "Full resume: see the Experience, Projects, and Education",
    "windows, or cat documents/resume.pdf in the terminal.",
    "",
];

/// Lines for a desktop content window. LinkedIn opens the contact card,
/// matching the original desktop's behavior.
#[must_use]
pub fn overlay_lines(kind: ContentKind) -> &'static [&'static str] {
    match kind {
        ContentKind::About => content::ABOUT,
        ContentKind::Projects => content::PROJECTS,
        ContentKind::LinkedIn | ContentKind::Contact => content::CONTACT,
        ContentKind::Experience => EXPERIENCE,
        ContentKind::Education => content::EDUCATION,
        ContentKind::Skills => content::SKILLS,
        ContentKind::Resume => RESUME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_icon_resolves_to_a_content_block() {
        for icon in &DESKTOP_ICONS {
            assert!(!overlay_lines(icon.kind).is_empty(), "{}", icon.label);
        }
    }

    #[test]
    fn linkedin_opens_the_contact_card() {
        assert_eq!(
            overlay_lines(ContentKind::LinkedIn),
            overlay_lines(ContentKind::Contact)
        );
    }
}
