//! Pre-authored terminal content.
//!
//! Pure data: the welcome banner and the output blocks for the portfolio
//! commands. Every block ends with a blank line so transcript entries stay
//! visually separated.

pub const BANNER: &[&str] = &[
    "YohannesOS Terminal v2.1.0",
    "Welcome to YohannesOS! Type \"help\" for available commands.",
    "Current directory: /home/yohannes",
    "",
];

pub const HELP: &[&str] = &[
    "YohannesOS Terminal Commands:",
    "",
    "File System:",
    "  ls [path]     - List directory contents",
    "  cd <path>     - Change directory",
    "  pwd           - Print working directory",
    "  cat <file>    - Display file contents",
    "  tree          - Show directory tree",
    "",
    "Portfolio:",
    "  about         - About me",
    "  projects      - My projects",
    "  skills        - Technical skills",
    "  education     - Educational background",
    "  contact       - Contact information",
    "  whoami        - Current user info",
    "",
    "System:",
    "  clear         - Clear terminal",
    "  exit          - Return to desktop",
    "  uname         - System information",
    "",
];

pub const ABOUT: &[&str] = &[
    "╭─────────────────────────────────────────╮",
    "│              About Yohannes             │",
    "╰─────────────────────────────────────────╯",
    "",
    "Rising junior in Computer Science (AI/ML) & Economics",
    "",
    "I build backend systems, RESTful APIs, and ML apps,",
    "taking ideas from concept to production with real data.",
    "Skilled in Python, Flask, and scikit-learn, applying",
    "system design principles to solve research and business problems.",
    "",
    "Seeking backend engineering or applied ML internships",
    "focused on technical ownership and impactful, scalable work.",
    "",
    "Recent highlights:",
    "• AI Caption Generator used by 50+ small businesses",
    "• Market Price Tracker with ML forecasting (>85% accuracy)",
    "• College API serving 1,200+ student records",
    "",
    "Currently: CS/Econ student at St. Cloud State University",
    "Status: Available for new opportunities",
    "",
];

pub const PROJECTS: &[&str] = &[
    "╭─────────────────────────────────────────╮",
    "│            Featured Projects            │",
    "╰─────────────────────────────────────────╯",
    "",
    "🤖 AI Caption Generator [DEPLOYED]",
    "   Flask • OpenAI API • Google Sheets API",
    "   Auto-generates Instagram captions; used by 50+ businesses",
    "",
    "🏢 Kibur College API [PRODUCTION]",
    "   Flask • Firebase Auth • Google Sheets API",
    "   Enrollment & faculty performance tracking (1,200+ records)",
    "",
    "💻 YohannesOS Portfolio [LIVE]",
    "   React • TypeScript • Tailwind CSS",
    "   Interactive desktop-like portfolio experience",
    "",
    "📊 Market Price Tracker [ACTIVE]",
    "   Python • BeautifulSoup • SQLite • Prophet",
    "   Tracks 1,200+ products with ML forecasting (>85% accuracy)",
    "",
    "🤟 ASL Gesture Classifier [RESEARCH]",
    "   Python • MediaPipe • scikit-learn",
    "   Recognizes 15 ASL gestures with 94% accuracy",
    "",
    "📋 CWIT Attendance Automation [COMPLETED]",
    "   Python • Google Sheets API",
    "   Reduced manual tracking by ~10 hours/month",
    "",
    "Use \"cd projects\" and \"ls\" to explore project directories!",
    "",
];

pub const SKILLS: &[&str] = &[
    "╭─────────────────────────────────────────╮",
    "│            Technical Skills             │",
    "╰─────────────────────────────────────────╯",
    "",
    "💻 Languages & Frameworks",
    "   Python • C++ • JavaScript (Node.js) • SQL • Flask • scikit-learn • Pandas • NumPy • MediaPipe • Prophet • PyTorch (in progress)",
    "",
    "🚀 DevOps & Deployment",
    "   Git • GitHub Actions • Docker • Render • Firebase Authentication • Google Cloud (Cloud Functions, Storage) • Linux Shell (SSH) • Postman",
    "",
    "🗄️ Databases & Data Tools",
    "   SQLite • Google Sheets API • Plotly",
    "",
    "🔬 Applied Concepts",
    "   RESTful API Design • CI/CD Pipelines • PCA Dimensionality Reduction • ML Model Deployment • Real-time Inference • Forecasting Models",
    "",
    "Use \"cd skills\" and \"cat <file>\" to see detailed skill lists!",
    "",
];

pub const EDUCATION: &[&str] = &[
    "╭─────────────────────────────────────────╮",
    "│              Education                  │",
    "╰─────────────────────────────────────────╯",
    "",
    "🎓 St. Cloud State University",
    "   B.S. Computer Science (AI/ML)",
    "   B.A. Economics",
    "   GPA: 3.6/4.0 • Expected Dec 2026",
    "",
    "📚 Relevant Coursework",
    "   • Algorithms & Data Structures",
    "   • Neural Networks & Machine Learning",
    "   • Data Mining & Analytics",
    "   • Intermediate Microeconomics",
    "   • Industrial Organization",
    "",
    "🏆 Professional Development",
    "   • CodePath Web Development 101 (Completed)",
    "   • CodePath Career Prep Network (Active)",
    "   • ColorStack Member",
    "   • AI4ALL Discover AI Program (Graduate)",
    "",
    "🎯 Activities",
    "   • Cloud Computing Club",
    "   • Student Government Tech Fee Committee",
    "",
];

pub const CONTACT: &[&str] = &[
    "╭─────────────────────────────────────────╮",
    "│           Contact Information           │",
    "╰─────────────────────────────────────────╯",
    "",
    "📧 Email",
    "   yohanigusse@gmail.com",
    "",
    "🔗 Professional Links",
    "   LinkedIn: linkedin.com/in/yohs/",
    "   GitHub:   github.com/yohannes",
    "",
    "📍 Location",
    "   Minnesota, United States",
    "",
    "💼 Current Status",
    "   Available for new opportunities",
    "   Open to full-time and internship positions",
    "",
    "Use \"cd contact\" and \"cat <file>\" for specific contact files!",
    "",
];

/// Content blocks keyed by command name, in `help` listing order.
pub fn content_block(command: &str) -> Option<&'static [&'static str]> {
    match command {
        "help" => Some(HELP),
        "about" => Some(ABOUT),
        "projects" => Some(PROJECTS),
        "skills" => Some(SKILLS),
        "education" => Some(EDUCATION),
        "contact" => Some(CONTACT),
        _ => None,
    }
}
