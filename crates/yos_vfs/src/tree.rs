//! The static portfolio tree.
//!
//! Pure configuration data: the traversal code never special-cases any of
//! these names.

use once_cell::sync::Lazy;

use crate::node::Node;

static PORTFOLIO_TREE: Lazy<Node> = Lazy::new(build_tree);

/// Root of the portfolio filesystem, built once per process.
pub fn portfolio_tree() -> &'static Node {
    &PORTFOLIO_TREE
}

fn build_tree() -> Node {
    Node::dir(vec![
        (
            "home",
            Node::dir(vec![(
                "yohannes",
                Node::dir(vec![
                    (
                        "projects",
                        Node::dir(vec![
                            ("ai-caption-generator", Node::dir(vec![])),
                            ("yohannes-os", Node::dir(vec![])),
                            ("cwit-attendance", Node::dir(vec![])),
                            ("market-tracker", Node::dir(vec![])),
                            ("asl-classifier", Node::dir(vec![])),
                            ("kibur-api", Node::dir(vec![])),
                        ]),
                    ),
                    (
                        "documents",
                        Node::dir(vec![
                            (
                                "resume.pdf",
                                Node::file("Yohannes Resume - Full-Stack Developer"),
                            ),
                            (
                                "cover-letter.txt",
                                Node::file("Professional cover letter template"),
                            ),
                        ]),
                    ),
                    (
                        "skills",
                        Node::dir(vec![
                            (
                                "languages-frameworks.txt",
                                Node::file(
                                    "Python, C++, JavaScript (Node.js), SQL, Flask, scikit-learn, Pandas, NumPy, MediaPipe, Prophet, PyTorch (in progress)",
                                ),
                            ),
                            (
                                "devops-deployment.txt",
                                Node::file(
                                    "Git, GitHub Actions, Docker, Render, Firebase Authentication, Google Cloud (Cloud Functions, Storage), Linux Shell (SSH), Postman",
                                ),
                            ),
                            (
                                "databases-tools.txt",
                                Node::file("SQLite, Google Sheets API, Plotly"),
                            ),
                            (
                                "applied-concepts.txt",
                                Node::file(
                                    "RESTful API Design, CI/CD Pipelines, PCA Dimensionality Reduction, ML Model Deployment, Real-time Inference, Forecasting Models",
                                ),
                            ),
                        ]),
                    ),
                    (
                        "education",
                        Node::dir(vec![
                            (
                                "degree.txt",
                                Node::file(
                                    "B.S. Computer Science (AI/ML), B.A. Economics - St. Cloud State University",
                                ),
                            ),
                            ("gpa.txt", Node::file("GPA: 3.6/4.0")),
                            (
                                "coursework.txt",
                                Node::file(
                                    "Algorithms, Neural Networks, Data Mining, Intermediate Microeconomics, Industrial Organization",
                                ),
                            ),
                        ]),
                    ),
                    (
                        "contact",
                        Node::dir(vec![
                            ("email.txt", Node::file("yohanigusse@gmail.com")),
                            ("linkedin.txt", Node::file("linkedin.com/in/yohs/")),
                            ("github.txt", Node::file("github.com/yohannes")),
                        ]),
                    ),
                ]),
            )]),
        ),
        (
            "usr",
            Node::dir(vec![(
                "bin",
                Node::dir(vec![
                    ("node", Node::file("Node.js runtime")),
                    ("python", Node::file("Python interpreter")),
                    ("git", Node::file("Git version control")),
                ]),
            )]),
        ),
        (
            "etc",
            Node::dir(vec![
                ("hostname", Node::file("yohannes-os")),
                ("os-release", Node::file("YohannesOS 2.1.0")),
            ]),
        ),
    ])
}
