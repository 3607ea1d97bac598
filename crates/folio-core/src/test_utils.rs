//! Content fixtures for tests and benches. Downstream crates enable the
//! `test-utils` feature to reach them.

use crate::content::{BlogPost, Project, Skill};
use crate::id::ContentId;

// ===========================================================================
// Record constructors
// ===========================================================================

pub fn project(id: u32, title: &str, description: &str, tags: &[&str]) -> Project {
    Project {
        id: ContentId(id),
        title: title.to_string(),
        description: description.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        link: None,
        status: None,
    }
}

pub fn post(id: u32, title: &str, excerpt: &str, tags: &[&str]) -> BlogPost {
    BlogPost {
        id: ContentId(id),
        title: title.to_string(),
        excerpt: excerpt.to_string(),
        date: "2024-01-01".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        read_minutes: None,
    }
}

pub fn skill(id: u32, name: &str, category: Option<&str>, level: u8) -> Skill {
    Skill {
        id: ContentId(id),
        name: name.to_string(),
        category: category.map(str::to_string),
        level,
        summary: None,
    }
}

// ===========================================================================
// Canned collections
// ===========================================================================

/// Three security projects with six distinct tags between them.
pub fn security_projects() -> Vec<Project> {
    vec![
        project(
            1,
            "Web App Pentest",
            "XSS vulnerability discovery and responsible disclosure",
            &["Burp Suite", "Firefox"],
        ),
        project(
            2,
            "Home Lab",
            "Isolated network for malware analysis",
            &["VirtualBox", "Kali Linux"],
        ),
        project(
            3,
            "Secure Notes",
            "AES-256 encryption for notes on Android",
            &["Android Studio", "Java"],
        ),
    ]
}

/// A large synthetic collection for benchmarks: `n` projects cycling through
/// a small tag vocabulary.
pub fn synthetic_projects(n: usize) -> Vec<Project> {
    const TAGS: [&str; 8] = [
        "Rust", "Go", "Java", "Python", "Linux", "Docker", "Security", "Web",
    ];
    (0..n)
        .map(|i| {
            let a = TAGS[i % TAGS.len()];
            let b = TAGS[(i / TAGS.len()) % TAGS.len()];
            project(
                i as u32,
                &format!("Project {i}"),
                &format!("A {a} project about {b} tooling, entry number {i}"),
                &[a, b],
            )
        })
        .collect()
}
