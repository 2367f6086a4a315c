// Built-in portfolio contents. Authored by hand and never modified at runtime.

use super::node::{FileSystemNode, IconKey};

pub const ROOT_ID: &str = "root";
pub const SYSTEM_DRIVE_ID: &str = "c-drive";
pub const PROJECTS_DRIVE_ID: &str = "d-drive";
pub const USERS_ID: &str = "users";
pub const MUSIC_ID: &str = "music";

const ABOUT_ME: &str = "\
HELLO, I BUILD THINGS FOR THE WEB.

I enjoy interactive applications where careful engineering
meets playful design. This desktop is one of them.

- Location: The Internet
- Status: Open to interesting work
- Currently: Learning systems programming";

const TECH_STACK: &str = "\
TECHNICAL SKILLS

Frontend:
- React, TypeScript
- Tailwind CSS

Backend:
- Rust, Node.js
- PostgreSQL, Redis

Tools:
- Git, Docker, Linux
- Figma";

const EDUCATION: &str = "\
EDUCATION

B.Sc. Computer Science
- Focus on software engineering and networks
- Final project: a toy operating system shell

Certifications:
- Cloud fundamentals
- Frontend developer track";

const HOBBIES: &str = "\
AWAY FROM THE KEYBOARD...

1. Photography: city streets at night.
2. Games: strategy and long RPGs.
3. Reading: science fiction, engineering blogs.
4. Coffee: still chasing the perfect pour-over.";

const COMMERCE_README: &str = "\
PROJECT: STOREFRONT

A full-stack shop with live inventory and checkout.
Features:
- Real-time stock updates
- Payment processing
- Admin dashboard";

const TASKS_README: &str = "\
PROJECT: FOCUS TASKS

A to-do list that orders your day by urgency and effort.
Tech: React, Python, language-model ranking.";

/// The synthetic root with both drives underneath it.
pub fn portfolio_catalog() -> FileSystemNode {
    let users = FileSystemNode::folder(
        USERS_ID,
        "Users",
        vec![
            FileSystemNode::text("about", "About_Me.txt", ABOUT_ME),
            FileSystemNode::image("profile-pic", "Profile_Pic.jpg", "/images/profile.jpg"),
            FileSystemNode::text("skills", "Tech_Stack.txt", TECH_STACK),
            FileSystemNode::text("education", "Education.txt", EDUCATION),
            FileSystemNode::text("hobbies", "Hobbies.txt", HOBBIES),
        ],
    )
    .with_icon(IconKey::User);

    let music = FileSystemNode::folder(
        MUSIC_ID,
        "Musics",
        vec![FileSystemNode::audio(
            "song-1",
            "Evening Walk.mp3",
            "/music/evening-walk.mp3",
        )],
    )
    .with_icon(IconKey::Music);

    let commerce = FileSystemNode::folder(
        "proj-1",
        "E-Commerce Platform",
        vec![
            FileSystemNode::text("p1-readme", "README.txt", COMMERCE_README),
            FileSystemNode::link("p1-live", "Live Demo", "https://example.com"),
            FileSystemNode::link("p1-repo", "GitHub Repo", "https://github.com")
                .with_icon(IconKey::GitHub),
        ],
    );

    let tasks = FileSystemNode::folder(
        "proj-2",
        "AI Task Manager",
        vec![
            FileSystemNode::text("p2-readme", "README.txt", TASKS_README),
            FileSystemNode::link("p2-repo", "Source Code", "https://github.com")
                .with_icon(IconKey::GitHub),
        ],
    );

    FileSystemNode::folder(
        ROOT_ID,
        "This PC",
        vec![
            FileSystemNode::disk(SYSTEM_DRIVE_ID, "C:", "System", vec![users, music]),
            FileSystemNode::disk(PROJECTS_DRIVE_ID, "D:", "Projects", vec![commerce, tasks]),
        ],
    )
    .with_icon(IconKey::Computer)
}
