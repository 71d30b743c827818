//! Default catalog entries

use crate::skill::Skill;

/// The entries a freshly reset catalog starts with.
pub fn default_skills() -> Vec<Skill> {
    vec![
        Skill::new("go")
            .with_name("Go")
            .with_description(
                "Go is a statically typed, compiled programming language designed at Google.",
            )
            .with_logo("https://upload.wikimedia.org/wikipedia/commons/0/05/Go_Logo_Blue.svg")
            .with_tags(["programming language", "system"]),
        Skill::new("nodejs")
            .with_name("Node.js")
            .with_description(
                "Node.js is an open-source, cross-platform, JavaScript runtime environment that executes JavaScript code outside of a browser.",
            )
            .with_logo("https://upload.wikimedia.org/wikipedia/commons/d/d9/Node.js_logo.svg")
            .with_tags(["runtime", "javascript"]),
    ]
}
